//! Shared types for the cli-project harness.
//!
//! This library defines the parameter model handed to command-line tools
//! under test and the encoding that turns it into an argument vector.

pub mod params;

pub use params::{POSITIONAL_KEY, ParamValue, ProcessParams, process_params_to_args};
