//! Step definitions for the behavioural suites.

mod params_steps;
mod staging_steps;

pub use params_steps::ParamsWorld;
pub use staging_steps::StagingWorld;
