//! Process parameters and their command-line encoding.
//!
//! [`ProcessParams`] is an insertion-ordered mapping from flag names to
//! values. [`ProcessParams::to_args`] flattens it into the tokens a spawned
//! process receives: `--key=value` for scalars, one token per element for
//! lists, `--key`/`--no-key` for booleans and raw values for the reserved
//! positional key `_`.

use std::fmt;
use std::num::FpCategory;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Reserved key whose value is emitted as a raw positional token.
pub const POSITIONAL_KEY: &str = "_";

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Encoded as `--key` or `--no-key`.
    Bool(bool),
    /// Integer scalar.
    Int(i64),
    /// Floating point scalar.
    Float(f64),
    /// String scalar.
    Str(String),
    /// Repeated flag, one token per element.
    List(Vec<ParamValue>),
}

impl fmt::Display for ParamValue {
    /// Writes the string form of the value.
    ///
    /// Lists join their elements with `,` so a list used as a positional
    /// value degrades to a single comma-separated token.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write_number(f, *n),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

/// Write `n` the way a JavaScript number converts to a string.
///
/// Integral values drop the fraction, magnitudes from `1e21` upwards or
/// below `1e-6` use exponent form (`1e+21`, `1.5e-7`), and non-finite
/// values print as `NaN`, `Infinity` and `-Infinity`.
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    match n.classify() {
        FpCategory::Nan => return f.write_str("NaN"),
        FpCategory::Infinite if n.is_sign_negative() => return f.write_str("-Infinity"),
        FpCategory::Infinite => return f.write_str("Infinity"),
        FpCategory::Zero => return f.write_str("0"),
        FpCategory::Normal | FpCategory::Subnormal => {}
    }
    if n.is_sign_negative() {
        f.write_str("-")?;
    }
    // `{:e}` yields the shortest digits that round-trip, as `d.ddde<exp>`.
    let sci = format!("{:e}", n.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let len = i32::try_from(digits.len()).unwrap_or(i32::MAX);
    let point = exp + 1;
    let zeros = |count: i32| "0".repeat(usize::try_from(count).unwrap_or(0));

    if (len..=21).contains(&point) {
        write!(f, "{digits}{}", zeros(point - len))
    } else if (1..=21).contains(&point) {
        let (int, frac) = digits.split_at(usize::try_from(point).unwrap_or(0));
        write!(f, "{int}.{frac}")
    } else if (-5..=0).contains(&point) {
        write!(f, "0.{}{digits}", zeros(-point))
    } else {
        let (lead, rest) = digits.split_at(1);
        let sign = if exp < 0 { '-' } else { '+' };
        if rest.is_empty() {
            write!(f, "{lead}e{sign}{}", exp.abs())
        } else {
            write!(f, "{lead}.{rest}e{sign}{}", exp.abs())
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for ParamValue {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

/// Ordered parameters for one process invocation.
///
/// Keys keep the order in which they were first inserted; the target
/// process may care about flag order. Re-inserting a key replaces the value
/// in place.
///
/// # Examples
///
/// ```
/// use cli_project_lib::ProcessParams;
///
/// let params = ProcessParams::new()
///     .positional("run")
///     .with("verbose", true)
///     .with("tags", vec!["a", "b"]);
/// assert_eq!(params.to_args(), ["run", "--verbose", "--tags=a", "--tags=b"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessParams(IndexMap<String, ParamValue>);

impl ProcessParams {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` and return the updated parameters.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set the positional value and return the updated parameters.
    #[must_use]
    pub fn positional(self, value: impl Into<ParamValue>) -> Self {
        self.with(POSITIONAL_KEY, value)
    }

    /// Insert or replace `key`, returning the previous value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overlay `overrides` on a copy of `self`.
    ///
    /// Keys already present keep their position and take the override's
    /// value; new keys are appended in the order `overrides` lists them.
    #[must_use]
    pub fn merged(&self, overrides: &Self) -> Self {
        let mut out = self.clone();
        for (key, value) in overrides.iter() {
            out.insert(key, value.clone());
        }
        out
    }

    /// Flatten the parameters into command-line tokens.
    ///
    /// Keys are not validated or escaped; whatever a key contains ends up in
    /// the emitted flag.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        self.iter()
            .flat_map(|(key, value)| encode_entry(key, value))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for ProcessParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Flatten `params` into command-line tokens.
///
/// Free-function form of [`ProcessParams::to_args`].
#[must_use]
pub fn process_params_to_args(params: &ProcessParams) -> Vec<String> {
    params.to_args()
}

fn encode_entry(key: &str, value: &ParamValue) -> Vec<String> {
    if key == POSITIONAL_KEY {
        return vec![value.to_string()];
    }
    match value {
        ParamValue::List(items) => items.iter().map(|item| format!("--{key}={item}")).collect(),
        ParamValue::Bool(true) => vec![format!("--{key}")],
        ParamValue::Bool(false) => vec![format!("--no-{key}")],
        scalar => vec![format!("--{key}={scalar}")],
    }
}
