use std::any::Any;
use std::fmt;
use std::num::ParseIntError;

mod boolean;
mod int;
mod json;
mod string;

pub use boolean::BoolFlag;
pub use int::IntFlag;
pub use json::JsonFlag;
pub use string::StringFlag;

/// A command line flag.
///
/// Flags are expected on the command line in one of these forms:
/// ```text
/// --flag
/// --flag=value
/// --flag='value'
/// --flag="value"
/// ```
/// or the same using the alias (`-f`, `-f=value`, ...).
///
/// The included kinds ([`BoolFlag`], [`StringFlag`], [`IntFlag`], [`JsonFlag`]) should cover
/// most needs. Other kinds can be added by implementing this trait.
pub trait Flag {
    /// The long name, matched as `--name`
    fn name(&self) -> &str;

    /// The short name, matched as `-alias`
    fn alias(&self) -> Option<&str>;

    /// Text shown next to the flag in the help output
    fn description(&self) -> String;

    /// Loads the flag. `found` tells whether the flag was on the command line and `value` holds
    /// the value given with it, if any.
    ///
    /// Returns `Ok(true)` when the flag ended up with a value (this is what makes a required
    /// flag satisfied) and `Ok(false)` when it did not. An error means the flag was present but
    /// unusable. Implementations are free to consult other sources, such as environment
    /// variables, when `found` is false.
    fn load(&mut self, found: bool, value: Option<&str>) -> Result<bool, FlagError>;

    /// Gives actions access to the concrete flag after dispatch
    fn as_any(&self) -> &dyn Any;
}

impl fmt::Debug for dyn Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("name", &self.name())
            .field("alias", &self.alias())
            .finish()
    }
}

/// Where a flag value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Args,
    Env,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Args => write!(f, "args"),
            ValueSource::Env => write!(f, "env"),
        }
    }
}

/// The ways a single flag can fail to load
#[derive(Debug, thiserror::Error)]
pub enum FlagError {
    #[error("flag '{flag}' found: '{token}' but no value provided")]
    EmptyValue { flag: String, token: String },
    #[error("no value provided")]
    MissingValue,
    #[error("flag {flag} is missing a value")]
    FlagMissingValue { flag: String },
    #[error("'{value}' is not an accepted value")]
    NotAccepted { value: String },
    #[error("parsing int: {0}")]
    InvalidInt(#[from] ParseIntError),
    #[error("invalid json: {source}, loaded from {origin}: '{raw}'")]
    InvalidJson {
        source: serde_json::Error,
        origin: ValueSource,
        raw: String,
    },
    #[error("{0}")]
    Custom(String),
}

/// Reads a flag's environment variable. Unset, empty and non-unicode values all count as absent.
pub(crate) fn read_env(var: Option<&str>) -> Option<String> {
    let var = var?;
    std::env::var(var).ok().filter(|v| !v.is_empty())
}

pub(crate) fn describe(description: &str, env_var: Option<&str>) -> String {
    let mut desc = description.to_string();
    if let Some(var) = env_var {
        if !desc.is_empty() {
            desc.push('\n');
        }
        desc.push_str("> env var: ");
        desc.push_str(var);
    }
    desc
}
