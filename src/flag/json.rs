use super::{describe, read_env, Flag, FlagError, ValueSource};
use serde::de::DeserializeOwned;
use std::any::Any;
use tracing::debug;

/// A flag whose value is JSON decoded into `T`, taken from the command line or, failing that,
/// from an environment variable
#[derive(Debug, Clone)]
pub struct JsonFlag<T> {
    name: &'static str,
    alias: Option<&'static str>,
    help: &'static str,
    env_var: Option<&'static str>,
    value: T,
}

impl<T: Default> JsonFlag<T> {
    /// Defines a new flag with `T::default()` as its default value
    pub fn new(name: &'static str, help: &'static str) -> Self {
        JsonFlag {
            name,
            alias: None,
            help,
            env_var: None,
            value: T::default(),
        }
    }
}

impl<T> JsonFlag<T> {
    /// Attaches an alias to this flag
    pub fn add_alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Reads the flag from `var` when it is not on the command line
    pub fn add_env_var(mut self, var: &'static str) -> Self {
        self.env_var = Some(var);
        self
    }

    /// Sets the value kept when the flag is given nowhere
    pub fn with_default(mut self, value: T) -> Self {
        self.value = value;
        self
    }

    /// The decoded value, or the default if the flag was given nowhere
    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T: DeserializeOwned> JsonFlag<T> {
    fn decode(&mut self, raw: &str, origin: ValueSource) -> Result<bool, FlagError> {
        self.value = serde_json::from_str(raw).map_err(|source| FlagError::InvalidJson {
            source,
            origin,
            raw: raw.to_string(),
        })?;
        debug!(flag = self.name, %origin, "loaded json flag");
        Ok(true)
    }
}

impl<T: DeserializeOwned + 'static> Flag for JsonFlag<T> {
    fn name(&self) -> &str {
        self.name
    }

    fn alias(&self) -> Option<&str> {
        self.alias
    }

    fn description(&self) -> String {
        describe(self.help, self.env_var)
    }

    fn load(&mut self, found: bool, value: Option<&str>) -> Result<bool, FlagError> {
        if found {
            let Some(raw) = value else {
                return Err(FlagError::MissingValue);
            };
            return self.decode(raw, ValueSource::Args);
        }

        match read_env(self.env_var) {
            Some(raw) => self.decode(&raw, ValueSource::Env),
            None => Ok(false),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
