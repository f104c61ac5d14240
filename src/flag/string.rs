use super::{describe, read_env, Flag, FlagError};
use itertools::Itertools;
use std::any::Any;
use tracing::debug;

/// A flag holding text, taken from the command line or, failing that, from an environment
/// variable. If accepted values are set, the value must be one of them.
#[derive(Debug, Clone)]
pub struct StringFlag {
    name: &'static str,
    alias: Option<&'static str>,
    help: &'static str,
    env_var: Option<&'static str>,
    accepted_values: Vec<&'static str>,
    value: String,
}

impl StringFlag {
    /// Defines a new flag with an empty default value
    pub fn new(name: &'static str, help: &'static str) -> Self {
        StringFlag {
            name,
            alias: None,
            help,
            env_var: None,
            accepted_values: vec![],
            value: String::new(),
        }
    }

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

    /// Restricts the flag to the given values
    pub fn add_accepted_values<I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        self.accepted_values.extend(values);
        self
    }

    /// Sets the value kept when the flag is given nowhere
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// The loaded value, or the default if the flag was given nowhere
    pub fn value(&self) -> &str {
        &self.value
    }

    fn validate(&self) -> Result<(), FlagError> {
        if self.accepted_values.is_empty() {
            return Ok(());
        }

        if self.accepted_values.iter().any(|v| *v == self.value) {
            return Ok(());
        }

        Err(FlagError::NotAccepted {
            value: self.value.clone(),
        })
    }
}

impl Flag for StringFlag {
    fn name(&self) -> &str {
        self.name
    }

    fn alias(&self) -> Option<&str> {
        self.alias
    }

    fn description(&self) -> String {
        let mut desc = describe(self.help, self.env_var);

        if !self.accepted_values.is_empty() {
            desc.push_str(&format!(
                "\n> accepted values: [{}]",
                self.accepted_values.iter().join(", ")
            ));
        }

        desc
    }

    // The flag counts as loaded even when validation fails; the error is what callers check.
    fn load(&mut self, found: bool, value: Option<&str>) -> Result<bool, FlagError> {
        if found {
            let Some(value) = value else {
                return Err(FlagError::MissingValue);
            };

            self.value = value.to_string();
            debug!(flag = self.name, "loaded string flag from args");
            return self.validate().map(|_| true);
        }

        if let Some(value) = read_env(self.env_var) {
            self.value = value;
            debug!(flag = self.name, env_var = self.env_var, "loaded string flag from env");
            return self.validate().map(|_| true);
        }

        Ok(false)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
