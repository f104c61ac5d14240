use super::{Flag, FlagError};
use std::any::Any;

/// A presence-only flag: `true` when given on the command line, `false` otherwise
#[derive(Debug, Clone)]
pub struct BoolFlag {
    name: &'static str,
    alias: Option<&'static str>,
    help: &'static str,
    value: bool,
}

impl BoolFlag {
    /// Defines a new flag
    pub fn new(name: &'static str, help: &'static str) -> Self {
        BoolFlag {
            name,
            alias: None,
            help,
            value: false,
        }
    }

    /// Attaches an alias to this flag
    pub fn add_alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Whether the flag was on the command line
    pub fn value(&self) -> bool {
        self.value
    }
}

impl Flag for BoolFlag {
    fn name(&self) -> &str {
        self.name
    }

    fn alias(&self) -> Option<&str> {
        self.alias
    }

    fn description(&self) -> String {
        self.help.to_string()
    }

    fn load(&mut self, found: bool, _value: Option<&str>) -> Result<bool, FlagError> {
        self.value = found;
        Ok(found)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
