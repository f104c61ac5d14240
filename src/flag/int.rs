use super::{Flag, FlagError};
use std::any::Any;
use tracing::debug;

/// A flag holding a base-10 integer. Unlike [`StringFlag`](super::StringFlag), it is only read
/// from the command line.
#[derive(Debug, Clone)]
pub struct IntFlag {
    name: &'static str,
    alias: Option<&'static str>,
    help: &'static str,
    value: i64,
}

impl IntFlag {
    /// Defines a new flag with a default value of `0`
    pub fn new(name: &'static str, help: &'static str) -> Self {
        IntFlag {
            name,
            alias: None,
            help,
            value: 0,
        }
    }

    /// Attaches an alias to this flag
    pub fn add_alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Sets the value kept when the flag is not given
    pub fn with_default(mut self, value: i64) -> Self {
        self.value = value;
        self
    }

    /// The parsed value, or the default if the flag was not loaded
    pub fn value(&self) -> i64 {
        self.value
    }
}

impl Flag for IntFlag {
    fn name(&self) -> &str {
        self.name
    }

    fn alias(&self) -> Option<&str> {
        self.alias
    }

    fn description(&self) -> String {
        self.help.to_string()
    }

    fn load(&mut self, found: bool, value: Option<&str>) -> Result<bool, FlagError> {
        if !found {
            return Ok(false);
        }

        let Some(raw) = value else {
            return Err(FlagError::FlagMissingValue {
                flag: self.name.to_string(),
            });
        };

        self.value = raw.parse::<i64>()?;
        debug!(flag = self.name, value = self.value, "loaded int flag");
        Ok(true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_keeps_the_default() {
        let mut flag = IntFlag::new("count", "").with_default(5);
        assert!(!flag.load(false, None).unwrap());
        assert_eq!(flag.value(), 5);
    }

    #[test]
    fn parses_the_value() {
        let mut flag = IntFlag::new("count", "").with_default(5);
        assert!(flag.load(true, Some("-12")).unwrap());
        assert_eq!(flag.value(), -12);
    }

    #[test]
    fn missing_value() {
        let mut flag = IntFlag::new("count", "");
        let err = flag.load(true, None).unwrap_err();
        assert!(matches!(err, FlagError::FlagMissingValue { .. }));
        assert_eq!(err.to_string(), "flag count is missing a value");
    }

    #[test]
    fn parse_failure_keeps_the_default() {
        let mut flag = IntFlag::new("count", "").with_default(5);
        let err = flag.load(true, Some("notanumber")).unwrap_err();
        assert!(matches!(err, FlagError::InvalidInt(_)));
        assert!(err.to_string().starts_with("parsing int: "));
        assert_eq!(flag.value(), 5);
    }
}
