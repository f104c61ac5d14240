use crate::flag::FlagError;
use tracing::trace;

/// Where, if anywhere, a flag showed up among the flag tokens of a command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Occurrence {
    /// The flag is not on the command line
    Absent,
    /// The flag is present without a value (e.g. `--verbose`)
    Bare,
    /// The flag is present with a value (e.g. `--count=3`)
    Valued(String),
}

impl Occurrence {
    /// Returns true unless the flag is [`Absent`](Occurrence::Absent)
    pub fn is_found(&self) -> bool {
        !matches!(self, Occurrence::Absent)
    }

    /// Returns the value given with the flag, with surrounding quotes removed
    pub fn value(&self) -> Option<&str> {
        match self {
            Occurrence::Valued(v) => Some(v),
            _ => None,
        }
    }
}

/// Looks for a flag among `flag_tokens`, first as `--name` and then, if that finds nothing, as
/// `-alias`.
///
/// Accepted shapes are `--name`, `--name=value`, `--name='value'` and `--name="value"` (and the
/// same for the alias). The first matching token wins. A token like `--name=` is reported as an
/// error.
pub fn scan(
    name: &str,
    alias: Option<&str>,
    flag_tokens: &[&str],
) -> Result<Occurrence, FlagError> {
    if !name.is_empty() {
        let found = scan_formatted(&format!("--{name}"), flag_tokens)?;
        if found.is_found() {
            return Ok(found);
        }
    }

    if let Some(alias) = alias.filter(|a| !a.is_empty()) {
        return scan_formatted(&format!("-{alias}"), flag_tokens);
    }

    Ok(Occurrence::Absent)
}

// `flag` is the name or alias with its dashes, e.g. `--flag` or `-f`
fn scan_formatted(flag: &str, flag_tokens: &[&str]) -> Result<Occurrence, FlagError> {
    for token in flag_tokens {
        if *token == flag {
            trace!(flag, "flag present without a value");
            return Ok(Occurrence::Bare);
        }

        // e.g. --flag=value
        //             ^^^^^
        let Some(value) = token
            .strip_prefix(flag)
            .and_then(|rest| rest.strip_prefix('='))
        else {
            continue;
        };

        if value.is_empty() {
            return Err(FlagError::EmptyValue {
                flag: flag.to_string(),
                token: token.to_string(),
            });
        }

        trace!(flag, value, "flag present with a value");
        return Ok(Occurrence::Valued(unquote(value).to_string()));
    }

    Ok(Occurrence::Absent)
}

// Strips one layer of matching single or double quotes
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_flag_by_name() {
        let found = scan("key", None, &["foo", "--key", "bar"]).unwrap();
        assert_eq!(found, Occurrence::Bare);
        assert!(found.is_found());
        assert_eq!(found.value(), None);
    }

    #[test]
    fn flag_with_value() {
        let found = scan("key", None, &["foo", "--key=value", "bar"]).unwrap();
        assert_eq!(found.value(), Some("value"));
    }

    #[test]
    fn quotes_are_stripped() {
        for token in ["--key='value'", "--key=\"value\""] {
            let found = scan("key", None, &["foo", token, "bar"]).unwrap();
            assert_eq!(found.value(), Some("value"), "token: {token}");
        }
    }

    #[test]
    fn mismatched_quotes_are_kept() {
        let found = scan("key", None, &["--key='value\""]).unwrap();
        assert_eq!(found.value(), Some("'value\""));

        let found = scan("key", None, &["--key=\""]).unwrap();
        assert_eq!(found.value(), Some("\""));
    }

    #[test]
    fn only_one_layer_of_quotes_is_stripped() {
        let found = scan("key", None, &["--key=\"'value'\""]).unwrap();
        assert_eq!(found.value(), Some("'value'"));
    }

    #[test]
    fn alias_match() {
        let found = scan("", Some("v"), &["foo", "--key", "bar", "-v"]).unwrap();
        assert_eq!(found, Occurrence::Bare);
    }

    #[test]
    fn alias_with_value() {
        let found = scan("count", Some("n"), &["-n=5"]).unwrap();
        assert_eq!(found.value(), Some("5"));
    }

    #[test]
    fn name_is_tried_before_alias() {
        let found = scan("count", Some("n"), &["-n=1", "--count=2"]).unwrap();
        assert_eq!(found.value(), Some("2"));
    }

    #[test]
    fn first_match_wins() {
        let found = scan("key", None, &["--key=first", "--key=second"]).unwrap();
        assert_eq!(found.value(), Some("first"));
    }

    #[test]
    fn prefix_of_another_flag_does_not_match() {
        let found = scan("key", None, &["--keys", "--key-file=x"]).unwrap();
        assert_eq!(found, Occurrence::Absent);
    }

    #[test]
    fn not_found() {
        let found = scan("key", Some("k"), &["foo", "--other", "-x"]).unwrap();
        assert_eq!(found, Occurrence::Absent);
        assert!(!found.is_found());
    }

    #[test]
    fn empty_value_is_an_error() {
        let err = scan("key", None, &["--key="]).unwrap_err();
        assert!(matches!(err, FlagError::EmptyValue { .. }));
        assert_eq!(
            err.to_string(),
            "flag '--key' found: '--key=' but no value provided"
        );
    }
}
