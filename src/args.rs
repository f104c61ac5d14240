use itertools::Itertools;
use std::collections::HashMap;

/// The arguments left over for a single command once sub-command matching is done, split into
/// positional values and flag-like tokens
#[derive(Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct Args<'a> {
    pub positionals: Vec<&'a str>,
    pub flags: Vec<&'a str>,
}

impl<'a> Args<'a> {
    /// Splits `tokens` into positionals and flag tokens. Anything starting with `-` is a flag
    /// token. Both lists keep the order the tokens were given in.
    pub fn split<S: AsRef<str>>(tokens: &'a [S]) -> Args<'a> {
        let (flags, positionals) = tokens
            .iter()
            .map(|t| t.as_ref())
            .partition_map(|t| {
                if t.starts_with('-') {
                    itertools::Either::Left(t)
                } else {
                    itertools::Either::Right(t)
                }
            });

        Args { positionals, flags }
    }

    /// Binds positionals to `names` by index.
    ///
    /// Names without a matching positional are left out of the map. Positionals beyond the
    /// declared names are dropped.
    pub fn bind(&self, names: &[&str]) -> HashMap<String, String> {
        names
            .iter()
            .zip(&self.positionals)
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_args() {
        let tokens: [&str; 0] = [];
        let args = Args::split(&tokens);
        assert!(args.positionals.is_empty());
        assert!(args.flags.is_empty());
    }

    #[test]
    fn flags_and_positionals_keep_their_order() {
        let tokens = ["alice", "--verbose", "bob", "-n=3", "carol", "--name='x'"];
        let args = Args::split(&tokens);

        assert_eq!(args.positionals, ["alice", "bob", "carol"]);
        assert_eq!(args.flags, ["--verbose", "-n=3", "--name='x'"]);
    }

    #[test]
    fn splitting_positionals_again_changes_nothing() {
        let tokens = vec![
            String::from("one"),
            String::from("--two"),
            String::from("three"),
        ];
        let first = Args::split(&tokens);
        let again = Args::split(&first.positionals);

        assert_eq!(again.positionals, first.positionals);
        assert!(again.flags.is_empty());
    }

    #[test]
    fn bind_leaves_missing_names_unbound() {
        let tokens = ["alice"];
        let bound = Args::split(&tokens).bind(&["name", "email"]);

        assert_eq!(
            bound,
            HashMap::from([(String::from("name"), String::from("alice"))])
        );
        assert!(!bound.contains_key("email"));
    }

    #[test]
    fn bind_ignores_extra_positionals() {
        let tokens = ["alice", "extra", "more"];
        let bound = Args::split(&tokens).bind(&["name"]);

        assert_eq!(bound.len(), 1);
        assert_eq!(bound["name"], "alice");
    }
}
