use crate::args::Args;
use crate::flag::{BoolFlag, Flag, FlagError, IntFlag, JsonFlag, StringFlag};
use crate::parser;
use itertools::Itertools;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;
use std::io::{self, stderr, stdout, Write};
use tracing::debug;

pub mod help;

/// Error type actions may return
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

type Action = Box<dyn FnMut(&Invocation<'_>) -> Result<(), BoxError>>;

// Tokens that print the help of the matched command instead of running it
const HELP_TOKENS: [&str; 3] = ["-h", "-help", "--help"];

/// A problem with one flag of the matched command
#[derive(Debug, thiserror::Error)]
pub enum FlagFailure {
    #[error("load flag from args: '{flag}': {source}")]
    Scan { flag: String, source: FlagError },
    #[error("loading flag: '{flag}': {source}")]
    Load { flag: String, source: FlagError },
    #[error("flag: '{flag}' not provided")]
    MissingRequired { flag: String },
}

/// A variant of this enum is returned when dispatching the command line fails
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Every flag problem found for the matched command
    #[error("{}", flag_errors_message(.0))]
    Flags(Vec<FlagFailure>),
    #[error("{0}")]
    Action(BoxError),
    #[error("could not write help\n{0}")]
    Io(#[from] io::Error),
    /// An argument that is not valid unicode, shown with invalid bytes escaped
    #[error("invalid utf8 in argument: {0:?}")]
    NonUnicode(OsString),
}

// Converts process arguments, failing on the first one that is not valid unicode
fn unicode_args<I, T>(items: I) -> Result<Vec<String>, DispatchError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    items
        .into_iter()
        .map(|arg| arg.into().into_string().map_err(DispatchError::NonUnicode))
        .collect()
}

fn flag_errors_message(failures: &[FlagFailure]) -> String {
    if failures.len() == 1 {
        return format!("cmd flag error: {}", failures[0]);
    }
    format!("cmd flag errors: \n\t{}", failures.iter().join("\n\t"))
}

/// How a successful dispatch ended. Both variants carry the names of the commands from the root
/// to the one that was matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Help { path: Vec<String> },
    Action { path: Vec<String> },
}

/// What an action gets to see: the positional arguments bound by name, and the flags of the
/// matched command after loading
pub struct Invocation<'a> {
    path: &'a [String],
    args: HashMap<String, String>,
    flags: Vec<&'a dyn Flag>,
}

impl<'a> Invocation<'a> {
    /// Names of the commands from the root to the one being run
    pub fn path(&self) -> &[String] {
        self.path
    }

    /// Returns the positional argument bound to `name`, if one was given
    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args.get(name).map(String::as_str)
    }

    /// All bound positional arguments, keyed by their declared names
    pub fn args(&self) -> &HashMap<String, String> {
        &self.args
    }

    /// Returns the flag called `name` if the command declares one of type `F`
    pub fn flag<F: Flag + 'static>(&self, name: &str) -> Option<&F> {
        self.flags
            .iter()
            .find(|f| f.name() == name)
            .and_then(|f| f.as_any().downcast_ref::<F>())
    }

    /// Returns the value of the [`StringFlag`] called `name`
    pub fn string(&self, name: &str) -> Option<&str> {
        self.flag::<StringFlag>(name).map(StringFlag::value)
    }

    /// Returns the value of the [`IntFlag`] called `name`
    pub fn int(&self, name: &str) -> Option<i64> {
        self.flag::<IntFlag>(name).map(IntFlag::value)
    }

    /// `false` unless the command declares a [`BoolFlag`] called `name` that was given
    pub fn bool(&self, name: &str) -> bool {
        self.flag::<BoolFlag>(name).is_some_and(BoolFlag::value)
    }

    /// Returns the decoded value of the [`JsonFlag`] called `name`
    pub fn json<T: DeserializeOwned + 'static>(&self, name: &str) -> Option<&T> {
        self.flag::<JsonFlag<T>>(name).map(JsonFlag::value)
    }
}

/// A node in the command tree.
///
/// The root of the tree is the application itself; its name is used as the program name in
/// usage lines.
pub struct Command {
    name: &'static str,
    alias: Option<&'static str>,
    help: &'static str,

    commands: Vec<Command>,
    required_flags: Vec<Box<dyn Flag>>,
    optional_flags: Vec<Box<dyn Flag>>,
    args: Vec<&'static str>,
    action: Option<Action>,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("alias", &self.alias)
            .field("commands", &self.commands)
            .field("required_flags", &self.required_flags)
            .field("optional_flags", &self.optional_flags)
            .field("args", &self.args)
            .field("action", &self.action.is_some())
            .finish()
    }
}

impl Command {
    /// Creates a new instance.
    ///
    /// This structure can be used to represent both root and sub-commands.
    pub fn new(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            alias: None,
            help,
            commands: vec![],
            required_flags: vec![],
            optional_flags: vec![],
            args: vec![],
            action: None,
        }
    }

    /// Returns the primary name for this command
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Attaches an alias to this command.
    ///
    /// Attaching an alias to the root command has no visible effect
    pub fn add_alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Defines a subcommand
    pub fn add_command(mut self, subcommand: Command) -> Self {
        self.commands.push(subcommand);
        self
    }

    /// Defines a flag that must be given for the action to run.
    ///
    /// `--help`, `-help` and `-h` always print help, so a flag named `help` (or aliased `h`) can
    /// never be loaded from the command line.
    pub fn add_required_flag(mut self, flag: impl Flag + 'static) -> Self {
        self.required_flags.push(Box::new(flag));
        self
    }

    /// Defines a flag that keeps its default value when not given.
    ///
    /// `--help`, `-help` and `-h` always print help, so a flag named `help` (or aliased `h`) can
    /// never be loaded from the command line.
    pub fn add_optional_flag(mut self, flag: impl Flag + 'static) -> Self {
        self.optional_flags.push(Box::new(flag));
        self
    }

    /// Names the next positional argument
    pub fn add_arg(mut self, name: &'static str) -> Self {
        self.args.push(name);
        self
    }

    /// Sets the function run when this command is matched
    pub fn set_action<F>(mut self, action: F) -> Self
    where
        F: FnMut(&Invocation<'_>) -> Result<(), BoxError> + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    /// Returns a reference to a subcommand with the given name or alias (case-insensitive)
    pub fn get_subcommand(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.matches(name))
    }

    fn matches(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        token == self.name.to_lowercase()
            || self
                .alias
                .filter(|a| !a.is_empty())
                .is_some_and(|a| token == a.to_lowercase())
    }

    /// Runs the command line of the current process, printing help to stdout.
    ///
    /// On failure the error is printed to stderr and the process exits with status 1.
    pub fn run(&mut self) {
        self.run_from(std::env::args_os());
    }

    /// Like [`run`](Command::run), but for `items` in the same format that
    /// [args_os()](std::env::args_os) returns (i.e. the name of the executable is first)
    pub fn run_from<I, T>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let code = self.run_with(items, stdout().lock(), stderr().lock());
        if code != 0 {
            std::process::exit(code);
        }
    }

    /// Dispatches `items` (executable name first), writing help to `out` and errors to `err`.
    ///
    /// Returns the process exit status: `0` when help was shown or the action succeeded, `1`
    /// otherwise.
    pub fn run_with<I, T>(&mut self, items: I, out: impl Write, mut err: impl Write) -> i32
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let result = unicode_args(items.into_iter().skip(1))
            .and_then(|tokens| self.dispatch(tokens, out));

        match result {
            Ok(_) => 0,
            Err(e) => {
                debug!(error = %e, "dispatch failed");
                // Nothing left to report to if stderr is gone
                let _ = writeln!(err, "ERROR: {e}");
                1
            }
        }
    }

    /// Matches `tokens` (the command line without the executable name) against the tree and
    /// runs the action of the matched command. Help is written to `out`.
    pub fn dispatch<I, T>(
        &mut self,
        tokens: I,
        mut out: impl Write,
    ) -> Result<Outcome, DispatchError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let tokens = tokens.into_iter().map(Into::into).collect::<Vec<String>>();
        let path = vec![self.name.to_string()];
        self.resolve(&tokens, path, &mut out)
    }

    fn resolve<W: Write>(
        &mut self,
        tokens: &[String],
        mut path: Vec<String>,
        out: &mut W,
    ) -> Result<Outcome, DispatchError> {
        if let Some((first, rest)) = tokens.split_first() {
            if let Some(sub) = self.commands.iter_mut().find(|c| c.matches(first)) {
                debug!(command = sub.name, token = %first, "matched sub-command");
                path.push(sub.name.to_string());
                return sub.resolve(rest, path, out);
            }
        }

        if tokens.is_empty() && self.action.is_none() {
            return self.show_help(path, out);
        }

        if tokens.iter().any(|t| HELP_TOKENS.contains(&t.as_str())) {
            debug!(command = self.name, "help requested");
            return self.show_help(path, out);
        }

        let args = Args::split(tokens);

        let mut failures = vec![];
        for flag in self.required_flags.iter_mut() {
            match load_flag(&mut **flag, &args.flags) {
                Ok(true) => {}
                Ok(false) => failures.push(FlagFailure::MissingRequired {
                    flag: flag.name().to_string(),
                }),
                Err(failure) => failures.push(failure),
            }
        }

        for flag in self.optional_flags.iter_mut() {
            if let Err(failure) = load_flag(&mut **flag, &args.flags) {
                failures.push(failure);
            }
        }

        if !failures.is_empty() {
            debug!(command = self.name, failures = failures.len(), "flags failed to load");
            help::write_help(&mut *out, self, &path)?;
            return Err(DispatchError::Flags(failures));
        }

        let Some(action) = self.action.as_mut() else {
            return self.show_help(path, out);
        };

        let invocation = Invocation {
            path: &path,
            args: args.bind(&self.args),
            flags: self
                .required_flags
                .iter()
                .chain(&self.optional_flags)
                .map(|f| &**f as &dyn Flag)
                .collect(),
        };

        debug!(command = self.name, "running action");
        let result = action(&invocation);
        drop(invocation);
        result.map_err(DispatchError::Action)?;

        Ok(Outcome::Action { path })
    }

    fn show_help<W: Write>(
        &self,
        path: Vec<String>,
        out: &mut W,
    ) -> Result<Outcome, DispatchError> {
        help::write_help(&mut *out, self, &path)?;
        Ok(Outcome::Help { path })
    }
}

fn load_flag(flag: &mut dyn Flag, flag_tokens: &[&str]) -> Result<bool, FlagFailure> {
    let found = parser::scan(flag.name(), flag.alias(), flag_tokens).map_err(|source| {
        FlagFailure::Scan {
            flag: flag.name().to_string(),
            source,
        }
    })?;

    flag.load(found.is_found(), found.value())
        .map_err(|source| FlagFailure::Load {
            flag: flag.name().to_string(),
            source,
        })
}
