//! A command tree for command line programs
//!
//! A program declares a tree of [`Command`]s, each with required and optional [`Flag`]s and
//! named positional arguments. The process arguments are matched against the tree and the
//! action of the matched command is run.
//!
//! ```text
//! cli user create alice --role=admin -v
//! ```
//!
//! # Syntax
//!
//! - Leading arguments naming a sub-command (or its alias, in any case) select that
//! sub-command. Matching stops at the first argument that names none.
//! - An argument starting with `-` is a flag: `--name`, `--name=value`, `--name='value'`,
//! `--name="value"`, or the same with the alias (`-n`, `-n=value`, ...).
//! - Everything else is a positional argument, bound by position to the names the command
//! declares.
//! - `-h`, `-help` or `--help` anywhere prints the help of the matched command.
//!
//! # Example
//!
//! ```no_run
//! use flagtree::{Command, IntFlag};
//!
//! let mut app = Command::new("cli", "An example CLI").add_command(
//!     Command::new("hello", "Say hello to <name>")
//!         .add_optional_flag(IntFlag::new("count", "Times to say it").add_alias("n"))
//!         .add_arg("name")
//!         .set_action(|inv| {
//!             for _ in 0..inv.int("count").unwrap_or(1) {
//!                 println!("Hello {}", inv.arg("name").unwrap_or("world"));
//!             }
//!             Ok(())
//!         }),
//! );
//!
//! app.run();
//! ```

mod args;
mod command;
mod flag;
mod parser;

pub use args::Args;
pub use command::help::write_help;
pub use command::{BoxError, Command, DispatchError, FlagFailure, Invocation, Outcome};
pub use flag::{BoolFlag, Flag, FlagError, IntFlag, JsonFlag, StringFlag, ValueSource};
pub use parser::{scan, Occurrence};
