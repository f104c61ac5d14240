use flagtree::{
    BoolFlag, Command, DispatchError, Flag, FlagError, FlagFailure, Outcome, StringFlag,
};
use std::any::Any;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

// A flag kind defined outside the crate: a comma separated list of names
#[derive(Debug, Default)]
struct ListFlag {
    values: Vec<String>,
}

impl Flag for ListFlag {
    fn name(&self) -> &str {
        "tags"
    }

    fn alias(&self) -> Option<&str> {
        Some("t")
    }

    fn description(&self) -> String {
        "Comma separated tags".to_string()
    }

    fn load(&mut self, found: bool, value: Option<&str>) -> Result<bool, FlagError> {
        if !found {
            return Ok(false);
        }
        let value = value.ok_or_else(|| FlagError::Custom("expected a list".to_string()))?;
        self.values = value.split(',').map(String::from).collect();
        Ok(true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn db_cli(log: &Rc<RefCell<Vec<String>>>) -> Command {
    let migrate_log = Rc::clone(log);
    let tag_log = Rc::clone(log);

    Command::new("db-cli", "cli tool for managing the application database")
        .add_command(
            Command::new("migrate", "run all migrations")
                .add_alias("m")
                .add_required_flag(
                    StringFlag::new("db-conn", "Database connection string")
                        .add_env_var("FLAGTREE_IT_DB_CONN"),
                )
                .add_optional_flag(BoolFlag::new("dry-run", "Only print the plan").add_alias("d"))
                .add_arg("target")
                .set_action(move |inv| {
                    migrate_log.borrow_mut().push(format!(
                        "migrate {} to {} dry={}",
                        inv.string("db-conn").unwrap_or_default(),
                        inv.arg("target").unwrap_or("latest"),
                        inv.bool("dry-run"),
                    ));
                    Ok(())
                }),
        )
        .add_command(
            Command::new("tag", "tag the current schema")
                .add_required_flag(ListFlag::default())
                .set_action(move |inv| {
                    let tags = inv.flag::<ListFlag>("tags").map(|f| f.values.join("|"));
                    tag_log.borrow_mut().push(format!("tag {}", tags.unwrap_or_default()));
                    Ok(())
                }),
        )
}

#[test]
fn runs_the_matched_action_once() {
    let log = Rc::default();
    let mut app = db_cli(&log);

    let outcome = app
        .dispatch(["M", "v42", "--db-conn='postgres://x'", "-d"], io::sink())
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Action {
            path: vec!["db-cli".to_string(), "migrate".to_string()]
        }
    );
    assert_eq!(*log.borrow(), ["migrate postgres://x to v42 dry=true"]);
}

#[test]
fn required_flag_from_environment() {
    std::env::set_var("FLAGTREE_IT_DB_CONN", "sqlite://env");
    let log = Rc::default();
    let mut app = db_cli(&log);

    app.dispatch(["migrate"], io::sink()).unwrap();

    assert_eq!(*log.borrow(), ["migrate sqlite://env to latest dry=false"]);
}

#[test]
fn custom_flag_kind() {
    let log = Rc::default();
    let mut app = db_cli(&log);

    app.dispatch(["tag", "-t=a,b,c"], io::sink()).unwrap();
    assert_eq!(*log.borrow(), ["tag a|b|c"]);

    let err = app.dispatch(["tag", "--tags"], io::sink()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "cmd flag error: loading flag: 'tags': expected a list"
    );
}

#[test]
fn flag_errors_print_help_and_skip_the_action() {
    let log: Rc<RefCell<Vec<String>>> = Rc::default();
    let mut app = db_cli(&log);
    let mut out = vec![];

    let err = app.dispatch(["tag"], &mut out).unwrap_err();

    let DispatchError::Flags(failures) = err else {
        panic!("expected flag errors");
    };
    assert!(matches!(
        &failures[..],
        [FlagFailure::MissingRequired { flag }] if flag == "tags"
    ));

    let help = String::from_utf8(out).unwrap();
    assert!(help.contains("Usage:\n    db-cli tag [flags]\n"));
    assert!(help.contains("--tags"));
    assert!(log.borrow().is_empty());
}

#[test]
fn root_help() {
    let log = Rc::default();
    let mut app = db_cli(&log);
    let mut out = vec![];

    let outcome = app.dispatch(Vec::<String>::new(), &mut out).unwrap();

    assert_eq!(
        outcome,
        Outcome::Help {
            path: vec!["db-cli".to_string()]
        }
    );
    let help = String::from_utf8(out).unwrap();
    assert!(help.starts_with("cli tool for managing the application database\n\n"));
    assert!(help.contains("db-cli [command] [flags]"));
    assert!(help.contains("migrate"));
    assert!(help.contains("tag the current schema"));
}

#[test]
fn help_flag_on_a_leaf() {
    let log = Rc::default();
    let mut app = db_cli(&log);
    let mut out = vec![];

    let outcome = app.dispatch(["migrate", "--db-conn=", "-help"], &mut out).unwrap();

    assert!(matches!(outcome, Outcome::Help { .. }));
    let help = String::from_utf8(out).unwrap();
    assert!(help.contains("db-cli migrate <target> [flags]"));
    assert!(help.contains("> env var: FLAGTREE_IT_DB_CONN"));
    assert!(log.borrow().is_empty());
}
