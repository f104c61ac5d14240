use flagtree::{Command, IntFlag, JsonFlag, StringFlag};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Deserialize)]
struct Person {
    name: String,
    age: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let database = Command::new(
        "database",
        "Manage the database. (Demonstrates usage of a required flag)",
    )
    .add_alias("db")
    .add_required_flag(
        StringFlag::new("db-conn", "Database connection string").add_env_var("DB_CONN"),
    )
    .set_action(|inv| {
        tracing::info!("Database things");
        tracing::info!("Connection string: {}", inv.string("db-conn").unwrap_or_default());
        Ok(())
    });

    let hello = Command::new(
        "hello",
        "Say hello to <name> a number of times. (Demonstrates usage of an optional flag and named-positional arguments)",
    )
    .add_optional_flag(IntFlag::new("count", "").add_alias("n").with_default(5))
    .add_arg("name")
    .set_action(|inv| {
        let name = inv.arg("name").unwrap_or_default();
        for i in 0..inv.int("count").unwrap_or(5) {
            println!("Hello {name} {i}");
        }
        Ok(())
    });

    let person = Command::new(
        "person",
        "Print the name and age of a person. (Demonstrates usage of a JSON flag)",
    )
    .add_required_flag(JsonFlag::<Person>::new("person", "A person in JSON format"))
    .set_action(|inv| {
        if let Some(person) = inv.json::<Person>("person") {
            tracing::info!("Person name: {}", person.name);
            tracing::info!("Person age: {}", person.age);
        }
        Ok(())
    });

    let mut app = Command::new("cli", "An example CLI demonstrating different flag types")
        .add_command(database)
        .add_command(hello)
        .add_command(person);

    app.run();
}
