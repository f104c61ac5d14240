// cli
//     user
//         create
//         list
//     events
//         create
//         list
//         delete
use flagtree::Command;

fn user_command() -> Command {
    Command::new("user", "Manage users")
        .add_command(
            Command::new("create", "Create a new user")
                .add_arg("name")
                .set_action(|inv| {
                    println!("Creating user: {}", inv.arg("name").unwrap_or_default());
                    Ok(())
                }),
        )
        .add_command(
            Command::new("list", "List all users")
                .add_alias("ls")
                .set_action(|_| {
                    println!("Listing users...");
                    for i in 0..10 {
                        println!("User {i} etc...");
                    }
                    Ok(())
                }),
        )
}

fn events_command() -> Command {
    Command::new("events", "Manage events")
        .add_command(
            Command::new("create", "Create an event")
                .add_arg("name")
                .set_action(|inv| {
                    println!("Creating event: {}", inv.arg("name").unwrap_or_default());
                    Ok(())
                }),
        )
        .add_command(
            Command::new("list", "List all events")
                .add_alias("ls")
                .set_action(|_| {
                    println!("Listing all events");
                    Ok(())
                }),
        )
        .add_command(
            Command::new("delete", "Delete an event")
                .add_arg("id")
                .set_action(|inv| {
                    let Some(id) = inv.arg("id") else {
                        return Err("an event id is required".into());
                    };
                    println!("Deleting event: {id}");
                    Ok(())
                }),
        )
}

fn main() {
    let mut app = Command::new("cli", "Example cli app")
        .add_command(user_command())
        .add_command(events_command());

    app.run();
}
