use flagtree::Command;

fn main() {
    let mut app = Command::new("cli", "An example CLI").add_command(
        Command::new("create", "Create a new user")
            .add_arg("name")
            .set_action(|inv| {
                println!("Creating user: {}", inv.arg("name").unwrap_or_default());
                Ok(())
            }),
    );

    app.run();
}
