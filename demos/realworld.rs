// A database management tool as it might run in a CI/CD pipeline. Every command declares the
// flags it needs as required, so nothing runs until they are all present. The actual database
// work is left out.
use anyhow::Context;
use flagtree::{Command, Invocation, JsonFlag, StringFlag};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Clone, Deserialize)]
#[allow(dead_code)]
struct GcpCreds {
    #[serde(rename = "type")]
    kind: String,
    project_id: String,
    private_key_id: String,
    private_key: String,
    client_email: String,
    client_id: String,
    auth_uri: String,
    token_uri: String,
    auth_provider_x509_cert_url: String,
    client_x509_cert_url: String,
}

fn db_conn_flag() -> StringFlag {
    StringFlag::new("db-conn", "Database connection string").add_env_var("DB_CONN")
}

fn gcp_creds_flag() -> JsonFlag<GcpCreds> {
    JsonFlag::new("gcp-creds", "GCP credentials in JSON format").add_env_var("GCP_CREDS")
}

fn bucket_flag() -> StringFlag {
    StringFlag::new("bucket", "GCS bucket to backup and restore from")
        .add_env_var("DB_BACKUP_BUCKET")
}

fn transfer_target(inv: &Invocation<'_>) -> anyhow::Result<(String, String)> {
    let creds = inv
        .json::<GcpCreds>("gcp-creds")
        .context("gcp-creds flag missing")?;
    let bucket = inv.string("bucket").context("bucket flag missing")?;
    Ok((creds.project_id.clone(), bucket.to_string()))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let backup = Command::new("backup", "Create a database backup and upload it to GCS")
        .add_required_flag(db_conn_flag())
        .add_required_flag(gcp_creds_flag())
        .add_required_flag(bucket_flag())
        .set_action(|inv| {
            let (project, bucket) = transfer_target(inv)?;
            tracing::info!(%project, %bucket, "Perform database backup");
            Ok(())
        });

    let restore = Command::new("restore", "Restore database from backup from GCS")
        .add_required_flag(db_conn_flag())
        .add_required_flag(gcp_creds_flag())
        .add_required_flag(bucket_flag())
        .set_action(|inv| {
            let (project, bucket) = transfer_target(inv)?;
            tracing::info!(%project, %bucket, "Perform database restore");
            Ok(())
        });

    let drop_schema = Command::new(
        "drop",
        "drop and recreate public schema - WARNING!!! ALL DATA WILL BE LOST!",
    )
    .add_required_flag(db_conn_flag())
    .set_action(|_| {
        tracing::info!("Perform database drop");
        Ok(())
    });

    let migrate = Command::new("migrate", "run all migrations")
        .add_required_flag(db_conn_flag())
        .set_action(|_| {
            tracing::info!("Perform database migration");
            Ok(())
        });

    let mut app = Command::new(
        "db-cli",
        "cli tool for managing the application database.\nThis tool is used in a CI/CD pipeline as well as for local development.\nFlags are provided with environment variables, but can be overridden with command line flags.",
    )
    .add_command(backup)
    .add_command(restore)
    .add_command(drop_schema)
    .add_command(migrate);

    app.run();
}
