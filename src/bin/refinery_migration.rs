//! Schema migration runner for the postgres backend.
//!
//! Reads the same `DB_CONN_STR` the server uses (from `.env.local` when
//! present), applies any pending embedded migrations, and logs what ran.

use std::env;
use std::path::Path;

use anyhow::{Context, Error};
use log::{info, warn};
use tokio_postgres::NoTls;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("src/server/database/migrations");
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let dotenv = Path::new(".env.local");
    if dotenv.exists() {
        dotenvy::from_path(dotenv).context("failed to load .env.local")?;
    }
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let conn_str = env::var("DB_CONN_STR")
        .context("DB_CONN_STR must point at the database to migrate")?;
    let applied = migrate(&conn_str).await?;
    info!("migration complete, {applied} applied");
    Ok(())
}

async fn migrate(conn_str: &str) -> Result<usize, Error> {
    let (mut client, connection) = tokio_postgres::connect(conn_str, NoTls)
        .await
        .context("failed to open a migration connection")?;
    let driver = tokio::spawn(connection);

    let report = embedded::migrations::runner()
        .run_async(&mut client)
        .await
        .context("migration run failed")?;
    for migration in report.applied_migrations() {
        info!("applied {migration}");
    }
    let applied = report.applied_migrations().len();

    // dropping the client ends the connection task
    drop(client);
    if let Err(e) = driver.await.context("connection driver panicked")? {
        warn!("connection closed with error, {e}");
    }
    Ok(applied)
}
