//! Embedded schema migrations.

use anyhow::anyhow;
use diesel::{Connection, SqliteConnection, connection::SimpleConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// Diesel migrations embedded into the binary at compile time.
///
/// [`run_sqlite`] applies these on startup to bring the schema up to date.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applies pending migrations to the SQLite database at the given URL.
///
/// Switches the journal mode to WAL first, then runs whatever migrations the
/// database is missing. Safe to call on every startup.
pub fn run_sqlite(url: &str) -> anyhow::Result<()> {
    let mut conn = SqliteConnection::establish(url)?;
    conn.batch_execute("PRAGMA journal_mode=WAL;")?;
    conn.run_pending_migrations(MIGRATIONS).map_err(|e| anyhow!(e))?;

    Ok(())
}
