//! Schema versioning for the key-value database.
//!
//! Applied versions are recorded in `_migrations`. Each script in
//! [`MIGRATIONS`] runs once, in its own transaction.

use tokio_rusqlite::{Connection, params, rusqlite};

use super::Error;

/// Ordered schema scripts, keyed by version.
const MIGRATIONS: &[(i64, &str)] = &[(1, include_str!("../../migrations/001_kv_store.sql"))];

/// Bring the schema up to the latest version.
///
/// # Errors
///
/// [`Error::MigrationFailed`] names the version whose script was rejected.
pub async fn run(conn: &Connection) -> Result<(), Error> {
    conn.call(|conn| -> Result<(), Error> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS _migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            )",
        )?;

        let applied = latest_version(conn)?;

        for &(version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > applied) {
            tracing::debug!(version, "applying kv schema migration");
            let tx = conn.unchecked_transaction()?;
            tx.execute_batch(sql)
                .map_err(|e| Error::MigrationFailed(format!("version {version}: {e}")))?;
            tx.execute(
                "INSERT INTO _migrations (version, applied_at) VALUES (?1, ?2)",
                params![version, chrono::Utc::now().to_rfc3339()],
            )?;
            tx.commit()?;
        }

        Ok(())
    })
    .await
    .map_err(Error::from)
}

fn latest_version(conn: &rusqlite::Connection) -> Result<i64, rusqlite::Error> {
    conn.query_row("SELECT COALESCE(MAX(version), 0) FROM _migrations", [], |row| row.get(0))
}
