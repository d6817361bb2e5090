//! Blog schema bootstrap.
//!
//! The store carries exactly one schema shape. Bootstrapping is idempotent and
//! refuses databases stamped by a newer binary.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Schema version written to `PRAGMA user_version` after bootstrap.
pub const SCHEMA_VERSION: u32 = 1;

/// Tables every repository expects to exist.
pub const REQUIRED_TABLES: [&str; 3] = ["blog_posts", "comments", "blog_posts_comments"];

/// Creates the blog tables when missing and stamps the schema version.
pub fn apply_schema(conn: &mut Connection) -> DbResult<()> {
    let current = schema_version(conn)?;
    if current > SCHEMA_VERSION {
        return Err(DbError::SchemaTooNew {
            found: current,
            supported: SCHEMA_VERSION,
        });
    }
    if current == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;
    Ok(())
}

/// Reads the schema version stamped on the connection.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

/// Returns whether `table` exists on the connection.
pub fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
