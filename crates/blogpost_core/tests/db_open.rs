use blogpost_core::db::schema::SCHEMA_VERSION;
use blogpost_core::db::{open_db, open_db_in_memory, DbError};
use blogpost_core::{PostRepository, RepoError, SqlitePostRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_blog_tables() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), SCHEMA_VERSION);
    assert_table_exists(&conn, "blog_posts");
    assert_table_exists(&conn, "comments");
    assert_table_exists(&conn, "blog_posts_comments");
}

#[test]
fn foreign_keys_are_enforced() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn reopening_file_database_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blog.sqlite3");

    let mut first = open_db(&path).unwrap();
    let post_id = SqlitePostRepository::try_new(&mut first)
        .unwrap()
        .create_post("kept", "across reopen")
        .unwrap();
    drop(first);

    let mut second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), SCHEMA_VERSION);
    let repo = SqlitePostRepository::try_new(&mut second).unwrap();
    let post = repo.get_post(post_id).unwrap();
    assert_eq!(post.title, "kept");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("blog store schema version 999 is newer than this build supports ({SCHEMA_VERSION})")
    );
    match err {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repository_rejects_unbootstrapped_connection() {
    let mut conn = Connection::open_in_memory().unwrap();
    let err = SqlitePostRepository::try_new(&mut conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::UninitializedConnection {
            expected_version: SCHEMA_VERSION,
            actual_version: 0,
        }
    ));
}

#[test]
fn repository_rejects_connection_missing_a_table() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE blog_posts_comments;").unwrap();

    let err = SqlitePostRepository::try_new(&mut conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::MissingRequiredTable("blog_posts_comments")
    ));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
