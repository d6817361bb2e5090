use blogpost_core::db::open_db_in_memory;
use blogpost_core::{PostRepository, RepoError, SqlitePostRepository};
use rusqlite::Connection;

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn create_post_then_get_returns_it_without_comments() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&mut conn).unwrap();

    let id = repo.create_post("T", "C").unwrap();
    let post = repo.get_post(id).unwrap();

    assert_eq!(post.id, id);
    assert_eq!(post.title, "T");
    assert_eq!(post.content, "C");
    assert!(post.comments.is_empty());
}

#[test]
fn post_ids_are_store_assigned_and_increasing() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&mut conn).unwrap();

    let first = repo.create_post("one", "1").unwrap();
    let second = repo.create_post("two", "2").unwrap();
    assert!(second > first);
}

#[test]
fn create_comment_writes_comment_and_link() {
    let mut conn = open_db_in_memory().unwrap();
    let (post_id, comment_id) = {
        let mut repo = SqlitePostRepository::try_new(&mut conn).unwrap();
        let post_id = repo.create_post("T", "C").unwrap();
        let comment_id = repo.create_comment(post_id, "nice").unwrap();
        (post_id, comment_id)
    };

    let linked_post: i64 = conn
        .query_row(
            "SELECT blog_post_id FROM blog_posts_comments WHERE comment_id = ?1;",
            [comment_id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(linked_post, post_id);
    assert_eq!(count(&conn, "comments"), 1);
}

#[test]
fn failed_link_write_rolls_back_comment_insert() {
    let mut conn = open_db_in_memory().unwrap();
    let post_id = SqlitePostRepository::try_new(&mut conn)
        .unwrap()
        .create_post("T", "C")
        .unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_links BEFORE INSERT ON blog_posts_comments
         BEGIN
             SELECT RAISE(ABORT, 'link write rejected');
         END;",
    )
    .unwrap();

    let err = SqlitePostRepository::try_new(&mut conn)
        .unwrap()
        .create_comment(post_id, "lost")
        .unwrap_err();

    assert!(matches!(err, RepoError::Db(_)));
    assert_eq!(count(&conn, "comments"), 0);
    assert_eq!(count(&conn, "blog_posts_comments"), 0);
}

#[test]
fn link_to_missing_post_is_rejected_atomically() {
    let mut conn = open_db_in_memory().unwrap();

    let err = SqlitePostRepository::try_new(&mut conn)
        .unwrap()
        .create_comment(404, "orphan")
        .unwrap_err();

    assert!(matches!(err, RepoError::Db(_)));
    assert_eq!(count(&conn, "comments"), 0);
    assert_eq!(count(&conn, "blog_posts_comments"), 0);
}

#[test]
fn connection_is_usable_after_rolled_back_comment() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqlitePostRepository::try_new(&mut conn).unwrap();
    let post_id = repo.create_post("T", "C").unwrap();

    assert!(repo.create_comment(post_id + 1, "orphan").is_err());
    let comment_id = repo.create_comment(post_id, "kept").unwrap();

    let post = repo.get_post(post_id).unwrap();
    assert_eq!(post.comment_ids(), vec![comment_id]);
}
