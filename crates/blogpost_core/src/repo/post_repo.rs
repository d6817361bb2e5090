//! Post repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Read posts with their comments through one LEFT JOIN query.
//! - Insert posts and comments, keeping the comment/link pair atomic.
//!
//! # Invariants
//! - LIMIT/OFFSET bound distinct posts, never raw joined rows.
//! - A comment row is only attributed to the post its link row names.
//! - `create_comment` either commits both the comment and the link row or
//!   neither.

use crate::db::schema::{schema_version, table_exists, REQUIRED_TABLES, SCHEMA_VERSION};
use crate::db::DbError;
use crate::model::pagination::PostPage;
use crate::model::post::{Comment, CommentId, Post, PostId};
use log::{debug, error, info};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, TransactionBehavior};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from post repository operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Requested post does not exist.
    NotFound(PostId),
    /// Connection schema is not at the bootstrapped version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Persisted rows cannot be converted into the post aggregate.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "blog post not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "post repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "post repository requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted post data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Store(value))
    }
}

/// Repository interface for blog posts and their comments.
pub trait PostRepository {
    /// Fetches posts with comments attached.
    ///
    /// With `id_filter` set this is a single-post lookup and `page` is
    /// ignored; otherwise it returns one page of posts ordered by id.
    fn fetch_posts(&self, id_filter: Option<PostId>, page: &PostPage) -> RepoResult<Vec<Post>>;

    /// Inserts a post and returns its generated id.
    fn create_post(&self, title: &str, content: &str) -> RepoResult<PostId>;

    /// Inserts a comment and links it to `post_id` in one transaction.
    ///
    /// The caller is responsible for checking that the post exists.
    fn create_comment(&mut self, post_id: PostId, text: &str) -> RepoResult<CommentId>;

    /// Returns one page of posts ordered by id ascending.
    fn get_all_posts(&self, page: &PostPage) -> RepoResult<Vec<Post>> {
        self.fetch_posts(None, page)
    }

    /// Returns a single post, or `NotFound` when no row matches.
    fn get_post(&self, id: PostId) -> RepoResult<Post> {
        self.fetch_posts(Some(id), &PostPage::default())?
            .into_iter()
            .next()
            .ok_or(RepoError::NotFound(id))
    }
}

/// One row of the flattened posts/links/comments join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCommentRow {
    pub post_id: PostId,
    pub post_title: String,
    pub post_content: String,
    pub comment_id: Option<CommentId>,
    pub comment_text: Option<String>,
}

impl PostCommentRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            post_id: row.get("post_id")?,
            post_title: row.get("post_title")?,
            post_content: row.get("post_content")?,
            comment_id: row.get("comment_id")?,
            comment_text: row.get("comment_text")?,
        })
    }
}

/// SQLite-backed post repository borrowing a bootstrapped connection.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    /// Constructs a repository from a bootstrapped connection.
    ///
    /// Rejects connections that were not opened through `open_db*`.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn fetch_posts(&self, id_filter: Option<PostId>, page: &PostPage) -> RepoResult<Vec<Post>> {
        let started_at = Instant::now();
        let (sql, bind_values) = build_fetch_query(id_filter, page);

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(bind_values), PostCommentRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        let row_count = rows.len();
        let posts = fold_post_rows(rows)?;

        debug!(
            "event=post_fetch module=repo status=ok single={} rows={} posts={} duration_ms={}",
            id_filter.is_some(),
            row_count,
            posts.len(),
            started_at.elapsed().as_millis()
        );
        Ok(posts)
    }

    fn create_post(&self, title: &str, content: &str) -> RepoResult<PostId> {
        self.conn
            .execute(
                "INSERT INTO blog_posts (title, content) VALUES (?1, ?2);",
                params![title, content],
            )
            .map_err(|err| {
                error!("event=post_create module=repo status=error error={err}");
                err
            })?;

        let post_id = self.conn.last_insert_rowid();
        info!("event=post_create module=repo status=ok post_id={post_id}");
        Ok(post_id)
    }

    fn create_comment(&mut self, post_id: PostId, text: &str) -> RepoResult<CommentId> {
        // Dropping `tx` without commit rolls back both inserts.
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            "INSERT INTO comments (comment_text) VALUES (?1);",
            [text],
        )
        .map_err(|err| log_comment_failure(post_id, "comment_insert_failed", err))?;
        let comment_id = tx.last_insert_rowid();

        tx.execute(
            "INSERT INTO blog_posts_comments (blog_post_id, comment_id) VALUES (?1, ?2);",
            params![post_id, comment_id],
        )
        .map_err(|err| log_comment_failure(post_id, "comment_link_failed", err))?;

        tx.commit()
            .map_err(|err| log_comment_failure(post_id, "comment_commit_failed", err))?;

        info!(
            "event=comment_create module=repo status=ok post_id={post_id} comment_id={comment_id}"
        );
        Ok(comment_id)
    }
}

/// Folds flattened join rows into post aggregates ordered by post id.
///
/// Rows may arrive in any order; each post appears once and comments are
/// sorted by id. Rows without comment columns only register the post.
pub fn fold_post_rows<I>(rows: I) -> RepoResult<Vec<Post>>
where
    I: IntoIterator<Item = PostCommentRow>,
{
    let mut posts: BTreeMap<PostId, Post> = BTreeMap::new();

    for row in rows {
        let post = posts
            .entry(row.post_id)
            .or_insert_with(|| Post::new(row.post_id, row.post_title, row.post_content));

        match (row.comment_id, row.comment_text) {
            (Some(id), Some(comment_text)) => post.comments.push(Comment { id, comment_text }),
            (None, _) => {}
            (Some(id), None) => {
                return Err(RepoError::InvalidData(format!(
                    "comment {id} linked to post {} has no text",
                    row.post_id
                )));
            }
        }
    }

    Ok(posts
        .into_values()
        .map(|mut post| {
            post.comments.sort_by_key(|comment| comment.id);
            post
        })
        .collect())
}

fn build_fetch_query(id_filter: Option<PostId>, page: &PostPage) -> (String, Vec<Value>) {
    let mut bind_values: Vec<Value> = Vec::new();
    let post_set = match id_filter {
        Some(id) => {
            bind_values.push(Value::Integer(id));
            "SELECT id, title, content FROM blog_posts WHERE id = ?"
        }
        None => {
            // SQLite treats a negative LIMIT as unbounded.
            let limit = page.limit.map_or(-1, saturating_i64);
            bind_values.push(Value::Integer(limit));
            bind_values.push(Value::Integer(saturating_i64(page.offset)));
            "SELECT id, title, content FROM blog_posts ORDER BY id ASC LIMIT ? OFFSET ?"
        }
    };

    let sql = format!(
        "SELECT
            p.id AS post_id,
            p.title AS post_title,
            p.content AS post_content,
            c.id AS comment_id,
            c.comment_text AS comment_text
         FROM ({post_set}) p
         LEFT JOIN blog_posts_comments l ON l.blog_post_id = p.id
         LEFT JOIN comments c ON c.id = l.comment_id
         ORDER BY p.id ASC, c.id ASC;"
    );
    (sql, bind_values)
}

fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn log_comment_failure(post_id: PostId, error_code: &str, err: rusqlite::Error) -> rusqlite::Error {
    error!(
        "event=comment_create module=repo status=error post_id={post_id} error_code={error_code} error={err}"
    );
    err
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version = schema_version(conn)?;
    if actual_version != SCHEMA_VERSION {
        return Err(RepoError::UninitializedConnection {
            expected_version: SCHEMA_VERSION,
            actual_version,
        });
    }

    for table in REQUIRED_TABLES {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{build_fetch_query, fold_post_rows, PostCommentRow, RepoError};
    use crate::model::pagination::PostPage;
    use rusqlite::types::Value;

    fn row(post_id: i64, comment: Option<(i64, &str)>) -> PostCommentRow {
        PostCommentRow {
            post_id,
            post_title: format!("title {post_id}"),
            post_content: format!("content {post_id}"),
            comment_id: comment.map(|(id, _)| id),
            comment_text: comment.map(|(_, text)| text.to_string()),
        }
    }

    #[test]
    fn fold_merges_duplicate_post_rows() {
        let posts = fold_post_rows(vec![
            row(1, Some((10, "a"))),
            row(1, Some((11, "b"))),
            row(2, None),
        ])
        .unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].comment_ids(), vec![10, 11]);
        assert!(posts[1].comments.is_empty());
    }

    #[test]
    fn fold_never_crosses_comments_between_interleaved_posts() {
        let posts = fold_post_rows(vec![
            row(2, Some((21, "two-b"))),
            row(1, Some((12, "one-b"))),
            row(2, Some((20, "two-a"))),
            row(1, Some((11, "one-a"))),
        ])
        .unwrap();

        assert_eq!(posts[0].id, 1);
        assert_eq!(posts[0].comment_ids(), vec![11, 12]);
        assert_eq!(posts[1].id, 2);
        assert_eq!(posts[1].comment_ids(), vec![20, 21]);
        assert_eq!(posts[1].comments[0].comment_text, "two-a");
    }

    #[test]
    fn fold_of_no_rows_is_empty() {
        assert!(fold_post_rows(Vec::<PostCommentRow>::new()).unwrap().is_empty());
    }

    #[test]
    fn fold_rejects_comment_without_text() {
        let mut broken = row(1, Some((5, "x")));
        broken.comment_text = None;
        let err = fold_post_rows(vec![broken]).unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(_)));
    }

    #[test]
    fn page_bounds_are_applied_inside_the_post_subquery() {
        let (sql, binds) = build_fetch_query(None, &PostPage::new(5, 10));
        let subquery_end = sql.find(") p").unwrap();
        let limit_at = sql.find("LIMIT").unwrap();
        assert!(limit_at < subquery_end);
        assert_eq!(binds.len(), 2);
    }

    #[test]
    fn offsets_past_u32_are_bound_exactly() {
        let (_, binds) = build_fetch_query(None, &PostPage::new(10, 4_999_999_990));
        assert_eq!(binds, vec![Value::Integer(10), Value::Integer(4_999_999_990)]);

        let (_, binds) = build_fetch_query(None, &PostPage::new(u64::MAX, u64::MAX));
        assert_eq!(binds, vec![Value::Integer(i64::MAX), Value::Integer(i64::MAX)]);
    }

    #[test]
    fn single_lookup_binds_only_the_id() {
        let (sql, binds) = build_fetch_query(Some(3), &PostPage::new(5, 10));
        assert!(sql.contains("WHERE id = ?"));
        assert!(!sql.contains("LIMIT"));
        assert_eq!(binds.len(), 1);
    }
}
