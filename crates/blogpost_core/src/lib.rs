//! Core domain logic for the blog post service.
//! This crate owns storage bootstrap, the post/comment aggregate, and the
//! transactional write path.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::pagination::{PageCursor, PostPage};
pub use model::post::{Comment, CommentId, Post, PostId};
pub use repo::post_repo::{PostRepository, RepoError, RepoResult, SqlitePostRepository};
pub use service::post_service::PostService;

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
