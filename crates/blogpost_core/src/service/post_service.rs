//! Post use-case service.
//!
//! # Responsibility
//! - Delegate reads to the aggregating repository.
//! - Refuse to attach a comment to a post that does not exist.
//!
//! # Invariants
//! - `create_comment` performs no write when the target post is missing.
//! - Repository errors, including `NotFound`, surface unchanged.

use crate::model::pagination::PostPage;
use crate::model::post::{CommentId, Post, PostId};
use crate::repo::post_repo::{PostRepository, RepoError, RepoResult};
use log::warn;

/// Post service facade over repository implementations.
pub struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists one page of posts with their comments.
    pub fn get_all(&self, page: &PostPage) -> RepoResult<Vec<Post>> {
        self.repo.get_all_posts(page)
    }

    /// Gets one post with its comments.
    pub fn get_by_id(&self, id: PostId) -> RepoResult<Post> {
        self.repo.get_post(id)
    }

    /// Creates a post. Callers must reject empty title/content beforehand.
    pub fn create_post(&self, title: &str, content: &str) -> RepoResult<PostId> {
        self.repo.create_post(title, content)
    }

    /// Attaches a new comment to an existing post.
    ///
    /// # Contract
    /// - Looks the post up first; a missing post yields `NotFound` and no
    ///   comment or link row is written.
    pub fn create_comment(&mut self, post_id: PostId, text: &str) -> RepoResult<CommentId> {
        if let Err(err) = self.repo.get_post(post_id) {
            if matches!(err, RepoError::NotFound(_)) {
                warn!("event=comment_create module=service status=rejected post_id={post_id} error_code=post_not_found");
            }
            return Err(err);
        }
        self.repo.create_comment(post_id, text)
    }

    /// Releases the wrapped repository.
    pub fn into_inner(self) -> R {
        self.repo
    }
}
