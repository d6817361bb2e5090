//! Post aggregate.
//!
//! # Invariants
//! - `comments` is always present; a post without comments carries an empty
//!   vector.
//! - `comments` is ordered by comment id ascending.

use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a blog post.
pub type PostId = i64;

/// Store-assigned identifier of a comment.
pub type CommentId = i64;

/// Comment attached to exactly one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub comment_text: String,
}

/// Blog post together with all comments linked to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    /// Serialized as `[]` when the post has no comments.
    pub comments: Vec<Comment>,
}

impl Post {
    /// Creates a post shell with no comments attached yet.
    pub fn new(id: PostId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            comments: Vec::new(),
        }
    }

    /// Returns the ids of attached comments in stored order.
    pub fn comment_ids(&self) -> Vec<CommentId> {
        self.comments.iter().map(|comment| comment.id).collect()
    }
}
