//! Blog domain model.
//!
//! # Responsibility
//! - Define the post/comment aggregate returned by read paths.
//! - Define caller-side pagination inputs.
//!
//! # Invariants
//! - Every post and comment is identified by a store-assigned integer id.
//! - A post owns its comments; comments never exist without a post.

pub mod pagination;
pub mod post;
