//! Use-case services built on repository contracts.
//!
//! # Responsibility
//! - Provide stable post/comment entry points for presentation adapters.
//! - Enforce preconditions that must hold before any write starts.

pub mod post_service;
