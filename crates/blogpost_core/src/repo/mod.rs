//! Repository layer contracts and SQLite persistence.
//!
//! # Responsibility
//! - Rebuild post aggregates from the flattened posts/links/comments join.
//! - Own transactional comment writes so link rows never dangle.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Store failures are surfaced immediately; nothing is retried here.

pub mod post_repo;
