//! HTTP adapter for the blog post service.
//!
//! # Responsibility
//! - Map REST routes onto `PostService` operations.
//! - Parse pagination, validate request bodies, and translate failures into
//!   status codes through an injected `ErrorStatusMap`.
//!
//! # Invariants
//! - Request bodies with empty `title`, `content`, or `text` never reach the
//!   service.
//! - Every store call runs on the blocking pool; async workers never hold the
//!   connection lock.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorKind, ErrorReply, ErrorStatusMap};
pub use routes::build_router;
pub use state::AppState;
