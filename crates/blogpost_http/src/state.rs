//! Shared adapter state.
//!
//! Holds the single SQLite connection and the status table. Each request
//! borrows the connection for one service call on the blocking pool.

use crate::error::{ApiError, ErrorReply, ErrorStatusMap};
use blogpost_core::{PostService, RepoResult, SqlitePostRepository};
use log::{error, warn};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
    error_statuses: Arc<ErrorStatusMap>,
}

impl AppState {
    /// Wraps a bootstrapped connection and the status table used for failures.
    pub fn new(conn: Connection, error_statuses: ErrorStatusMap) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            error_statuses: Arc::new(error_statuses),
        }
    }

    /// Runs `op` against a freshly built service on the blocking pool.
    ///
    /// The connection lock is held only for the duration of `op`. A panic in
    /// `op` fails that call with `ApiError::Storage`; later calls still run.
    pub async fn with_service<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: for<'c> FnOnce(&mut PostService<SqlitePostRepository<'c>>) -> RepoResult<T>
            + Send
            + 'static,
    {
        let db = Arc::clone(&self.db);
        let joined = tokio::task::spawn_blocking(move || -> Result<T, ApiError> {
            // A panicking call rolls back its transaction while unwinding, so
            // the connection behind a poisoned lock is still consistent.
            let mut conn = db.lock().unwrap_or_else(|poisoned| {
                warn!("event=db_lock module=http status=recovered reason=poisoned");
                poisoned.into_inner()
            });
            let repo = SqlitePostRepository::try_new(&mut *conn)?;
            let mut service = PostService::new(repo);
            Ok(op(&mut service)?)
        })
        .await;

        match joined {
            Ok(result) => result,
            Err(err) => Err(ApiError::Storage(err.to_string())),
        }
    }

    /// Builds the failure response for `err` using the injected status table.
    pub fn reply(&self, message: impl Into<String>, err: ApiError) -> ErrorReply {
        let kind = err.kind();
        let status = self.error_statuses.status_for(kind);
        if status.is_server_error() {
            error!(
                "event=http_request module=http status=error kind={kind:?} http_status={} error={err}",
                status.as_u16()
            );
        } else {
            warn!(
                "event=http_request module=http status=rejected kind={kind:?} http_status={}",
                status.as_u16()
            );
        }
        ErrorReply::new(status, message, &err)
    }
}
