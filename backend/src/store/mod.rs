pub mod schools;

pub use schools::SchoolStore;

use std::future::Future;
use std::time::Duration;

use sqlx::PgPool;

/// Upper bound on any single database operation so a stalled connection
/// never holds a request open indefinitely.
pub(crate) const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Failure classes surfaced by the store. The store itself never logs;
/// callers decide status codes and user-visible messaging.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("edit conflict")]
    EditConflict,

    #[error("query deadline exceeded")]
    Timeout,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Run a query future under the per-call deadline. Dropping the future on
/// expiry cancels the in-flight query and returns its connection to the pool.
pub(crate) async fn bounded<T>(
    fut: impl Future<Output = Result<T, sqlx::Error>>,
) -> Result<T, StoreError> {
    match tokio::time::timeout(QUERY_TIMEOUT, fut).await {
        Ok(result) => result.map_err(StoreError::from),
        Err(_) => Err(StoreError::Timeout),
    }
}

/// Container for the entity stores, one per table, all sharing the pool.
#[derive(Clone)]
pub struct Store {
    pub schools: SchoolStore,
}

impl Store {
    pub fn new(pool: PgPool) -> Self {
        Self {
            schools: SchoolStore { pool },
        }
    }
}
