use actix_http::StatusCode;
use foyer_shared::error_chain_fmt;

///
/// Failure classes shared by every storage-backed route.
///
/// A pool acquisition timeout is transient and safe for the client to retry;
/// every other storage failure is an internal error.
///
#[derive(thiserror::Error)]
pub enum StorageError {
    #[error("Storage is temporarily unavailable, please retry")]
    TransientError(#[source] sqlx::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl StorageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StorageError::TransientError(_) => StatusCode::SERVICE_UNAVAILABLE,
            StorageError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

///
/// Classify a storage failure, attaching `context` to the non-transient path.
///
pub fn storage_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> StorageError {
    move |error| match error {
        sqlx::Error::PoolTimedOut => StorageError::TransientError(error),
        error => StorageError::UnexpectedError(anyhow::Error::from(error).context(context)),
    }
}
