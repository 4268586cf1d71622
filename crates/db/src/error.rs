use setlist_core::error::CoreError;

/// Error returned by multi-step repository operations.
///
/// Ordered-collection mutations can fail on a domain rule (missing parent,
/// invalid position, incomplete reorder) or in the store itself; both abort
/// the surrounding transaction.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
