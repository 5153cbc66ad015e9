/// Failure of an item-store write.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    /// The statement ran but touched a different number of rows than the
    /// operation requires.
    #[error("{operation} affected {actual} rows, expected {expected}")]
    UnexpectedRowCount {
        operation: &'static str,
        expected: u64,
        actual: u64,
    },
}
