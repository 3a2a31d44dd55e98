use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotDecodeError {
    #[error("Malformed snapshot: {0}")]
    Malformed(String),
    #[error("Unknown split policy '{policy}' on transaction {transaction_id}")]
    UnknownSplitPolicy {
        transaction_id: String,
        policy: String,
    },
}
