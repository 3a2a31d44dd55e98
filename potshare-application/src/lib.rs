#![warn(clippy::uninlined_format_args)]

pub mod audit;
pub mod error;
pub mod model;
pub mod ports;
pub mod snapshot_processor;

pub use audit::{DataQualityIssue, LedgerAudit};
pub use error::SnapshotDecodeError;
pub use model::{GameInfo, LedgerSnapshot, LedgerSummary, PotSnapshot, ShareSummary, Snapshot};
pub use ports::{ParticipantDirectory, SnapshotDecoder};
pub use snapshot_processor::{ProcessedSnapshot, SnapshotProcessor};
