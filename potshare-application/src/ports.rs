use crate::{Snapshot, error::SnapshotDecodeError};
use potshare_domain::ParticipantId;

pub trait SnapshotDecoder: Send + Sync {
    fn decode(&self, source: &str) -> Result<Snapshot, SnapshotDecodeError>;
}

pub trait ParticipantDirectory {
    fn display_name(&self, participant: &ParticipantId) -> Option<&str>;
}
