use crate::util::time;

/// A serialized capture of the whole document at one instant.
///
/// Snapshots are immutable once created. The timestamp is informational only:
/// the position in the history log decides ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    json: String,
    timestamp_ms: u64,
}

impl Snapshot {
    pub fn new(json: String) -> Self {
        Self {
            json,
            timestamp_ms: time::timestamp_millis(),
        }
    }

    pub fn json(&self) -> &str {
        &self.json
    }

    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }
}
