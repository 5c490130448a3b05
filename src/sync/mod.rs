//! Bridge between engine notifications and the editor's derived state.

mod bridge;
mod suppression;

pub use bridge::{SyncBridge, SyncOutcome};
pub use suppression::{Suppression, SuppressionGuard};

use crate::canvas::Engine;
use crate::error::{EditorError, EditorResult};
use crate::history::{History, Snapshot};

/// Serializes the engine's whole document and appends it to the history log
pub fn record_snapshot<E: Engine>(engine: &E, history: &mut History) -> EditorResult<()> {
    let json = engine.to_json().map_err(EditorError::Serialize)?;
    history.record(Snapshot::new(json));
    Ok(())
}
