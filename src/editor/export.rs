use log::{error, info};

use super::Editor;
use crate::canvas::Engine;
use crate::error::{EditorError, EditorResult};
use crate::export::{ExportOptions, ExportedImage};

impl<E: Engine> Editor<E> {
    /// Encodes the document through the engine. The document and history are
    /// not touched. Returns `None` when no engine is attached.
    pub fn export(&self, options: &ExportOptions) -> EditorResult<Option<ExportedImage>> {
        let Some(engine) = self.engine.as_ref() else {
            return Ok(None);
        };
        let bytes = engine.export(options).map_err(|err| {
            error!("Failed to export {}: {err}", options.download_name());
            EditorError::Export(err)
        })?;
        info!("Exported {} ({} bytes)", options.download_name(), bytes.len());
        Ok(Some(ExportedImage {
            file_name: options.download_name(),
            mime_type: options.format.mime_type(),
            bytes,
        }))
    }
}
