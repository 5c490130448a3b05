use log::{debug, info};

use super::Editor;
use crate::canvas::Engine;
use crate::error::{EditorError, EditorResult};
use crate::object::{Filter, FilterAdjustments, FilterPreset, ObjectId};

/// Filter list of the previewed image as it was before the preview started
#[derive(Debug, Clone)]
pub(crate) struct FilterPreview {
    target: ObjectId,
    original: Vec<Filter>,
}

/// Two-phase filter editing: previews are rendered live but stay out of the
/// history until applied; cancelling puts the original filter list back.
impl<E: Engine> Editor<E> {
    pub fn is_filter_preview_active(&self) -> bool {
        self.filter_preview.is_some()
    }

    /// Previews the slider values on the selected image
    pub fn preview_filters(&mut self, adjustments: FilterAdjustments) -> EditorResult<()> {
        self.preview_with(adjustments.to_filters())
    }

    pub fn preview_preset(&mut self, preset: FilterPreset) -> EditorResult<()> {
        debug!("Previewing {} preset", preset.name());
        self.preview_with(preset.to_filters())
    }

    /// Previews the neutral slider position
    pub fn reset_filters(&mut self) -> EditorResult<()> {
        self.preview_filters(FilterAdjustments::default())
    }

    /// Makes the current filter list permanent as one undoable step
    pub fn apply_filters(&mut self) -> EditorResult<()> {
        if !self.is_ready() {
            return Ok(());
        }
        self.filter_target()?;
        // The previewed list becomes the document state
        self.filter_preview = None;
        self.commit()?;
        info!("Filters applied permanently");
        Ok(())
    }

    /// Drops the preview and restores the filters it replaced.
    /// Returns false if no preview was active.
    pub fn cancel_filters(&mut self) -> bool {
        let Some(preview) = self.filter_preview.take() else {
            return false;
        };
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };
        match engine.object_mut(preview.target) {
            Some(object) => object.filters = preview.original,
            None => return false,
        }
        engine.apply_filters(preview.target);
        engine.request_render_all();
        true
    }

    /// Cancels an active preview ahead of an edit that records a snapshot
    pub(super) fn end_filter_preview(&mut self) {
        if self.cancel_filters() {
            debug!("Filter preview cancelled by a document edit");
        }
    }

    fn preview_with(&mut self, filters: Vec<Filter>) -> EditorResult<()> {
        if !self.is_ready() {
            return Ok(());
        }
        let target = self.filter_target()?;
        if self
            .filter_preview
            .as_ref()
            .is_some_and(|preview| preview.target != target)
        {
            // Selection moved to another image mid-preview
            self.cancel_filters();
        }

        let Some(engine) = self.engine.as_mut() else {
            return Ok(());
        };
        let Some(object) = engine.object_mut(target) else {
            return Err(EditorError::InvalidTarget("Select an image to apply filters"));
        };
        if self.filter_preview.is_none() {
            self.filter_preview = Some(FilterPreview {
                target,
                original: object.filters.clone(),
            });
        }
        object.filters = filters;
        engine.apply_filters(target);
        engine.request_render_all();
        Ok(())
    }

    /// The engine's active object, if it is an image
    fn filter_target(&self) -> EditorResult<ObjectId> {
        self.engine
            .as_ref()
            .and_then(|engine| {
                let id = engine.active_object()?;
                engine.object(id).filter(|object| object.is_image()).map(|_| id)
            })
            .ok_or(EditorError::InvalidTarget("Select an image to apply filters"))
    }
}
