//! The editor session: owns the engine, the history log and the sync bridge,
//! and exposes the operations the UI calls into.
//!
//! # Mutation paths
//!
//! There are exactly two ways a change reaches the history log:
//!
//! - **User gestures** mutate the engine directly (`engine_mut`). The UI then
//!   calls [`Editor::sync`], which drains the engine's notifications and lets
//!   the [`SyncBridge`] decide what to record.
//! - **Programmatic operations** (adding shapes, loading images, layer panel
//!   actions...) run inside a suppressed block: the bridge ignores the
//!   notifications they cause, and the block records exactly one snapshot
//!   once the engine has settled.
//!
//! Undo and redo restore a snapshot through the same suppressed path.
//!
//! # Example
//!
//! ```rust,no_run
//! use canvas_sync::{Canvas, Editor, EditorConfig};
//!
//! let config = EditorConfig::default();
//! let canvas = Canvas::new(config.canvas_size);
//! let mut editor = Editor::with_engine(config, canvas)?;
//!
//! editor.add_rectangle()?;
//! editor.add_circle()?;
//! editor.undo()?;
//! assert_eq!(editor.layers().len(), 1);
//! # Ok::<(), canvas_sync::EditorError>(())
//! ```

mod export;
mod filters;
mod layers;
mod text;
mod tools;
mod upload;

use log::{debug, error, info, trace, warn};

use crate::canvas::{Canvas, Engine};
use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};
use crate::event::{EditorEvent, EventBus, EventHandler, SubscriptionId};
use crate::history::{History, Snapshot};
use crate::layer::Layer;
use crate::object::{CanvasObject, ObjectId};
use crate::sync::{record_snapshot, Suppression, SyncBridge, SyncOutcome};
use crate::tool::Tool;

use filters::FilterPreview;

/// An editing session over one graphics engine
#[derive(Debug)]
pub struct Editor<E: Engine = Canvas> {
    engine: Option<E>,
    config: EditorConfig,
    history: History,
    bridge: SyncBridge,
    suppression: Suppression,
    event_bus: EventBus,
    active_tool: Tool,
    filter_preview: Option<FilterPreview>,
}

impl<E: Engine> Editor<E> {
    /// Creates a session without an engine. Until one is attached every
    /// engine-bound operation is a no-op.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            engine: None,
            history: History::with_limit(config.max_history),
            config,
            bridge: SyncBridge::new(),
            suppression: Suppression::new(),
            event_bus: EventBus::new(),
            active_tool: Tool::default(),
            filter_preview: None,
        }
    }

    /// Creates a session and attaches `engine` right away
    pub fn with_engine(config: EditorConfig, engine: E) -> EditorResult<Self> {
        let mut editor = Self::new(config);
        editor.attach(engine)?;
        Ok(editor)
    }

    /// Takes ownership of an initialized engine and records the initial
    /// document state, so the first real edit can be undone.
    pub fn attach(&mut self, engine: E) -> EditorResult<()> {
        if self.engine.is_some() {
            warn!("Replacing the attached engine, history is reset");
            self.detach();
        }
        self.engine = Some(engine);

        let result = self.suppressed(|editor, engine| {
            engine.set_background(editor.config.background);
            editor.configure_tool(engine);
            Ok(())
        });
        if let Err(err) = result {
            error!("Failed to record the initial document state: {err}");
            self.engine = None;
            return Err(err);
        }
        info!("Engine attached, initial snapshot recorded");
        Ok(())
    }

    /// Releases the engine and forgets everything derived from it
    pub fn detach(&mut self) -> Option<E> {
        let engine = self.engine.take()?;
        self.history.clear();
        self.bridge.reset();
        self.filter_preview = None;
        self.event_bus.emit_all([
            self.history_event(),
            EditorEvent::LayersChanged { count: 0 },
            EditorEvent::SelectionChanged(None),
        ]);
        Some(engine)
    }

    pub fn is_ready(&self) -> bool {
        self.engine.is_some()
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    /// Direct engine access for user gestures. Call [`Editor::sync`] afterwards.
    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn layers(&self) -> &[Layer] {
        self.bridge.layers()
    }

    pub fn selected_id(&self) -> Option<ObjectId> {
        self.bridge.selected()
    }

    /// Looks up the selected object in the engine. Returns `None` if the
    /// selection refers to an object that no longer exists.
    pub fn selected_object(&self) -> Option<&CanvasObject> {
        let id = self.bridge.selected()?;
        self.engine.as_ref()?.object(id)
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppression.is_active()
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) -> SubscriptionId {
        self.event_bus.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.event_bus.unsubscribe(id)
    }

    /// Appends an externally captured snapshot to the history log
    pub fn add_to_history(&mut self, json: String) {
        self.history.record(Snapshot::new(json));
        self.emit_history();
    }

    /// Records the current engine document as one history entry.
    /// An active filter preview is cancelled first.
    pub fn commit(&mut self) -> EditorResult<bool> {
        self.end_filter_preview();
        let Some(engine) = self.engine.as_ref() else {
            debug!("commit ignored, no engine attached");
            return Ok(false);
        };
        record_snapshot(engine, &mut self.history)?;
        self.emit_history();
        Ok(true)
    }

    /// Drains the engine's pending notifications and hands them to the bridge.
    ///
    /// An object change ends any active filter preview before it is recorded.
    pub fn sync(&mut self) -> EditorResult<SyncOutcome> {
        let Some(engine) = self.engine.as_mut() else {
            return Ok(SyncOutcome::default());
        };
        let events = engine.drain_events();
        if self.filter_preview.is_some() && events.iter().any(|event| !event.is_selection()) {
            self.end_filter_preview();
        }
        let Some(engine) = self.engine.as_ref() else {
            return Ok(SyncOutcome::default());
        };
        let outcome = self
            .bridge
            .dispatch(events, &self.suppression, engine, &mut self.history)?;
        self.publish(outcome);
        Ok(outcome)
    }

    /// Restores the previous snapshot. Returns false if there is nothing to undo.
    pub fn undo(&mut self) -> EditorResult<bool> {
        match self.history.undo_target() {
            Some(target) => self.restore(target),
            None => Ok(false),
        }
    }

    /// Restores the next snapshot. Returns false if there is nothing to redo.
    pub fn redo(&mut self) -> EditorResult<bool> {
        match self.history.redo_target() {
            Some(target) => self.restore(target),
            None => Ok(false),
        }
    }

    fn restore(&mut self, index: usize) -> EditorResult<bool> {
        if self.suppression.is_active() {
            return Err(EditorError::Busy);
        }
        let Some(engine) = self.engine.as_mut() else {
            return Ok(false);
        };
        let Some(snapshot) = self.history.get(index) else {
            return Ok(false);
        };

        let _guard = self.suppression.acquire();
        if let Err(source) = engine.load_from_json(snapshot.json()) {
            error!("Failed to restore history entry {index}: {source}");
            return Err(EditorError::RestoreFailed { index, source });
        }
        engine.request_render_all();
        // Replayed notifications are dropped while suppressed
        let replayed = engine.drain_events();
        debug!("Restored entry {index}, dropped {} replayed notifications", replayed.len());

        self.history.set_cursor(index);
        self.filter_preview = None;
        self.refresh_derived();
        self.emit_history();
        Ok(true)
    }

    /// Runs a programmatic mutation as one undoable step.
    ///
    /// Notifications caused by `op` are drained and dropped once the engine
    /// has settled, then exactly one snapshot is recorded. An active filter
    /// preview is cancelled before `op` runs. Returns `Ok(None)` when no
    /// engine is attached.
    pub(crate) fn suppressed<R, F>(&mut self, op: F) -> EditorResult<Option<R>>
    where
        F: FnOnce(&mut Self, &mut E) -> EditorResult<R>,
    {
        if self.suppression.is_active() {
            return Err(EditorError::Busy);
        }
        self.end_filter_preview();
        let Some(mut engine) = self.engine.take() else {
            debug!("Programmatic update ignored, no engine attached");
            return Ok(None);
        };

        let _guard = self.suppression.acquire();
        let result = op(self, &mut engine);
        engine.request_render_all();
        // Settled: whatever `op` queued is ours, even if it failed halfway
        let dropped = engine.drain_events();
        trace!("Dropped {} notifications from a programmatic update", dropped.len());
        let result = result.and_then(|value| {
            record_snapshot(&engine, &mut self.history)?;
            Ok(value)
        });
        // The engine goes back and derived state follows it on every path
        self.engine = Some(engine);
        self.refresh_derived();
        let value = result?;

        self.emit_history();
        Ok(Some(value))
    }

    /// Recomputes layers and selection from the engine and publishes changes
    fn refresh_derived(&mut self) {
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        let outcome = SyncOutcome {
            layers_changed: self.bridge.refresh_layers(engine),
            selection_changed: self.bridge.refresh_selection(engine),
            recorded: 0,
        };
        self.publish(outcome);
    }

    /// Emits what a sync or refresh changed as one batch
    fn publish(&self, outcome: SyncOutcome) {
        let history = (outcome.recorded > 0).then(|| self.history_event());
        let layers = outcome.layers_changed.then(|| EditorEvent::LayersChanged {
            count: self.bridge.layers().len(),
        });
        let selection = outcome
            .selection_changed
            .then(|| EditorEvent::SelectionChanged(self.bridge.selected()));
        self.event_bus
            .emit_all(history.into_iter().chain(layers).chain(selection));
    }

    fn emit_history(&self) {
        self.event_bus.emit(self.history_event());
    }

    fn history_event(&self) -> EditorEvent {
        EditorEvent::HistoryChanged {
            len: self.history.len(),
            cursor: self.history.cursor(),
        }
    }

    fn require_object(&self, id: ObjectId) -> EditorResult<()> {
        match self.engine.as_ref() {
            Some(engine) if engine.object(id).is_none() => {
                Err(EditorError::InvalidTarget("The layer no longer exists"))
            }
            _ => Ok(()),
        }
    }
}
