use log::{debug, trace};

use super::{record_snapshot, Suppression};
use crate::canvas::Engine;
use crate::error::EditorResult;
use crate::event::CanvasEvent;
use crate::history::History;
use crate::layer::{layers_for, Layer};
use crate::object::ObjectId;

/// What a dispatched batch of notifications changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    pub layers_changed: bool,
    pub selection_changed: bool,
    /// Number of snapshots recorded while handling the batch
    pub recorded: usize,
}

impl SyncOutcome {
    pub fn is_empty(&self) -> bool {
        !self.layers_changed && !self.selection_changed && self.recorded == 0
    }
}

/// Turns engine notifications into derived UI state and history entries.
///
/// `layers` mirrors the engine's object list and `selected` holds the id of
/// the engine's active object. Both are recomputed from the engine, never
/// patched.
#[derive(Debug, Default)]
pub struct SyncBridge {
    layers: Vec<Layer>,
    selected: Option<ObjectId>,
}

impl SyncBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    /// Handles one drained batch of engine notifications.
    ///
    /// Selection events are delivered before object events; within a rank the
    /// emission order is kept. Removals are committed once, after the whole
    /// batch has been applied, so the snapshot also captures whatever the
    /// engine changed in response to the removal.
    pub fn dispatch<E: Engine>(
        &mut self,
        events: Vec<CanvasEvent>,
        suppression: &Suppression,
        engine: &E,
        history: &mut History,
    ) -> EditorResult<SyncOutcome> {
        let mut outcome = SyncOutcome::default();
        if events.is_empty() {
            return Ok(outcome);
        }
        if suppression.is_active() {
            trace!("Ignoring {} notifications from a programmatic update", events.len());
            return Ok(outcome);
        }

        let mut commit_after_settle = false;
        for event in delivery_order(events) {
            trace!("Dispatching {event:?}");
            match event {
                CanvasEvent::SelectionCreated { selected }
                | CanvasEvent::SelectionUpdated { selected } => {
                    outcome.selection_changed |= self.set_selected(selected.first().copied());
                }
                CanvasEvent::SelectionCleared => {
                    outcome.selection_changed |= self.set_selected(None);
                }
                CanvasEvent::ObjectModified(_) => {
                    outcome.layers_changed |= self.refresh_layers(engine);
                    record_snapshot(engine, history)?;
                    outcome.recorded += 1;
                }
                CanvasEvent::ObjectAdded(_) => {
                    outcome.layers_changed |= self.refresh_layers(engine);
                }
                CanvasEvent::ObjectRemoved(_) => {
                    outcome.layers_changed |= self.refresh_layers(engine);
                    commit_after_settle = true;
                }
            }
        }

        if commit_after_settle {
            record_snapshot(engine, history)?;
            outcome.recorded += 1;
        }

        if outcome.recorded > 0 {
            debug!("Recorded {} snapshot(s), history length {}", outcome.recorded, history.len());
        }
        Ok(outcome)
    }

    /// Rebuilds the layer list from the engine. Returns true if it changed.
    pub fn refresh_layers<E: Engine>(&mut self, engine: &E) -> bool {
        let layers = layers_for(engine.objects());
        if layers == self.layers {
            return false;
        }
        self.layers = layers;
        true
    }

    /// Re-reads the engine's active object. Returns true if it changed.
    pub fn refresh_selection<E: Engine>(&mut self, engine: &E) -> bool {
        self.set_selected(engine.active_object())
    }

    pub fn reset(&mut self) {
        self.layers.clear();
        self.selected = None;
    }

    fn set_selected(&mut self, selected: Option<ObjectId>) -> bool {
        if self.selected == selected {
            return false;
        }
        self.selected = selected;
        true
    }
}

/// Orders a drained batch for delivery: selection events first, each rank
/// in emission order
fn delivery_order(mut events: Vec<CanvasEvent>) -> Vec<CanvasEvent> {
    events.sort_by_key(CanvasEvent::delivery_rank);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::object::factory;
    use egui::Vec2;

    struct Fixture {
        canvas: Canvas,
        bridge: SyncBridge,
        suppression: Suppression,
        history: History,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                canvas: Canvas::new(Vec2::new(800.0, 600.0)),
                bridge: SyncBridge::new(),
                suppression: Suppression::new(),
                history: History::new(),
            }
        }

        fn sync(&mut self) -> SyncOutcome {
            let events = self.canvas.drain_events();
            self.bridge
                .dispatch(events, &self.suppression, &self.canvas, &mut self.history)
                .unwrap()
        }
    }

    #[test]
    fn test_added_refreshes_layers_without_recording() {
        let mut fx = Fixture::new();
        fx.canvas.add(factory::create_rectangle());

        let outcome = fx.sync();
        assert!(outcome.layers_changed);
        assert_eq!(outcome.recorded, 0);
        assert_eq!(fx.bridge.layers().len(), 1);
        assert!(fx.history.is_empty());
    }

    #[test]
    fn test_modified_records_snapshot() {
        let mut fx = Fixture::new();
        let rect = fx.canvas.add(factory::create_rectangle());
        fx.sync();

        fx.canvas.modify_object(rect, |o| o.angle = 45.0).unwrap();
        let outcome = fx.sync();
        assert_eq!(outcome.recorded, 1);
        assert_eq!(fx.history.len(), 1);
        assert!(fx.history.current().unwrap().json().contains("45"));
    }

    #[test]
    fn test_removals_commit_once_after_batch() {
        let mut fx = Fixture::new();
        let a = fx.canvas.add(factory::create_rectangle());
        let b = fx.canvas.add(factory::create_circle());
        fx.sync();

        fx.canvas.remove(a);
        fx.canvas.remove(b);
        let outcome = fx.sync();
        assert_eq!(outcome.recorded, 1);
        assert!(fx.bridge.layers().is_empty());
        assert!(!fx.history.current().unwrap().json().contains(&a.to_string()));
    }

    #[test]
    fn test_selection_follows_engine() {
        let mut fx = Fixture::new();
        let a = fx.canvas.add(factory::create_rectangle());
        let b = fx.canvas.add(factory::create_circle());
        fx.canvas.set_active_object(a);
        fx.sync();
        assert_eq!(fx.bridge.selected(), Some(a));

        fx.canvas.set_active_object(b);
        assert!(fx.sync().selection_changed);
        assert_eq!(fx.bridge.selected(), Some(b));

        fx.canvas.discard_active_object();
        fx.sync();
        assert_eq!(fx.bridge.selected(), None);
    }

    #[test]
    fn test_selection_delivered_before_object_events() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        let batch = vec![
            CanvasEvent::ObjectModified(a),
            CanvasEvent::SelectionCreated { selected: vec![a] },
            CanvasEvent::ObjectRemoved(b),
            CanvasEvent::SelectionCleared,
        ];

        assert_eq!(
            delivery_order(batch),
            vec![
                CanvasEvent::SelectionCreated { selected: vec![a] },
                CanvasEvent::SelectionCleared,
                CanvasEvent::ObjectModified(a),
                CanvasEvent::ObjectRemoved(b),
            ]
        );
    }

    #[test]
    fn test_selection_settled_before_modification_is_recorded() {
        let mut fx = Fixture::new();
        let rect = fx.canvas.add(factory::create_rectangle());
        fx.sync();

        fx.canvas.modify_object(rect, |o| o.angle = 90.0).unwrap();
        fx.canvas.set_active_object(rect);
        let outcome = fx.sync();

        assert!(outcome.selection_changed);
        assert_eq!(outcome.recorded, 1);
        assert_eq!(fx.bridge.selected(), Some(rect));
    }

    #[test]
    fn test_suppressed_batch_is_ignored() {
        let mut fx = Fixture::new();
        let rect = fx.canvas.add(factory::create_rectangle());
        fx.canvas.set_active_object(rect);
        fx.canvas.modify_object(rect, |o| o.flip_x = true).unwrap();

        let guard = fx.suppression.acquire();
        let outcome = fx.sync();
        drop(guard);

        assert!(outcome.is_empty());
        assert!(fx.bridge.layers().is_empty());
        assert_eq!(fx.bridge.selected(), None);
        assert!(fx.history.is_empty());
    }
}
