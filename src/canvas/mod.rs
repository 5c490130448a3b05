//! The graphics engine boundary.
//!
//! The editor core never owns the object graph. It drives an [`Engine`] through
//! the operations below and learns about changes by draining the engine's
//! notification queue. [`Canvas`] is the in-memory engine shipped with the crate.

mod scene;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::event::CanvasEvent;
use crate::export::ExportOptions;
use crate::object::{CanvasObject, ObjectId};
use crate::tool::Cursor;

pub use scene::Canvas;

/// Freehand drawing settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    pub width: f32,
    pub color: Color32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            width: 2.0,
            color: Color32::BLACK,
        }
    }
}

/// Operations the editor core requires from a graphics engine.
///
/// Structural operations (`add`, `remove`, `clear`, `load_from_json`) and
/// selection changes queue a [`CanvasEvent`]. Property writes through
/// `object_mut` are silent. Queued events are delivered when the caller drains
/// them; an empty drain means the engine has settled.
pub trait Engine {
    /// Visible width of the canvas
    fn width(&self) -> f32;

    /// Visible height of the canvas
    fn height(&self) -> f32;

    /// Serializes the full object graph
    fn to_json(&self) -> EngineResult<String>;

    /// Replaces the full object graph. On error the graph is left untouched.
    fn load_from_json(&mut self, json: &str) -> EngineResult<()>;

    /// Objects in stacking order, bottom first
    fn objects(&self) -> &[CanvasObject];

    fn object(&self, id: ObjectId) -> Option<&CanvasObject> {
        self.objects().iter().find(|object| object.id == id)
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut CanvasObject>;

    fn add(&mut self, object: CanvasObject) -> ObjectId;

    fn remove(&mut self, id: ObjectId) -> Option<CanvasObject>;

    fn clear(&mut self);

    /// Moves the object one step up the stack. Returns false if it was already on top.
    fn bring_forward(&mut self, id: ObjectId) -> bool;

    /// Moves the object one step down the stack. Returns false if it was already at the bottom.
    fn send_backwards(&mut self, id: ObjectId) -> bool;

    fn active_object(&self) -> Option<ObjectId>;

    fn set_active_object(&mut self, id: ObjectId) -> bool;

    fn discard_active_object(&mut self);

    /// Materializes the object's pending filter list into its rendered pixels
    fn apply_filters(&mut self, id: ObjectId) -> bool;

    fn request_render_all(&mut self);

    fn set_background(&mut self, color: Color32);

    /// `Some` turns pointer input into freehand strokes drawn with the brush
    fn set_drawing_mode(&mut self, brush: Option<Brush>);

    /// Pointer cursor shown over the canvas
    fn set_cursor(&mut self, cursor: Cursor);

    /// Encodes the rendered document in the requested format
    fn export(&self, options: &ExportOptions) -> EngineResult<Vec<u8>>;

    /// Takes every queued notification, in emission order
    fn drain_events(&mut self) -> Vec<CanvasEvent>;
}
