#![warn(clippy::all, rust_2018_idioms)]

pub mod canvas;
pub mod config;
pub mod editor;
pub mod error;
pub mod event;
pub mod export;
pub mod history;
pub mod layer;
pub mod object;
pub mod sync;
pub mod tool;
pub mod util;

pub use canvas::{Brush, Canvas, Engine};
pub use config::EditorConfig;
pub use editor::Editor;
pub use error::{EditorError, EditorResult, EngineError, EngineResult};
pub use export::{ExportFormat, ExportOptions, ExportedImage};
pub use event::{CanvasEvent, EditorEvent, EventBus, EventHandler, EventLog, SubscriptionId};
pub use history::{History, Snapshot};
pub use layer::Layer;
pub use object::{CanvasObject, Filter, FilterAdjustments, FilterPreset, ObjectId, ObjectKind};
pub use sync::{Suppression, SyncBridge, SyncOutcome};
pub use tool::Tool;
