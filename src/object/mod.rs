use egui::{Color32, Pos2, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

mod filter;
mod text;

pub use filter::{Filter, FilterAdjustments, FilterPreset};
pub use text::{TextAlign, TextStyle, TextStyleChange};

/// Stable identity of an object on the canvas.
///
/// Ids are serialized with the scene, so an object keeps its identity across
/// snapshot restores. Selection and the layer list refer to objects by id only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Variant-specific content of a canvas object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ObjectKind {
    Image {
        /// Where the pixels came from (file name or URL); pixel data stays with the engine
        source: String,
        natural_size: Vec2,
    },
    #[serde(rename = "i-text")]
    Text { content: String, style: TextStyle },
    Rect {
        size: Vec2,
        fill: Color32,
        stroke: Color32,
        stroke_width: f32,
    },
    Circle {
        radius: f32,
        fill: Color32,
        stroke: Color32,
        stroke_width: f32,
    },
    Path {
        points: Vec<Pos2>,
        stroke: Color32,
        stroke_width: f32,
    },
}

/// A single object in the scene graph.
///
/// The sync core only reads the shared fields (type tag, visibility, opacity,
/// stacking position); everything else belongs to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasObject {
    pub id: ObjectId,
    #[serde(flatten)]
    pub kind: ObjectKind,
    /// Top-left corner in canvas coordinates
    pub position: Pos2,
    pub scale: f32,
    /// Rotation in degrees
    pub angle: f32,
    pub flip_x: bool,
    pub flip_y: bool,
    pub visible: bool,
    pub opacity: f32,
    /// Pending filter list; only image objects carry filters
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
    /// Filters last materialized by the engine
    #[serde(skip)]
    pub applied_filters: Vec<Filter>,
}

impl CanvasObject {
    pub fn new(kind: ObjectKind, position: Pos2) -> Self {
        Self {
            id: ObjectId::new(),
            kind,
            position,
            scale: 1.0,
            angle: 0.0,
            flip_x: false,
            flip_y: false,
            visible: true,
            opacity: 1.0,
            filters: Vec::new(),
            applied_filters: Vec::new(),
        }
    }

    /// Type tag used by the layer list and the serialized scene
    pub fn type_tag(&self) -> &'static str {
        match &self.kind {
            ObjectKind::Image { .. } => "image",
            ObjectKind::Text { .. } => "i-text",
            ObjectKind::Rect { .. } => "rect",
            ObjectKind::Circle { .. } => "circle",
            ObjectKind::Path { .. } => "path",
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self.kind, ObjectKind::Image { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ObjectKind::Text { .. })
    }

    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            ObjectKind::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    pub fn text_style_mut(&mut self) -> Option<&mut TextStyle> {
        match &mut self.kind {
            ObjectKind::Text { style, .. } => Some(style),
            _ => None,
        }
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }
}

/// Factory functions with the editor's default object styles
pub mod factory {
    use super::*;

    pub const DEFAULT_POSITION: Pos2 = Pos2::new(100.0, 100.0);

    pub fn create_rectangle() -> CanvasObject {
        CanvasObject::new(
            ObjectKind::Rect {
                size: Vec2::new(200.0, 100.0),
                fill: Color32::from_rgb(0x3b, 0x82, 0xf6),
                stroke: Color32::from_rgb(0x1e, 0x40, 0xaf),
                stroke_width: 2.0,
            },
            DEFAULT_POSITION,
        )
    }

    pub fn create_circle() -> CanvasObject {
        CanvasObject::new(
            ObjectKind::Circle {
                radius: 50.0,
                fill: Color32::from_rgb(0x10, 0xb9, 0x81),
                stroke: Color32::from_rgb(0x04, 0x78, 0x57),
                stroke_width: 2.0,
            },
            DEFAULT_POSITION,
        )
    }

    pub fn create_text(content: &str) -> CanvasObject {
        CanvasObject::new(
            ObjectKind::Text {
                content: content.to_owned(),
                style: TextStyle::default(),
            },
            DEFAULT_POSITION,
        )
    }

    pub fn create_image(source: &str, natural_size: Vec2) -> CanvasObject {
        CanvasObject::new(
            ObjectKind::Image {
                source: source.to_owned(),
                natural_size,
            },
            Pos2::ZERO,
        )
    }

    pub fn create_path(points: Vec<Pos2>, stroke: Color32, stroke_width: f32) -> CanvasObject {
        let origin = points
            .iter()
            .fold(Pos2::new(f32::INFINITY, f32::INFINITY), |min, p| min.min(*p));
        let origin = if origin.x.is_finite() { origin } else { Pos2::ZERO };
        CanvasObject::new(
            ObjectKind::Path {
                points,
                stroke,
                stroke_width,
            },
            origin,
        )
    }
}
