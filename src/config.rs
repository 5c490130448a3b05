use egui::{Color32, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::EditorResult;

/// Settings for an editor session.
///
/// Missing fields fall back to their defaults when deserializing, so partial
/// config files stay valid as new options are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Visible canvas area
    pub canvas_size: Vec2,
    pub background: Color32,
    /// Fraction of the canvas a freshly loaded image may cover
    pub fit_margin: f32,
    pub brush_width: f32,
    pub brush_color: Color32,
    /// Oldest snapshots are evicted past this length. `None` keeps the whole session.
    pub max_history: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_size: Vec2::new(800.0, 600.0),
            background: Color32::from_rgb(0xf3, 0xf4, 0xf6),
            fit_margin: 0.9,
            brush_width: 2.0,
            brush_color: Color32::BLACK,
            max_history: None,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> EditorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
