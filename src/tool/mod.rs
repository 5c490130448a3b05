use serde::{Deserialize, Serialize};

/// Interaction mode of the canvas, chosen from the toolbar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Draw,
    Text,
    Shapes,
    Crop,
}

/// How the engine should treat pointer input for a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Text,
    Crosshair,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Draw => "draw",
            Tool::Text => "text",
            Tool::Shapes => "shapes",
            Tool::Crop => "crop",
        }
    }

    /// Freehand drawing takes over pointer input
    pub fn is_drawing(&self) -> bool {
        matches!(self, Tool::Draw)
    }

    /// Crop works on an existing object and is disabled without a selection
    pub fn requires_selection(&self) -> bool {
        matches!(self, Tool::Crop)
    }

    pub fn cursor(&self) -> Cursor {
        match self {
            Tool::Text => Cursor::Text,
            Tool::Shapes => Cursor::Crosshair,
            _ => Cursor::Default,
        }
    }
}
