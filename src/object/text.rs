use egui::Color32;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Typography of a text object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f32,
    pub font_weight: u16,
    pub fill: Color32,
    pub text_align: TextAlign,
    pub line_height: f32,
    /// Thousandths of an em
    pub char_spacing: f32,
    pub italic: bool,
    pub underline: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_owned(),
            font_size: 24.0,
            font_weight: 400,
            fill: Color32::BLACK,
            text_align: TextAlign::Left,
            line_height: 1.16,
            char_spacing: 0.0,
            italic: false,
            underline: false,
        }
    }
}

impl TextStyle {
    pub fn is_bold(&self) -> bool {
        self.font_weight >= 700
    }
}

/// A single property edit issued by the text style panel
#[derive(Debug, Clone, PartialEq)]
pub enum TextStyleChange {
    FontFamily(String),
    FontSize(f32),
    FontWeight(u16),
    Bold(bool),
    Fill(Color32),
    Align(TextAlign),
    LineHeight(f32),
    /// Panel units; stored as ten times the value
    CharSpacing(f32),
    Italic(bool),
    Underline(bool),
}

impl TextStyleChange {
    pub fn apply(&self, style: &mut TextStyle) {
        match self {
            TextStyleChange::FontFamily(family) => style.font_family = family.clone(),
            TextStyleChange::FontSize(size) => style.font_size = size.max(1.0),
            TextStyleChange::FontWeight(weight) => style.font_weight = *weight,
            TextStyleChange::Bold(bold) => style.font_weight = if *bold { 700 } else { 400 },
            TextStyleChange::Fill(color) => style.fill = *color,
            TextStyleChange::Align(align) => style.text_align = *align,
            TextStyleChange::LineHeight(height) => style.line_height = *height,
            TextStyleChange::CharSpacing(spacing) => style.char_spacing = spacing * 10.0,
            TextStyleChange::Italic(italic) => style.italic = *italic,
            TextStyleChange::Underline(underline) => style.underline = *underline,
        }
    }
}
