use super::Editor;
use crate::canvas::Engine;
use crate::error::{EditorError, EditorResult};
use crate::object::{factory, ObjectId, ObjectKind, TextStyle, TextStyleChange};

impl<E: Engine> Editor<E> {
    /// Style of the selected text object, if the selection is text
    pub fn selected_text_style(&self) -> Option<&TextStyle> {
        match &self.selected_object()?.kind {
            ObjectKind::Text { style, .. } => Some(style),
            _ => None,
        }
    }

    pub fn apply_text_style(&mut self, change: TextStyleChange) -> EditorResult<()> {
        if !self.is_ready() {
            return Ok(());
        }
        let id = match self.selected_object() {
            Some(object) if object.is_text() => object.id,
            _ => return Err(EditorError::InvalidTarget("Select a text object to style")),
        };
        self.edit_object(id, |object| {
            if let Some(style) = object.text_style_mut() {
                change.apply(style);
            }
        })?;
        Ok(())
    }

    /// Adds a text object carrying the panel's current style
    pub fn add_styled_text(&mut self, content: &str, style: TextStyle) -> EditorResult<Option<ObjectId>> {
        let mut text = factory::create_text(content);
        if let Some(current) = text.text_style_mut() {
            *current = style;
        }
        self.insert_object(text)
    }
}
