use log::info;

use super::Editor;
use crate::canvas::{Brush, Engine};
use crate::error::EditorResult;
use crate::event::EditorEvent;
use crate::object::{factory, CanvasObject, ObjectId};
use crate::tool::Tool;

impl<E: Engine> Editor<E> {
    pub fn active_tool(&self) -> Tool {
        self.active_tool
    }

    /// Switches the interaction mode. Tools that need a selection are refused
    /// while nothing is selected.
    pub fn set_active_tool(&mut self, tool: Tool) -> bool {
        if tool.requires_selection() && self.selected_object().is_none() {
            info!("{} tool needs a selected object", tool.name());
            return false;
        }
        let old = std::mem::replace(&mut self.active_tool, tool);
        if let Some(mut engine) = self.engine.take() {
            self.configure_tool(&mut engine);
            self.engine = Some(engine);
        }
        if old != tool {
            self.event_bus.emit(EditorEvent::ToolChanged { old, new: tool });
        }
        true
    }

    pub(super) fn configure_tool(&self, engine: &mut E) {
        let brush = self.active_tool.is_drawing().then(|| Brush {
            width: self.config.brush_width,
            color: self.config.brush_color,
        });
        engine.set_drawing_mode(brush);
        engine.set_cursor(self.active_tool.cursor());
    }

    pub fn add_rectangle(&mut self) -> EditorResult<Option<ObjectId>> {
        self.insert_object(factory::create_rectangle())
    }

    pub fn add_circle(&mut self) -> EditorResult<Option<ObjectId>> {
        self.insert_object(factory::create_circle())
    }

    pub fn add_text(&mut self, content: &str) -> EditorResult<Option<ObjectId>> {
        self.insert_object(factory::create_text(content))
    }

    /// Adds an object and selects it as a single undoable step
    pub fn insert_object(&mut self, object: CanvasObject) -> EditorResult<Option<ObjectId>> {
        let type_tag = object.type_tag();
        let id = self.suppressed(|_, engine| {
            let id = engine.add(object);
            engine.set_active_object(id);
            Ok(id)
        })?;
        if let Some(id) = id {
            info!("Added {type_tag} {id}");
        }
        Ok(id)
    }

    /// Removes the selected object. The history entry is recorded by the bridge
    /// when it handles the removal notification.
    pub fn delete_selected(&mut self) -> EditorResult<bool> {
        match self.selected_id() {
            Some(id) => self.remove_object(id),
            None => Ok(false),
        }
    }

    pub fn rotate_selected(&mut self) -> EditorResult<bool> {
        self.edit_selected(|object| object.angle = (object.angle + 90.0) % 360.0)
    }

    pub fn flip_horizontal(&mut self) -> EditorResult<bool> {
        self.edit_selected(|object| object.flip_x = !object.flip_x)
    }

    pub fn flip_vertical(&mut self) -> EditorResult<bool> {
        self.edit_selected(|object| object.flip_y = !object.flip_y)
    }

    pub(super) fn remove_object(&mut self, id: ObjectId) -> EditorResult<bool> {
        self.require_object(id)?;
        let removed = match self.engine.as_mut() {
            Some(engine) => {
                let removed = engine.remove(id).is_some();
                engine.request_render_all();
                removed
            }
            None => return Ok(false),
        };
        self.sync()?;
        Ok(removed)
    }

    fn edit_selected<F>(&mut self, edit: F) -> EditorResult<bool>
    where
        F: FnOnce(&mut CanvasObject),
    {
        let Some(id) = self.selected_id() else {
            return Ok(false);
        };
        self.edit_object(id, edit)
    }

    /// Applies a property edit to one object as a single undoable step
    pub(super) fn edit_object<F>(&mut self, id: ObjectId, edit: F) -> EditorResult<bool>
    where
        F: FnOnce(&mut CanvasObject),
    {
        self.require_object(id)?;
        let edited = self.suppressed(|_, engine| {
            if let Some(object) = engine.object_mut(id) {
                edit(object);
            }
            Ok(())
        })?;
        Ok(edited.is_some())
    }
}
