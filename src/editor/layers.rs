use super::Editor;
use crate::canvas::Engine;
use crate::error::EditorResult;
use crate::object::ObjectId;

/// Layer panel actions. Stacking and property changes are one undoable step
/// each; selecting a layer is not recorded.
impl<E: Engine> Editor<E> {
    /// Makes the layer's object the active one. The selection reaches the
    /// derived state through the bridge like any other selection change.
    pub fn select_layer(&mut self, id: ObjectId) -> EditorResult<bool> {
        self.require_object(id)?;
        let selected = match self.engine.as_mut() {
            Some(engine) => {
                let selected = engine.set_active_object(id);
                engine.request_render_all();
                selected
            }
            None => return Ok(false),
        };
        self.sync()?;
        Ok(selected)
    }

    pub fn toggle_visibility(&mut self, id: ObjectId) -> EditorResult<bool> {
        self.edit_object(id, |object| object.visible = !object.visible)
    }

    /// Sets the opacity from the panel slider, in percent
    pub fn set_layer_opacity(&mut self, id: ObjectId, percent: u8) -> EditorResult<bool> {
        let opacity = f32::from(percent.min(100)) / 100.0;
        self.edit_object(id, |object| object.set_opacity(opacity))
    }

    pub fn delete_layer(&mut self, id: ObjectId) -> EditorResult<bool> {
        self.remove_object(id)
    }

    /// Moves the layer one step towards the top. Returns false if it already is on top.
    pub fn move_layer_up(&mut self, id: ObjectId) -> EditorResult<bool> {
        self.require_object(id)?;
        match self.stack_index(id) {
            Some((index, len)) if index + 1 < len => self.restack(|engine| engine.bring_forward(id)),
            _ => Ok(false),
        }
    }

    /// Moves the layer one step towards the bottom. Returns false if it already is at the bottom.
    pub fn move_layer_down(&mut self, id: ObjectId) -> EditorResult<bool> {
        self.require_object(id)?;
        match self.stack_index(id) {
            Some((index, _)) if index > 0 => self.restack(|engine| engine.send_backwards(id)),
            _ => Ok(false),
        }
    }

    /// Position of the object in the engine's current stack, and the stack height
    fn stack_index(&self, id: ObjectId) -> Option<(usize, usize)> {
        let objects = self.engine.as_ref()?.objects();
        let index = objects.iter().position(|object| object.id == id)?;
        Some((index, objects.len()))
    }

    fn restack<F>(&mut self, step: F) -> EditorResult<bool>
    where
        F: FnOnce(&mut E) -> bool,
    {
        let moved = self.suppressed(|_, engine| Ok(step(engine)))?;
        Ok(moved.unwrap_or(false))
    }
}
