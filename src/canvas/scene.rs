use std::io::Cursor as ByteCursor;

use egui::{Color32, Pos2, Vec2};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Rgb, RgbImage};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{Brush, Engine};
use crate::error::{EngineError, EngineResult};
use crate::event::CanvasEvent;
use crate::export::{ExportFormat, ExportOptions};
use crate::object::{factory, CanvasObject, ObjectId};
use crate::tool::Cursor;

const SCENE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
struct SceneRef<'a> {
    version: &'a str,
    background: Color32,
    objects: &'a [CanvasObject],
}

#[derive(Deserialize)]
struct SceneData {
    version: String,
    background: Color32,
    objects: Vec<CanvasObject>,
}

/// In-memory scene graph implementing [`Engine`]
#[derive(Debug)]
pub struct Canvas {
    size: Vec2,
    background: Color32,
    objects: Vec<CanvasObject>,
    active: Option<ObjectId>,
    brush: Option<Brush>,
    cursor: Cursor,
    pending: Vec<CanvasEvent>,
    render_count: u64,
}

impl Canvas {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            background: Color32::WHITE,
            objects: Vec::new(),
            active: None,
            brush: None,
            cursor: Cursor::Default,
            pending: Vec::new(),
            render_count: 0,
        }
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn set_dimensions(&mut self, size: Vec2) {
        self.size = size;
        self.request_render_all();
    }

    pub fn is_drawing_mode(&self) -> bool {
        self.brush.is_some()
    }

    pub fn brush(&self) -> Option<Brush> {
        self.brush
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Number of render passes requested so far
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending.is_empty()
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|object| object.id == id)
    }

    /// Interactive edit path (end of a drag, a handle resize...). Unlike
    /// `object_mut`, this reports the change as `ObjectModified`.
    pub fn modify_object<F>(&mut self, id: ObjectId, edit: F) -> EngineResult<()>
    where
        F: FnOnce(&mut CanvasObject),
    {
        let object = self
            .objects
            .iter_mut()
            .find(|object| object.id == id)
            .ok_or(EngineError::UnknownObject(id))?;
        edit(object);
        self.pending.push(CanvasEvent::ObjectModified(id));
        self.request_render_all();
        Ok(())
    }

    /// Finishes a freehand stroke. Does nothing outside drawing mode.
    pub fn draw_path(&mut self, points: Vec<Pos2>) -> Option<ObjectId> {
        let brush = self.brush?;
        if points.is_empty() {
            return None;
        }
        let path = factory::create_path(points, brush.color, brush.width);
        let id = self.add(path);
        self.request_render_all();
        Some(id)
    }
}

impl Engine for Canvas {
    fn width(&self) -> f32 {
        self.size.x
    }

    fn height(&self) -> f32 {
        self.size.y
    }

    fn to_json(&self) -> EngineResult<String> {
        let scene = SceneRef {
            version: SCENE_VERSION,
            background: self.background,
            objects: &self.objects,
        };
        serde_json::to_string(&scene).map_err(EngineError::Serialize)
    }

    fn load_from_json(&mut self, json: &str) -> EngineResult<()> {
        // Parse everything before touching the graph
        let scene: SceneData = serde_json::from_str(json).map_err(EngineError::Parse)?;
        if scene.version != SCENE_VERSION {
            warn!(
                "Scene version {} differs from current version {}",
                scene.version, SCENE_VERSION
            );
        }

        self.clear();
        self.background = scene.background;
        for object in scene.objects {
            let id = self.add(object);
            // Filter output is not serialized
            self.apply_filters(id);
        }
        debug!("Loaded scene with {} objects", self.objects.len());
        Ok(())
    }

    fn objects(&self) -> &[CanvasObject] {
        &self.objects
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut CanvasObject> {
        self.objects.iter_mut().find(|object| object.id == id)
    }

    fn add(&mut self, object: CanvasObject) -> ObjectId {
        let id = object.id;
        self.objects.push(object);
        self.pending.push(CanvasEvent::ObjectAdded(id));
        id
    }

    fn remove(&mut self, id: ObjectId) -> Option<CanvasObject> {
        let index = self.index_of(id)?;
        if self.active == Some(id) {
            self.discard_active_object();
        }
        let object = self.objects.remove(index);
        self.pending.push(CanvasEvent::ObjectRemoved(id));
        Some(object)
    }

    fn clear(&mut self) {
        self.discard_active_object();
        for object in std::mem::take(&mut self.objects) {
            self.pending.push(CanvasEvent::ObjectRemoved(object.id));
        }
    }

    fn bring_forward(&mut self, id: ObjectId) -> bool {
        match self.index_of(id) {
            Some(index) if index + 1 < self.objects.len() => {
                self.objects.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }

    fn send_backwards(&mut self, id: ObjectId) -> bool {
        match self.index_of(id) {
            Some(index) if index > 0 => {
                self.objects.swap(index, index - 1);
                true
            }
            _ => false,
        }
    }

    fn active_object(&self) -> Option<ObjectId> {
        self.active
    }

    fn set_active_object(&mut self, id: ObjectId) -> bool {
        if self.index_of(id).is_none() {
            return false;
        }
        match self.active.replace(id) {
            Some(previous) if previous == id => {}
            Some(_) => self.pending.push(CanvasEvent::SelectionUpdated { selected: vec![id] }),
            None => self.pending.push(CanvasEvent::SelectionCreated { selected: vec![id] }),
        }
        true
    }

    fn discard_active_object(&mut self) {
        if self.active.take().is_some() {
            self.pending.push(CanvasEvent::SelectionCleared);
        }
    }

    fn apply_filters(&mut self, id: ObjectId) -> bool {
        match self.object_mut(id) {
            Some(object) => {
                object.applied_filters = object.filters.clone();
                true
            }
            None => false,
        }
    }

    fn request_render_all(&mut self) {
        self.render_count += 1;
    }

    fn set_background(&mut self, color: Color32) {
        self.background = color;
    }

    fn set_drawing_mode(&mut self, brush: Option<Brush>) {
        self.brush = brush;
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// The in-memory canvas has no rasterizer: the export is the canvas area
    /// filled with the background colour.
    fn export(&self, options: &ExportOptions) -> EngineResult<Vec<u8>> {
        let [r, g, b, _] = self.background.to_array();
        let width = self.size.x.round().max(1.0) as u32;
        let height = self.size.y.round().max(1.0) as u32;
        let raster = RgbImage::from_pixel(width, height, Rgb([r, g, b]));

        let mut bytes = Vec::new();
        match options.format {
            ExportFormat::Jpeg => {
                JpegEncoder::new_with_quality(&mut bytes, options.quality()).encode_image(&raster)?;
            }
            format => {
                DynamicImage::ImageRgb8(raster)
                    .write_to(&mut ByteCursor::new(&mut bytes), format.image_format())?;
            }
        }
        debug!("Exported {width}x{height} canvas as {}", options.format.extension());
        Ok(bytes)
    }

    fn drain_events(&mut self) -> Vec<CanvasEvent> {
        std::mem::take(&mut self.pending)
    }
}
