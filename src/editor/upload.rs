use std::future::Future;
use std::io;

use egui::{Pos2, Vec2};
use futures::TryFutureExt;
use log::{error, info};

use super::Editor;
use crate::canvas::Engine;
use crate::error::{EditorError, EditorResult};
use crate::object::{factory, ObjectId};

/// Scale and top-left position that fit `natural` inside `area`, keeping the
/// aspect ratio and centring the result. `margin` is the fraction of the area
/// the image may cover.
pub fn fit_to_area(natural: Vec2, area: Vec2, margin: f32) -> (f32, Pos2) {
    let width = natural.x.max(1.0);
    let height = natural.y.max(1.0);
    let scale = (area.x / width).min(area.y / height) * margin;
    let position = Pos2::new(
        (area.x - width * scale) / 2.0,
        (area.y - height * scale) / 2.0,
    );
    (scale, position)
}

impl<E: Engine> Editor<E> {
    pub fn has_image(&self) -> bool {
        self.engine
            .as_ref()
            .is_some_and(|engine| engine.objects().iter().any(|object| object.is_image()))
    }

    /// Puts an uploaded image on the canvas as the new document.
    ///
    /// Skipped when an image is already present, so repeated triggers never
    /// insert it twice. Returns the new object's id when something was loaded.
    /// Undecodable bytes are reported without touching the document.
    pub fn load_image(&mut self, name: &str, bytes: &[u8]) -> EditorResult<Option<ObjectId>> {
        if !self.is_ready() {
            return Ok(None);
        }
        if self.has_image() {
            info!("Image already exists, skipping load of {name}");
            return Ok(None);
        }

        let decoded = ::image::load_from_memory(bytes).map_err(|err| {
            error!("Failed to load image {name}: {err}");
            EditorError::ResourceLoad {
                name: name.to_owned(),
                reason: err.to_string(),
            }
        })?;
        let natural = Vec2::new(decoded.width() as f32, decoded.height() as f32);
        info!("Loading image {name}: {}x{}", natural.x, natural.y);

        let background = self.config.background;
        let margin = self.config.fit_margin;
        self.filter_preview = None;
        self.suppressed(|_, engine| {
            let area = Vec2::new(engine.width(), engine.height());
            let (scale, position) = fit_to_area(natural, area, margin);

            let mut image = factory::create_image(name, natural);
            image.scale = scale;
            image.position = position;

            engine.clear();
            engine.set_background(background);
            let id = engine.add(image);
            engine.set_active_object(id);
            Ok(id)
        })
    }

    /// Awaits the image bytes, then loads them like [`Editor::load_image`].
    /// The document is left untouched if fetching fails.
    pub async fn load_image_async<F>(&mut self, name: &str, source: F) -> EditorResult<Option<ObjectId>>
    where
        F: Future<Output = io::Result<Vec<u8>>>,
    {
        if !self.is_ready() || self.has_image() {
            return Ok(None);
        }
        let bytes = source
            .map_err(|err| {
                error!("Failed to fetch image {name}: {err}");
                EditorError::ResourceLoad {
                    name: name.to_owned(),
                    reason: err.to_string(),
                }
            })
            .await?;
        self.load_image(name, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_wide_image() {
        let (scale, position) = fit_to_area(Vec2::new(1600.0, 400.0), Vec2::new(800.0, 600.0), 0.9);
        assert!((scale - 0.45).abs() < 1e-6);
        assert!((position.x - 40.0).abs() < 1e-4);
        assert!((position.y - 210.0).abs() < 1e-4);
    }

    #[test]
    fn test_fit_small_image_scales_up() {
        let (scale, position) = fit_to_area(Vec2::new(100.0, 100.0), Vec2::new(800.0, 600.0), 1.0);
        assert!((scale - 6.0).abs() < 1e-6);
        assert_eq!(position, Pos2::new(100.0, 0.0));
    }
}
