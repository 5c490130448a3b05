use crate::object::{CanvasObject, ObjectId, ObjectKind};

/// Maximum number of characters of a text object shown in its layer name
const TEXT_PREVIEW_CHARS: usize = 15;

/// Layer-panel row derived from one engine object.
///
/// Layers are rebuilt from the engine's object list on every structural
/// change and are never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Identity of the object this row mirrors
    pub id: ObjectId,
    /// Stacking position, 0 is the bottom of the stack
    pub index: usize,
    pub type_tag: &'static str,
    pub name: String,
    pub visible: bool,
    pub opacity: f32,
}

impl Layer {
    pub fn from_object(index: usize, object: &CanvasObject) -> Self {
        Self {
            id: object.id,
            index,
            type_tag: object.type_tag(),
            name: layer_name(index, object),
            visible: object.visible,
            opacity: object.opacity,
        }
    }

    /// Opacity as shown on the panel slider
    pub fn opacity_percent(&self) -> u8 {
        (self.opacity * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

/// Builds the layer list for an object list in stacking order
pub fn layers_for(objects: &[CanvasObject]) -> Vec<Layer> {
    objects
        .iter()
        .enumerate()
        .map(|(index, object)| Layer::from_object(index, object))
        .collect()
}

fn layer_name(index: usize, object: &CanvasObject) -> String {
    let number = index + 1;
    match &object.kind {
        ObjectKind::Image { .. } => format!("Image {number}"),
        ObjectKind::Text { content, .. } => {
            let preview: String = content.chars().take(TEXT_PREVIEW_CHARS).collect();
            format!("Text: {preview}...")
        }
        ObjectKind::Rect { .. } => format!("Rectangle {number}"),
        ObjectKind::Circle { .. } => format!("Circle {number}"),
        ObjectKind::Path { .. } => format!("Drawing {number}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::factory;

    #[test]
    fn test_layer_names() {
        let objects = vec![
            factory::create_rectangle(),
            factory::create_text("A rather long caption for a photo"),
            factory::create_circle(),
        ];
        let layers = layers_for(&objects);

        assert_eq!(layers[0].name, "Rectangle 1");
        assert_eq!(layers[1].name, "Text: A rather long c...");
        assert_eq!(layers[2].name, "Circle 3");
        assert_eq!(layers[2].index, 2);
        assert_eq!(layers[1].type_tag, "i-text");
    }

    #[test]
    fn test_opacity_percent() {
        let mut rect = factory::create_rectangle();
        rect.set_opacity(0.456);
        assert_eq!(Layer::from_object(0, &rect).opacity_percent(), 46);
    }
}
