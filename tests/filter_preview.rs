use std::io::Cursor;

use canvas_sync::{
    Canvas, Editor, EditorConfig, EditorError, Engine, Filter, FilterAdjustments, FilterPreset,
    ObjectId,
};
use image::{DynamicImage, ImageFormat, RgbaImage};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Editor holding a freshly loaded, selected image
fn create_image_editor() -> (Editor, ObjectId) {
    init_logging();
    let config = EditorConfig::default();
    let canvas = Canvas::new(config.canvas_size);
    let mut editor = Editor::with_engine(config, canvas).unwrap();

    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(RgbaImage::new(64, 48))
        .write_to(&mut bytes, ImageFormat::Png)
        .unwrap();
    let id = editor
        .load_image("photo.png", &bytes.into_inner())
        .unwrap()
        .unwrap();
    (editor, id)
}

fn filters_of(editor: &Editor, id: ObjectId) -> Vec<Filter> {
    editor.engine().unwrap().object(id).unwrap().filters.clone()
}

#[test]
fn test_preview_is_not_recorded() {
    let (mut editor, id) = create_image_editor();
    let recorded = editor.history().len();

    editor
        .preview_filters(FilterAdjustments::new(50, 0, 0, 0))
        .unwrap();
    editor.sync().unwrap();

    assert!(editor.is_filter_preview_active());
    assert_eq!(filters_of(&editor, id), vec![Filter::Brightness(0.5)]);
    let object = editor.engine().unwrap().object(id).unwrap();
    assert_eq!(object.applied_filters, object.filters);
    assert_eq!(editor.history().len(), recorded);
}

#[test]
fn test_cancel_restores_original_filters() {
    let (mut editor, id) = create_image_editor();
    let recorded = editor.history().len();

    editor.preview_preset(FilterPreset::Vintage).unwrap();
    editor
        .preview_filters(FilterAdjustments::new(-20, 10, 0, 3))
        .unwrap();
    assert!(editor.cancel_filters());

    assert!(filters_of(&editor, id).is_empty());
    assert!(editor.engine().unwrap().object(id).unwrap().applied_filters.is_empty());
    assert!(!editor.is_filter_preview_active());
    assert_eq!(editor.history().len(), recorded);

    // Nothing left to cancel
    assert!(!editor.cancel_filters());
}

#[test]
fn test_apply_commits_one_entry() {
    let (mut editor, id) = create_image_editor();
    let recorded = editor.history().len();

    editor.preview_preset(FilterPreset::Sepia).unwrap();
    editor.apply_filters().unwrap();

    assert_eq!(editor.history().len(), recorded + 1);
    assert!(!editor.is_filter_preview_active());

    // A later preview cancels back to the applied list
    editor
        .preview_filters(FilterAdjustments::new(30, 0, 0, 0))
        .unwrap();
    editor.cancel_filters();
    assert_eq!(filters_of(&editor, id), vec![Filter::Sepia]);

    editor.undo().unwrap();
    assert!(filters_of(&editor, id).is_empty());
}

#[test]
fn test_reset_previews_neutral_sliders() {
    let (mut editor, id) = create_image_editor();

    editor.preview_preset(FilterPreset::Grayscale).unwrap();
    editor.reset_filters().unwrap();

    assert!(filters_of(&editor, id).is_empty());
    assert!(editor.is_filter_preview_active());
}

#[test]
fn test_undo_drops_preview() {
    let (mut editor, _) = create_image_editor();

    editor.preview_preset(FilterPreset::Invert).unwrap();
    editor.undo().unwrap();

    assert!(!editor.is_filter_preview_active());
    assert!(!editor.cancel_filters());
}

#[test]
fn test_filters_need_selected_image() {
    let (mut editor, _) = create_image_editor();
    editor.add_rectangle().unwrap();
    let recorded = editor.history().len();

    let err = editor.preview_preset(FilterPreset::Sepia).unwrap_err();
    assert!(matches!(err, EditorError::InvalidTarget(_)));
    let err = editor.apply_filters().unwrap_err();
    assert!(matches!(err, EditorError::InvalidTarget(_)));
    assert_eq!(editor.history().len(), recorded);
}

#[test]
fn test_undo_restores_applied_filters() {
    let (mut editor, id) = create_image_editor();
    editor.preview_preset(FilterPreset::Sepia).unwrap();
    editor.apply_filters().unwrap();
    editor.rotate_selected().unwrap();

    editor.undo().unwrap();

    let image = editor.engine().unwrap().object(id).unwrap();
    assert_eq!(image.angle, 0.0);
    assert_eq!(image.filters, vec![Filter::Sepia]);
    assert_eq!(image.applied_filters, vec![Filter::Sepia]);
}

#[test]
fn test_edit_during_preview_records_original_filters() {
    let (mut editor, id) = create_image_editor();
    editor.preview_preset(FilterPreset::Invert).unwrap();

    editor.add_rectangle().unwrap();

    assert!(!editor.is_filter_preview_active());
    assert!(filters_of(&editor, id).is_empty());
    assert!(!editor.history().current().unwrap().json().contains("Invert"));

    editor.select_layer(id).unwrap();
    assert!(!editor.cancel_filters());
    assert!(filters_of(&editor, id).is_empty());
}

#[test]
fn test_user_edit_during_preview_records_original_filters() {
    let (mut editor, id) = create_image_editor();
    editor.preview_preset(FilterPreset::Invert).unwrap();

    editor
        .engine_mut()
        .unwrap()
        .modify_object(id, |object| object.angle = 15.0)
        .unwrap();
    assert_eq!(editor.sync().unwrap().recorded, 1);

    let snapshot = editor.history().current().unwrap().json();
    assert!(!snapshot.contains("Invert"));
    assert!(!editor.is_filter_preview_active());
    assert!(filters_of(&editor, id).is_empty());
}

#[test]
fn test_selection_change_keeps_preview() {
    let (mut editor, id) = create_image_editor();
    let rect = editor.add_rectangle().unwrap().unwrap();
    editor.select_layer(id).unwrap();
    editor.preview_preset(FilterPreset::Grayscale).unwrap();

    editor.engine_mut().unwrap().set_active_object(rect);
    editor.sync().unwrap();

    assert!(editor.is_filter_preview_active());
    assert_eq!(filters_of(&editor, id), vec![Filter::Grayscale]);
}
