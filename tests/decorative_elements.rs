mod common;

use common::solid;
use egui::{Color32, Pos2, Vec2};

use zine_tools::canvas::{BlendMode, Canvas, ImageFilter, SceneCanvas};
use zine_tools::config::EditorConfig;
use zine_tools::tool::decorative::{self, DecorativeElement, DecorativeKind, WASHI_OPACITY, WASHI_SIZE};
use zine_tools::assets::ImageSource;

#[test]
fn test_asset_paths_follow_type_and_variant() {
    let base = "/assets/decorative/";
    assert_eq!(
        decorative::asset_path(base, DecorativeKind::Washi, "floral"),
        "/assets/decorative/washi-floral.png"
    );
    assert_eq!(
        decorative::asset_path(base, DecorativeKind::Sticker, "vintage"),
        "/assets/decorative/sticker-vintage.png"
    );
    assert_eq!(
        DecorativeElement::new(DecorativeKind::Stamp, "date").source(base),
        ImageSource::Asset("/assets/decorative/stamp-date.png".to_owned())
    );
}

#[test]
fn test_washi_ignores_form_size_and_opacity() {
    let config = EditorConfig::default();
    let element = DecorativeElement {
        opacity: 0.2,
        scale: 2.5,
        rotation: 15.0,
        ..DecorativeElement::new(DecorativeKind::Washi, "dots")
    };
    for (w, h) in [(10, 10), (640, 90)] {
        let image = decorative::place_decorative(&element, solid(w, h, [0, 128, 255, 255]), &config);
        assert_eq!(image.size, Vec2::new(300.0, 50.0));
        assert_eq!(image.scale, Vec2::splat(1.0));
        assert_eq!(image.opacity, 0.85);
        assert_eq!(image.angle, 15.0);
        assert_eq!(image.position, Pos2::new(100.0, 100.0));
        assert_eq!(image.bounds().size(), Vec2::new(300.0, 50.0));
    }
}

#[test]
fn test_config_file_cannot_resize_washi() {
    let config = EditorConfig::from_json_str(r#"{ "washi_size": [10.0, 10.0], "washi_opacity": 0.1 }"#).expect("valid json");
    let element = DecorativeElement::new(DecorativeKind::Washi, "stripes");
    let image = decorative::place_decorative(&element, solid(64, 16, [9, 9, 9, 255]), &config);
    assert_eq!((WASHI_SIZE, WASHI_OPACITY), (Vec2::new(300.0, 50.0), 0.85));
    assert_eq!(image.size, WASHI_SIZE);
    assert_eq!(image.opacity, WASHI_OPACITY);
}

#[test]
fn test_sticker_keeps_form_values() {
    let element = DecorativeElement {
        opacity: 0.5,
        scale: 2.0,
        ..DecorativeElement::new(DecorativeKind::Sticker, "nature")
    };
    let image = decorative::place_decorative(&element, solid(20, 10, [1, 2, 3, 255]), &EditorConfig::default());
    assert_eq!(image.opacity, 0.5);
    assert_eq!(image.bounds().size(), Vec2::new(40.0, 20.0));
    assert!(image.filters.is_empty());
}

#[test]
fn test_stamp_multiplies_its_ink() {
    let config = EditorConfig::default();
    let red = Color32::from_rgb(0xdc, 0x26, 0x26);
    let element = DecorativeElement {
        ink_color: Some(red),
        ..DecorativeElement::new(DecorativeKind::Stamp, "postage")
    };
    let image = decorative::place_decorative(&element, solid(4, 4, [255, 255, 255, 255]), &config);

    assert_eq!(
        image.filters,
        vec![ImageFilter::BlendColor {
            color: red,
            mode: BlendMode::Multiply
        }]
    );
    // white multiplied by the ink is the ink
    assert_eq!(image.rendered().get_pixel(0, 0).0, [0xdc, 0x26, 0x26, 255]);
    assert_eq!(image.source().get_pixel(0, 0).0, [255, 255, 255, 255]);
}

#[test]
fn test_stamp_ink_defaults_to_black() {
    let element = DecorativeElement::new(DecorativeKind::Stamp, "words");
    let image = decorative::place_decorative(&element, solid(2, 2, [200, 200, 200, 255]), &EditorConfig::default());
    assert_eq!(
        image.filters,
        vec![ImageFilter::BlendColor {
            color: Color32::BLACK,
            mode: BlendMode::Multiply
        }]
    );
    assert_eq!(image.rendered().get_pixel(1, 1).0, [0, 0, 0, 255]);
}

#[test]
fn test_placed_element_becomes_active() {
    let mut canvas = SceneCanvas::default();
    let config = EditorConfig::default();
    let element = DecorativeElement::new(DecorativeKind::Sticker, "symbols");
    let id = decorative::add_decorative(&mut canvas, &element, solid(8, 8, [9, 9, 9, 255]), &config);

    assert_eq!(canvas.active_id(), Some(id));
    assert_eq!(canvas.render_count(), 1);
    assert_eq!(canvas.size(), Vec2::new(800.0, 600.0));
}
