use egui::{Color32, Pos2, Rect, Vec2};

use zine_tools::canvas::{Canvas, CanvasObject, SceneCanvas, TextObject};
use zine_tools::config::EditorConfig;
use zine_tools::tool::ToolId;
use zine_tools::tool::layout::{self, PageLayout};

#[test]
fn test_eight_page_zine_gets_fold_guides() {
    let mut canvas = SceneCanvas::default();
    let config = EditorConfig::default();
    let guides = layout::apply_layout(&mut canvas, &PageLayout::EightPage.template(), &config);

    assert_eq!(canvas.size(), Vec2::new(816.0, 1056.0));
    assert_eq!(guides.len(), 3);

    let lines: Vec<_> = canvas.objects().filter_map(CanvasObject::as_line).collect();
    assert_eq!(lines.len(), 3);
    assert_eq!((lines[0].from, lines[0].to), (Pos2::new(0.0, 528.0), Pos2::new(816.0, 528.0)));
    assert_eq!((lines[1].from, lines[1].to), (Pos2::new(272.0, 0.0), Pos2::new(272.0, 1056.0)));
    assert_eq!((lines[2].from, lines[2].to), (Pos2::new(544.0, 0.0), Pos2::new(544.0, 1056.0)));
    for line in lines {
        assert_eq!(line.dash, Some([5.0, 5.0]));
        assert_eq!(line.stroke, Color32::from_rgb(0xaa, 0xaa, 0xaa));
        assert!(!line.selectable);
        assert!(line.guide);
    }
}

#[test]
fn test_quarter_page_gets_a_bleed_rect() {
    let mut canvas = SceneCanvas::default();
    let config = EditorConfig::default();
    layout::apply_layout(&mut canvas, &PageLayout::Quarter.template(), &config);

    assert_eq!(canvas.size(), Vec2::new(528.0, 408.0));
    assert_eq!(canvas.len(), 1);
    let bleed = canvas.objects().find_map(CanvasObject::as_rect).expect("bleed guide");
    assert_eq!(bleed.rect, Rect::from_min_max(Pos2::new(18.0, 18.0), Pos2::new(510.0, 390.0)));
    assert_eq!(bleed.stroke, Some(Color32::from_rgb(0xff, 0x00, 0x00)));
    assert_eq!(bleed.fill, None);
    assert_eq!(bleed.dash, Some([5.0, 5.0]));
    assert!(bleed.guide && !bleed.selectable);
}

#[test]
fn test_half_page_size() {
    let mut canvas = SceneCanvas::default();
    layout::apply_layout(&mut canvas, &PageLayout::Half.template(), &EditorConfig::default());
    assert_eq!(canvas.size(), Vec2::new(528.0, 816.0));
}

#[test]
fn test_fold_lines_only_for_the_folding_template() {
    let mut canvas = SceneCanvas::default();
    let template = PageLayout::Half.template().with_fold_lines(true).with_bleed(false);
    let guides = layout::apply_layout(&mut canvas, &template, &EditorConfig::default());
    assert!(guides.is_empty());
    assert!(canvas.is_empty());
    assert_eq!(canvas.render_count(), 1);
}

#[test]
fn test_fold_and_bleed_together() {
    let mut canvas = SceneCanvas::default();
    let template = PageLayout::EightPage.template().with_bleed(true);
    let guides = layout::apply_layout(&mut canvas, &template, &EditorConfig::default());
    assert_eq!(guides.len(), 4);
    assert_eq!(canvas.guides().count(), 4);
}

#[test]
fn test_custom_layout_uses_the_configured_dpi() {
    let mut canvas = SceneCanvas::default();
    let config = EditorConfig {
        dpi: 72.0,
        ..EditorConfig::default()
    };
    let template = PageLayout::Custom {
        width: 4.0,
        height: 6.0,
    }
    .template();
    layout::apply_layout(&mut canvas, &template, &config);
    assert_eq!(canvas.size(), Vec2::new(288.0, 432.0));
    assert!(canvas.is_empty());
}

#[test]
fn test_layout_tools_map_to_templates() {
    assert_eq!(PageLayout::from_tool(ToolId::EightPage), Some(PageLayout::EightPage));
    assert_eq!(PageLayout::from_tool(ToolId::Quarter), Some(PageLayout::Quarter));
    assert_eq!(PageLayout::from_tool(ToolId::Half), Some(PageLayout::Half));
    assert!(matches!(PageLayout::from_tool(ToolId::Custom), Some(PageLayout::Custom { .. })));
    assert_eq!(PageLayout::from_tool(ToolId::Washi), None);
}

#[test]
fn test_guides_are_left_out_of_exports() {
    let mut canvas = SceneCanvas::default();
    let template = PageLayout::EightPage.template().with_bleed(true);
    layout::apply_layout(&mut canvas, &template, &EditorConfig::default());
    canvas.add_object(CanvasObject::Text(TextObject::new("cover", Pos2::new(40.0, 40.0), "Helvetica", 24.0)));

    let exported: Vec<_> = canvas.exportable_objects().collect();
    assert_eq!(exported.len(), 1);
    assert_eq!(exported[0].kind(), "text");
    assert_eq!(canvas.len(), 5);
}
