use egui::{Color32, Pos2, Vec2, pos2};

use zine_tools::assets::decode_data_url;
use zine_tools::canvas::BlendMode;
use zine_tools::tool::ToolId;
use zine_tools::tool::drawing::{BrushKind, DrawingStroke, DrawingTool, PointerSample, StrokeState};

fn stroke_with(tool: DrawingTool) -> DrawingStroke {
    DrawingStroke::new(tool, Vec2::new(64.0, 64.0))
}

fn marker() -> DrawingTool {
    DrawingTool {
        brush: BrushKind::Marker,
        ..DrawingTool::default()
    }
}

#[test]
fn test_marker_segments_always_multiply() {
    let mut stroke = stroke_with(DrawingTool::for_tool(ToolId::Highlight));
    stroke.pointer_down(PointerSample::at(pos2(5.0, 5.0)));
    let style = stroke.pointer_move(PointerSample::at(pos2(10.0, 5.0))).expect("drawing");
    assert_eq!(style.blend, BlendMode::Overlay);
    stroke.pointer_up().expect("snapshot");

    stroke.set_tool(marker());
    stroke.pointer_down(PointerSample::at(pos2(5.0, 20.0)));
    for x in [10.0, 20.0, 30.0, 40.0] {
        let style = stroke.pointer_move(PointerSample::at(pos2(x, 20.0))).expect("drawing");
        assert_eq!(style.blend, BlendMode::Multiply);
    }
}

#[test]
fn test_brush_profiles() {
    let sample = PointerSample::at(Pos2::ZERO);
    let style_of = |brush| {
        DrawingTool {
            brush,
            size: 10.0,
            ..DrawingTool::default()
        }
        .segment_style(&sample)
    };

    let pencil = style_of(BrushKind::Pencil);
    assert_eq!((pencil.blend, pencil.alpha, pencil.width), (BlendMode::Normal, 0.8, 8.0));

    let crayon = style_of(BrushKind::Crayon);
    assert_eq!((crayon.alpha, crayon.width, crayon.blur), (0.7, 15.0, 1.0));

    let highlighter = style_of(BrushKind::Highlighter);
    assert_eq!((highlighter.blend, highlighter.alpha), (BlendMode::Overlay, 0.4));

    let ballpoint = DrawingTool {
        brush: BrushKind::Ballpoint,
        blend_mode: BlendMode::Multiply,
        ..DrawingTool::default()
    }
    .segment_style(&sample);
    assert_eq!(ballpoint.blend, BlendMode::Multiply);
}

#[test]
fn test_pressure_scales_width_only_when_enabled() {
    let sample = PointerSample::at(Pos2::ZERO).with_pressure(0.5);
    let tool = DrawingTool {
        size: 10.0,
        ..marker()
    };
    assert_eq!(tool.segment_style(&sample).width, 5.0);
    assert_eq!(tool.segment_style(&PointerSample::at(Pos2::ZERO)).width, 10.0);

    let flat = DrawingTool {
        pressure: false,
        ..tool
    };
    assert_eq!(flat.segment_style(&sample).width, 10.0);
}

#[test]
fn test_pencil_and_crayon_ignore_pressure() {
    let sample = PointerSample::at(Pos2::ZERO).with_pressure(0.5);
    let tool = |brush| DrawingTool {
        brush,
        size: 10.0,
        pressure: true,
        ..DrawingTool::default()
    };
    assert_eq!(tool(BrushKind::Pencil).segment_style(&sample).width, 8.0);
    assert_eq!(tool(BrushKind::Crayon).segment_style(&sample).width, 15.0);
    assert_eq!(tool(BrushKind::Ballpoint).segment_style(&sample).width, 5.0);
}

#[test]
fn test_tilt_orientation_does_not_accumulate() {
    let tool = marker();
    let tilted = PointerSample::at(Pos2::ZERO).with_tilt(Vec2::new(1.0, 1.0));
    let first = tool.segment_style(&tilted).nib_angle.expect("tilt reported");
    let second = tool.segment_style(&tilted).nib_angle.expect("tilt reported");
    assert_eq!(first, second);
    assert!((first - std::f32::consts::FRAC_PI_4).abs() < 1e-6);

    assert_eq!(tool.segment_style(&PointerSample::at(Pos2::ZERO)).nib_angle, None);
    let untilted = DrawingTool { tilt: false, ..tool };
    assert_eq!(untilted.segment_style(&tilted).nib_angle, None);
}

#[test]
fn test_releasing_without_a_stroke_emits_nothing() {
    let mut stroke = stroke_with(marker());
    assert_eq!(stroke.pointer_up().expect("no encode needed"), None);
    assert_eq!(stroke.pointer_leave().expect("no encode needed"), None);
    assert!(stroke.pointer_move(PointerSample::at(pos2(3.0, 3.0))).is_none());
    assert_eq!(stroke.state(), StrokeState::Idle);
}

#[test]
fn test_finished_stroke_is_a_png_of_the_surface() {
    let mut stroke = stroke_with(DrawingTool {
        color: Color32::from_rgb(0xdc, 0x26, 0x26),
        size: 6.0,
        ..DrawingTool::for_tool(ToolId::Pencil)
    });
    stroke.pointer_down(PointerSample::at(pos2(8.0, 32.0)));
    stroke.pointer_move(PointerSample::at(pos2(56.0, 32.0)));
    assert!(stroke.is_drawing());

    let output = stroke.pointer_up().expect("snapshot").expect("stroke was in progress");
    assert!(output.image_data.starts_with("data:image/png;base64,"));
    assert_eq!(output.tool.brush, BrushKind::Pencil);
    assert!(!stroke.is_drawing());

    let pixels = decode_data_url(&output.image_data).expect("valid png");
    assert_eq!(pixels.dimensions(), (64, 64));
    assert!(pixels.get_pixel(32, 32).0[3] > 0);
    assert_eq!(pixels.get_pixel(32, 5).0[3], 0);
}

#[test]
fn test_leaving_the_surface_finishes_the_stroke() {
    let mut stroke = stroke_with(marker());
    stroke.pointer_down(PointerSample::at(pos2(10.0, 10.0)));
    stroke.pointer_move(PointerSample::at(pos2(20.0, 10.0)));
    assert!(stroke.pointer_leave().expect("snapshot").is_some());
    assert_eq!(stroke.state(), StrokeState::Idle);
}

#[test]
fn test_clear_wipes_the_surface() {
    let mut stroke = stroke_with(marker());
    stroke.pointer_down(PointerSample::at(pos2(10.0, 10.0)));
    stroke.pointer_move(PointerSample::at(pos2(50.0, 50.0)));
    stroke.clear();
    assert!(stroke.surface().pixels().pixels().all(|pixel| pixel.0[3] == 0));
    assert!(!stroke.is_drawing());
}
