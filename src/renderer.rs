use egui::epaint::{Mesh, TextShape};
use egui::emath::Rot2;
use egui::{Color32, Context, FontId, Painter, Pos2, Rect, Shape, Stroke, TextureHandle, TextureOptions, Vec2};
use std::collections::HashMap;

use crate::canvas::{CanvasObject, ImageObject, LineObject, ObjectId, RectObject, SceneCanvas, TextObject};
use crate::raster::RasterSurface;
use crate::tool::text::TYPEWRITER_FONT;

/// Paints a [`SceneCanvas`] with egui
#[derive(Default)]
pub struct Renderer {
    textures: HashMap<ObjectId, TextureHandle>,
    surface_texture: Option<TextureHandle>,
    pub show_guides: bool,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("textures", &self.textures.len())
            .field("show_guides", &self.show_guides)
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            show_guides: true,
            ..Self::default()
        }
    }

    /// Paint the page background and every object, back to front.
    ///
    /// `origin` is where canvas (0, 0) lands on screen.
    pub fn render(&mut self, ctx: &Context, painter: &Painter, origin: Pos2, scene: &SceneCanvas) {
        use crate::canvas::Canvas as _;

        let offset = origin.to_vec2();
        painter.rect_filled(Rect::from_min_size(origin, scene.size()), 0.0, Color32::WHITE);

        self.textures.retain(|id, _| scene.find(*id).is_some());

        for (id, object) in scene.ids().zip(scene.objects()) {
            if object.is_guide() && !self.show_guides {
                continue;
            }
            match object {
                CanvasObject::Text(text) => paint_text(painter, text, offset),
                CanvasObject::Image(image) => self.paint_image(ctx, painter, id, image, offset),
                CanvasObject::Line(line) => paint_line(painter, line, offset),
                CanvasObject::Rect(rect) => paint_rect(painter, rect, offset),
            }
        }

        if let Some(active) = scene.active_object() {
            painter.rect_stroke(
                active.bounds().translate(offset).expand(2.0),
                0.0,
                Stroke::new(1.0, Color32::from_rgb(33, 150, 243)),
            );
        }
    }

    /// Paint a raster surface (the drawing pad) at `origin`
    pub fn render_surface(&mut self, ctx: &Context, painter: &Painter, origin: Pos2, surface: &RasterSurface, dirty: bool) {
        if dirty || self.surface_texture.is_none() {
            let image = color_image(surface.pixels());
            match &mut self.surface_texture {
                Some(texture) => texture.set(image, TextureOptions::LINEAR),
                None => self.surface_texture = Some(ctx.load_texture("drawing_surface", image, TextureOptions::LINEAR)),
            }
        }
        if let Some(texture) = &self.surface_texture {
            let rect = Rect::from_min_size(origin, surface.size());
            painter.image(texture.id(), rect, unit_uv(), Color32::WHITE);
        }
    }

    fn paint_image(&mut self, ctx: &Context, painter: &Painter, id: ObjectId, image: &ImageObject, offset: Vec2) {
        let texture = self
            .textures
            .entry(id)
            .or_insert_with(|| ctx.load_texture(format!("object_{id:?}"), color_image(image.rendered()), TextureOptions::LINEAR));

        let rect = image.bounds().translate(offset);
        if let Some(shadow) = image.shadow {
            painter.rect_filled(rect.translate(shadow.offset), 0.0, shadow.color);
        }
        let tint = Color32::WHITE.gamma_multiply(image.opacity.clamp(0.0, 1.0));
        let mut mesh = Mesh::with_texture(texture.id());
        mesh.add_rect_with_uv(rect, unit_uv(), tint);
        mesh.rotate(Rot2::from_angle(image.angle.to_radians()), rect.min);
        painter.add(Shape::mesh(mesh));
    }
}

fn unit_uv() -> Rect {
    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0))
}

fn color_image(pixels: &image::RgbaImage) -> egui::ColorImage {
    let size = [pixels.width() as usize, pixels.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_raw())
}

fn font_for(family: &str, size: f32) -> FontId {
    if family == TYPEWRITER_FONT {
        FontId::monospace(size)
    } else {
        FontId::proportional(size)
    }
}

fn paint_text(painter: &Painter, text: &TextObject, offset: Vec2) {
    let bounds = text.bounds().translate(offset);
    if let Some(shadow) = text.shadow {
        painter.rect_filled(bounds.translate(shadow.offset), 0.0, shadow.color);
    }
    if let Some(background) = text.background {
        painter.rect_filled(bounds, 0.0, background);
    }
    if let Some(background) = text.text_background {
        painter.rect_filled(bounds.shrink(text.padding), 0.0, background);
    }

    let font = font_for(&text.font_family, text.font_size);
    let angle = text.angle.to_radians();
    let pos = text.position + offset;

    if text.jitter.is_empty() {
        let galley = painter.layout_no_wrap(text.content.clone(), font, text.fill);
        painter.add(TextShape::new(pos, galley, text.fill).with_angle(angle));
        return;
    }

    // Typewriter wobble: lay glyphs out one by one
    let mut x = pos.x;
    for (glyph, jitter) in text.content.chars().zip(&text.jitter) {
        let galley = painter.layout_no_wrap(glyph.to_string(), font.clone(), text.fill);
        let advance = galley.size().x + text.char_spacing / 1000.0 * text.font_size;
        let glyph_pos = Pos2::new(x, pos.y + jitter.offset);
        painter.add(TextShape::new(glyph_pos, galley, text.fill).with_angle(angle + jitter.rotation.to_radians()));
        x += advance;
    }
}

fn dashed_outline(painter: &Painter, points: &[Pos2], stroke: Stroke, dash: Option<[f32; 2]>) {
    match dash {
        Some([dash_length, gap_length]) => {
            painter.extend(Shape::dashed_line(points, stroke, dash_length, gap_length));
        }
        None => {
            painter.add(Shape::line(points.to_vec(), stroke));
        }
    }
}

fn paint_line(painter: &Painter, line: &LineObject, offset: Vec2) {
    let stroke = Stroke::new(line.stroke_width, line.stroke);
    dashed_outline(painter, &[line.from + offset, line.to + offset], stroke, line.dash);
}

fn paint_rect(painter: &Painter, rect: &RectObject, offset: Vec2) {
    let screen = rect.rect.translate(offset);
    if let Some(shadow) = rect.shadow {
        painter.rect_filled(screen.translate(shadow.offset), 0.0, shadow.color);
    }
    if let Some(fill) = rect.fill {
        painter.rect_filled(screen, 0.0, fill);
    }
    if let Some(color) = rect.stroke {
        let corners = [
            screen.left_top(),
            screen.right_top(),
            screen.right_bottom(),
            screen.left_bottom(),
            screen.left_top(),
        ];
        dashed_outline(painter, &corners, Stroke::new(rect.stroke_width, color), rect.dash);
    }
}
