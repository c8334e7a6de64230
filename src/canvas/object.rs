use egui::{Color32, Pos2, Rect, Vec2};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::raster;

/// Identifier the canvas hands out when an object is added
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

/// How a source colour combines with what is already there
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlendMode {
    /// Plain source-over
    #[default]
    Normal,
    Multiply,
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub color: Color32,
    pub blur: f32,
    pub offset: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ImageFilter {
    /// Blend every pixel with a flat colour
    BlendColor { color: Color32, mode: BlendMode },
}

/// Per-character positional and rotational wobble, both in [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphJitter {
    pub offset: f32,
    pub rotation: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextObject {
    pub content: String,
    pub position: Pos2,
    pub font_family: String,
    pub font_size: f32,
    pub fill: Color32,
    pub char_spacing: f32,
    /// Degrees
    pub angle: f32,
    /// Fill behind the whole object box
    pub background: Option<Color32>,
    /// Fill behind the glyph run only
    pub text_background: Option<Color32>,
    pub padding: f32,
    pub shadow: Option<Shadow>,
    pub jitter: Vec<GlyphJitter>,
}

impl TextObject {
    pub fn new(content: impl Into<String>, position: Pos2, font_family: impl Into<String>, font_size: f32) -> Self {
        Self {
            content: content.into(),
            position,
            font_family: font_family.into(),
            font_size,
            fill: Color32::BLACK,
            char_spacing: 0.0,
            angle: 0.0,
            background: None,
            text_background: None,
            padding: 0.0,
            shadow: None,
            jitter: Vec::new(),
        }
    }

    /// Approximate box, without rotation
    pub fn bounds(&self) -> Rect {
        let glyphs = self.content.chars().count() as f32;
        let advance = self.font_size * 0.6 + self.char_spacing / 1000.0 * self.font_size;
        Rect::from_min_size(self.position, Vec2::new(glyphs * advance, self.font_size))
            .expand(self.padding)
    }
}

/// Bitmap placed on the canvas.
///
/// `source` keeps the decoded pixels untouched; `rendered` is `source` with
/// the filter chain applied and is what gets drawn.
#[derive(Clone)]
pub struct ImageObject {
    source: Arc<RgbaImage>,
    rendered: Arc<RgbaImage>,
    pub position: Pos2,
    /// Degrees
    pub angle: f32,
    pub scale: Vec2,
    pub opacity: f32,
    /// Intrinsic size before scaling
    pub size: Vec2,
    pub filters: Vec<ImageFilter>,
    pub shadow: Option<Shadow>,
}

// RgbaImage would dump every pixel
impl std::fmt::Debug for ImageObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageObject")
            .field("source", &self.source.dimensions())
            .field("position", &self.position)
            .field("angle", &self.angle)
            .field("scale", &self.scale)
            .field("opacity", &self.opacity)
            .field("size", &self.size)
            .field("filters", &self.filters)
            .finish()
    }
}

impl ImageObject {
    pub fn new(pixels: RgbaImage, position: Pos2) -> Self {
        let size = Vec2::new(pixels.width() as f32, pixels.height() as f32);
        let source = Arc::new(pixels);
        Self {
            rendered: Arc::clone(&source),
            source,
            position,
            angle: 0.0,
            scale: Vec2::splat(1.0),
            opacity: 1.0,
            size,
            filters: Vec::new(),
            shadow: None,
        }
    }

    pub fn source(&self) -> &RgbaImage {
        &self.source
    }

    pub fn rendered(&self) -> &RgbaImage {
        &self.rendered
    }

    /// Re-run the whole filter chain over the source pixels
    pub fn apply_filters(&mut self) {
        if self.filters.is_empty() {
            self.rendered = Arc::clone(&self.source);
            return;
        }
        let mut pixels = (*self.source).clone();
        for filter in &self.filters {
            match *filter {
                ImageFilter::BlendColor { color, mode } => raster::blend_color(&mut pixels, color, mode),
            }
        }
        self.rendered = Arc::new(pixels);
    }

    /// Scaled box, without rotation
    pub fn bounds(&self) -> Rect {
        Rect::from_min_size(self.position, self.size * self.scale)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineObject {
    pub from: Pos2,
    pub to: Pos2,
    pub stroke: Color32,
    pub stroke_width: f32,
    pub dash: Option<[f32; 2]>,
    pub selectable: bool,
    /// Visual aid only, never exported
    pub guide: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectObject {
    pub rect: Rect,
    pub fill: Option<Color32>,
    pub stroke: Option<Color32>,
    pub stroke_width: f32,
    pub dash: Option<[f32; 2]>,
    pub shadow: Option<Shadow>,
    pub selectable: bool,
    pub guide: bool,
}

/// Everything the tool layer can hand to the canvas engine
#[derive(Debug, Clone)]
pub enum CanvasObject {
    Text(TextObject),
    Image(ImageObject),
    Line(LineObject),
    Rect(RectObject),
}

impl CanvasObject {
    pub fn kind(&self) -> &'static str {
        match self {
            CanvasObject::Text(_) => "text",
            CanvasObject::Image(_) => "image",
            CanvasObject::Line(_) => "line",
            CanvasObject::Rect(_) => "rect",
        }
    }

    pub fn is_guide(&self) -> bool {
        match self {
            CanvasObject::Line(line) => line.guide,
            CanvasObject::Rect(rect) => rect.guide,
            CanvasObject::Text(_) | CanvasObject::Image(_) => false,
        }
    }

    pub fn is_selectable(&self) -> bool {
        match self {
            CanvasObject::Line(line) => line.selectable,
            CanvasObject::Rect(rect) => rect.selectable,
            CanvasObject::Text(_) | CanvasObject::Image(_) => true,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            CanvasObject::Text(text) => text.bounds(),
            CanvasObject::Image(image) => image.bounds(),
            CanvasObject::Line(line) => Rect::from_two_pos(line.from, line.to),
            CanvasObject::Rect(rect) => rect.rect,
        }
    }

    pub fn as_text(&self) -> Option<&TextObject> {
        match self {
            CanvasObject::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageObject> {
        match self {
            CanvasObject::Image(image) => Some(image),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&LineObject> {
        match self {
            CanvasObject::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn as_rect(&self) -> Option<&RectObject> {
        match self {
            CanvasObject::Rect(rect) => Some(rect),
            _ => None,
        }
    }
}
