use egui::{Color32, Pos2, Rect, Vec2};
use image::RgbaImage;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::effect::{EffectStack, ToolEffect, Transform};
use super::ToolId;
use crate::assets::{self, ImageSource};
use crate::canvas::{Canvas, CanvasObject, ImageObject, ObjectId, RectObject, Shadow};
use crate::config::EditorConfig;
use crate::error::ToolResult;
use crate::raster::RasterSurface;

/// Distance between torn-edge points along an edge
const TEAR_STEP: usize = 10;
/// Deepest a tear reaches into the paper at intensity 1
const TEAR_DEPTH: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollageKind {
    PaperScrap,
    PhotoFrame,
    CutPaste,
}

impl CollageKind {
    pub fn from_tool(tool: ToolId) -> Option<Self> {
        match tool {
            ToolId::PaperScrap => Some(CollageKind::PaperScrap),
            ToolId::PhotoFrame => Some(CollageKind::PhotoFrame),
            ToolId::Cut | ToolId::Image => Some(CollageKind::CutPaste),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollageEffect {
    TornEdge,
    Crumpled,
    Folded,
}

impl CollageEffect {
    pub const ALL: [CollageEffect; 3] = [CollageEffect::TornEdge, CollageEffect::Crumpled, CollageEffect::Folded];

    pub fn name(self) -> &'static str {
        match self {
            CollageEffect::TornEdge => "torn-edge",
            CollageEffect::Crumpled => "crumpled",
            CollageEffect::Folded => "folded",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|effect| effect.name() == name)
    }
}

/// Collage form state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollageElement {
    pub kind: CollageKind,
    pub effects: EffectStack,
    pub transform: Transform,
}

impl Default for CollageElement {
    fn default() -> Self {
        Self::new(CollageKind::PaperScrap)
    }
}

impl CollageElement {
    pub fn new(kind: CollageKind) -> Self {
        Self {
            kind,
            effects: EffectStack::new(),
            transform: Transform::default(),
        }
    }

    /// Append `effect` at full intensity
    pub fn with_effect(mut self, effect: CollageEffect) -> Self {
        self.effects.push(ToolEffect::new(effect.name(), 1.0));
        self
    }
}

/// What the collage form submits once an upload has been processed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollageRequest {
    pub element: CollageElement,
    pub image: ImageSource,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedCollage {
    pub data_url: String,
    pub size: Vec2,
}

/// Jagged outline just inside a `width` x `height` sheet.
///
/// Points sit every 10 px, clockwise from the top-left corner, each pulled
/// inward by a random amount up to `depth`.
pub fn torn_edge_outline(width: f32, height: f32, depth: f32, rng: &mut impl Rng) -> Vec<Pos2> {
    let mut tear = || if depth > 0.0 { rng.random_range(0.0..depth) } else { 0.0 };
    let mut points = Vec::new();

    let mut x = 0.0;
    while x < width {
        points.push(Pos2::new(x, tear()));
        x += TEAR_STEP as f32;
    }
    let mut y = 0.0;
    while y < height {
        points.push(Pos2::new(width - tear(), y));
        y += TEAR_STEP as f32;
    }
    let mut x = width;
    while x > 0.0 {
        points.push(Pos2::new(x, height - tear()));
        x -= TEAR_STEP as f32;
    }
    let mut y = height;
    while y > 0.0 {
        points.push(Pos2::new(tear(), y));
        y -= TEAR_STEP as f32;
    }
    points
}

/// Apply one effect to the buffer in place
pub fn apply_effect(surface: &mut RasterSurface, effect: CollageEffect, intensity: f32, rng: &mut impl Rng) {
    match effect {
        CollageEffect::TornEdge => {
            let size = surface.size();
            let outline = torn_edge_outline(size.x, size.y, TEAR_DEPTH * intensity.max(0.0), rng);
            surface.clip_to_polygon(&outline);
        }
        // No paper texture yet; these pass the image through untouched.
        CollageEffect::Crumpled | CollageEffect::Folded => {}
    }
}

/// Decode an upload, run the enabled effects over it in order and re-encode.
///
/// Effects with names this builder doesn't know are skipped.
pub fn process_upload(bytes: &[u8], effects: &EffectStack, rng: &mut impl Rng) -> ToolResult<ProcessedCollage> {
    let mut surface = RasterSurface::from_image(assets::decode_image(bytes)?);
    for effect in effects.enabled() {
        match CollageEffect::from_name(&effect.name) {
            Some(kind) => apply_effect(&mut surface, kind, effect.intensity, rng),
            None => log::debug!("Skipping unknown collage effect '{}'", effect.name),
        }
    }
    Ok(ProcessedCollage {
        data_url: surface.to_data_url()?,
        size: surface.size(),
    })
}

/// Objects a collage element turns into
#[derive(Debug, Clone)]
pub struct CollagePlacement {
    pub image: ImageObject,
    /// Photo-frame border, drawn behind the image
    pub frame: Option<RectObject>,
}

/// Build the objects for `element`.
///
/// Paper scraps always get a torn border, whatever effects the upload had.
pub fn place_collage(
    element: &CollageElement,
    pixels: RgbaImage,
    config: &EditorConfig,
    rng: &mut impl Rng,
) -> CollagePlacement {
    let pixels = match element.kind {
        CollageKind::PaperScrap => tear_edges(pixels, rng),
        CollageKind::PhotoFrame | CollageKind::CutPaste => pixels,
    };
    let transform = element.transform.normalized();
    let mut image = ImageObject::new(pixels, config.placement_origin + transform.position.to_vec2());
    image.angle = transform.rotation;
    image.scale = transform.scale;

    let frame = (element.kind == CollageKind::PhotoFrame).then(|| photo_frame(image.bounds(), config.frame_border));
    CollagePlacement { image, frame }
}

fn tear_edges(pixels: RgbaImage, rng: &mut impl Rng) -> RgbaImage {
    let mut surface = RasterSurface::from_image(pixels);
    let size = surface.size();
    surface.clip_to_polygon(&torn_edge_outline(size.x, size.y, TEAR_DEPTH, rng));
    surface.into_image()
}

fn photo_frame(image_bounds: Rect, border: f32) -> RectObject {
    RectObject {
        rect: image_bounds.expand(border),
        fill: Some(Color32::WHITE),
        stroke: Some(Color32::from_rgb(0xdd, 0xdd, 0xdd)),
        stroke_width: 2.0,
        dash: None,
        shadow: Some(Shadow {
            color: Color32::from_rgba_unmultiplied(0, 0, 0, 77),
            blur: 10.0,
            offset: Vec2::new(5.0, 5.0),
        }),
        selectable: true,
        guide: false,
    }
}

/// Place the element (and its frame, sent to the back) and select the image
pub fn add_collage<C: Canvas + ?Sized>(
    canvas: &mut C,
    element: &CollageElement,
    pixels: RgbaImage,
    config: &EditorConfig,
    rng: &mut impl Rng,
) -> ObjectId {
    let placement = place_collage(element, pixels, config, rng);
    let id = canvas.add_object(CanvasObject::Image(placement.image));
    if let Some(frame) = placement.frame {
        let frame_id = canvas.add_object(CanvasObject::Rect(frame));
        canvas.send_to_back(frame_id);
    }
    canvas.set_active_object(id);
    canvas.render();
    log::info!("Placed {:?} collage element", element.kind);
    id
}
