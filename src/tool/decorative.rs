use egui::{Color32, Vec2};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use super::ToolId;
use crate::assets::ImageSource;
use crate::canvas::{BlendMode, Canvas, CanvasObject, ImageFilter, ImageObject, ObjectId};
use crate::config::EditorConfig;

/// Washi tape is always drawn at this size
pub const WASHI_SIZE: Vec2 = Vec2::new(300.0, 50.0);
pub const WASHI_OPACITY: f32 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecorativeKind {
    Washi,
    Sticker,
    Stamp,
}

impl DecorativeKind {
    pub const ALL: [DecorativeKind; 3] = [DecorativeKind::Washi, DecorativeKind::Sticker, DecorativeKind::Stamp];

    pub fn from_tool(tool: ToolId) -> Option<Self> {
        match tool {
            ToolId::Washi => Some(DecorativeKind::Washi),
            ToolId::Sticker => Some(DecorativeKind::Sticker),
            ToolId::Stamp => Some(DecorativeKind::Stamp),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DecorativeKind::Washi => "washi",
            DecorativeKind::Sticker => "sticker",
            DecorativeKind::Stamp => "stamp",
        }
    }
}

/// Decorative form state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorativeElement {
    pub kind: DecorativeKind,
    pub variant: String,
    pub opacity: f32,
    pub scale: f32,
    /// Degrees
    pub rotation: f32,
    /// Stamp ink, black when unset
    pub ink_color: Option<Color32>,
}

impl Default for DecorativeElement {
    fn default() -> Self {
        Self {
            kind: DecorativeKind::Washi,
            variant: "striped".to_owned(),
            opacity: 0.85,
            scale: 1.0,
            rotation: 0.0,
            ink_color: None,
        }
    }
}

impl DecorativeElement {
    pub fn new(kind: DecorativeKind, variant: impl Into<String>) -> Self {
        Self {
            kind,
            variant: variant.into(),
            ..Self::default()
        }
    }

    /// Asset this element is drawn from
    pub fn source(&self, base: &str) -> ImageSource {
        ImageSource::Asset(asset_path(base, self.kind, &self.variant))
    }
}

/// `{base}{type}-{variant}.png`
pub fn asset_path(base: &str, kind: DecorativeKind, variant: &str) -> String {
    format!("{}{}-{}.png", base, kind.name(), variant)
}

/// Turn loaded pixels into the placed image object
pub fn place_decorative(element: &DecorativeElement, pixels: RgbaImage, config: &EditorConfig) -> ImageObject {
    let mut image = ImageObject::new(pixels, config.placement_origin);
    image.angle = element.rotation;
    image.scale = Vec2::splat(element.scale.max(0.0));
    image.opacity = element.opacity;

    match element.kind {
        DecorativeKind::Washi => {
            image.size = WASHI_SIZE;
            image.scale = Vec2::splat(1.0);
            image.opacity = WASHI_OPACITY;
        }
        DecorativeKind::Stamp => {
            image.filters.push(ImageFilter::BlendColor {
                color: element.ink_color.unwrap_or(Color32::BLACK),
                mode: BlendMode::Multiply,
            });
            image.apply_filters();
        }
        DecorativeKind::Sticker => {}
    }
    image
}

/// Place the element and make it the active selection
pub fn add_decorative<C: Canvas + ?Sized>(
    canvas: &mut C,
    element: &DecorativeElement,
    pixels: RgbaImage,
    config: &EditorConfig,
) -> ObjectId {
    let image = place_decorative(element, pixels, config);
    let id = canvas.add_object(CanvasObject::Image(image));
    canvas.set_active_object(id);
    canvas.render();
    log::info!("Placed {} '{}'", element.kind.name(), element.variant);
    id
}
