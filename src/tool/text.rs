use egui::{Color32, Pos2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ToolId;
use crate::canvas::{Canvas, CanvasObject, GlyphJitter, ObjectId, Shadow, TextObject};

pub const TYPEWRITER_FONT: &str = "American Typewriter";
pub const HANDWRITING_FONT: &str = "Homemade Apple";
pub const DEFAULT_FONT: &str = "Helvetica";

/// Horizontal advance of one cut-out glyph, as a fraction of the font size
pub const CUTOUT_ADVANCE: f32 = 0.6;
/// Cut-out glyphs never tilt further than this many degrees either way
pub const CUTOUT_MAX_ROTATION: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextVariant {
    Typewriter,
    Handwriting,
    Cutout,
    Plain,
}

impl TextVariant {
    pub fn from_tool(tool: ToolId) -> Option<Self> {
        match tool {
            ToolId::Typewriter => Some(TextVariant::Typewriter),
            ToolId::Handwriting => Some(TextVariant::Handwriting),
            ToolId::Cutout => Some(TextVariant::Cutout),
            ToolId::Text => Some(TextVariant::Plain),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextEffects {
    /// Per-glyph wobble (typewriter)
    pub uneven: bool,
    pub ink_spread: f32,
    /// Max glyph rotation in degrees (cutout)
    pub rotation: f32,
    pub roughness: f32,
}

/// Text form state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextTool {
    pub font_family: String,
    pub font_size: f32,
    pub effects: TextEffects,
    pub color: Color32,
    /// Letter spacing in em, 1.0 is the font's own spacing
    pub spacing: f32,
}

impl Default for TextTool {
    fn default() -> Self {
        Self::for_variant(TextVariant::Plain)
    }
}

impl TextTool {
    /// Form defaults for a variant
    pub fn for_variant(variant: TextVariant) -> Self {
        let font_family = match variant {
            TextVariant::Typewriter => TYPEWRITER_FONT,
            TextVariant::Handwriting => HANDWRITING_FONT,
            TextVariant::Cutout | TextVariant::Plain => DEFAULT_FONT,
        };
        let typewriter = variant == TextVariant::Typewriter;
        let cutout = variant == TextVariant::Cutout;
        Self {
            font_family: font_family.to_owned(),
            font_size: 16.0,
            effects: TextEffects {
                uneven: typewriter,
                ink_spread: if typewriter { 0.3 } else { 0.0 },
                rotation: if cutout { CUTOUT_MAX_ROTATION } else { 0.0 },
                roughness: if cutout { 0.5 } else { 0.0 },
            },
            color: Color32::BLACK,
            spacing: if typewriter { 1.2 } else { 1.0 },
        }
    }

    /// Letter spacing in thousandths of an em
    pub fn char_spacing(&self) -> f32 {
        (self.spacing - 1.0) * 100.0
    }
}

/// What the text form submits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRequest {
    pub text: String,
    pub variant: TextVariant,
    pub tool: TextTool,
}

impl TextRequest {
    pub fn new(text: impl Into<String>, variant: TextVariant) -> Self {
        Self {
            text: text.into(),
            variant,
            tool: TextTool::for_variant(variant),
        }
    }
}

/// Text objects ready for the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
    pub objects: Vec<TextObject>,
    /// Whether the (single) object becomes the active selection
    pub activate: bool,
}

/// Build the styled text objects for a request.
///
/// Empty text yields no objects.
pub fn build_text(request: &TextRequest, origin: Pos2, rng: &mut impl Rng) -> TextPlacement {
    if request.text.is_empty() {
        return TextPlacement {
            objects: Vec::new(),
            activate: false,
        };
    }

    let tool = &request.tool;
    let mut base = TextObject::new(request.text.clone(), origin, tool.font_family.clone(), tool.font_size);
    base.fill = tool.color;
    base.char_spacing = tool.char_spacing();

    match request.variant {
        TextVariant::Typewriter => {
            base.font_family = TYPEWRITER_FONT.to_owned();
            base.text_background = Some(Color32::from_rgba_unmultiplied(255, 255, 255, 204));
            if tool.effects.uneven {
                base.jitter = request
                    .text
                    .chars()
                    .map(|_| GlyphJitter {
                        offset: rng.random_range(-1.0..=1.0),
                        rotation: rng.random_range(-1.0..=1.0),
                    })
                    .collect();
            }
            TextPlacement {
                objects: vec![base],
                activate: true,
            }
        }
        TextVariant::Cutout => {
            let max_angle = tool.effects.rotation.abs().min(CUTOUT_MAX_ROTATION);
            let objects = request
                .text
                .chars()
                .enumerate()
                .map(|(i, glyph)| {
                    let mut letter = base.clone();
                    letter.content = glyph.to_string();
                    letter.position.x = origin.x + i as f32 * tool.font_size * CUTOUT_ADVANCE;
                    letter.angle = if max_angle > 0.0 {
                        rng.random_range(-max_angle..=max_angle)
                    } else {
                        0.0
                    };
                    letter.background = Some(Color32::WHITE);
                    letter.padding = 5.0;
                    letter.shadow = Some(Shadow {
                        color: Color32::from_rgba_unmultiplied(0, 0, 0, 51),
                        blur: 4.0,
                        offset: Vec2::new(2.0, 2.0),
                    });
                    letter
                })
                .collect();
            TextPlacement {
                objects,
                activate: false,
            }
        }
        TextVariant::Handwriting | TextVariant::Plain => TextPlacement {
            objects: vec![base],
            activate: true,
        },
    }
}

/// Build the text objects and add them to the canvas
pub fn add_text<C: Canvas + ?Sized>(
    canvas: &mut C,
    request: &TextRequest,
    origin: Pos2,
    rng: &mut impl Rng,
) -> Vec<ObjectId> {
    let placement = build_text(request, origin, rng);
    if placement.objects.is_empty() {
        log::debug!("Ignoring empty {:?} text", request.variant);
        return Vec::new();
    }

    let ids: Vec<ObjectId> = placement
        .objects
        .into_iter()
        .map(|object| canvas.add_object(CanvasObject::Text(object)))
        .collect();
    if placement.activate {
        if let Some(&id) = ids.last() {
            canvas.set_active_object(id);
        }
    }
    canvas.render();
    log::info!("Added {:?} text as {} object(s)", request.variant, ids.len());
    ids
}
