pub mod collage;
pub mod decorative;
pub mod dispatcher;
pub mod drawing;
pub mod effect;
pub mod layout;
pub mod text;

pub use collage::{CollageEffect, CollageElement, CollageKind, CollagePlacement, CollageRequest, ProcessedCollage};
pub use decorative::{DecorativeElement, DecorativeKind};
pub use dispatcher::{LoadCompletion, LoadTicket, PendingLoad, Placement, ToolAction, ToolDispatcher};
pub use drawing::{BrushKind, DrawingOutput, DrawingStroke, DrawingTool, PointerSample, StrokeState};
pub use effect::{EffectStack, ToolEffect, Transform};
pub use layout::{LayoutTemplate, PageLayout};
pub use text::{TextRequest, TextTool, TextVariant};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The tool families the palette is split into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolCategory {
    Text,
    Drawing,
    Decorative,
    Collage,
    Layout,
    Select,
}

impl ToolCategory {
    pub fn name(self) -> &'static str {
        match self {
            ToolCategory::Text => "text",
            ToolCategory::Drawing => "drawing",
            ToolCategory::Decorative => "decorative",
            ToolCategory::Collage => "collage",
            ToolCategory::Layout => "layout",
            ToolCategory::Select => "select",
        }
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every tool identifier the palette can make active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolId {
    Select,
    // text
    Typewriter,
    Handwriting,
    Cutout,
    Text,
    // drawing
    Marker,
    Pencil,
    Highlight,
    Correction,
    Freeform,
    // decorative
    Washi,
    Sticker,
    Stamp,
    // collage
    PaperScrap,
    PhotoFrame,
    Cut,
    Image,
    // layout
    EightPage,
    Quarter,
    Half,
    Custom,
}

impl ToolId {
    pub const ALL: [ToolId; 21] = [
        ToolId::Select,
        ToolId::Typewriter,
        ToolId::Handwriting,
        ToolId::Cutout,
        ToolId::Text,
        ToolId::Marker,
        ToolId::Pencil,
        ToolId::Highlight,
        ToolId::Correction,
        ToolId::Freeform,
        ToolId::Washi,
        ToolId::Sticker,
        ToolId::Stamp,
        ToolId::PaperScrap,
        ToolId::PhotoFrame,
        ToolId::Cut,
        ToolId::Image,
        ToolId::EightPage,
        ToolId::Quarter,
        ToolId::Half,
        ToolId::Custom,
    ];

    /// Parse a palette identifier. Unknown identifiers yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let tool = match value {
            "select" => ToolId::Select,
            "typewriter" => ToolId::Typewriter,
            "handwriting" => ToolId::Handwriting,
            "cutout" => ToolId::Cutout,
            "text" => ToolId::Text,
            "marker" => ToolId::Marker,
            "pencil" => ToolId::Pencil,
            "highlight" => ToolId::Highlight,
            "correction" => ToolId::Correction,
            "freeform" => ToolId::Freeform,
            "washi" => ToolId::Washi,
            "sticker" | "stickers" => ToolId::Sticker,
            "stamp" | "stamps" => ToolId::Stamp,
            "paper-scrap" => ToolId::PaperScrap,
            "photo-frame" => ToolId::PhotoFrame,
            "cut" => ToolId::Cut,
            "image" => ToolId::Image,
            "8page" => ToolId::EightPage,
            "quarter" => ToolId::Quarter,
            "half" => ToolId::Half,
            "custom" => ToolId::Custom,
            _ => return None,
        };
        Some(tool)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToolId::Select => "select",
            ToolId::Typewriter => "typewriter",
            ToolId::Handwriting => "handwriting",
            ToolId::Cutout => "cutout",
            ToolId::Text => "text",
            ToolId::Marker => "marker",
            ToolId::Pencil => "pencil",
            ToolId::Highlight => "highlight",
            ToolId::Correction => "correction",
            ToolId::Freeform => "freeform",
            ToolId::Washi => "washi",
            ToolId::Sticker => "sticker",
            ToolId::Stamp => "stamp",
            ToolId::PaperScrap => "paper-scrap",
            ToolId::PhotoFrame => "photo-frame",
            ToolId::Cut => "cut",
            ToolId::Image => "image",
            ToolId::EightPage => "8page",
            ToolId::Quarter => "quarter",
            ToolId::Half => "half",
            ToolId::Custom => "custom",
        }
    }

    pub fn category(self) -> ToolCategory {
        match self {
            ToolId::Typewriter | ToolId::Handwriting | ToolId::Cutout | ToolId::Text => ToolCategory::Text,
            ToolId::Marker | ToolId::Pencil | ToolId::Highlight | ToolId::Correction | ToolId::Freeform => {
                ToolCategory::Drawing
            }
            ToolId::Washi | ToolId::Sticker | ToolId::Stamp => ToolCategory::Decorative,
            ToolId::PaperScrap | ToolId::PhotoFrame | ToolId::Cut | ToolId::Image => ToolCategory::Collage,
            ToolId::EightPage | ToolId::Quarter | ToolId::Half | ToolId::Custom => ToolCategory::Layout,
            ToolId::Select => ToolCategory::Select,
        }
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown tool identifier: {0}")]
pub struct UnknownTool(pub String);

impl FromStr for ToolId {
    type Err = UnknownTool;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ToolId::parse(value).ok_or_else(|| UnknownTool(value.to_owned()))
    }
}

/// Category of a palette identifier; anything unknown falls back to select
pub fn category_of(tool: &str) -> ToolCategory {
    ToolId::parse(tool).map_or(ToolCategory::Select, ToolId::category)
}
