use crate::tool::ToolId;

/// Accent colours offered next to the colour pickers
pub const PALETTE: [&str; 5] = ["#DC2626", "#D97706", "#059669", "#7C3AED", "#DB2777"];

pub const FONT_FAMILIES: [&str; 8] = [
    "Helvetica",
    "Times New Roman",
    "Comic Sans MS",
    "Brush Script MT",
    "American Typewriter",
    "Homemade Apple",
    "Caveat",
    "Permanent Marker",
];

pub const WASHI_PATTERNS: [&str; 4] = ["striped", "floral", "dots", "solid"];
pub const STICKER_CATEGORIES: [&str; 4] = ["vintage", "nature", "typography", "symbols"];
pub const STAMP_STYLES: [&str; 3] = ["postage", "date", "words"];

/// One entry in the tool palette
#[derive(Debug, Clone, Copy)]
pub struct PaletteEntry {
    pub name: &'static str,
    pub tool: ToolId,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct PaletteGroup {
    pub name: &'static str,
    pub entries: &'static [PaletteEntry],
}

const fn entry(name: &'static str, tool: ToolId, icon: &'static str) -> PaletteEntry {
    PaletteEntry { name, tool, icon }
}

pub const TOOL_PALETTE: [PaletteGroup; 6] = [
    PaletteGroup {
        name: "Select",
        entries: &[entry("Select & Transform", ToolId::Select, "⬚")],
    },
    PaletteGroup {
        name: "Text & Typography",
        entries: &[
            entry("Typewriter Text", ToolId::Typewriter, "⌨"),
            entry("Handwriting", ToolId::Handwriting, "✍"),
            entry("Cut-out Letters", ToolId::Cutout, "✂"),
            entry("Regular Text", ToolId::Text, "T"),
        ],
    },
    PaletteGroup {
        name: "Shapes & Collage",
        entries: &[
            entry("Paper Scrap", ToolId::PaperScrap, "📄"),
            entry("Photo Frame", ToolId::PhotoFrame, "🖼"),
            entry("Cut & Paste", ToolId::Cut, "📋"),
            entry("Image", ToolId::Image, "🖻"),
        ],
    },
    PaletteGroup {
        name: "Drawing Tools",
        entries: &[
            entry("Free Drawing", ToolId::Freeform, "✏"),
            entry("Marker", ToolId::Marker, "🖊"),
            entry("Pencil", ToolId::Pencil, "✎"),
            entry("Highlighter", ToolId::Highlight, "🖍"),
            entry("Correction Tape", ToolId::Correction, "▭"),
        ],
    },
    PaletteGroup {
        name: "Decorative",
        entries: &[
            entry("Washi Tape", ToolId::Washi, "〰"),
            entry("Stickers", ToolId::Sticker, "★"),
            entry("Stamps", ToolId::Stamp, "✉"),
        ],
    },
    PaletteGroup {
        name: "Page Layout",
        entries: &[
            entry("8-Page Zine", ToolId::EightPage, "8"),
            entry("Quarter Size", ToolId::Quarter, "¼"),
            entry("Half Size", ToolId::Half, "½"),
            entry("Custom", ToolId::Custom, "⛶"),
        ],
    },
];

/// Parse `#rrggbb` or `#rrggbbaa`
pub fn parse_hex_color(hex: &str) -> Option<egui::Color32> {
    let digits = hex.strip_prefix('#')?;
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    match digits.len() {
        6 => Some(egui::Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?)),
        8 => Some(egui::Color32::from_rgba_unmultiplied(
            channel(0)?,
            channel(2)?,
            channel(4)?,
            channel(6)?,
        )),
        _ => None,
    }
}
