use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::ToolId;
use crate::canvas::{Canvas, CanvasObject, LineObject, ObjectId, RectObject};
use crate::config::EditorConfig;

pub const EIGHT_PANEL_FOLD: &str = "8-panel-fold";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PageLayout {
    EightPage,
    Quarter,
    Half,
    /// Free size in inches
    Custom { width: f32, height: f32 },
}

impl PageLayout {
    pub fn from_tool(tool: ToolId) -> Option<Self> {
        match tool {
            ToolId::EightPage => Some(PageLayout::EightPage),
            ToolId::Quarter => Some(PageLayout::Quarter),
            ToolId::Half => Some(PageLayout::Half),
            ToolId::Custom => Some(PageLayout::Custom {
                width: 8.5,
                height: 11.0,
            }),
            _ => None,
        }
    }

    pub fn template(self) -> LayoutTemplate {
        match self {
            PageLayout::EightPage => LayoutTemplate {
                template: EIGHT_PANEL_FOLD.to_owned(),
                dimensions: Vec2::new(8.5, 11.0),
                panels: 8,
                fold_lines: true,
                bleed: false,
            },
            PageLayout::Quarter => LayoutTemplate {
                template: "quarter-size".to_owned(),
                dimensions: Vec2::new(5.5, 4.25),
                panels: 1,
                fold_lines: false,
                bleed: true,
            },
            PageLayout::Half => LayoutTemplate {
                template: "half-size".to_owned(),
                dimensions: Vec2::new(5.5, 8.5),
                panels: 1,
                fold_lines: false,
                bleed: true,
            },
            PageLayout::Custom { width, height } => LayoutTemplate {
                template: "custom".to_owned(),
                dimensions: Vec2::new(width, height),
                panels: 1,
                fold_lines: false,
                bleed: false,
            },
        }
    }
}

/// Layout form state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutTemplate {
    pub template: String,
    /// Inches
    pub dimensions: Vec2,
    pub panels: u32,
    pub fold_lines: bool,
    pub bleed: bool,
}

impl LayoutTemplate {
    pub fn pixel_size(&self, dpi: f32) -> Vec2 {
        self.dimensions * dpi
    }

    pub fn with_fold_lines(mut self, fold_lines: bool) -> Self {
        self.fold_lines = fold_lines;
        self
    }

    pub fn with_bleed(mut self, bleed: bool) -> Self {
        self.bleed = bleed;
        self
    }
}

fn guide_line(from: Pos2, to: Pos2, config: &EditorConfig) -> LineObject {
    LineObject {
        from,
        to,
        stroke: config.fold_guide_color,
        stroke_width: 1.0,
        dash: Some(config.guide_dash),
        selectable: false,
        guide: true,
    }
}

/// One horizontal fold at half height and two vertical folds at thirds
pub fn fold_guides(size: Vec2, config: &EditorConfig) -> [LineObject; 3] {
    let (width, height) = (size.x, size.y);
    [
        guide_line(Pos2::new(0.0, height / 2.0), Pos2::new(width, height / 2.0), config),
        guide_line(Pos2::new(width / 3.0, 0.0), Pos2::new(width / 3.0, height), config),
        guide_line(Pos2::new(width * 2.0 / 3.0, 0.0), Pos2::new(width * 2.0 / 3.0, height), config),
    ]
}

/// Dashed rectangle inset by the bleed margin
pub fn bleed_guide(size: Vec2, config: &EditorConfig) -> RectObject {
    let inset = config.bleed_inset;
    RectObject {
        rect: Rect::from_min_size(Pos2::new(inset, inset), size - Vec2::splat(2.0 * inset)),
        fill: None,
        stroke: Some(config.bleed_guide_color),
        stroke_width: 1.0,
        dash: Some(config.guide_dash),
        shadow: None,
        selectable: false,
        guide: true,
    }
}

/// Resize the canvas to the template and add its guides.
///
/// Guides are regular canvas objects flagged as guides; exports are expected
/// to leave them out.
pub fn apply_layout<C: Canvas + ?Sized>(
    canvas: &mut C,
    template: &LayoutTemplate,
    config: &EditorConfig,
) -> Vec<ObjectId> {
    canvas.set_dimensions(template.pixel_size(config.dpi));
    let size = canvas.size();

    let mut guides = Vec::new();
    if template.fold_lines && template.template == EIGHT_PANEL_FOLD {
        for line in fold_guides(size, config) {
            guides.push(canvas.add_object(CanvasObject::Line(line)));
        }
    }
    if template.bleed {
        guides.push(canvas.add_object(CanvasObject::Rect(bleed_guide(size, config))));
    }

    canvas.render();
    log::info!(
        "Applied {} layout at {}x{} px with {} guide(s)",
        template.template,
        size.x,
        size.y,
        guides.len()
    );
    guides
}
