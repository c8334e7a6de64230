use egui::{Color32, Pos2, Vec2};
use serde::{Deserialize, Serialize};

use super::ToolId;
use crate::canvas::BlendMode;
use crate::error::ToolResult;
use crate::raster::{RasterSurface, SegmentStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrushKind {
    Marker,
    Pencil,
    Crayon,
    Ballpoint,
    Highlighter,
}

impl BrushKind {
    pub const ALL: [BrushKind; 5] = [
        BrushKind::Marker,
        BrushKind::Pencil,
        BrushKind::Crayon,
        BrushKind::Ballpoint,
        BrushKind::Highlighter,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BrushKind::Marker => "marker",
            BrushKind::Pencil => "pencil",
            BrushKind::Crayon => "crayon",
            BrushKind::Ballpoint => "ballpoint",
            BrushKind::Highlighter => "highlighter",
        }
    }
}

/// Brush form state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingTool {
    pub brush: BrushKind,
    pub size: f32,
    pub color: Color32,
    pub opacity: f32,
    /// Scale width by reported pen pressure
    pub pressure: bool,
    /// Orient the nib by reported pen tilt
    pub tilt: bool,
    /// Blend mode for brushes that don't force their own
    pub blend_mode: BlendMode,
}

impl Default for DrawingTool {
    fn default() -> Self {
        Self {
            brush: BrushKind::Marker,
            size: 2.0,
            color: Color32::BLACK,
            opacity: 1.0,
            pressure: true,
            tilt: true,
            blend_mode: BlendMode::Normal,
        }
    }
}

impl DrawingTool {
    /// Form defaults for a drawing palette entry
    pub fn for_tool(tool: ToolId) -> Self {
        let defaults = Self::default();
        match tool {
            ToolId::Pencil => Self {
                brush: BrushKind::Pencil,
                ..defaults
            },
            ToolId::Highlight => Self {
                brush: BrushKind::Highlighter,
                size: 12.0,
                color: Color32::from_rgb(0xff, 0xeb, 0x3b),
                ..defaults
            },
            // white-out
            ToolId::Correction => Self {
                brush: BrushKind::Ballpoint,
                size: 12.0,
                color: Color32::WHITE,
                ..defaults
            },
            _ => defaults,
        }
    }

    /// Style for one segment ending at `sample`.
    ///
    /// Computed from scratch each time; nothing carries over from the
    /// previous segment. Pencil and crayon widths come from `size` alone
    /// and ignore pressure.
    pub fn segment_style(&self, sample: &PointerSample) -> SegmentStyle {
        let mut width = self.size;
        if self.pressure {
            width *= sample.pressure.unwrap_or(1.0);
        }
        let nib_angle = if self.tilt {
            sample.tilt.map(|tilt| tilt.y.atan2(tilt.x))
        } else {
            None
        };

        let mut style = SegmentStyle {
            color: self.color,
            width,
            alpha: self.opacity,
            blend: self.blend_mode,
            blur: 0.0,
            nib_angle,
        };
        match self.brush {
            BrushKind::Marker => style.blend = BlendMode::Multiply,
            BrushKind::Pencil => {
                style.blend = BlendMode::Normal;
                style.alpha = 0.8;
                style.width = self.size * 0.8;
            }
            BrushKind::Crayon => {
                style.blend = BlendMode::Normal;
                style.alpha = 0.7;
                style.width = self.size * 1.5;
                style.blur = 1.0;
            }
            BrushKind::Ballpoint => {}
            BrushKind::Highlighter => {
                style.blend = BlendMode::Overlay;
                style.alpha = 0.4;
            }
        }
        style
    }
}

/// One pointer event in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub pos: Pos2,
    /// 0..=1, `None` when the device doesn't report it
    pub pressure: Option<f32>,
    /// Tilt along x and y, `None` when the device doesn't report it
    pub tilt: Option<Vec2>,
}

impl PointerSample {
    pub fn at(pos: Pos2) -> Self {
        Self {
            pos,
            pressure: None,
            tilt: None,
        }
    }

    pub fn with_pressure(mut self, pressure: f32) -> Self {
        self.pressure = Some(pressure);
        self
    }

    pub fn with_tilt(mut self, tilt: Vec2) -> Self {
        self.tilt = Some(tilt);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    Drawing {
        last: Pos2,
    },
}

/// What a finished stroke emits
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingOutput {
    pub tool: DrawingTool,
    /// PNG data URL of the whole drawing surface
    pub image_data: String,
}

/// Freehand stroke state machine over a raster drawing surface
#[derive(Debug, Clone)]
pub struct DrawingStroke {
    tool: DrawingTool,
    surface: RasterSurface,
    state: StrokeState,
}

impl DrawingStroke {
    pub fn new(tool: DrawingTool, size: Vec2) -> Self {
        Self {
            tool,
            surface: RasterSurface::new(size.x.max(0.0) as u32, size.y.max(0.0) as u32),
            state: StrokeState::Idle,
        }
    }

    pub fn tool(&self) -> &DrawingTool {
        &self.tool
    }

    pub fn set_tool(&mut self, tool: DrawingTool) {
        self.tool = tool;
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing { .. })
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    /// Wipe the surface and drop any stroke in progress
    pub fn clear(&mut self) {
        self.surface.clear();
        self.state = StrokeState::Idle;
    }

    /// Start a stroke at the sample
    pub fn pointer_down(&mut self, sample: PointerSample) {
        self.state = StrokeState::Drawing { last: sample.pos };
    }

    /// Stroke one segment from the last point to the sample.
    ///
    /// Returns the style used, or `None` while idle.
    pub fn pointer_move(&mut self, sample: PointerSample) -> Option<SegmentStyle> {
        let StrokeState::Drawing { last } = self.state else {
            return None;
        };
        let style = self.tool.segment_style(&sample);
        self.surface.stroke_segment(last, sample.pos, &style);
        self.state = StrokeState::Drawing { last: sample.pos };
        Some(style)
    }

    /// Finish the stroke and snapshot the whole surface.
    ///
    /// Nothing is emitted when no stroke was in progress.
    pub fn pointer_up(&mut self) -> ToolResult<Option<DrawingOutput>> {
        if !self.is_drawing() {
            return Ok(None);
        }
        self.state = StrokeState::Idle;
        let image_data = self.surface.to_data_url()?;
        log::debug!("Finished {} stroke", self.tool.brush.name());
        Ok(Some(DrawingOutput {
            tool: self.tool.clone(),
            image_data,
        }))
    }

    /// Pointer left the surface; same as lifting it
    pub fn pointer_leave(&mut self) -> ToolResult<Option<DrawingOutput>> {
        self.pointer_up()
    }
}
