//! Routes tool actions to the canvas.
//!
//! The active tool's category picks exactly one handler. Text and layout
//! actions mutate the canvas right away; decorative and collage actions need
//! an image first, so they come back as a [`PendingLoad`] that the caller
//! drives to completion and hands to [`ToolDispatcher::complete`].
//!
//! Every image load is stamped with the dispatcher's generation. Switching
//! tools bumps the generation, and completions from an older generation are
//! dropped instead of landing on the canvas.

use futures::future::BoxFuture;
use image::RgbaImage;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use super::collage::{self, CollageElement, CollageRequest};
use super::decorative::{self, DecorativeElement};
use super::drawing::DrawingOutput;
use super::layout::{self, LayoutTemplate};
use super::text::{self, TextRequest};
use super::{ToolCategory, ToolId, category_of};
use crate::assets::{AssetLoader, ImageSource};
use crate::canvas::{Canvas, ObjectId};
use crate::config::EditorConfig;
use crate::error::{Diagnostics, ToolError, ToolResult};

/// Parameter object a tool form submits
#[derive(Debug, Clone)]
pub enum ToolAction {
    Text(TextRequest),
    Drawing(DrawingOutput),
    Decorative(DecorativeElement),
    Collage(CollageRequest),
    Layout(LayoutTemplate),
}

impl ToolAction {
    pub fn category(&self) -> ToolCategory {
        match self {
            ToolAction::Text(_) => ToolCategory::Text,
            ToolAction::Drawing(_) => ToolCategory::Drawing,
            ToolAction::Decorative(_) => ToolCategory::Decorative,
            ToolAction::Collage(_) => ToolCategory::Collage,
            ToolAction::Layout(_) => ToolCategory::Layout,
        }
    }
}

/// Generation an image load was started under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What to do with the pixels once they arrive
#[derive(Debug, Clone)]
pub enum Placement {
    Decorative(DecorativeElement),
    Collage(CollageElement),
}

/// An image load in flight. Resolves to a [`LoadCompletion`].
pub struct PendingLoad {
    ticket: LoadTicket,
    source: ImageSource,
    placement: Placement,
    image: BoxFuture<'static, ToolResult<RgbaImage>>,
}

impl std::fmt::Debug for PendingLoad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingLoad")
            .field("ticket", &self.ticket)
            .field("source", &self.source.describe())
            .field("placement", &self.placement)
            .finish()
    }
}

impl PendingLoad {
    pub fn ticket(&self) -> LoadTicket {
        self.ticket
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }
}

impl Future for PendingLoad {
    type Output = LoadCompletion;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        this.image.as_mut().poll(cx).map(|result| LoadCompletion {
            ticket: this.ticket,
            placement: this.placement.clone(),
            result,
        })
    }
}

/// A finished image load, successful or not
#[derive(Debug)]
pub struct LoadCompletion {
    pub ticket: LoadTicket,
    pub placement: Placement,
    pub result: ToolResult<RgbaImage>,
}

pub struct ToolDispatcher {
    config: EditorConfig,
    loader: Box<dyn AssetLoader>,
    active_tool: ToolId,
    generation: u64,
    rng: StdRng,
    diagnostics: Diagnostics,
}

impl std::fmt::Debug for ToolDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDispatcher")
            .field("active_tool", &self.active_tool)
            .field("generation", &self.generation)
            .finish()
    }
}

impl ToolDispatcher {
    pub fn new(config: EditorConfig, loader: impl AssetLoader + 'static) -> Self {
        Self {
            config,
            loader: Box::new(loader),
            active_tool: ToolId::Select,
            generation: 0,
            rng: StdRng::from_os_rng(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Seed the jitter source, for reproducible effects
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn active_tool(&self) -> ToolId {
        self.active_tool
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Switch tools. Loads started before the switch go stale.
    pub fn set_active_tool(&mut self, tool: &str) {
        let tool = ToolId::parse(tool).unwrap_or(ToolId::Select);
        if tool != self.active_tool {
            self.generation += 1;
            log::debug!("Active tool {} -> {} (generation {})", self.active_tool, tool, self.generation);
            self.active_tool = tool;
        }
    }

    /// Drop every load in flight without switching tools
    pub fn invalidate_loads(&mut self) {
        self.generation += 1;
    }

    /// Route `action` by the category of `tool`.
    ///
    /// Unknown tools, actions that don't belong to the tool's category and a
    /// missing canvas are all silent no-ops.
    pub fn dispatch<C: Canvas + ?Sized>(
        &mut self,
        tool: &str,
        action: ToolAction,
        canvas: Option<&mut C>,
    ) -> Option<PendingLoad> {
        let Some(canvas) = canvas else {
            log::debug!("No canvas, dropping {} action", action.category());
            return None;
        };
        let category = category_of(tool);
        match category {
            ToolCategory::Text => self.add_text(tool, action, canvas),
            ToolCategory::Drawing => {
                // Strokes land on the drawing surface as they are drawn.
                None
            }
            ToolCategory::Decorative => self.add_decorative(tool, action),
            ToolCategory::Collage => self.add_collage(tool, action),
            ToolCategory::Layout => self.apply_layout(tool, action, canvas),
            ToolCategory::Select => {
                log::debug!("Tool '{}' has no action handler", tool);
                None
            }
        }
    }

    fn add_text<C: Canvas + ?Sized>(&mut self, tool: &str, action: ToolAction, canvas: &mut C) -> Option<PendingLoad> {
        let mut request = match action {
            ToolAction::Text(request) => request,
            other => return mismatched(tool, &other),
        };
        if let Some(variant) = ToolId::parse(tool).and_then(text::TextVariant::from_tool) {
            request.variant = variant;
        }
        text::add_text(canvas, &request, self.config.placement_origin, &mut self.rng);
        None
    }

    fn add_decorative(&mut self, tool: &str, action: ToolAction) -> Option<PendingLoad> {
        let element = match action {
            ToolAction::Decorative(element) => element,
            other => return mismatched(tool, &other),
        };
        let source = element.source(&self.config.decorative_base);
        Some(self.begin_load(source, Placement::Decorative(element)))
    }

    fn add_collage(&mut self, tool: &str, action: ToolAction) -> Option<PendingLoad> {
        let request = match action {
            ToolAction::Collage(request) => request,
            other => return mismatched(tool, &other),
        };
        Some(self.begin_load(request.image, Placement::Collage(request.element)))
    }

    fn apply_layout<C: Canvas + ?Sized>(
        &mut self,
        tool: &str,
        action: ToolAction,
        canvas: &mut C,
    ) -> Option<PendingLoad> {
        let template = match action {
            ToolAction::Layout(template) => template,
            other => return mismatched(tool, &other),
        };
        layout::apply_layout(canvas, &template, &self.config);
        None
    }

    fn begin_load(&mut self, source: ImageSource, placement: Placement) -> PendingLoad {
        log::debug!("Loading {} (generation {})", source.describe(), self.generation);
        PendingLoad {
            ticket: LoadTicket {
                generation: self.generation,
            },
            image: self.loader.load(&source),
            source,
            placement,
        }
    }

    /// Place a finished load on the canvas.
    ///
    /// Stale and failed loads are reported to diagnostics and otherwise
    /// ignored.
    pub fn complete<C: Canvas + ?Sized>(
        &mut self,
        completion: LoadCompletion,
        canvas: Option<&mut C>,
    ) -> Option<ObjectId> {
        if completion.ticket.generation != self.generation {
            self.diagnostics.report(&ToolError::StaleLoad {
                ticket: completion.ticket.generation,
                current: self.generation,
            });
            return None;
        }
        let pixels = match completion.result {
            Ok(pixels) => pixels,
            Err(err) => {
                self.diagnostics.report(&err);
                return None;
            }
        };
        let canvas = canvas?;
        let id = match &completion.placement {
            Placement::Decorative(element) => decorative::add_decorative(canvas, element, pixels, &self.config),
            Placement::Collage(element) => collage::add_collage(canvas, element, pixels, &self.config, &mut self.rng),
        };
        Some(id)
    }
}

fn mismatched(tool: &str, action: &ToolAction) -> Option<PendingLoad> {
    log::debug!("Dropping {} action sent to tool '{}'", action.category(), tool);
    None
}
