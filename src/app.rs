use futures::FutureExt as _;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::assets::{self, FsAssetLoader, ImageSource};
use crate::canvas::{Canvas, CanvasObject, ImageObject, SceneCanvas};
use crate::config::EditorConfig;
use crate::constants::{STAMP_STYLES, STICKER_CATEGORIES, WASHI_PATTERNS};
use crate::error::{Diagnostics, ToolError};
use crate::panels::{central_panel, tools_panel};
use crate::renderer::Renderer;
use crate::tool::collage::{self, CollageEffect, CollageElement, CollageKind, CollageRequest};
use crate::tool::decorative::{DecorativeElement, DecorativeKind};
use crate::tool::drawing::{DrawingOutput, DrawingStroke, DrawingTool, PointerSample};
use crate::tool::layout::{LayoutTemplate, PageLayout};
use crate::tool::text::{TextRequest, TextVariant};
use crate::tool::{PendingLoad, ToolAction, ToolCategory, ToolDispatcher, ToolId};

/// Form state for every tool family.
///
/// We derive Deserialize/Serialize so the forms survive a restart.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct ToolForms {
    pub active_tool: ToolId,
    pub text: TextRequest,
    pub drawing: DrawingTool,
    pub decorative: DecorativeElement,
    pub collage: CollageElement,
    pub collage_effect: Option<CollageEffect>,
    pub upload_path: String,
    pub layout: LayoutTemplate,
}

impl Default for ToolForms {
    fn default() -> Self {
        Self {
            active_tool: ToolId::Select,
            text: TextRequest::new("", TextVariant::Plain),
            drawing: DrawingTool::default(),
            decorative: DecorativeElement::default(),
            collage: CollageElement::default(),
            collage_effect: None,
            upload_path: String::new(),
            layout: PageLayout::EightPage.template(),
        }
    }
}

impl ToolForms {
    /// Reset the form of `tool`'s family to that tool's defaults
    pub fn select(&mut self, tool: ToolId) {
        self.active_tool = tool;
        match tool.category() {
            ToolCategory::Text => {
                if let Some(variant) = TextVariant::from_tool(tool) {
                    self.text = TextRequest {
                        text: std::mem::take(&mut self.text.text),
                        ..TextRequest::new("", variant)
                    };
                }
            }
            ToolCategory::Drawing => self.drawing = DrawingTool::for_tool(tool),
            ToolCategory::Decorative => {
                if let Some(kind) = DecorativeKind::from_tool(tool) {
                    self.decorative = DecorativeElement::new(kind, variants_for(kind)[0]);
                }
            }
            ToolCategory::Collage => {
                if let Some(kind) = CollageKind::from_tool(tool) {
                    self.collage.kind = kind;
                }
            }
            ToolCategory::Layout => {
                if let Some(layout) = PageLayout::from_tool(tool) {
                    self.layout = layout.template();
                }
            }
            ToolCategory::Select => {}
        }
    }
}

/// Catalogue of variants for a decorative kind
pub fn variants_for(kind: DecorativeKind) -> &'static [&'static str] {
    match kind {
        DecorativeKind::Washi => &WASHI_PATTERNS,
        DecorativeKind::Sticker => &STICKER_CATEGORIES,
        DecorativeKind::Stamp => &STAMP_STYLES,
    }
}

pub struct ZineApp {
    pub(crate) forms: ToolForms,
    pub(crate) config: EditorConfig,
    pub(crate) canvas: SceneCanvas,
    pub(crate) dispatcher: ToolDispatcher,
    pub(crate) stroke: DrawingStroke,
    pub(crate) renderer: Renderer,
    pub(crate) surface_dirty: bool,
    pub(crate) last_drawing: Option<DrawingOutput>,
    pending: Vec<PendingLoad>,
    failures: Arc<Mutex<Vec<String>>>,
}

impl std::fmt::Debug for ZineApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZineApp")
            .field("forms", &self.forms)
            .field("objects", &self.canvas.len())
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl Default for ZineApp {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl ZineApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: EditorConfig) -> Self {
        let mut app = Self::with_config(config);
        if let Some(storage) = cc.storage {
            if let Some(forms) = eframe::get_value::<ToolForms>(storage, eframe::APP_KEY) {
                app.set_forms(forms);
            }
        }
        app
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let failures = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&failures);
        let diagnostics = Diagnostics::with_hook(move |err: &ToolError| sink.lock().push(err.to_string()));
        let dispatcher =
            ToolDispatcher::new(config.clone(), FsAssetLoader::new(config.asset_root.clone())).with_diagnostics(diagnostics);
        let stroke = DrawingStroke::new(DrawingTool::default(), config.drawing_surface);

        Self {
            forms: ToolForms::default(),
            canvas: SceneCanvas::default(),
            dispatcher,
            stroke,
            renderer: Renderer::new(),
            surface_dirty: true,
            last_drawing: None,
            pending: Vec::new(),
            failures,
            config,
        }
    }

    fn set_forms(&mut self, forms: ToolForms) {
        self.dispatcher.set_active_tool(forms.active_tool.as_str());
        self.stroke.set_tool(forms.drawing.clone());
        self.forms = forms;
    }

    pub fn forms(&self) -> &ToolForms {
        &self.forms
    }

    pub fn canvas(&self) -> &SceneCanvas {
        &self.canvas
    }

    pub fn active_tool(&self) -> ToolId {
        self.forms.active_tool
    }

    pub fn pending_loads(&self) -> usize {
        self.pending.len()
    }

    /// Failures swallowed by the tool layer, oldest first
    pub fn failures(&self) -> Vec<String> {
        self.failures.lock().clone()
    }

    /// Make `tool` active; loads started under the previous tool go stale
    pub fn set_active_tool(&mut self, tool: ToolId) {
        if tool == self.forms.active_tool {
            return;
        }
        log::info!("Tool selected: {}", tool);
        self.forms.select(tool);
        self.dispatcher.set_active_tool(tool.as_str());
        if tool.category() == ToolCategory::Drawing {
            self.stroke.set_tool(self.forms.drawing.clone());
        }
    }

    /// Route an action through the dispatcher under the active tool
    pub fn dispatch(&mut self, action: ToolAction) {
        let tool = self.forms.active_tool;
        if let Some(load) = self.dispatcher.dispatch(tool.as_str(), action, Some(&mut self.canvas)) {
            self.pending.push(load);
        }
    }

    pub fn add_text(&mut self) {
        self.dispatch(ToolAction::Text(self.forms.text.clone()));
    }

    pub fn add_decorative(&mut self) {
        self.dispatch(ToolAction::Decorative(self.forms.decorative.clone()));
    }

    pub fn apply_layout(&mut self) {
        self.dispatch(ToolAction::Layout(self.forms.layout.clone()));
    }

    /// Read the upload path, run the collage effects over it and place the result
    pub fn upload_collage(&mut self) {
        let mut element = self.forms.collage.clone();
        if let Some(effect) = self.forms.collage_effect {
            element = element.with_effect(effect);
        }
        let processed = std::fs::read(&self.forms.upload_path)
            .map_err(ToolError::from)
            .and_then(|bytes| collage::process_upload(&bytes, &element.effects, &mut rand::rng()));
        match processed {
            Ok(processed) => {
                log::info!("Processed {} upload ({}x{})", self.forms.upload_path, processed.size.x, processed.size.y);
                self.dispatch(ToolAction::Collage(CollageRequest {
                    element,
                    image: ImageSource::DataUrl(processed.data_url),
                }));
            }
            Err(err) => self.report(&err),
        }
    }

    /// Apply the current brush form to the stroke
    pub fn sync_brush(&mut self) {
        self.stroke.set_tool(self.forms.drawing.clone());
    }

    pub fn pointer_down(&mut self, sample: PointerSample) {
        self.stroke.pointer_down(sample);
    }

    pub fn pointer_move(&mut self, sample: PointerSample) {
        if self.stroke.pointer_move(sample).is_some() {
            self.surface_dirty = true;
        }
    }

    pub fn pointer_up(&mut self) {
        let finished = self.stroke.pointer_up();
        self.finish_stroke(finished);
    }

    pub fn pointer_leave(&mut self) {
        let finished = self.stroke.pointer_leave();
        self.finish_stroke(finished);
    }

    fn finish_stroke(&mut self, finished: crate::error::ToolResult<Option<DrawingOutput>>) {
        match finished {
            Ok(Some(output)) => {
                self.dispatch(ToolAction::Drawing(output.clone()));
                self.last_drawing = Some(output);
            }
            Ok(None) => {}
            Err(err) => self.report(&err),
        }
    }

    pub fn clear_drawing(&mut self) {
        self.stroke.clear();
        self.last_drawing = None;
        self.surface_dirty = true;
    }

    /// Put the last finished drawing on the page at the placement origin
    pub fn place_drawing(&mut self) {
        let Some(output) = &self.last_drawing else {
            return;
        };
        match assets::decode_data_url(&output.image_data) {
            Ok(pixels) => {
                let id = self
                    .canvas
                    .add_object(CanvasObject::Image(ImageObject::new(pixels, self.config.placement_origin)));
                self.canvas.set_active_object(id);
                self.canvas.render();
                self.clear_drawing();
            }
            Err(err) => self.report(&err),
        }
    }

    pub fn clear_page(&mut self) {
        self.dispatcher.invalidate_loads();
        self.pending.clear();
        self.canvas.clear();
    }

    /// Drive image loads and place the ones that finished
    pub fn poll_loads(&mut self) {
        let mut finished = Vec::new();
        self.pending.retain_mut(|load| match load.now_or_never() {
            Some(completion) => {
                finished.push(completion);
                false
            }
            None => true,
        });
        for completion in finished {
            if let Some(id) = self.dispatcher.complete(completion, Some(&mut self.canvas)) {
                log::debug!("Placed {:?}", id);
            }
        }
    }

    fn report(&mut self, err: &ToolError) {
        log::warn!("Tool action failed: {}", err);
        self.failures.lock().push(err.to_string());
    }
}

impl eframe::App for ZineApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.forms);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loads();
        if !self.pending.is_empty() {
            ctx.request_repaint();
        }

        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
