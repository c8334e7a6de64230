mod common;

use common::{MemoryLoader, solid};
use futures::executor::block_on;
use parking_lot::Mutex;
use std::sync::Arc;

use zine_tools::canvas::SceneCanvas;
use zine_tools::config::EditorConfig;
use zine_tools::error::{Diagnostics, ToolError};
use zine_tools::tool::layout::PageLayout;
use zine_tools::tool::{
    CollageElement, CollageKind, CollageRequest, DecorativeElement, DecorativeKind, ToolAction, ToolCategory,
    ToolDispatcher, ToolId, TextRequest, TextVariant, category_of,
};
use zine_tools::assets::ImageSource;

const WASHI: &str = "/assets/decorative/washi-dots.png";

fn dispatcher(loader: MemoryLoader) -> (ToolDispatcher, Arc<Mutex<Vec<String>>>) {
    let failures = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&failures);
    let diagnostics = Diagnostics::with_hook(move |err: &ToolError| sink.lock().push(err.to_string()));
    let dispatcher = ToolDispatcher::new(EditorConfig::default(), loader)
        .with_seed(7)
        .with_diagnostics(diagnostics);
    (dispatcher, failures)
}

fn washi_loader() -> MemoryLoader {
    MemoryLoader::default().with_asset(WASHI, solid(40, 10, [200, 10, 10, 255]))
}

#[test]
fn test_every_tool_maps_to_exactly_one_category() {
    let expected = [
        ("select", ToolCategory::Select),
        ("typewriter", ToolCategory::Text),
        ("handwriting", ToolCategory::Text),
        ("cutout", ToolCategory::Text),
        ("text", ToolCategory::Text),
        ("marker", ToolCategory::Drawing),
        ("pencil", ToolCategory::Drawing),
        ("highlight", ToolCategory::Drawing),
        ("correction", ToolCategory::Drawing),
        ("freeform", ToolCategory::Drawing),
        ("washi", ToolCategory::Decorative),
        ("sticker", ToolCategory::Decorative),
        ("stamp", ToolCategory::Decorative),
        ("paper-scrap", ToolCategory::Collage),
        ("photo-frame", ToolCategory::Collage),
        ("cut", ToolCategory::Collage),
        ("image", ToolCategory::Collage),
        ("8page", ToolCategory::Layout),
        ("quarter", ToolCategory::Layout),
        ("half", ToolCategory::Layout),
        ("custom", ToolCategory::Layout),
    ];
    for (name, category) in expected {
        assert_eq!(category_of(name), category, "{name}");
        assert_eq!(category_of(name), category_of(name));
    }
    for tool in ToolId::ALL {
        assert_eq!(ToolId::parse(tool.as_str()), Some(tool));
    }
}

#[test]
fn test_palette_aliases_and_unknown_tools() {
    assert_eq!(category_of("stickers"), ToolCategory::Decorative);
    assert_eq!(category_of("stamps"), ToolCategory::Decorative);
    assert_eq!(category_of("lasso"), ToolCategory::Select);
    assert_eq!(category_of(""), ToolCategory::Select);
    assert!("lasso".parse::<ToolId>().is_err());
}

#[test]
fn test_unknown_tool_leaves_canvas_alone() {
    let (mut dispatcher, failures) = dispatcher(washi_loader());
    let mut canvas = SceneCanvas::default();
    let action = ToolAction::Text(TextRequest::new("hi", TextVariant::Plain));

    assert!(dispatcher.dispatch("lasso", action, Some(&mut canvas)).is_none());
    assert!(canvas.is_empty());
    assert!(failures.lock().is_empty());
}

#[test]
fn test_missing_canvas_is_a_no_op() {
    let loader = washi_loader();
    let (mut dispatcher, _) = dispatcher(loader.clone());
    let text = ToolAction::Text(TextRequest::new("hi", TextVariant::Plain));
    let washi = ToolAction::Decorative(DecorativeElement::new(DecorativeKind::Washi, "dots"));

    assert!(dispatcher.dispatch::<SceneCanvas>("text", text, None).is_none());
    assert!(dispatcher.dispatch::<SceneCanvas>("washi", washi, None).is_none());
    assert!(loader.requests().is_empty());
}

#[test]
fn test_drawing_and_select_actions_do_nothing() {
    let (mut dispatcher, _) = dispatcher(washi_loader());
    let mut canvas = SceneCanvas::default();

    let text = ToolAction::Text(TextRequest::new("hi", TextVariant::Plain));
    assert!(dispatcher.dispatch("select", text.clone(), Some(&mut canvas)).is_none());
    assert!(dispatcher.dispatch("marker", text, Some(&mut canvas)).is_none());
    assert!(canvas.is_empty());
}

#[test]
fn test_mismatched_action_is_dropped() {
    let loader = washi_loader();
    let (mut dispatcher, _) = dispatcher(loader.clone());
    let mut canvas = SceneCanvas::default();

    let layout = ToolAction::Layout(PageLayout::Quarter.template());
    assert!(dispatcher.dispatch("washi", layout, Some(&mut canvas)).is_none());
    assert!(loader.requests().is_empty());
    assert_eq!(canvas.len(), 0);
}

#[test]
fn test_text_variant_follows_the_tool() {
    let (mut dispatcher, _) = dispatcher(washi_loader());
    let mut canvas = SceneCanvas::default();

    // Plain request sent to the cutout tool becomes one object per letter
    let action = ToolAction::Text(TextRequest::new("abc", TextVariant::Plain));
    dispatcher.dispatch("cutout", action, Some(&mut canvas));
    assert_eq!(canvas.len(), 3);
}

#[test]
fn test_decorative_load_completes_onto_the_canvas() {
    let loader = washi_loader();
    let (mut dispatcher, failures) = dispatcher(loader.clone());
    let mut canvas = SceneCanvas::default();
    dispatcher.set_active_tool("washi");

    let action = ToolAction::Decorative(DecorativeElement::new(DecorativeKind::Washi, "dots"));
    let load = dispatcher
        .dispatch("washi", action, Some(&mut canvas))
        .expect("decorative actions load an image");
    assert_eq!(loader.requests(), vec![WASHI.to_owned()]);
    assert!(canvas.is_empty());

    let completion = block_on(load);
    let id = dispatcher.complete(completion, Some(&mut canvas));
    assert!(id.is_some());
    assert_eq!(canvas.active_id(), id);
    assert!(failures.lock().is_empty());
}

#[test]
fn test_stale_load_is_discarded_after_tool_switch() {
    let (mut dispatcher, failures) = dispatcher(washi_loader());
    let mut canvas = SceneCanvas::default();
    dispatcher.set_active_tool("washi");

    let action = ToolAction::Decorative(DecorativeElement::new(DecorativeKind::Washi, "dots"));
    let load = dispatcher.dispatch("washi", action, Some(&mut canvas)).expect("load");

    dispatcher.set_active_tool("typewriter");
    let completion = block_on(load);
    assert!(dispatcher.complete(completion, Some(&mut canvas)).is_none());
    assert!(canvas.is_empty());
    assert_eq!(failures.lock().len(), 1);
}

#[test]
fn test_reselecting_the_same_tool_keeps_loads_fresh() {
    let (mut dispatcher, _) = dispatcher(washi_loader());
    let mut canvas = SceneCanvas::default();
    dispatcher.set_active_tool("washi");

    let action = ToolAction::Decorative(DecorativeElement::new(DecorativeKind::Washi, "dots"));
    let load = dispatcher.dispatch("washi", action, Some(&mut canvas)).expect("load");
    let generation = dispatcher.generation();
    dispatcher.set_active_tool("washi");
    assert_eq!(dispatcher.generation(), generation);

    assert!(dispatcher.complete(block_on(load), Some(&mut canvas)).is_some());
}

#[test]
fn test_failed_load_reaches_the_hook_without_touching_the_canvas() {
    let (mut dispatcher, failures) = dispatcher(MemoryLoader::default());
    let mut canvas = SceneCanvas::default();
    dispatcher.set_active_tool("sticker");

    let action = ToolAction::Decorative(DecorativeElement::new(DecorativeKind::Sticker, "nature"));
    let load = dispatcher.dispatch("sticker", action, Some(&mut canvas)).expect("load");
    assert!(dispatcher.complete(block_on(load), Some(&mut canvas)).is_none());

    assert!(canvas.is_empty());
    let failures = failures.lock();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].contains("sticker-nature.png"));
}

#[test]
fn test_bad_data_url_fails_silently() {
    let (mut dispatcher, failures) = dispatcher(MemoryLoader::default());
    let mut canvas = SceneCanvas::default();
    dispatcher.set_active_tool("paper-scrap");

    let action = ToolAction::Collage(CollageRequest {
        element: CollageElement::new(CollageKind::PaperScrap),
        image: ImageSource::DataUrl("data:image/png;base64,@@@".to_owned()),
    });
    let load = dispatcher.dispatch("paper-scrap", action, Some(&mut canvas)).expect("load");
    assert!(dispatcher.complete(block_on(load), Some(&mut canvas)).is_none());
    assert!(canvas.is_empty());
    assert_eq!(failures.lock().len(), 1);
}

#[test]
fn test_layout_applies_immediately() {
    let (mut dispatcher, _) = dispatcher(MemoryLoader::default());
    let mut canvas = SceneCanvas::default();

    let action = ToolAction::Layout(PageLayout::EightPage.template());
    assert!(dispatcher.dispatch("8page", action, Some(&mut canvas)).is_none());
    assert_eq!(canvas.guides().count(), 3);
}
