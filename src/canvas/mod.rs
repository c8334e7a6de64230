//! The seam between the tool layer and the canvas engine.
//!
//! Tools never draw on their own; they build [`CanvasObject`]s and hand them
//! to whatever implements [`Canvas`]. [`SceneCanvas`] is the in-memory engine
//! the app and the tests run against.

mod object;
mod scene;

pub use object::{
    BlendMode, CanvasObject, GlyphJitter, ImageFilter, ImageObject, LineObject, ObjectId, RectObject, Shadow,
    TextObject,
};
pub use scene::SceneCanvas;

use egui::Vec2;

/// The slice of a canvas engine the tools consume
pub trait Canvas {
    /// Current canvas size in pixels
    fn size(&self) -> Vec2;

    fn set_dimensions(&mut self, size: Vec2);

    /// Add an object on top of the z-order
    fn add_object(&mut self, object: CanvasObject) -> ObjectId;

    fn set_active_object(&mut self, id: ObjectId);

    fn send_to_back(&mut self, id: ObjectId);

    /// Request a repaint
    fn render(&mut self);
}
