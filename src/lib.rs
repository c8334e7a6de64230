#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod assets;
pub mod canvas;
pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod tool;

pub use app::{ToolForms, ZineApp};
pub use assets::{AssetLoader, FsAssetLoader, ImageSource};
pub use canvas::{Canvas, CanvasObject, ObjectId, SceneCanvas};
pub use config::EditorConfig;
pub use error::{ConfigError, Diagnostics, ToolError, ToolResult};
pub use renderer::Renderer;
pub use tool::{ToolAction, ToolCategory, ToolDispatcher, ToolId};
