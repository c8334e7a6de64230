#![allow(dead_code)]

use futures::FutureExt;
use futures::future::BoxFuture;
use image::{Rgba, RgbaImage};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use zine_tools::assets::{self, AssetLoader, ImageSource};
use zine_tools::error::{ToolError, ToolResult};

/// Serves images from a map; anything else is not found
#[derive(Default, Clone)]
pub struct MemoryLoader {
    assets: Arc<Mutex<HashMap<String, RgbaImage>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MemoryLoader {
    pub fn with_asset(self, path: &str, pixels: RgbaImage) -> Self {
        self.assets.lock().insert(path.to_owned(), pixels);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

impl AssetLoader for MemoryLoader {
    fn load(&self, source: &ImageSource) -> BoxFuture<'static, ToolResult<RgbaImage>> {
        self.requests.lock().push(source.describe().to_owned());
        let result = match source {
            ImageSource::Asset(path) => self
                .assets
                .lock()
                .get(path)
                .cloned()
                .ok_or_else(|| ToolError::AssetNotFound(path.clone())),
            ImageSource::DataUrl(url) => assets::decode_data_url(url),
        };
        futures::future::ready(result).boxed()
    }
}

pub fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

pub fn png_bytes(pixels: &RgbaImage) -> Vec<u8> {
    assets::encode_png(pixels).expect("encode test png")
}
