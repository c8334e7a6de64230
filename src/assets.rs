use base64::{Engine as _, engine::general_purpose};
use futures::FutureExt;
use futures::future::BoxFuture;
use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::PathBuf;

use crate::error::{ToolError, ToolResult};

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Where an image comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSource {
    /// URL path such as `/assets/decorative/washi-dots.png`
    Asset(String),
    /// `data:` URL carrying base64 image bytes
    DataUrl(String),
}

impl ImageSource {
    pub fn describe(&self) -> &str {
        match self {
            ImageSource::Asset(path) => path,
            ImageSource::DataUrl(_) => "<data url>",
        }
    }
}

/// Asynchronously turns an [`ImageSource`] into pixels
pub trait AssetLoader {
    fn load(&self, source: &ImageSource) -> BoxFuture<'static, ToolResult<RgbaImage>>;
}

/// Loads asset paths from a directory on disk and decodes data URLs in place
#[derive(Debug, Clone)]
pub struct FsAssetLoader {
    root: PathBuf,
}

impl FsAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map an asset URL path onto the loader's root directory
    pub fn resolve(&self, asset: &str) -> PathBuf {
        self.root.join(asset.trim_start_matches('/'))
    }
}

impl AssetLoader for FsAssetLoader {
    fn load(&self, source: &ImageSource) -> BoxFuture<'static, ToolResult<RgbaImage>> {
        match source {
            ImageSource::DataUrl(url) => {
                let url = url.clone();
                async move { decode_data_url(&url) }.boxed()
            }
            ImageSource::Asset(asset) => {
                let path = self.resolve(asset);
                let asset = asset.clone();
                async move {
                    if !path.exists() {
                        return Err(ToolError::AssetNotFound(asset));
                    }
                    let bytes = std::fs::read(&path)?;
                    decode_image(&bytes)
                }
                .boxed()
            }
        }
    }
}

/// Decode encoded image bytes (PNG, JPEG, ...) into RGBA pixels
pub fn decode_image(bytes: &[u8]) -> ToolResult<RgbaImage> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

pub fn encode_png(pixels: &RgbaImage) -> ToolResult<Vec<u8>> {
    let mut bytes = Vec::new();
    pixels
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|err| ToolError::Encode(err.to_string()))?;
    Ok(bytes)
}

pub fn encode_png_data_url(pixels: &RgbaImage) -> ToolResult<String> {
    let bytes = encode_png(pixels)?;
    Ok(format!("{}{}", PNG_DATA_URL_PREFIX, general_purpose::STANDARD.encode(bytes)))
}

/// Decode a base64 `data:image/...` URL into pixels
pub fn decode_data_url(url: &str) -> ToolResult<RgbaImage> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| ToolError::InvalidDataUrl("missing data: scheme".to_owned()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ToolError::InvalidDataUrl("missing payload".to_owned()))?;
    if !header.ends_with(";base64") {
        return Err(ToolError::InvalidDataUrl(format!("unsupported encoding in {header}")));
    }
    let bytes = general_purpose::STANDARD.decode(payload.trim())?;
    decode_image(&bytes)
}
