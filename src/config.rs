use egui::{Color32, Pos2, Vec2};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable naming a JSON config file
pub const CONFIG_ENV_VAR: &str = "ZINE_TOOLS_CONFIG";

/// Constants the tool layer places objects with.
///
/// Every field has a default matching the editor's stock behaviour, so a
/// config file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Where new text, decorative and collage objects land
    pub placement_origin: Pos2,
    /// Pixels per inch for page layouts
    pub dpi: f32,
    pub bleed_inset: f32,
    /// Dash and gap length for guide lines
    pub guide_dash: [f32; 2],
    pub fold_guide_color: Color32,
    pub bleed_guide_color: Color32,
    /// URL prefix decorative assets are resolved under
    pub decorative_base: String,
    /// Directory the filesystem loader maps asset URLs onto
    pub asset_root: PathBuf,
    pub drawing_surface: Vec2,
    pub frame_border: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placement_origin: Pos2::new(100.0, 100.0),
            dpi: 96.0,
            bleed_inset: 18.0,
            guide_dash: [5.0, 5.0],
            fold_guide_color: Color32::from_rgb(0xaa, 0xaa, 0xaa),
            bleed_guide_color: Color32::from_rgb(0xff, 0x00, 0x00),
            decorative_base: "/assets/decorative/".to_owned(),
            asset_root: PathBuf::from("public"),
            drawing_surface: Vec2::new(800.0, 600.0),
            frame_border: 10.0,
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load from `ZINE_TOOLS_CONFIG` if set, defaults otherwise.
    ///
    /// A broken config file is logged and replaced by defaults.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", Path::new(&path).display());
                config
            }
            Err(err) => {
                log::warn!("Ignoring config {}: {}", Path::new(&path).display(), err);
                Self::default()
            }
        }
    }
}
