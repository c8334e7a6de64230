use thiserror::Error;

/// Errors raised inside the tool layer.
///
/// None of these reach the user: the dispatcher swallows them, logs them and
/// hands them to [`Diagnostics`].
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Failed to read asset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Discarded stale load (generation {ticket}, current {current})")]
    StaleLoad { ticket: u64, current: u64 },
}

/// Errors that can occur while loading the editor configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ToolResult<T> = Result<T, ToolError>;

/// Observability hook for failures the tool layer swallows.
pub struct Diagnostics {
    hook: Option<Box<dyn FnMut(&ToolError)>>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("hook", &self.hook.as_ref().map(|_| "<hook>"))
            .finish()
    }
}

impl Diagnostics {
    /// Diagnostics that only log.
    pub fn new() -> Self {
        Self { hook: None }
    }

    pub fn with_hook(hook: impl FnMut(&ToolError) + 'static) -> Self {
        Self {
            hook: Some(Box::new(hook)),
        }
    }

    /// Record a swallowed failure
    pub fn report(&mut self, error: &ToolError) {
        log::warn!("Tool action failed silently: {}", error);
        if let Some(hook) = &mut self.hook {
            hook(error);
        }
    }
}
