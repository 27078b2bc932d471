//! Error types for Waterprint

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WaterprintError>;

/// Main error type for Waterprint
#[derive(Debug, Error)]
pub enum WaterprintError {
    #[error("Invalid watermark parameters: {0}")]
    Validation(#[from] ValidationFailure),

    #[error("Rendering failed: {0}")]
    RenderingFailed(#[from] RenderError),

    #[error("Export failed: {0}")]
    ExportFailed(#[from] ExportError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Why a set of watermark parameters was turned away
///
/// Checks run in declaration order and stop at the first failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationFailure {
    #[error("parameters are missing")]
    MissingParams,

    #[error("username is missing from the parameters")]
    MissingUsername,

    #[error("username must be a string")]
    UsernameNotText,

    #[error("username must not be blank")]
    BlankUsername,

    #[error("angle must be a positive integer")]
    AngleNotInteger,

    #[error("font must be a string")]
    FontNotText,
}

impl ValidationFailure {
    /// Stable machine-readable code, handy for hosts that map failures to UI text
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingParams => "missing_params",
            Self::MissingUsername => "missing_username",
            Self::UsernameNotText => "username_not_text",
            Self::BlankUsername => "blank_username",
            Self::AngleNotInteger => "angle_not_integer",
            Self::FontNotText => "font_not_text",
        }
    }
}

/// Raster surface errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("No font available for: {0}")]
    FontNotFound(String),

    #[error("Invalid font data")]
    InvalidFont,

    #[error("Path building failed")]
    PathBuildingFailed,

    #[error("Pixmap creation failed")]
    PixmapCreationFailed,
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}
