//! Named defaults for the generator

use waterprint_core::{
    params::Angle,
    validate::{is_positive_integer_literal, Defaults, DEFAULT_ANGLE, DEFAULT_FONT},
};

/// Environment variable that overrides [`WatermarkConfig::default_angle`]
pub const ANGLE_ENV: &str = "WATERPRINT_ANGLE";

/// Environment variable that overrides [`WatermarkConfig::default_font`]
pub const FONT_ENV: &str = "WATERPRINT_FONT";

/// Values merged into the caller's parameters before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatermarkConfig {
    /// Tilt in degrees when the caller gives none
    pub default_angle: i64,
    /// CSS font shorthand when the caller gives none
    pub default_font: String,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            default_angle: DEFAULT_ANGLE,
            default_font: DEFAULT_FONT.to_string(),
        }
    }
}

impl WatermarkConfig {
    /// Defaults overridden by `WATERPRINT_ANGLE` and `WATERPRINT_FONT`
    ///
    /// Only hosts call this; the library itself never looks at the
    /// environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ANGLE_ENV) {
            let trimmed = raw.trim();
            match trimmed.parse::<i64>() {
                Ok(angle) if is_positive_integer_literal(trimmed) => config.default_angle = angle,
                _ => log::warn!(
                    "{}={:?} is not a positive integer, keeping {}",
                    ANGLE_ENV,
                    raw,
                    config.default_angle
                ),
            }
        }

        if let Some(font) = lookup(FONT_ENV) {
            if font.trim().is_empty() {
                log::warn!("{} is empty, keeping {:?}", FONT_ENV, config.default_font);
            } else {
                config.default_font = font;
            }
        }

        config
    }

    pub fn with_angle(mut self, angle: i64) -> Self {
        self.default_angle = angle;
        self
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.default_font = font.into();
        self
    }

    /// The defaults in the shape validation expects
    pub fn defaults(&self) -> Defaults {
        Defaults {
            angle: Angle::Int(self.default_angle),
            font: self.default_font.clone(),
        }
    }
}
