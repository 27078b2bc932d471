//! Watermark input parameters
//!
//! The typed face of the input bag. `angle` and `font` are optional here and
//! get filled from [`crate::Defaults`] before validation ever sees them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tilt angle as the caller handed it over
///
/// Numbers and numeric strings are both accepted; validation looks only at
/// [`Angle::to_text`], so `15`, `15.0` and `"15"` behave the same.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Angle {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Angle {
    /// Canonical text form of the angle
    ///
    /// Integral floats drop their fraction, non-finite floats spell
    /// themselves out (`NaN`, `Infinity`, `-Infinity`).
    pub fn to_text(&self) -> String {
        match self {
            Angle::Int(v) => v.to_string(),
            Angle::Float(v) => float_to_text(*v),
            Angle::Text(s) => s.clone(),
        }
    }
}

/// Largest float that still converts to an exact integer
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn float_to_text(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        let text = if v > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER {
        // -0.0 prints as "0"
        (v as i64).to_string()
    } else {
        v.to_string()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<i64> for Angle {
    fn from(v: i64) -> Self {
        Angle::Int(v)
    }
}

impl From<i32> for Angle {
    fn from(v: i32) -> Self {
        Angle::Int(v.into())
    }
}

impl From<u32> for Angle {
    fn from(v: u32) -> Self {
        Angle::Int(v.into())
    }
}

impl From<f64> for Angle {
    fn from(v: f64) -> Self {
        Angle::Float(v)
    }
}

impl From<&str> for Angle {
    fn from(v: &str) -> Self {
        Angle::Text(v.to_string())
    }
}

impl From<String> for Angle {
    fn from(v: String) -> Self {
        Angle::Text(v)
    }
}

/// What the caller wants watermarked and how
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatermarkParams {
    /// Text drawn into the tile
    pub username: String,
    /// Tilt in degrees; `None` takes the configured default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<Angle>,
    /// CSS font shorthand; `None` takes the configured default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

impl WatermarkParams {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            angle: None,
            font: None,
        }
    }

    pub fn with_angle(mut self, angle: impl Into<Angle>) -> Self {
        self.angle = Some(angle.into());
        self
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }
}
