//! Waterprint - a username drawn at a tilt, tiled as a background
//!
//! One call takes a username, an angle and a CSS font, draws the text once
//! on a small transparent tile and hands back a style descriptor that
//! repeats that tile across whatever the host applies it to:
//!
//! 1. Validate the parameters, filling gaps from [`WatermarkConfig`]
//! 2. Size the tile: 20px per UTF-16 unit wide, `sin(angle) × width` tall
//! 3. Rotate by the angle and draw the text in `#ddd`
//! 4. Encode the tile as a PNG `data:` URL
//! 5. Return `background-image`, `background-size` and `background-color`
//!
//! # Example
//!
//! ```no_run
//! use waterprint::prelude::*;
//! use serde_json::json;
//!
//! let generator = WatermarkGenerator::new();
//!
//! let style = generator.generate(&WatermarkParams::new("alice").with_angle(15))?;
//! println!("{}", style.to_css());
//!
//! // Bad input yields the empty descriptor and a logged warning
//! let style = generator.generate_value(&json!({ "username": "  " }))?;
//! assert!(style.is_empty());
//! # Ok::<(), WaterprintError>(())
//! ```

pub mod config;
pub mod generator;

pub use config::WatermarkConfig;
pub use generator::{WatermarkGenerator, WatermarkGeneratorBuilder};
pub use waterprint_core::{error, traits, types, Color, StyleDescriptor, TileGeometry};
pub use waterprint_export as export;
pub use waterprint_render_skia as render_skia;

/// Common imports for typical usage
pub mod prelude {
    pub use crate::{WatermarkConfig, WatermarkGenerator};
    pub use waterprint_core::{
        error::{Result, ValidationFailure, WaterprintError},
        traits::{Exporter, Surface, SurfaceProvider},
        Angle, StyleDescriptor, WatermarkParams,
    };
}
