//! The watermark pipeline: validate → measure → rasterize → encode → describe

use std::sync::Arc;

use serde_json::Value;
use waterprint_core::{
    error::{Result, ValidationFailure, WaterprintError},
    traits::{Exporter, SurfaceProvider},
    types::TextBaseline,
    validate::{validate, validate_value, ValidParams},
    StyleDescriptor, TileGeometry, WatermarkParams, BACKGROUND_COLOR, FILL_COLOR,
};
use waterprint_export::{data_url, PngExporter};
use waterprint_render_skia::SkiaSurfaceProvider;

use crate::config::WatermarkConfig;

/// Turns a username into a tiled background style
///
/// ```no_run
/// use waterprint::prelude::*;
///
/// let generator = WatermarkGenerator::new();
/// let style = generator.generate(&WatermarkParams::new("alice"))?;
/// assert_eq!(style.background_size.as_deref(), Some("50px"));
/// # Ok::<(), WaterprintError>(())
/// ```
pub struct WatermarkGenerator {
    surfaces: Arc<dyn SurfaceProvider>,
    exporter: Arc<dyn Exporter>,
    config: WatermarkConfig,
}

impl WatermarkGenerator {
    /// tiny-skia surfaces over the system fonts, PNG output, stock defaults
    pub fn new() -> Self {
        Self {
            surfaces: Arc::new(SkiaSurfaceProvider::new()),
            exporter: Arc::new(PngExporter::new()),
            config: WatermarkConfig::default(),
        }
    }

    pub fn builder() -> WatermarkGeneratorBuilder {
        WatermarkGeneratorBuilder::new()
    }

    pub fn config(&self) -> &WatermarkConfig {
        &self.config
    }

    /// Check typed parameters against the configured defaults
    pub fn validate(
        &self,
        params: &WatermarkParams,
    ) -> std::result::Result<ValidParams, ValidationFailure> {
        validate(params, &self.config.defaults())
    }

    /// Check a loose property bag against the configured defaults
    pub fn validate_value(
        &self,
        value: &Value,
    ) -> std::result::Result<ValidParams, ValidationFailure> {
        validate_value(value, &self.config.defaults())
    }

    /// Draw the tile for already-validated parameters
    pub fn render(&self, params: &ValidParams) -> Result<StyleDescriptor> {
        let text = params.text.as_str();
        let geometry = TileGeometry::compute(text, params.angle_deg);

        log::debug!(
            "render {:?} at {}°: {}x{:.3} tile via {}",
            text,
            params.angle_deg,
            geometry.width,
            geometry.height,
            self.surfaces.name()
        );

        let mut surface = self
            .surfaces
            .create(geometry.width as f64, geometry.height)?;
        log::debug!("surface is {}x{} px", surface.width(), surface.height());

        surface.set_font(&params.font);
        surface.set_text_baseline(TextBaseline::Alphabetic);
        surface.rotate(geometry.rotation);
        surface.set_fill_style(FILL_COLOR);
        surface.fill_text(text, geometry.anchor_x, geometry.anchor_y)?;

        let bitmap = surface.snapshot()?;
        drop(surface);

        let url = data_url(self.exporter.as_ref(), &bitmap)?;
        log::debug!(
            "encoded {}x{} tile as {} ({} chars)",
            bitmap.width,
            bitmap.height,
            self.exporter.name(),
            url.len()
        );

        Ok(StyleDescriptor::new(
            url,
            geometry.background_size(),
            BACKGROUND_COLOR.to_hex(),
        ))
    }

    /// Validate then render, reporting every failure
    pub fn try_generate(&self, params: &WatermarkParams) -> Result<StyleDescriptor> {
        let valid = self.validate(params)?;
        self.render(&valid)
    }

    /// Validate then render; invalid parameters give the empty descriptor
    ///
    /// The reason for a rejection goes to the log as a warning. Surface and
    /// encoder faults are still returned as errors.
    pub fn generate(&self, params: &WatermarkParams) -> Result<StyleDescriptor> {
        empty_on_rejection(self.try_generate(params))
    }

    /// [`try_generate`](Self::try_generate) for a JSON property bag
    pub fn try_generate_value(&self, value: &Value) -> Result<StyleDescriptor> {
        let valid = self.validate_value(value)?;
        self.render(&valid)
    }

    /// [`generate`](Self::generate) for a JSON property bag
    pub fn generate_value(&self, value: &Value) -> Result<StyleDescriptor> {
        empty_on_rejection(self.try_generate_value(value))
    }
}

impl Default for WatermarkGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn empty_on_rejection(result: Result<StyleDescriptor>) -> Result<StyleDescriptor> {
    match result {
        Err(WaterprintError::Validation(failure)) => {
            log::warn!("watermark not generated: {}", failure);
            Ok(StyleDescriptor::empty())
        },
        other => other,
    }
}

/// Assemble a generator from your own collaborators
///
/// ```ignore
/// let generator = WatermarkGenerator::builder()
///     .surfaces(Arc::new(SkiaSurfaceProvider::with_fonts(fonts)))
///     .config(WatermarkConfig::from_env())
///     .build()?;
/// ```
pub struct WatermarkGeneratorBuilder {
    surfaces: Option<Arc<dyn SurfaceProvider>>,
    exporter: Option<Arc<dyn Exporter>>,
    config: WatermarkConfig,
}

impl WatermarkGeneratorBuilder {
    pub fn new() -> Self {
        Self {
            surfaces: None,
            exporter: None,
            config: WatermarkConfig::default(),
        }
    }

    /// Who allocates the raster surfaces (required)
    pub fn surfaces(mut self, surfaces: Arc<dyn SurfaceProvider>) -> Self {
        self.surfaces = Some(surfaces);
        self
    }

    /// Who encodes finished tiles; PNG when not set
    pub fn exporter(mut self, exporter: Arc<dyn Exporter>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    pub fn config(mut self, config: WatermarkConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<WatermarkGenerator> {
        let surfaces = self
            .surfaces
            .ok_or_else(|| WaterprintError::ConfigError("No surface provider configured".into()))?;
        let exporter = self
            .exporter
            .unwrap_or_else(|| Arc::new(PngExporter::new()) as Arc<dyn Exporter>);

        Ok(WatermarkGenerator {
            surfaces,
            exporter,
            config: self.config,
        })
    }
}

impl Default for WatermarkGeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
