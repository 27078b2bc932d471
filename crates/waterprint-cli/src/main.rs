//! Waterprint CLI - print a username watermark style for a host page

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use waterprint::prelude::*;
use waterprint::render_skia::SkiaSurfaceProvider;

use cli::{Cli, OutputFormat};

/// Exit status for parameters that fail validation
const EXIT_INVALID: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        },
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = WatermarkConfig::from_env();
    log::debug!(
        "defaults: angle {}, font {:?}",
        config.default_angle,
        config.default_font
    );
    let params = build_params(cli);

    // Reject bad input before paying for the system font scan
    let valid = match waterprint_core::validate(&params, &config.defaults()) {
        Ok(valid) => valid,
        Err(failure) => {
            eprintln!("waterprint: {} [{}]", failure, failure.code());
            return Ok(ExitCode::from(EXIT_INVALID));
        },
    };

    let generator = WatermarkGenerator::builder()
        .surfaces(Arc::new(SkiaSurfaceProvider::new()))
        .config(config)
        .build()?;

    let style = generator
        .render(&valid)
        .with_context(|| format!("failed to draw watermark for {:?}", valid.text))?;

    println!("{}", format_style(&style, cli.format)?);
    Ok(ExitCode::SUCCESS)
}

fn build_params(cli: &Cli) -> WatermarkParams {
    let mut params = WatermarkParams::new(cli.username.clone());
    if let Some(angle) = &cli.angle {
        params = params.with_angle(Angle::Text(angle.clone()));
    }
    if let Some(font) = &cli.font {
        params = params.with_font(font.clone());
    }
    params
}

fn format_style(style: &StyleDescriptor, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(style)?,
        OutputFormat::Css => style.to_css(),
        OutputFormat::Url => style
            .background_image
            .as_deref()
            .and_then(|image| image.strip_prefix("url("))
            .and_then(|image| image.strip_suffix(')'))
            .context("descriptor has no background image")?
            .to_string(),
    })
}
