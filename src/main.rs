//! Liquify - build a Liquid worker template from a built frontend document.

mod cli;
mod error;
mod inputs;
mod liquid;
mod logger;
mod prefix;
mod template;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{ColorChoice, CommandFactory, Parser};

use cli::{Cli, PREFIX_ENV};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let Some(raw_prefix) = cli
        .prefix
        .clone()
        .or_else(|| std::env::var(PREFIX_ENV).ok())
    else {
        Cli::command().print_help().ok();
        std::process::exit(2);
    };

    build_template(&cli, &raw_prefix)
}

fn build_template(cli: &Cli, raw_prefix: &str) -> Result<()> {
    debug!("config"; "deployment prefix: {raw_prefix}");

    let html = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read `{}`", cli.input.display()))?;

    let rewritten = template::transform(&html, raw_prefix)?;

    let output = cli.output_path();
    fs::write(&output, &rewritten)
        .with_context(|| format!("failed to write `{}`", output.display()))?;

    if let Some(manifest_path) = &cli.manifest {
        write_manifest(&html, manifest_path)?;
    }

    println!("{}", output.display());
    Ok(())
}

/// Dump the declared runtime inputs of the source document as JSON.
fn write_manifest(html: &str, path: &Path) -> Result<()> {
    let declarations = inputs::scan(html)?;
    debug!("manifest"; "{} runtime input declaration(s)", declarations.len());

    let json = serde_json::to_string_pretty(&declarations)?;
    fs::write(path, json).with_context(|| format!("failed to write `{}`", path.display()))?;
    Ok(())
}
