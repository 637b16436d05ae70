//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::{Path, PathBuf};

/// Fixed output filename, written next to the input document.
pub const TEMPLATE_FILE_NAME: &str = "worker-template.liquid.html";

/// Environment variable consulted when the prefix argument is omitted.
pub const PREFIX_ENV: &str = "S3_PREFIX";

/// Liquid worker-template builder CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Built HTML document to rewrite (e.g. build/index.html)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Deployment prefix the frontend build is published under
    /// (e.g. s3://frontend/deploy); falls back to $S3_PREFIX
    #[arg(value_hint = clap::ValueHint::Url)]
    pub prefix: Option<String>,

    /// Output file path (default: worker-template.liquid.html next to the input)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Also write a JSON manifest of the declared runtime inputs
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub manifest: Option<PathBuf>,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Where the rewritten template is written.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

/// The template lands alongside the input under a fixed name.
pub fn default_output_path(input: &Path) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(TEMPLATE_FILE_NAME)
}
