//! Error types for the template transducer.

use std::io;
use thiserror::Error;

/// Errors produced while turning a built document into a worker template.
///
/// Every variant is fatal for the transformation call; there is no partial
/// output. The CLI layer wraps these with `anyhow` for presentation.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The deployment prefix is empty, unparseable, or cannot carry a path.
    #[error("invalid deployment prefix `{prefix}`: {reason}")]
    Configuration { prefix: String, reason: String },

    /// An element matched a class rule but lacks a required attribute.
    #[error("`{tag}` element with class `{class}` has no `{attr}` attribute")]
    MalformedInput {
        tag: String,
        class: &'static str,
        attr: &'static str,
    },

    /// The input could not be read into a DOM.
    #[error("failed to parse input document")]
    Parse(#[source] io::Error),

    /// The DOM could not be written back out.
    #[error("failed to serialize document")]
    Serialize(#[source] io::Error),
}
