//! Placeholder tokens for staging Liquid expressions through the serializer.
//!
//! Liquid syntax (`{{ ... }}`, embedded quotes) is not valid HTML attribute
//! text, so the serializer would corrupt it. During the DOM pass each
//! rewritten attribute receives an opaque hex token instead; after the
//! document is serialized, every token is substituted with its expression in
//! a plain string pass.
//!
//! A token is the blake3 digest of the matched element's serialized form at
//! the time of matching, so token derivation is a pure function of content
//! and the overall output is reproducible across runs.

use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use markup5ever_rcdom::{Handle, SerializableHandle};
use rustc_hash::FxHashMap;

use crate::error::TemplateError;

/// Mapping from placeholder token to final Liquid expression.
///
/// Insertion order is irrelevant: resolution is keyed by token, and two
/// byte-identical elements deliberately share a token (they resolve to the
/// same expression).
#[derive(Debug, Default)]
pub struct TokenMap {
    map: FxHashMap<String, String>,
}

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of staged expressions.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Digest the element's current serialized form, register the expression
    /// under the resulting token, and return the token.
    pub fn stage(
        &mut self,
        element: &Handle,
        expression: String,
    ) -> Result<String, TemplateError> {
        let token = digest(&outer_html(element)?);
        self.map.insert(token.clone(), expression);
        Ok(token)
    }

    /// Substitute every staged token in the serialized document.
    pub fn resolve(&self, serialized: String) -> String {
        let mut resolved = serialized;
        for (token, expression) in &self.map {
            resolved = resolved.replace(token.as_str(), expression);
        }
        resolved
    }
}

/// Serialize a single element (outer HTML).
fn outer_html(element: &Handle) -> Result<String, TemplateError> {
    let mut buf = Vec::new();
    let node: SerializableHandle = element.clone().into();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..SerializeOpts::default()
    };
    serialize(&mut buf, &node, opts).map_err(TemplateError::Serialize)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn digest(content: &str) -> String {
    hex::encode(blake3::hash(content.as_bytes()).as_bytes())
}
