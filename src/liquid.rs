//! Liquid expression formatting.
//!
//! The downstream template renderer consumes `{{ value | filter }}` syntax.
//! A quoted value is a literal resolved at render time by the storage layer;
//! an unquoted value is a variable path substituted by the renderer.

/// Scheme prefix that marks a value as a storage literal.
pub const STORAGE_SCHEME: &str = "s3://";

/// Heuristic literal detection: storage URIs are literals, everything else
/// is treated as a variable path.
#[inline]
pub fn is_storage_literal(value: &str) -> bool {
    value.starts_with(STORAGE_SCHEME)
}

/// Wrap a value in a read-granting expression.
///
/// Literal: `{{ "s3://bucket/key" | grant_read_access }}`
/// Variable: `{{ task.input.taskObject | grant_read_access }}`
pub fn grant_read_access(value: &str, is_literal: bool) -> String {
    if is_literal {
        format!("{{{{ \"{value}\" | grant_read_access }}}}")
    } else {
        format!("{{{{ {value} | grant_read_access }}}}")
    }
}

/// Wrap a variable path in a JSON-encoding expression:
/// `{{ task.input.taskObject | to_json | escape }}`
pub fn to_json_escape(value: &str) -> String {
    format!("{{{{ {value} | to_json | escape }}}}")
}
