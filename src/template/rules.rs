//! Attribute rewrite rules.
//!
//! A closed set of rules over the document:
//! - `link` elements: `href` joined under the deployment prefix
//! - `script` elements with a relative `src`: joined under the prefix
//! - class `asset`: `data-src` joined under the prefix
//! - class `s3-file`: `data-src` wrapped as storage literal or variable path
//! - class `json-var`: `data-src` wrapped as a JSON-encoded variable
//!
//! Class dispatch is a fixed table of pure functions; each entry names the
//! required attribute handling so the walker stays a dumb loop.

use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use markup5ever::Attribute;

use crate::liquid;
use crate::prefix::DeployPrefix;

pub const DATA_NAME: &str = "data-name";
pub const DATA_SRC: &str = "data-src";
pub const DATA_LOCAL: &str = "data-local";

/// A class-dispatched rewrite of the `data-src` attribute.
pub struct ClassRule {
    /// Class marker that selects the element.
    pub class: &'static str,
    /// Whether the local-development override attribute is dropped.
    pub strip_local: bool,
    /// Build the Liquid expression from the raw `data-src` value.
    pub expression: fn(&str, &DeployPrefix) -> String,
}

/// The dispatch table, in evaluation order.
pub const CLASS_RULES: [ClassRule; 3] = [
    ClassRule {
        class: "asset",
        strip_local: false,
        expression: asset_expression,
    },
    ClassRule {
        class: "s3-file",
        strip_local: true,
        expression: s3_file_expression,
    },
    ClassRule {
        class: "json-var",
        strip_local: true,
        expression: json_var_expression,
    },
];

/// Frontend asset shipped with the build: qualify under the prefix.
fn asset_expression(data_src: &str, prefix: &DeployPrefix) -> String {
    liquid::grant_read_access(&prefix.join(data_src), true)
}

/// Storage reference: literal if it carries the storage scheme, otherwise a
/// variable path resolved by the renderer.
fn s3_file_expression(data_src: &str, _prefix: &DeployPrefix) -> String {
    liquid::grant_read_access(data_src, liquid::is_storage_literal(data_src))
}

/// Runtime variable injected as JSON.
fn json_var_expression(data_src: &str, _prefix: &DeployPrefix) -> String {
    liquid::to_json_escape(data_src)
}

/// External script sources are left untouched.
#[inline]
pub fn is_external_src(src: &str) -> bool {
    src.starts_with("http")
}

// ============================================================================
// Attribute access
// ============================================================================

pub fn attr_value(attrs: &RefCell<Vec<Attribute>>, name: &str) -> Option<String> {
    attrs
        .borrow()
        .iter()
        .find(|attr| attr.name.local.as_ref() == name)
        .map(|attr| attr.value.to_string())
}

/// Overwrite an existing attribute value. Attributes are never invented:
/// a name that is not present is left absent.
pub fn set_attr(attrs: &RefCell<Vec<Attribute>>, name: &str, value: &str) {
    if let Some(attr) = attrs
        .borrow_mut()
        .iter_mut()
        .find(|attr| attr.name.local.as_ref() == name)
    {
        attr.value = StrTendril::from_slice(value);
    }
}

pub fn remove_attr(attrs: &RefCell<Vec<Attribute>>, name: &str) {
    attrs
        .borrow_mut()
        .retain(|attr| attr.name.local.as_ref() != name);
}

pub fn has_class(attrs: &RefCell<Vec<Attribute>>, class: &str) -> bool {
    attr_value(attrs, "class")
        .is_some_and(|value| value.split_ascii_whitespace().any(|c| c == class))
}

#[cfg(test)]
mod tests {
    use super::*;
    use markup5ever::{LocalName, QualName, namespace_url, ns};

    fn attrs_from(pairs: &[(&str, &str)]) -> RefCell<Vec<Attribute>> {
        RefCell::new(
            pairs
                .iter()
                .map(|(name, value)| Attribute {
                    name: QualName::new(None, ns!(), LocalName::from(*name)),
                    value: StrTendril::from_slice(value),
                })
                .collect(),
        )
    }

    fn prefix() -> DeployPrefix {
        DeployPrefix::parse("s3://frontend/deploy").unwrap()
    }

    #[test]
    fn test_asset_expression_joins_prefix() {
        assert_eq!(
            asset_expression("/myPath", &prefix()),
            r#"{{ "s3://frontend/deploy/myPath" | grant_read_access }}"#
        );
    }

    #[test]
    fn test_s3_file_expression_literal_vs_variable() {
        assert_eq!(
            s3_file_expression("s3://hello/world", &prefix()),
            r#"{{ "s3://hello/world" | grant_read_access }}"#
        );
        assert_eq!(
            s3_file_expression("task.input.taskObject", &prefix()),
            "{{ task.input.taskObject | grant_read_access }}"
        );
    }

    #[test]
    fn test_json_var_expression() {
        assert_eq!(
            json_var_expression("task.input.taskObject", &prefix()),
            "{{ task.input.taskObject | to_json | escape }}"
        );
    }

    #[test]
    fn test_is_external_src() {
        assert!(is_external_src("https://cdn.example.com/lib.js"));
        assert!(is_external_src("http://cdn.example.com/lib.js"));
        assert!(!is_external_src("/static/js/main.js"));
        assert!(!is_external_src("static/js/main.js"));
    }

    #[test]
    fn test_attr_value_and_set() {
        let attrs = attrs_from(&[("data-src", "/a"), ("class", "asset")]);
        assert_eq!(attr_value(&attrs, "data-src").as_deref(), Some("/a"));

        set_attr(&attrs, "data-src", "TOKEN");
        assert_eq!(attr_value(&attrs, "data-src").as_deref(), Some("TOKEN"));
    }

    #[test]
    fn test_set_attr_never_invents() {
        let attrs = attrs_from(&[("class", "asset")]);
        set_attr(&attrs, "data-src", "TOKEN");
        assert_eq!(attr_value(&attrs, "data-src"), None);
    }

    #[test]
    fn test_remove_attr() {
        let attrs = attrs_from(&[("data-local", "test"), ("data-src", "/a")]);
        remove_attr(&attrs, "data-local");
        assert_eq!(attr_value(&attrs, "data-local"), None);
        assert_eq!(attr_value(&attrs, "data-src").as_deref(), Some("/a"));
    }

    #[test]
    fn test_has_class_splits_whitespace() {
        let attrs = attrs_from(&[("class", "hidden s3-file wide")]);
        assert!(has_class(&attrs, "s3-file"));
        assert!(!has_class(&attrs, "asset"));
        assert!(!has_class(&attrs, "s3"));
    }
}
