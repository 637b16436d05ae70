//! Static scan of declared runtime inputs.
//!
//! At runtime the frontend discovers its inputs from hidden elements carrying
//! the classes `asset`, `s3-file`, and `json-var` and the `data-name` /
//! `data-src` / `data-local` attributes. This module extracts the same
//! declarations from the source document at build time, as a serializable
//! manifest; the attribute vocabulary here must stay in lockstep with that
//! runtime reader.

use markup5ever_rcdom::{Handle, NodeData};
use serde::Serialize;

use crate::error::TemplateError;
use crate::template;
use crate::template::rules::{self, DATA_LOCAL, DATA_NAME, DATA_SRC};

/// Declaration kinds, named after their class markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputKind {
    #[serde(rename = "asset")]
    Asset,
    #[serde(rename = "s3-file")]
    S3File,
    #[serde(rename = "json-var")]
    JsonVar,
}

impl InputKind {
    pub const ALL: [InputKind; 3] = [InputKind::Asset, InputKind::S3File, InputKind::JsonVar];

    pub const fn as_class(self) -> &'static str {
        match self {
            InputKind::Asset => "asset",
            InputKind::S3File => "s3-file",
            InputKind::JsonVar => "json-var",
        }
    }
}

/// One declared runtime input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputDecl {
    pub name: String,
    pub kind: InputKind,
    pub src: String,
    /// Local-development override, if declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
}

/// Collect all declared runtime inputs from a source document, in document
/// order. Mirrors the runtime reader's fail-fast contract: a declaration
/// missing `data-name` or `data-src` is malformed.
pub fn scan(html: &str) -> Result<Vec<InputDecl>, TemplateError> {
    let dom = template::parse(html)?;
    let mut declarations = Vec::new();
    collect(&dom.document, &mut declarations)?;
    Ok(declarations)
}

fn collect(handle: &Handle, out: &mut Vec<InputDecl>) -> Result<(), TemplateError> {
    if let NodeData::Element { name, attrs, .. } = &handle.data {
        let tag = name.local.as_ref();
        for kind in InputKind::ALL {
            if !rules::has_class(attrs, kind.as_class()) {
                continue;
            }
            let required = |attr: &'static str| {
                rules::attr_value(attrs, attr).ok_or_else(|| TemplateError::MalformedInput {
                    tag: tag.to_string(),
                    class: kind.as_class(),
                    attr,
                })
            };
            out.push(InputDecl {
                name: required(DATA_NAME)?,
                kind,
                src: required(DATA_SRC)?,
                local: rules::attr_value(attrs, DATA_LOCAL),
            });
        }
    }

    for child in handle.children.borrow().iter() {
        collect(child, out)?;
    }
    Ok(())
}
