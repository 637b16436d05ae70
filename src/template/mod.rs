//! The template transducer.
//!
//! Pipeline: parse the document, walk it rewriting matched attributes to
//! placeholder tokens, serialize, then substitute each token with its Liquid
//! expression. The token indirection exists because Liquid syntax is not
//! valid attribute text and the serializer would re-escape its quotes.

pub mod rules;
mod token;

use html5ever::parse_document;
use html5ever::serialize::{SerializeOpts, serialize};
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

use crate::error::TemplateError;
use crate::prefix::DeployPrefix;
use crate::{debug, liquid, log};
use rules::{CLASS_RULES, DATA_LOCAL, DATA_SRC};
use token::TokenMap;

/// Rewrite a built document into a worker template.
///
/// The prefix is validated before any scanning; the input is tolerated
/// exactly as the HTML5 parser tolerates it. On success the returned string
/// is the document with matched attributes replaced by Liquid expressions
/// and everything else preserved up to serializer normalization.
pub fn transform(html: &str, deployment_prefix: &str) -> Result<String, TemplateError> {
    let prefix = DeployPrefix::parse(deployment_prefix)?;
    transform_with(html, &prefix)
}

/// `transform` with an already-validated prefix.
pub fn transform_with(html: &str, prefix: &DeployPrefix) -> Result<String, TemplateError> {
    let dom = parse(html)?;

    let mut tokens = TokenMap::new();
    rewrite_node(&dom.document, prefix, &mut tokens)?;

    if tokens.is_empty() {
        log!("template"; "no rewritable references found");
    } else {
        debug!("template"; "staged {} attribute rewrite(s)", tokens.len());
    }

    let staged = serialize_document(&dom)?;
    Ok(tokens.resolve(staged))
}

/// Parse a document leniently (HTML5 tree construction).
pub(crate) fn parse(html: &str) -> Result<RcDom, TemplateError> {
    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(TemplateError::Parse)
}

fn serialize_document(dom: &RcDom) -> Result<String, TemplateError> {
    let mut buf = Vec::new();
    let document: SerializableHandle = dom.document.clone().into();
    serialize(&mut buf, &document, SerializeOpts::default()).map_err(TemplateError::Serialize)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Apply the rewrite rules to one element, then recurse in document order.
///
/// Rules are evaluated independently; each rewritten attribute is staged
/// against the element's serialized form at the time of matching.
fn rewrite_node(
    handle: &Handle,
    prefix: &DeployPrefix,
    tokens: &mut TokenMap,
) -> Result<(), TemplateError> {
    if let NodeData::Element { name, attrs, .. } = &handle.data {
        let tag = name.local.as_ref();

        if tag == "link"
            && let Some(href) = rules::attr_value(attrs, "href")
        {
            let expression = liquid::grant_read_access(&prefix.join(&href), true);
            let token = tokens.stage(handle, expression)?;
            rules::set_attr(attrs, "href", &token);
        }

        // External script sources keep pointing at their origin.
        if tag == "script"
            && let Some(src) = rules::attr_value(attrs, "src")
            && !rules::is_external_src(&src)
        {
            let expression = liquid::grant_read_access(&prefix.join(&src), true);
            let token = tokens.stage(handle, expression)?;
            rules::set_attr(attrs, "src", &token);
        }

        for rule in &CLASS_RULES {
            if !rules::has_class(attrs, rule.class) {
                continue;
            }
            let Some(data_src) = rules::attr_value(attrs, DATA_SRC) else {
                return Err(TemplateError::MalformedInput {
                    tag: tag.to_string(),
                    class: rule.class,
                    attr: DATA_SRC,
                });
            };
            let expression = (rule.expression)(&data_src, prefix);
            let token = tokens.stage(handle, expression)?;
            rules::set_attr(attrs, DATA_SRC, &token);
            if rule.strip_local {
                rules::remove_attr(attrs, DATA_LOCAL);
            }
        }
    }

    for child in handle.children.borrow().iter() {
        rewrite_node(child, prefix, tokens)?;
    }
    Ok(())
}
