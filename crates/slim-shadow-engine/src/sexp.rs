//! Boundary between the parser's raw s-expressions and the typed tree.
//!
//! The Slim-style parser hands its output over as nested positional arrays
//! (sxp), carried here as [`serde_json::Value`]: a keyword string in the head
//! position, then payload fields at fixed indexes. This module converts that
//! loosely-typed form into [`Node`] once, at the edge, so the projector never
//! indexes raw arrays.
//!
//! Recognized shapes, with the positions actually read:
//!
//! - `["multi", n...]`: container; entries that are not lists are ignored
//! - `["newline"]`
//! - `["slim", "embedded", name, body]`: body at 3, required
//! - `["slim", "interpolate", code, body?]`: code at 2
//! - `["slim", "control", code, body?]`: code at 2
//! - `["slim", "output", escape, code, body?]`: the escape flag at 2 is
//!   skipped; the code string sits at 3
//! - `["html", "tag", name, attrs, content?]`: the attrs slot at 3 plays no
//!   part in projection; content at 4 is taken when it is a list
//! - `["html", "attrs", attr...]`: each entry `["html", "attr", name, value]`
//!
//! Attribute values come in three forms: `["static", text]` (text at 1),
//! `["escape", esc, ["slim", "interpolate", text]]` (a quoted source value;
//! the text is the source minus its quotes) and
//! `["slim", "attrvalue", escape, code]` (code at 3).
//!
//! Anything else that is still a well-formed keyword-led list adapts to
//! [`Node::Foreign`] and projects to nothing. A recognized kind with a
//! missing or malformed required field is a [`ShapeError`]: computing a
//! placeholder from a half-read node would silently break column alignment,
//! so adaptation fails fast instead.

use crate::tree::{AttrValue, Attribute, Construct, Markup, MarkupHead, Node};
use serde_json::Value;
use thiserror::Error;

/// A raw node whose kind is recognized but whose required fields are absent
/// or malformed.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("expected a list node, got {got}")]
    NotAList { got: String },
    #[error("`{kind}` node is missing its {what} at position {index}: {node}")]
    MissingField {
        kind: &'static str,
        what: &'static str,
        index: usize,
        node: String,
    },
    #[error("`{kind}` node's {what} at position {index} has the wrong shape: {node}")]
    MalformedField {
        kind: &'static str,
        what: &'static str,
        index: usize,
        node: String,
    },
    #[error("attribute list entry {index} is not an `html attr` node: {node}")]
    MalformedAttrEntry { index: usize, node: String },
    #[error("attribute `{name}` carries no value in a recognized form: {node}")]
    UnrecognizedAttrValue { name: String, node: String },
}

/// Adapts a raw sxp tree into a [`Node`].
pub fn node_from_value(value: &Value) -> Result<Node, ShapeError> {
    let Some(items) = value.as_array() else {
        return Err(ShapeError::NotAList {
            got: summarize(value),
        });
    };
    let Some(keyword) = items.first().and_then(Value::as_str) else {
        // A list led by anything but a keyword matches no known kind.
        return Ok(Node::Foreign(summarize(value)));
    };
    match keyword {
        "multi" => {
            let children = items[1..]
                .iter()
                .filter(|entry| entry.is_array())
                .map(node_from_value)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Node::Multi(children))
        }
        "newline" => Ok(Node::LineBreak),
        "slim" => adapt_slim(items, value),
        "html" => adapt_html(items, value),
        other => Ok(Node::Foreign(other.to_owned())),
    }
}

fn adapt_slim(items: &[Value], raw: &Value) -> Result<Node, ShapeError> {
    let Some(subtype) = items.get(1).and_then(Value::as_str) else {
        return Ok(Node::Foreign("slim".to_owned()));
    };
    let construct = match subtype {
        "embedded" => {
            // The filter name at 2 plays no part in projection.
            let body = match items.get(3) {
                None => {
                    return Err(ShapeError::MissingField {
                        kind: "slim embedded",
                        what: "body",
                        index: 3,
                        node: summarize(raw),
                    });
                }
                Some(body) if !body.is_array() => {
                    return Err(ShapeError::MalformedField {
                        kind: "slim embedded",
                        what: "body",
                        index: 3,
                        node: summarize(raw),
                    });
                }
                Some(body) => vec![node_from_value(body)?],
            };
            Construct::Embedded { body }
        }
        "interpolate" => Construct::Interpolation {
            code: require_str(items, 2, "slim interpolate", "code fragment", raw)?,
            body: optional_body(items, 3)?,
        },
        "control" => Construct::Control {
            code: require_str(items, 2, "slim control", "code fragment", raw)?,
            body: optional_body(items, 3)?,
        },
        "output" => Construct::Output {
            code: require_str(items, 3, "slim output", "code fragment", raw)?,
            body: optional_body(items, 4)?,
        },
        other => return Ok(Node::Foreign(format!("slim {other}"))),
    };
    Ok(Node::Construct(construct))
}

fn adapt_html(items: &[Value], raw: &Value) -> Result<Node, ShapeError> {
    let Some(subtype) = items.get(1).and_then(Value::as_str) else {
        return Ok(Node::Foreign("html".to_owned()));
    };
    match subtype {
        "tag" => {
            let name = require_str(items, 2, "html tag", "tag name", raw)?;
            // The attribute list at 3 stays in the generated line's shadow:
            // only the head kind contributes padding.
            let content = match items.get(4) {
                Some(slot) if slot.is_array() => Some(Box::new(markup_content(slot)?)),
                _ => None,
            };
            Ok(Node::Markup(Markup {
                head: MarkupHead::Tag { name },
                content,
            }))
        }
        "attrs" => {
            let attributes = items[2..]
                .iter()
                .enumerate()
                .map(|(index, entry)| adapt_attribute(entry, index))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Node::Markup(Markup {
                head: MarkupHead::Attrs {
                    attributes,
                    declared_width: None,
                },
                content: None,
            }))
        }
        other => Ok(Node::Foreign(format!("html {other}"))),
    }
}

/// A markup element's content slot.
///
/// Text wrappers are unwrapped only here: `["slim", "text", kind, wrapped]`
/// in content position stands for its wrapped lines, while the same node in
/// sibling position stays foreign.
fn markup_content(slot: &Value) -> Result<Node, ShapeError> {
    if let Some(items) = slot.as_array() {
        let head = items.first().and_then(Value::as_str);
        let sub = items.get(1).and_then(Value::as_str);
        if let (Some("slim"), Some("text")) = (head, sub) {
            let wrapped = items[2..]
                .iter()
                .filter(|entry| entry.is_array())
                .map(node_from_value)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Node::Multi(wrapped));
        }
    }
    node_from_value(slot)
}

fn adapt_attribute(entry: &Value, index: usize) -> Result<Attribute, ShapeError> {
    let malformed = || ShapeError::MalformedAttrEntry {
        index,
        node: summarize(entry),
    };
    let items = entry.as_array().ok_or_else(malformed)?;
    let head = items.first().and_then(Value::as_str);
    let sub = items.get(1).and_then(Value::as_str);
    if (head, sub) != (Some("html"), Some("attr")) {
        return Err(malformed());
    }
    let name = items
        .get(2)
        .and_then(Value::as_str)
        .ok_or_else(|| ShapeError::MalformedField {
            kind: "html attr",
            what: "attribute name",
            index: 2,
            node: summarize(entry),
        })?;
    let value = items.get(3).ok_or_else(|| ShapeError::MissingField {
        kind: "html attr",
        what: "value",
        index: 3,
        node: summarize(entry),
    })?;
    Ok(Attribute {
        name: name.to_owned(),
        value: adapt_attr_value(value, name)?,
    })
}

fn adapt_attr_value(value: &Value, name: &str) -> Result<AttrValue, ShapeError> {
    let unrecognized = || ShapeError::UnrecognizedAttrValue {
        name: name.to_owned(),
        node: summarize(value),
    };
    let items = value.as_array().ok_or_else(unrecognized)?;
    let keyword = items
        .first()
        .and_then(Value::as_str)
        .ok_or_else(unrecognized)?;
    match keyword {
        "static" => items
            .get(1)
            .and_then(Value::as_str)
            .map(|text| AttrValue::Static(text.to_owned()))
            .ok_or_else(unrecognized),
        "escape" => {
            let inner = items.get(2).and_then(Value::as_array).ok_or_else(unrecognized)?;
            let head = inner.first().and_then(Value::as_str);
            let sub = inner.get(1).and_then(Value::as_str);
            let text = inner.get(2).and_then(Value::as_str);
            match (head, sub, text) {
                (Some("slim"), Some("interpolate"), Some(text)) => {
                    Ok(AttrValue::Static(text.to_owned()))
                }
                _ => Err(unrecognized()),
            }
        }
        "slim" => {
            let sub = items.get(1).and_then(Value::as_str);
            let code = items.get(3).and_then(Value::as_str);
            match (sub, code) {
                (Some("attrvalue"), Some(code)) => Ok(AttrValue::Dynamic(code.to_owned())),
                _ => Err(unrecognized()),
            }
        }
        _ => Err(unrecognized()),
    }
}

fn require_str(
    items: &[Value],
    index: usize,
    kind: &'static str,
    what: &'static str,
    raw: &Value,
) -> Result<String, ShapeError> {
    match items.get(index) {
        None => Err(ShapeError::MissingField {
            kind,
            what,
            index,
            node: summarize(raw),
        }),
        Some(value) => value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| ShapeError::MalformedField {
                kind,
                what,
                index,
                node: summarize(raw),
            }),
    }
}

fn optional_body(items: &[Value], index: usize) -> Result<Option<Vec<Node>>, ShapeError> {
    match items.get(index) {
        Some(body) => Ok(Some(vec![node_from_value(body)?])),
        None => Ok(None),
    }
}

/// Compact rendering of a raw value for error messages.
fn summarize(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() <= 60 {
        text
    } else {
        let mut truncated: String = text.chars().take(59).collect();
        truncated.push('…');
        truncated
    }
}
