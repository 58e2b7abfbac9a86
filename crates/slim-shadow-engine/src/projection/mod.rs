//! Recursive projection of template trees into host source text.
//!
//! The driver walks an ordered node sequence, dispatches each node on its
//! kind and concatenates the pieces. Newlines are never invented: every one
//! in the output comes from a [`Node::LineBreak`] or from projected content,
//! which is what keeps generated line numbers in step with the template.

mod indent;
mod padding;

use crate::sexp::{self, ShapeError};
use crate::tree::{Construct, Markup, Node};
use indent::IndentCache;
use serde_json::Value;
use thiserror::Error;

/// Failure modes of a projection.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// A markup head declared a source width that disagrees with the
    /// computed placeholder width. Emitting the wrong number of spaces would
    /// silently break column alignment, so the projection aborts instead.
    #[error(
        "attribute list `{names}` declares source width {declared} but its padding computes to {computed}"
    )]
    PaddingWidth {
        names: String,
        declared: usize,
        computed: usize,
    },
    /// The raw tree handed over by the parser did not match any recognized
    /// shape.
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Projects parsed template trees into host-language source text.
///
/// Control, output and interpolation fragments appear as literal code; elided
/// markup syntax is replaced by placeholder spaces of the same width, so text
/// emitted later on a source line keeps its original column and downstream
/// diagnostics map back to the template.
///
/// A projector is cheap to construct and holds only the indent memo; output
/// depends on nothing but the arguments. Concurrent callers each construct
/// their own.
#[derive(Debug, Default)]
pub struct Projector {
    indent: IndentCache,
}

impl Projector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapts a raw sxp tree and projects it as a document.
    pub fn project_sexp(&mut self, raw: &Value) -> Result<String, ProjectError> {
        let root = sexp::node_from_value(raw)?;
        self.project_document(&root)
    }

    /// Projects `root` as a whole document: indent 0, root context.
    pub fn project_document(&mut self, root: &Node) -> Result<String, ProjectError> {
        self.project(std::slice::from_ref(root), 0, true)
    }

    /// Projects an ordered sequence of sibling nodes.
    ///
    /// `indent` is the nesting depth of the generated text, two spaces per
    /// level. `is_root` is true only for the document-level sequence and
    /// controls where embedded blocks re-anchor their indentation; it passes
    /// through `Multi` containers untouched, so projecting `[Multi(s)]` and
    /// projecting `s` are interchangeable.
    pub fn project(
        &mut self,
        nodes: &[Node],
        indent: usize,
        is_root: bool,
    ) -> Result<String, ProjectError> {
        let mut out = String::new();
        for node in nodes {
            if let Some(text) = self.dispatch(node, indent, is_root)? {
                out.push_str(&text);
            }
        }
        Ok(out)
    }

    fn dispatch(
        &mut self,
        node: &Node,
        indent: usize,
        is_root: bool,
    ) -> Result<Option<String>, ProjectError> {
        let text = match node {
            Node::Multi(children) => self.project(children, indent, is_root)?,
            Node::Construct(construct) => self.construct(construct, indent, is_root)?,
            Node::Markup(markup) => self.markup(markup, indent)?,
            Node::LineBreak => "\n".to_owned(),
            Node::Foreign(_) => return Ok(None),
        };
        Ok(Some(text))
    }

    fn construct(
        &mut self,
        construct: &Construct,
        indent: usize,
        is_root: bool,
    ) -> Result<String, ProjectError> {
        match construct {
            Construct::Embedded { body } => {
                // An embedded block carries its own internal indentation:
                // flush-left at the document root, one level in when nested.
                let level = if is_root { 0 } else { indent + 1 };
                self.project(body, level, false)
            }
            Construct::Interpolation { code, body }
            | Construct::Control { code, body }
            | Construct::Output { code, body } => {
                let mut out = self.indent.space(indent).to_owned();
                out.push_str(code.trim());
                if let Some(body) = body {
                    out.push_str(&self.project(body, indent + 1, false)?);
                }
                Ok(out)
            }
        }
    }

    fn markup(&mut self, markup: &Markup, indent: usize) -> Result<String, ProjectError> {
        let mut out = self.indent.space(indent).to_owned();
        out.push_str(&padding::placeholder(&markup.head)?);
        match markup.content.as_deref() {
            None => {}
            // An element whose whole body is one inline code expression: the
            // fragment becomes a standalone statement on the padded line.
            Some(Node::Construct(
                Construct::Output { code, body: None }
                | Construct::Interpolation { code, body: None },
            )) => {
                out.push_str(self.indent.space(indent));
                out.push_str(code.trim());
                out.push('\n');
            }
            Some(content) => {
                out.push_str(&self.project(std::slice::from_ref(content), indent, false)?);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{AttrValue, Attribute, MarkupHead};
    use pretty_assertions::assert_eq;

    fn project(nodes: &[Node], indent: usize, is_root: bool) -> String {
        Projector::new().project(nodes, indent, is_root).unwrap()
    }

    fn control(code: &str, body: Vec<Node>) -> Node {
        Node::Construct(Construct::Control {
            code: code.to_owned(),
            body: Some(body),
        })
    }

    fn output(code: &str, body: Option<Vec<Node>>) -> Node {
        Node::Construct(Construct::Output {
            code: code.to_owned(),
            body,
        })
    }

    fn tag(name: &str, content: Option<Node>) -> Node {
        Node::Markup(Markup {
            head: MarkupHead::Tag {
                name: name.to_owned(),
            },
            content: content.map(Box::new),
        })
    }

    #[test]
    fn test_empty_sequence_projects_to_nothing() {
        assert_eq!(project(&[], 3, false), "");
    }

    #[test]
    fn test_multi_is_transparent() {
        let sequence = vec![
            Node::LineBreak,
            control("if x", vec![Node::Multi(vec![Node::LineBreak])]),
        ];
        let wrapped = [Node::Multi(sequence.clone())];
        assert_eq!(project(&wrapped, 1, false), project(&sequence, 1, false));
    }

    #[test]
    fn test_line_breaks_count_one_to_one() {
        let nodes = vec![Node::LineBreak; 5];
        assert_eq!(project(&nodes, 2, false), "\n\n\n\n\n");
    }

    #[test]
    fn test_foreign_nodes_project_to_nothing() {
        let nodes = [
            Node::LineBreak,
            Node::Foreign("html comment".to_owned()),
            Node::LineBreak,
        ];
        assert_eq!(project(&nodes, 0, true), "\n\n");
    }

    #[test]
    fn test_statement_indents_and_trims_its_fragment() {
        let nodes = [Node::Construct(Construct::Control {
            code: "  for item in items  ".to_owned(),
            body: None,
        })];
        assert_eq!(project(&nodes, 2, false), "    for item in items");
    }

    #[test]
    fn test_statement_body_shifts_one_level() {
        let nodes = [control(
            "if x",
            vec![Node::Multi(vec![
                Node::LineBreak,
                output("x.to_s", Some(vec![Node::Multi(vec![Node::LineBreak])])),
            ])],
        )];
        assert_eq!(project(&nodes, 0, true), "if x\n  x.to_s\n");
    }

    #[test]
    fn test_embedded_at_root_projects_flush_left() {
        let embedded = Node::Construct(Construct::Embedded {
            body: vec![Node::Multi(vec![
                Node::LineBreak,
                Node::Construct(Construct::Interpolation {
                    code: "greeting = 'hi'".to_owned(),
                    body: None,
                }),
            ])],
        });
        assert_eq!(
            project(std::slice::from_ref(&embedded), 2, true),
            "\ngreeting = 'hi'"
        );
    }

    #[test]
    fn test_embedded_nested_shifts_one_level() {
        let embedded = Node::Construct(Construct::Embedded {
            body: vec![Node::Multi(vec![Node::Construct(
                Construct::Interpolation {
                    code: "greeting = 'hi'".to_owned(),
                    body: None,
                },
            )])],
        });
        assert_eq!(
            project(std::slice::from_ref(&embedded), 2, false),
            "      greeting = 'hi'"
        );
    }

    #[test]
    fn test_markup_without_content_is_padding_only() {
        let nodes = [tag("table", None)];
        assert_eq!(project(&nodes, 1, false), "       ");
    }

    #[test]
    fn test_inline_expression_lands_on_the_padded_line() {
        let nodes = [tag("td", Some(output(" item.name ", None)))];
        // 4 ambient + 2 tag, then the inline statement's own 4.
        assert_eq!(project(&nodes, 2, false), "          item.name\n");
    }

    #[test]
    fn test_inline_expression_with_line_break_body_matches_collapsed_form() {
        let collapsed = [tag("td", Some(output("item.name", None)))];
        let with_break = [tag(
            "td",
            Some(output(
                "item.name",
                Some(vec![Node::Multi(vec![Node::LineBreak])]),
            )),
        )];
        assert_eq!(project(&collapsed, 2, false), project(&with_break, 2, false));
    }

    #[test]
    fn test_markup_content_projects_at_the_same_level() {
        let nodes = [tag(
            "table",
            Some(Node::Multi(vec![
                Node::LineBreak,
                control("for row in rows", vec![Node::Multi(vec![Node::LineBreak])]),
            ])),
        )];
        assert_eq!(project(&nodes, 1, false), "       \n  for row in rows\n");
    }

    #[test]
    fn test_projection_is_deterministic_across_calls() {
        let nodes = [control(
            "if x",
            vec![Node::Multi(vec![Node::LineBreak, tag("p", None)])],
        )];
        let mut projector = Projector::new();
        let first = projector.project(&nodes, 0, true).unwrap();
        let second = projector.project(&nodes, 0, true).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, Projector::new().project(&nodes, 0, true).unwrap());
    }

    #[test]
    fn test_padding_mismatch_aborts_the_whole_projection() {
        let attrs = Node::Markup(Markup {
            head: MarkupHead::Attrs {
                attributes: vec![Attribute {
                    name: "id".to_owned(),
                    value: AttrValue::Dynamic("items".to_owned()),
                }],
                declared_width: Some(3),
            },
            content: None,
        });
        let nodes = [control("if x", vec![Node::Multi(vec![Node::LineBreak, attrs])])];
        let err = Projector::new().project(&nodes, 0, true).unwrap_err();
        assert!(matches!(
            err,
            ProjectError::PaddingWidth { declared: 3, computed: 8, .. }
        ));
    }
}
