//! The typed template tree consumed by the projector.
//!
//! Trees are produced by an external Slim-style parser and enter the engine
//! through [`crate::sexp`]; the projector only ever reads them. Indent depth
//! is deliberately absent from the model: it is a property of the traversal,
//! threaded through the recursive projection calls.

/// A node of the parsed template tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Transparent container of sibling nodes. Contributes no text itself;
    /// projecting `Multi(s)` is identical to projecting the bare sequence `s`
    /// in the same context.
    Multi(Vec<Node>),
    /// A template-language construct carrying host code.
    Construct(Construct),
    /// A markup element: an elided head plus optional nested content.
    Markup(Markup),
    /// A line break in the template source. Projects to a literal newline,
    /// which keeps generated line numbers in step with template line numbers.
    LineBreak,
    /// A well-formed node of a kind the projector does not recognize.
    ///
    /// Carries the raw kind label so tree dumps show what was skipped.
    /// Projects to no output.
    Foreign(String),
}

/// A template-language construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Construct {
    /// A block of host code embedded verbatim in the template (a `ruby:`
    /// filter). Carries no fragment of its own; its body holds the code
    /// lines with their own internal indentation.
    Embedded { body: Vec<Node> },
    /// An interpolated host expression, or a literal line delivered in
    /// interpolation form.
    Interpolation { code: String, body: Option<Vec<Node>> },
    /// A control-flow statement (`- if`, `- for`, `- else`).
    Control { code: String, body: Option<Vec<Node>> },
    /// An output statement (`= expr`).
    Output { code: String, body: Option<Vec<Node>> },
}

/// A markup element.
///
/// The head is the piece of template syntax that does not survive into the
/// generated text; projection replaces it with placeholder spaces of the
/// same width so later text on the line keeps its source column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    pub head: MarkupHead,
    pub content: Option<Box<Node>>,
}

/// The elided head of a markup element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupHead {
    /// A tag name (`table`, `td`). Pads to the name's character width.
    Tag { name: String },
    /// An attribute list. Pads to one separator space plus the character
    /// widths of every name and value text.
    Attrs {
        attributes: Vec<Attribute>,
        /// Total source width of the list as reported by the parser, when it
        /// can report one. Checked against the computed padding width; a
        /// disagreement aborts the projection rather than emitting a wrong
        /// column count.
        declared_width: Option<usize>,
    },
}

/// One `name=value` pair of an attribute list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: AttrValue,
}

/// An attribute value, keyed by how the parser delivered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Literal source text, quotes excluded per the parser's convention.
    Static(String),
    /// A host-code expression in source form.
    Dynamic(String),
}

impl AttrValue {
    /// The text whose character count stands in for this value in padding.
    pub fn text(&self) -> &str {
        match self {
            AttrValue::Static(text) | AttrValue::Dynamic(text) => text,
        }
    }
}
