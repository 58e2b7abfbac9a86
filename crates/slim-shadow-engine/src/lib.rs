//! Projection of parsed Slim-style templates into column-aligned host source.
//!
//! The engine sits between a template parser and diagnostics tooling:
//!
//! ```text
//! parser sxp (JSON) ──▶ sexp adapter ──▶ Node tree ──▶ Projector ──▶ host source
//! ```
//!
//! Control, output and interpolation fragments appear in the output as
//! literal code. Markup heads are elided and replaced by placeholder spaces
//! of exactly the width the syntax occupied, so text emitted later on the
//! same line keeps its source column; line breaks project one-to-one, so
//! line numbers stay aligned too. Tools that lint or type-check the
//! generated text can map their line/column findings straight back to the
//! template.
//!
//! The transform is pure and synchronous: no I/O, no globals; the only
//! instance state is a memo of indent strings.
//!
//! ```
//! use serde_json::json;
//! use slim_shadow_engine::Projector;
//!
//! let raw = json!(["multi",
//!     ["slim", "control", "if logged_in", ["multi", ["newline"]]],
//!     ["html", "tag", "p", ["html", "attrs"],
//!         ["slim", "output", true, "current_user.name", ["multi", ["newline"]]]]]);
//!
//! let mut projector = Projector::new();
//! let generated = projector.project_sexp(&raw)?;
//! assert_eq!(generated, "if logged_in\n current_user.name\n");
//! # Ok::<(), slim_shadow_engine::ProjectError>(())
//! ```

pub mod projection;
pub mod sexp;
pub mod tree;

pub use projection::{ProjectError, Projector};
pub use sexp::ShapeError;
pub use tree::{AttrValue, Attribute, Construct, Markup, MarkupHead, Node};
