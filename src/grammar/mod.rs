//! Include-directive and boundary-marker grammars
//!
//! Two grammars share one contract: extract include directives from content,
//! and render/recognize boundary-marker comment lines. The script grammar
//! uses `#include` directives with `#` comments; the markup grammar uses
//! self-closing `<Include src="..."/>` elements with `<!-- -->` comments.

pub mod marker;
pub mod markup;
pub mod script;

pub use marker::{Marker, MarkerRole};

use crate::module::IncludeDirective;

/// Which directive/marker syntax a grammar speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarKind {
    Script,
    Markup,
}

/// A directive grammar plus the file extension its modules use
#[derive(Debug, Clone)]
pub struct Grammar {
    pub kind: GrammarKind,
    pub extension: String,
}

impl Grammar {
    /// Script grammar with the default `script` extension
    pub fn script() -> Self {
        Grammar {
            kind: GrammarKind::Script,
            extension: "script".to_string(),
        }
    }

    /// Markup grammar with the default `ui` extension
    pub fn markup() -> Self {
        Grammar {
            kind: GrammarKind::Markup,
            extension: "ui".to_string(),
        }
    }

    pub fn with_extension(kind: GrammarKind, extension: impl Into<String>) -> Self {
        Grammar {
            kind,
            extension: extension.into(),
        }
    }

    /// Extract include directives from content, in source order.
    ///
    /// Unrecognized or malformed directive syntax is left untouched in the
    /// content; it is not a directive and not an error.
    pub fn parse_includes(&self, content: &str) -> Vec<IncludeDirective> {
        match self.kind {
            GrammarKind::Script => script::parse_includes(content),
            GrammarKind::Markup => markup::parse_includes(content),
        }
    }

    /// File-name candidates for a module name, tried in order: the name
    /// verbatim, then the name with the grammar's extension appended.
    pub fn candidates(&self, name: &str) -> Vec<String> {
        let suffix = format!(".{}", self.extension);
        if name.ends_with(suffix.as_str()) {
            vec![name.to_string()]
        } else {
            vec![name.to_string(), format!("{}{}", name, suffix)]
        }
    }

    /// Render a marker as a comment line in this grammar
    pub fn render_marker(&self, marker: &Marker) -> String {
        match self.kind {
            GrammarKind::Script => script::render_marker(marker),
            GrammarKind::Markup => markup::render_marker(marker),
        }
    }

    /// Recognize and parse a marker line.
    ///
    /// `None`: ordinary content. `Some(Err(reason))`: a marker-looking line
    /// that does not parse; documents containing one are malformed.
    pub fn parse_marker_line(
        &self,
        line: &str,
    ) -> Option<std::result::Result<Marker, String>> {
        match self.kind {
            GrammarKind::Script => script::parse_marker_line(line),
            GrammarKind::Markup => markup::parse_marker_line(line),
        }
    }
}
