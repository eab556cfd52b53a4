//! Script grammar: `#include` directives and `#`-comment markers

use crate::grammar::marker::{MARKER_TAG, Marker};
use crate::module::IncludeDirective;

const DIRECTIVE: &str = "#include";

/// Extract include directives in source order.
///
/// A directive is a line whose first non-whitespace token is `#include`
/// followed by a module name, bare or double-quoted. Anything else, including
/// a bare `#include` with no name, is left untouched as ordinary content.
pub fn parse_includes(content: &str) -> Vec<IncludeDirective> {
    let mut directives = Vec::new();

    for (idx, line) in content.split('\n').enumerate() {
        let trimmed = line.trim_start();
        if is_marker_line(line) {
            continue;
        }
        let Some(rest) = trimmed.strip_prefix(DIRECTIVE) else {
            continue;
        };
        // `#included_var` is not a directive
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }
        let Some(name) = directive_name(rest.trim()) else {
            continue;
        };
        directives.push(IncludeDirective {
            raw: line.to_string(),
            name,
            line: idx + 1,
        });
    }

    directives
}

fn directive_name(token: &str) -> Option<String> {
    if token.is_empty() {
        return None;
    }
    if let Some(inner) = token.strip_prefix('"') {
        let inner = inner.strip_suffix('"')?;
        if inner.is_empty() {
            return None;
        }
        return Some(inner.to_string());
    }
    // Bare names stop at whitespace; trailing garbage means the line is not
    // a well-formed directive and stays as content.
    if token.contains(char::is_whitespace) {
        return None;
    }
    Some(token.to_string())
}

/// Render a marker as a `#` comment line
pub fn render_marker(marker: &Marker) -> String {
    format!("# {}", marker.render_body())
}

/// Recognize and parse a marker line.
///
/// `None` means the line is ordinary content; `Some(Err(reason))` means the
/// line looks like a marker but does not parse.
pub fn parse_marker_line(line: &str) -> Option<std::result::Result<Marker, String>> {
    let trimmed = line.trim();
    let rest = trimmed.strip_prefix('#')?.trim_start();
    if !rest.starts_with(MARKER_TAG) {
        return None;
    }
    Some(Marker::parse_body(rest))
}

fn is_marker_line(line: &str) -> bool {
    parse_marker_line(line).is_some()
}
