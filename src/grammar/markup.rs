//! Markup grammar: `<Include src="..."/>` elements and comment markers
//!
//! Directives and markers are recognized line-wise: a directive is a
//! self-closing `Include` element alone on its line. Reconstructed documents
//! keep element and attribute structure exactly; only the directive line's
//! surrounding whitespace may be renormalized, and the directive itself is
//! reproduced verbatim from the recorded raw line.

use crate::grammar::marker::{MARKER_TAG, Marker};
use crate::module::IncludeDirective;

const ELEMENT_OPEN: &str = "<Include";

/// Extract include directives in source order
pub fn parse_includes(content: &str) -> Vec<IncludeDirective> {
    let mut directives = Vec::new();

    for (idx, line) in content.split('\n').enumerate() {
        let Some(name) = directive_src(line) else {
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

/// The `src` attribute of a whole-line self-closing `Include` element,
/// or `None` when the line is ordinary markup.
fn directive_src(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let rest = trimmed.strip_prefix(ELEMENT_OPEN)?;
    // Require a token boundary so `<Includes>` is not a directive
    if !rest.starts_with(char::is_whitespace) && !rest.starts_with('/') {
        return None;
    }
    let inner = rest.strip_suffix("/>")?;

    let mut attrs = inner.trim();
    let mut src = None;
    while !attrs.is_empty() {
        let (key, value, tail) = take_attribute(attrs)?;
        if key == "src" {
            // Duplicate src makes the element malformed, so it is content
            if src.is_some() {
                return None;
            }
            src = Some(value);
        }
        attrs = tail.trim_start();
    }

    src.filter(|s| !s.is_empty())
}

/// Parse one `name="value"` (or single-quoted) attribute
fn take_attribute(input: &str) -> Option<(&str, String, &str)> {
    let eq = input.find('=')?;
    let key = input[..eq].trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    let rest = input[eq + 1..].trim_start();
    let quote = rest.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let body = &rest[1..];
    let end = body.find(quote)?;
    Some((key, body[..end].to_string(), &body[end + 1..]))
}

/// Render a marker as a markup comment line
pub fn render_marker(marker: &Marker) -> String {
    format!("<!-- {} -->", marker.render_body())
}

/// Recognize and parse a marker line.
///
/// `None` means ordinary content; `Some(Err(reason))` means the line looks
/// like a marker but does not parse.
pub fn parse_marker_line(line: &str) -> Option<std::result::Result<Marker, String>> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix("<!--")?.strip_suffix("-->")?.trim();
    if !inner.starts_with(MARKER_TAG) {
        return None;
    }
    Some(Marker::parse_body(inner))
}
