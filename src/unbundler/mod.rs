//! Unbundling: split a combined document back into per-module contents
//!
//! The input is whatever the runtime returned, which may be a mutated or
//! truncated version of what was sent. Failure is soft, never fatal: when
//! markers are absent, unbalanced, out of order, or reference unknown module
//! identifiers, the whole input is kept as one unsplit module and the
//! degradation is reported for the caller to log. Content before the first
//! marker, or beyond the root module's recorded extent, is attached to
//! synthetic leading/trailing segments rather than dropped.
//!
//! Declared `line`/`span` marker fields are deliberately not validated here;
//! runtimes return edited documents and spans shift with edits. Structure is
//! judged by marker balance and identifier matching alone.

use std::collections::{BTreeMap, HashSet};

use crate::error::SpoolError;
use crate::grammar::{Grammar, MarkerRole};

/// Key for the whole input when it cannot be split
pub const UNSPLIT_KEY: &str = "__unsplit__";

/// Key for content found before the first marker
pub const LEADING_KEY: &str = "__leading__";

/// Key for content found beyond the root module's recorded extent
pub const TRAILING_KEY: &str = "__trailing__";

/// Result of an unbundle call: module contents keyed by original relative
/// path, plus the degradation condition when the document could not be split
#[derive(Debug)]
pub struct UnbundleOutcome {
    pub modules: BTreeMap<String, String>,
    /// Recoverable `MalformedBundle`; callers log it and continue
    pub degraded: Option<SpoolError>,
}

impl UnbundleOutcome {
    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }

    /// Synthetic segments present in the outcome, in document order
    pub fn synthetic_keys(&self) -> Vec<&'static str> {
        [UNSPLIT_KEY, LEADING_KEY, TRAILING_KEY]
            .into_iter()
            .filter(|k| self.modules.contains_key(*k))
            .collect()
    }
}

/// Split a combined document back into the original per-module contents.
///
/// Never fails hard; see the module docs for the degradation policy.
pub fn unbundle(content: &str, grammar: &Grammar) -> UnbundleOutcome {
    match try_unbundle(content, grammar) {
        Ok(modules) => UnbundleOutcome {
            modules,
            degraded: None,
        },
        Err(reason) => {
            let mut modules = BTreeMap::new();
            modules.insert(UNSPLIT_KEY.to_string(), content.to_string());
            UnbundleOutcome {
                modules,
                degraded: Some(SpoolError::MalformedBundle { reason }),
            }
        }
    }
}

struct Frame {
    id: String,
    path: String,
    lines: Vec<String>,
}

fn try_unbundle(
    content: &str,
    grammar: &Grammar,
) -> std::result::Result<BTreeMap<String, String>, String> {
    let mut modules = BTreeMap::new();
    let mut leading: Vec<String> = Vec::new();
    let mut trailing: Vec<String> = Vec::new();
    let mut frames: Vec<Frame> = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut root_extent = 0usize;

    for (idx, line) in content.split('\n').enumerate() {
        let line_no = idx + 1;

        // Beyond the root's recorded extent everything is runtime output
        if frames.len() == 1 && frames[0].lines.len() >= root_extent {
            trailing.push(line.to_string());
            continue;
        }

        let marker = match grammar.parse_marker_line(line) {
            None => {
                match frames.last_mut() {
                    Some(frame) => frame.lines.push(line.to_string()),
                    None => leading.push(line.to_string()),
                }
                continue;
            }
            Some(Err(reason)) => {
                return Err(format!("line {}: {}", line_no, reason));
            }
            Some(Ok(marker)) => marker,
        };

        match marker.role {
            MarkerRole::Root => {
                if !frames.is_empty() {
                    return Err(format!("line {}: unexpected second root marker", line_no));
                }
                let path = marker.path.ok_or("root marker missing path")?;
                root_extent = marker.lines.ok_or("root marker missing lines")?;
                seen_ids.insert(marker.id.clone());
                frames.push(Frame {
                    id: marker.id,
                    path,
                    lines: Vec::new(),
                });
            }
            MarkerRole::Begin => {
                let Some(parent) = frames.last_mut() else {
                    return Err(format!(
                        "line {}: module block before the root marker",
                        line_no
                    ));
                };
                if !seen_ids.insert(marker.id.clone()) {
                    return Err(format!(
                        "line {}: duplicate block for module '{}'",
                        line_no, marker.id
                    ));
                }
                let path = marker.path.ok_or("begin marker missing path")?;
                let raw = marker.raw.ok_or("begin marker missing raw")?;
                // The block stands for the original directive line
                parent.lines.push(raw);
                frames.push(Frame {
                    id: marker.id,
                    path,
                    lines: Vec::new(),
                });
            }
            MarkerRole::End => {
                if frames.len() < 2 {
                    return Err(format!("line {}: end marker without open block", line_no));
                }
                let frame = match frames.pop() {
                    Some(frame) => frame,
                    None => return Err(format!("line {}: end marker without open block", line_no)),
                };
                if frame.id != marker.id {
                    return Err(format!(
                        "line {}: end marker for '{}' closes block '{}'",
                        line_no, marker.id, frame.id
                    ));
                }
                if modules.contains_key(&frame.path) {
                    return Err(format!(
                        "line {}: module path '{}' reconstructed twice",
                        line_no, frame.path
                    ));
                }
                modules.insert(frame.path, frame.lines.join("\n"));
            }
            MarkerRole::Ref => {
                let Some(parent) = frames.last_mut() else {
                    return Err(format!(
                        "line {}: back-reference before the root marker",
                        line_no
                    ));
                };
                if !seen_ids.contains(&marker.id) {
                    return Err(format!(
                        "line {}: back-reference to unknown module '{}'",
                        line_no, marker.id
                    ));
                }
                let raw = marker.raw.ok_or("ref marker missing raw")?;
                parent.lines.push(raw);
            }
        }
    }

    if frames.is_empty() {
        return Err("no boundary markers".to_string());
    }
    if frames.len() > 1 {
        let open = &frames[frames.len() - 1];
        return Err(format!(
            "unclosed module block '{}' at end of document",
            open.id
        ));
    }

    let root = match frames.pop() {
        Some(frame) => frame,
        None => return Err("no boundary markers".to_string()),
    };
    if modules.contains_key(&root.path) {
        return Err(format!(
            "module path '{}' reconstructed twice",
            root.path
        ));
    }
    modules.insert(root.path, root.lines.join("\n"));

    if !leading.is_empty() {
        modules.insert(LEADING_KEY.to_string(), leading.join("\n"));
    }
    if !trailing.is_empty() {
        modules.insert(TRAILING_KEY.to_string(), trailing.join("\n"));
    }

    Ok(modules)
}
