//! Bundling: flatten an include graph into one combined document
//!
//! Emission inlines each directive in place: the directive line is replaced,
//! at its original position, by the resolved module's content wrapped in a
//! boundary-marker pair, recursively, so execution order in the combined
//! document matches the source's textual include order. A module referenced
//! from more than one place is inlined once, at its first-encountered
//! inclusion point; later references become back-reference markers with no
//! content, so top-level side effects are not duplicated.

pub mod sourcemap;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{Result, SpoolError};
use crate::grammar::{Grammar, Marker};
use crate::resolver::Resolver;
use crate::resolver::graph::{DependencyGraph, GraphNode, build_graph};

/// One inlined block's manifest data, recorded while emitting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedBlock {
    pub id: String,
    pub path: String,
    /// First content line of the block within the combined document, 1-based
    pub line: usize,
    /// Content line count within the combined document, markers excluded
    pub span: usize,
}

/// The flattened text plus its manifest, as embedded in the text itself
#[derive(Debug)]
pub struct CombinedDocument {
    pub text: String,
    /// Workspace-relative path of the root module
    pub root_path: String,
    /// Inlined blocks in document order; empty for single-module bundles
    pub blocks: Vec<EmittedBlock>,
    /// Modules inlined, the root included
    pub module_count: usize,
}

/// Bundle the root module and everything reachable from it.
///
/// Fails with `UnresolvedIncludeError` or `CyclicIncludeError`; a root with
/// zero include directives bundles to its own content unchanged.
pub fn bundle(
    root_path: &Path,
    resolver: &mut Resolver,
    grammar: &Grammar,
    workspace_root: &Path,
) -> Result<CombinedDocument> {
    let graph = build_graph(root_path, resolver, grammar, workspace_root)?;
    let root_node = graph
        .node(&graph.root)
        .ok_or_else(|| SpoolError::IoError {
            message: format!("root module missing from graph: {}", root_path.display()),
        })?;

    if root_node.deps.is_empty() {
        return Ok(CombinedDocument {
            text: root_node.module.content.clone(),
            root_path: root_node.module.rel_path.clone(),
            blocks: Vec::new(),
            module_count: 1,
        });
    }

    let mut emitter = Emitter {
        graph: &graph,
        grammar,
        out: Vec::new(),
        blocks: Vec::new(),
        inlined: HashSet::new(),
    };

    let root_lines = root_node.module.content.split('\n').count();
    emitter.out.push(grammar.render_marker(&Marker::root(
        &root_node.module.id,
        &root_node.module.rel_path,
        root_lines,
    )));
    emitter.emit(root_node)?;

    let mut blocks = emitter.blocks;
    blocks.sort_by_key(|b| b.line);

    Ok(CombinedDocument {
        text: emitter.out.join("\n"),
        root_path: root_node.module.rel_path.clone(),
        blocks,
        module_count: graph.len(),
    })
}

struct Emitter<'a> {
    graph: &'a DependencyGraph,
    grammar: &'a Grammar,
    out: Vec<String>,
    blocks: Vec<EmittedBlock>,
    inlined: HashSet<PathBuf>,
}

impl Emitter<'_> {
    fn emit(&mut self, node: &GraphNode) -> Result<()> {
        self.inlined.insert(node.module.path.clone());

        let mut deps = node.deps.iter().peekable();
        for (idx, line) in node.module.content.split('\n').enumerate() {
            let line_no = idx + 1;
            let is_directive = deps
                .peek()
                .is_some_and(|dep| dep.directive.line == line_no);
            if !is_directive {
                self.out.push(line.to_string());
                continue;
            }
            let dep = deps.next().ok_or_else(|| SpoolError::IoError {
                message: "directive iterator out of sync".to_string(),
            })?;
            let target = self.graph.node(&dep.path).ok_or_else(|| SpoolError::IoError {
                message: format!("unresolved graph node: {}", dep.path.display()),
            })?;

            if self.inlined.contains(&target.module.path) {
                self.out.push(self.grammar.render_marker(&Marker::back_ref(
                    &target.module.id,
                    &dep.directive.raw,
                )));
                continue;
            }

            // Begin marker is backpatched once the block's extent is known
            let marker_idx = self.out.len();
            self.out.push(String::new());
            let content_start = self.out.len() + 1;

            self.emit(target)?;

            let span = self.out.len() + 1 - content_start;
            self.out[marker_idx] = self.grammar.render_marker(&Marker::begin(
                &target.module.id,
                &target.module.rel_path,
                &dep.directive.raw,
                content_start,
                span,
            ));
            self.out
                .push(self.grammar.render_marker(&Marker::end(&target.module.id)));
            self.blocks.push(EmittedBlock {
                id: target.module.id.clone(),
                path: target.module.rel_path.clone(),
                line: content_start,
                span,
            });
        }

        Ok(())
    }
}
