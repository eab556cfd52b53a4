//! Dependency graph construction over include directives
//!
//! Depth-first walk from a root module, resolving each directive and
//! visiting every module exactly once, keyed by absolute path. Cycle
//! detection uses three-color marking (unvisited / in-progress / done); an
//! edge back to an in-progress module fails with the full cycle chain in
//! visitation order. The post-order visit sequence is the flattening order:
//! a module's dependencies always order before the module itself, ties
//! broken by first-encountered order during the walk, so the same input
//! graph always yields the same order.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, SpoolError};
use crate::grammar::Grammar;
use crate::module::{IncludeDirective, Module};
use crate::resolver::Resolver;

/// An include directive matched to its resolved file
#[derive(Debug, Clone)]
pub struct ResolvedInclude {
    pub directive: IncludeDirective,
    pub path: PathBuf,
}

/// One module in the graph with its outgoing edges
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub module: Module,
    pub deps: Vec<ResolvedInclude>,
}

/// Directed acyclic graph of the modules reachable from one root
#[derive(Debug)]
pub struct DependencyGraph {
    pub root: PathBuf,
    nodes: HashMap<PathBuf, GraphNode>,
    order: Vec<PathBuf>,
}

impl DependencyGraph {
    pub fn node(&self, path: &Path) -> Option<&GraphNode> {
        self.nodes.get(path)
    }

    /// Post-order flattening order: dependencies before dependents
    pub fn flatten_order(&self) -> &[PathBuf] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Build the dependency graph reachable from `root_path`.
///
/// Fails with `UnresolvedInclude` when a directive names a module absent
/// from every search root, or `CyclicInclude` when the include relation has
/// a cycle.
pub fn build_graph(
    root_path: &Path,
    resolver: &mut Resolver,
    grammar: &Grammar,
    workspace_root: &Path,
) -> Result<DependencyGraph> {
    let mut walker = Walker {
        resolver,
        grammar,
        workspace_root,
        colors: HashMap::new(),
        stack: Vec::new(),
        ids: HashMap::new(),
        nodes: HashMap::new(),
        order: Vec::new(),
    };

    walker.visit(root_path)?;

    Ok(DependencyGraph {
        root: root_path.to_path_buf(),
        nodes: walker.nodes,
        order: walker.order,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    InProgress,
    Done,
}

struct Walker<'a, 'b> {
    resolver: &'a mut Resolver<'b>,
    grammar: &'a Grammar,
    workspace_root: &'a Path,
    colors: HashMap<PathBuf, Color>,
    /// Relative paths of the in-progress chain, for cycle reporting
    stack: Vec<String>,
    /// Assigned identifiers, for uniqueness within this operation
    ids: HashMap<String, PathBuf>,
    nodes: HashMap<PathBuf, GraphNode>,
    order: Vec<PathBuf>,
}

impl Walker<'_, '_> {
    fn visit(&mut self, path: &Path) -> Result<()> {
        let rel = relative_display(path, self.workspace_root);
        self.colors.insert(path.to_path_buf(), Color::InProgress);
        self.stack.push(rel.clone());

        let content = self.resolver.source().read(path)?;
        let includes = self.grammar.parse_includes(&content);

        let mut deps = Vec::with_capacity(includes.len());
        for directive in &includes {
            let resolved = self.resolve_directive(directive)?;
            match self.colors.get(&resolved) {
                Some(Color::InProgress) => {
                    return Err(self.cycle_error(&resolved));
                }
                Some(Color::Done) => {}
                None => self.visit(&resolved)?,
            }
            deps.push(ResolvedInclude {
                directive: directive.clone(),
                path: resolved,
            });
        }

        self.stack.pop();
        self.colors.insert(path.to_path_buf(), Color::Done);

        let id = self.assign_id(&rel, path);
        self.nodes.insert(
            path.to_path_buf(),
            GraphNode {
                module: Module {
                    id,
                    path: path.to_path_buf(),
                    rel_path: rel,
                    content,
                    includes,
                },
                deps,
            },
        );
        self.order.push(path.to_path_buf());

        Ok(())
    }

    fn resolve_directive(&mut self, directive: &IncludeDirective) -> Result<PathBuf> {
        self.resolver
            .resolve(&directive.name, self.grammar)
            .map_err(|err| match err {
                SpoolError::ModuleNotFound { name, searched } => {
                    SpoolError::UnresolvedInclude {
                        name,
                        line: directive.line,
                        searched,
                    }
                }
                other => other,
            })
    }

    fn cycle_error(&self, back_edge: &Path) -> SpoolError {
        let target = relative_display(back_edge, self.workspace_root);
        let start = self
            .stack
            .iter()
            .position(|entry| *entry == target)
            .unwrap_or(0);
        let mut chain: Vec<String> = self.stack[start..].to_vec();
        chain.push(target);
        SpoolError::CyclicInclude { chain }
    }

    /// Identifier unique within this operation: the derived id, or the full
    /// relative path when two modules derive the same id.
    fn assign_id(&mut self, rel: &str, path: &Path) -> String {
        let mut id = Module::derive_id(rel, &self.grammar.extension);
        if self.ids.get(&id).is_some_and(|p| p != path) {
            id = Module::fallback_id(rel);
        }
        let mut unique = id.clone();
        let mut n = 2;
        while self.ids.get(&unique).is_some_and(|p| p != path) {
            unique = format!("{}~{}", id, n);
            n += 1;
        }
        self.ids.insert(unique.clone(), path.to_path_buf());
        unique
    }
}

/// Workspace-relative path with forward slashes, for ids, markers and
/// cycle chains; falls back to the full path outside the workspace.
pub fn relative_display(path: &Path, workspace_root: &Path) -> String {
    let shown = match path.strip_prefix(workspace_root) {
        Ok(rel) => rel,
        Err(_) => path,
    };
    shown
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
