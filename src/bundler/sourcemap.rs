//! Mapping combined-document line numbers back to source files
//!
//! Runtimes report positions against the flattened document they were sent.
//! The blocks recorded at emission time are enough to trace such a position
//! to the module file and local line it came from. Marker lines map to the
//! including module's directive line; back-reference lines count as one
//! line of their parent.

use crate::bundler::{CombinedDocument, EmittedBlock};

/// A resolved position in the original multi-file layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePosition {
    /// Workspace-relative module path
    pub path: String,
    /// 1-based line within the module's original content
    pub line: usize,
}

/// Line mapping for one combined document
#[derive(Debug)]
pub struct SourceMap {
    root_path: String,
    /// Blocks in document order
    blocks: Vec<EmittedBlock>,
    total_lines: usize,
}

impl SourceMap {
    pub fn from_document(doc: &CombinedDocument) -> Self {
        SourceMap {
            root_path: doc.root_path.clone(),
            blocks: doc.blocks.clone(),
            total_lines: doc.text.split('\n').count(),
        }
    }

    /// Resolve a 1-based combined-document line to a source position.
    ///
    /// Returns `None` for lines outside the document.
    pub fn resolve(&self, line: usize) -> Option<SourcePosition> {
        if line == 0 || line > self.total_lines {
            return None;
        }
        if self.blocks.is_empty() {
            // Single-module documents carry no markers
            return Some(SourcePosition {
                path: self.root_path.clone(),
                line,
            });
        }
        // Line 1 is the root prologue marker
        if line == 1 {
            return Some(SourcePosition {
                path: self.root_path.clone(),
                line: 1,
            });
        }

        match self.innermost(line) {
            None => Some(SourcePosition {
                path: self.root_path.clone(),
                line: self.local_in_root(line),
            }),
            Some(block) => {
                if line == block.line - 1 || line == block.line + block.span {
                    // A marker line stands for the directive in the parent
                    return self.directive_position(block);
                }
                Some(SourcePosition {
                    path: block.path.clone(),
                    line: self.local_in_block(block, line),
                })
            }
        }
    }

    /// Innermost block whose full extent, markers included, contains `line`
    fn innermost(&self, line: usize) -> Option<&EmittedBlock> {
        self.blocks
            .iter()
            .filter(|b| (b.line - 1..=b.line + b.span).contains(&line))
            .max_by_key(|b| b.line)
    }

    /// Immediate parent block of `child`, or `None` for the root region
    fn parent_of(&self, child: &EmittedBlock) -> Option<&EmittedBlock> {
        self.blocks
            .iter()
            .filter(|b| {
                b.line < child.line && child.line + child.span <= b.line + b.span
            })
            .max_by_key(|b| b.line)
    }

    /// Whether `inner` is an immediate child of `outer`
    fn is_immediate_child(&self, inner: &EmittedBlock, outer: Option<&EmittedBlock>) -> bool {
        let parent = self.parent_of(inner);
        match (parent, outer) {
            (None, None) => true,
            (Some(p), Some(o)) => std::ptr::eq(p, o),
            _ => false,
        }
    }

    /// Combined lines collapsed by child blocks of `outer` that end before
    /// `line`: each child's whole extent stands for one directive line.
    fn collapsed_before(&self, outer: Option<&EmittedBlock>, line: usize) -> usize {
        self.blocks
            .iter()
            .filter(|b| b.line + b.span < line && self.is_immediate_child(b, outer))
            .map(|b| b.span + 1) // extent is span + 2 markers, minus the directive line
            .sum()
    }

    fn local_in_root(&self, line: usize) -> usize {
        // Root content starts on line 2, after the prologue marker
        line - 1 - self.collapsed_before(None, line)
    }

    fn local_in_block(&self, block: &EmittedBlock, line: usize) -> usize {
        line - block.line + 1 - self.collapsed_before(Some(block), line)
    }

    /// Position of the directive that pulled `block` in, within its parent
    fn directive_position(&self, block: &EmittedBlock) -> Option<SourcePosition> {
        let begin_line = block.line - 1;
        match self.parent_of(block) {
            None => Some(SourcePosition {
                path: self.root_path.clone(),
                line: self.local_in_root(begin_line),
            }),
            Some(parent) => Some(SourcePosition {
                path: parent.path.clone(),
                line: self.local_in_block(parent, begin_line),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::bundle;
    use crate::grammar::Grammar;
    use crate::resolver::Resolver;
    use crate::test_fixtures::MemorySource;
    use std::path::{Path, PathBuf};

    fn map_for(source: &MemorySource, root: &str) -> (SourceMap, String) {
        let grammar = Grammar::script();
        let mut resolver = Resolver::new(source, vec![PathBuf::from("/proj/src")]);
        let doc = bundle(
            Path::new(root),
            &mut resolver,
            &grammar,
            Path::new("/proj"),
        )
        .unwrap();
        (SourceMap::from_document(&doc), doc.text)
    }

    fn pos(path: &str, line: usize) -> SourcePosition {
        SourcePosition {
            path: path.to_string(),
            line,
        }
    }

    #[test]
    fn test_single_module_maps_identity() {
        let source = MemorySource::new(&[("/proj/src/main.script", "a\nb\nc\n")]);
        let (map, _) = map_for(&source, "/proj/src/main.script");

        assert_eq!(map.resolve(2), Some(pos("src/main.script", 2)));
        assert_eq!(map.resolve(0), None);
        assert_eq!(map.resolve(99), None);
    }

    #[test]
    fn test_lines_map_through_one_include() {
        // Combined layout:
        // 1 root marker        -> root:1
        // 2 "before"           -> root:1
        // 3 begin marker       -> root:2 (the directive)
        // 4 "u1"               -> util:1
        // 5 "u2"               -> util:2
        // 6 ""                 -> util:3
        // 7 end marker         -> root:2
        // 8 "after"            -> root:3
        // 9 ""                 -> root:4
        let source = MemorySource::new(&[
            ("/proj/src/main.script", "before\n#include util\nafter\n"),
            ("/proj/src/util.script", "u1\nu2\n"),
        ]);
        let (map, _) = map_for(&source, "/proj/src/main.script");

        assert_eq!(map.resolve(2), Some(pos("src/main.script", 1)));
        assert_eq!(map.resolve(3), Some(pos("src/main.script", 2)));
        assert_eq!(map.resolve(4), Some(pos("src/util.script", 1)));
        assert_eq!(map.resolve(5), Some(pos("src/util.script", 2)));
        assert_eq!(map.resolve(7), Some(pos("src/main.script", 2)));
        assert_eq!(map.resolve(8), Some(pos("src/main.script", 3)));
    }

    #[test]
    fn test_lines_map_through_nested_includes() {
        // main: "#include outer\ntail\n", outer: "o1\n#include inner\no2\n",
        // inner: "i\n"
        let source = MemorySource::new(&[
            ("/proj/src/main.script", "#include outer\ntail\n"),
            ("/proj/src/outer.script", "o1\n#include inner\no2\n"),
            ("/proj/src/inner.script", "i\n"),
        ]);
        let (map, text) = map_for(&source, "/proj/src/main.script");
        let lines: Vec<&str> = text.split('\n').collect();

        // Find the inner content line and the outer line after it
        let i_line = lines.iter().position(|l| *l == "i").unwrap() + 1;
        let o2_line = lines.iter().position(|l| *l == "o2").unwrap() + 1;
        assert_eq!(map.resolve(i_line), Some(pos("src/inner.script", 1)));
        assert_eq!(map.resolve(o2_line), Some(pos("src/outer.script", 3)));

        let tail_line = lines.iter().position(|l| *l == "tail").unwrap() + 1;
        assert_eq!(map.resolve(tail_line), Some(pos("src/main.script", 2)));
    }

    #[test]
    fn test_back_reference_counts_as_one_parent_line() {
        let source = MemorySource::new(&[
            ("/proj/src/main.script", "#include util\n#include util\nend\n"),
            ("/proj/src/util.script", "u\n"),
        ]);
        let (map, text) = map_for(&source, "/proj/src/main.script");
        let lines: Vec<&str> = text.split('\n').collect();

        let end_line = lines.iter().position(|l| *l == "end").unwrap() + 1;
        assert_eq!(map.resolve(end_line), Some(pos("src/main.script", 3)));
    }
}
