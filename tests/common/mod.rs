//! Common test utilities for spool integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A test workspace for integration tests
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace with no configuration (defaults apply)
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a test workspace with the given spool.yaml
    pub fn with_config(config: &str) -> Self {
        let workspace = Self::new();
        workspace.write_file("spool.yaml", config);
        workspace
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Remove a file from workspace
    pub fn remove_file(&self, path: &str) {
        std::fs::remove_file(self.path.join(path)).expect("Failed to remove file");
    }

    /// A three-module script project: main includes util and lib/math,
    /// util includes lib/math too (shared dependency).
    pub fn script_project(&self) -> &Self {
        self.write_file(
            "src/main.script",
            "-- entry point\n#include util\n#include lib/math\nrun()\n",
        );
        self.write_file("src/util.script", "#include lib/math\nutil = true\n");
        self.write_file(
            "src/lib/math.script",
            "add = function(a, b) return a + b end\n",
        );
        self
    }

    /// A two-fragment markup project
    pub fn markup_project(&self) -> &Self {
        self.write_file(
            "src/hud.ui",
            "<Panel id=\"hud\">\n  <Include src=\"widgets/score.ui\"/>\n</Panel>\n",
        );
        self.write_file("src/widgets/score.ui", "<Text id=\"score\">0</Text>\n");
        self
    }
}
