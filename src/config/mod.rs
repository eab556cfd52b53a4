//! Configuration file handling for spool
//!
//! This module contains data structures for:
//! - `spool.yaml` - Project configuration at the workspace root
//! - `~/.config/spool/config.yaml` - Optional user-level defaults

pub mod project;
pub mod user;

// Re-export commonly used types
pub use project::{GrammarSettings, ProjectConfig};
pub use user::UserConfig;
