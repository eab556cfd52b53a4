//! Progress bar display for multi-root bundle batches

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for bundling many roots
pub struct ProgressDisplay {
    bar: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total root count
    pub fn new(total_roots: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let bar = ProgressBar::new(total_roots);
        bar.set_style(style);

        Self { bar }
    }

    /// Update to show the root currently being bundled
    pub fn update(&self, root_name: &str) {
        // Truncate long paths for display
        let display = if root_name.len() > 50 {
            format!("...{}", &root_name[root_name.len() - 47..])
        } else {
            root_name.to_string()
        };
        self.bar.set_message(display);
    }

    /// Increment root progress
    pub fn inc(&self) {
        self.bar.inc(1);
    }

    /// Finish and clear the bar so summary lines print cleanly
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.bar.abandon();
    }
}
