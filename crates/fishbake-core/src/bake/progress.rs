//! Running counters for a bake and the console line built from them.

/// Snapshot of bake progress (CLI-friendly).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BakeProgress {
    /// Records processed so far.
    pub done: usize,
    /// Records in the dataset.
    pub total: usize,
    /// Records that received an image.
    pub found: usize,
    /// Records left without an image.
    pub failed: usize,
}

impl BakeProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record(&mut self, resolved: bool) {
        self.done += 1;
        if resolved {
            self.found += 1;
        } else {
            self.failed += 1;
        }
    }

    /// `"<done> / <total>  (<found> images, <failed> missing)"`, no carriage return.
    pub fn line(&self) -> String {
        format!(
            "{} / {}  ({} images, {} missing)",
            self.done, self.total, self.found, self.failed
        )
    }
}
