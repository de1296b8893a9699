//! Progress bar display for image operations

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for per-image pipeline steps (pull, retag, save)
pub struct ProgressDisplay {
    images_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total image count
    pub fn new(total_images: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-");

        let images_pb = ProgressBar::new(total_images);
        images_pb.set_style(style);

        Self { images_pb }
    }

    /// Update to show the image currently being processed
    pub fn update_image(&self, reference: &str, current: usize, total: usize) {
        // Truncate long references for display
        let display_ref = if reference.len() > 50 {
            format!("...{}", &reference[reference.len() - 47..])
        } else {
            reference.to_string()
        };
        self.images_pb
            .set_message(format!("({}/{}) {}", current, total, display_ref));
    }

    /// Increment image progress
    pub fn inc(&self) {
        self.images_pb.inc(1);
    }

    /// Finish and keep the completed bar on screen
    pub fn finish(&self) {
        self.images_pb.finish_with_message("done");
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.images_pb.abandon();
    }
}
