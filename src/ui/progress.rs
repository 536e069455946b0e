//! Per-sheet import progress bar.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

pub struct SheetProgress {
    bar: ProgressBar,
}

impl SheetProgress {
    /// A 0..=100 bar labelled with the file and sheet being imported.
    /// When `quiet` is true nothing is drawn.
    pub fn new(label: String, quiet: bool) -> Self {
        let bar = ProgressBar::new(100);
        if quiet {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        if let Ok(style) = ProgressStyle::with_template("  {bar:30.cyan/blue} {pos:>3}% {msg}") {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_message(label);
        Self { bar }
    }

    /// Move the bar to `percent` (clamped to 0..=100).
    pub fn set(&self, percent: f64) {
        self.bar.set_position(percent.clamp(0.0, 100.0).round() as u64);
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}
