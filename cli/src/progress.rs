use std::collections::HashMap;
use std::sync::Mutex;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use fullscan_core::progress::ProgressObserver;

/// Renders one percentage bar per in-flight target.
///
/// Bars are created lazily on the first update for a target and frozen
/// at the terminal 100.
pub struct BarObserver {
    multi: MultiProgress,
    bars: Mutex<HashMap<String, ProgressBar>>,
}

impl BarObserver {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn bar_for(&self, target: &str) -> ProgressBar {
        let mut bars = self.bars.lock().expect("progress bar map poisoned");
        bars.entry(target.to_string())
            .or_insert_with(|| {
                let bar = self.multi.add(ProgressBar::new(100));
                bar.set_style(bar_style());
                bar.set_message(target.to_string());
                bar
            })
            .clone()
    }
}

impl Default for BarObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for BarObserver {
    fn on_progress(&self, target: &str, percent: f64) {
        let bar = self.bar_for(target);
        bar.set_position(percent.round() as u64);
        if percent >= 100.0 {
            bar.finish();
        }
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg:<40!} [{bar:40.cyan/blue}] {pos:>3}%")
        .expect("static progress template")
        .progress_chars("=> ")
}
