use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

use super::Style;
use crate::deck::ShapeKey;
use crate::output;
use crate::pipeline::{RunObserver, RunState};

/// Renders a translation run on stderr.
///
/// Shows a spinner while the document is read or written and a progress bar
/// over all fragments while translating. Warnings are printed above the bar.
pub struct RunProgress {
    progress_bar: ProgressBar,
}

impl RunProgress {
    #[allow(clippy::unwrap_used)]
    pub fn new() -> Self {
        let progress_bar = if output::is_quiet() {
            ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
        } else {
            ProgressBar::new_spinner()
        };
        // unwrap is safe: template string is a compile-time constant
        progress_bar.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
                .template("{spinner} {msg}")
                .unwrap(),
        );
        progress_bar.enable_steady_tick(Duration::from_millis(80));

        Self { progress_bar }
    }

    #[allow(clippy::unwrap_used)]
    fn switch_to_bar(&self, total: usize) {
        self.progress_bar.set_length(total as u64);
        // unwrap is safe: template string is a compile-time constant
        self.progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:30}] {pos}/{len}")
                .unwrap()
                .progress_chars("=> "),
        );
    }
}

impl Default for RunProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl RunObserver for RunProgress {
    fn on_state(&mut self, state: RunState) {
        match state {
            RunState::Idle => {}
            RunState::Extracting => self.progress_bar.set_message("Extracting slide text..."),
            RunState::Translating { done: 0, total } => {
                self.switch_to_bar(total);
                self.progress_bar.set_position(0);
            }
            RunState::Translating { done, .. } => self.progress_bar.set_position(done as u64),
            RunState::Rewriting => {
                self.progress_bar.set_style(ProgressStyle::default_spinner());
                self.progress_bar
                    .set_message("Writing translated presentation...");
            }
            RunState::Done | RunState::Failed => self.progress_bar.finish_and_clear(),
        }
    }

    fn on_slide(&mut self, slide: usize, slide_count: usize) {
        self.progress_bar
            .set_message(format!("Translating slide {}/{slide_count}", slide + 1));
    }

    fn on_warning(&mut self, key: ShapeKey, error: &anyhow::Error) {
        let message = format!(
            "{} Could not translate {key}, keeping original text: {error}",
            Style::warning("Warning:")
        );
        self.progress_bar.suspend(|| {
            crate::warn!("{message}");
        });
    }
}

impl Drop for RunProgress {
    fn drop(&mut self) {
        self.progress_bar.finish_and_clear();
    }
}
