//! Progress reporting for search execution

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use tavily_application::ports::progress::SearchProgressNotifier;

/// Reports progress with a terminal spinner (drawn on stderr)
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn take_spinner(&self) -> Option<ProgressBar> {
        self.spinner.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchProgressNotifier for ProgressReporter {
    fn on_search_start(&self, query: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix("Searching");
        pb.set_message(query.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(pb);
        }
    }

    fn on_search_complete(&self, total_results: usize) {
        if let Some(pb) = self.take_spinner() {
            pb.finish_and_clear();
            eprintln!("{} {} result(s)", "v".green(), total_results);
        }
    }

    fn on_search_failed(&self, error: &str) {
        if let Some(pb) = self.take_spinner() {
            pb.finish_and_clear();
            eprintln!("{} {}", "x".red(), error);
        }
    }
}

/// Simple text-based progress for non-interactive stderr
pub struct SimpleProgress;

impl SearchProgressNotifier for SimpleProgress {
    fn on_search_start(&self, query: &str) {
        eprintln!("{} {} {}", "->".cyan(), "Searching".bold(), query);
    }

    fn on_search_complete(&self, total_results: usize) {
        eprintln!("  {} {} result(s)", "v".green(), total_results);
    }

    fn on_search_failed(&self, error: &str) {
        eprintln!("  {} {}", "x".red(), error);
    }
}
