use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal};
use std::time::Duration;

/// Progress indicator manager. Spinners go to stderr, so stdout stays clean.
pub struct ProgressManager {
    enabled: bool,
    verbose: bool,
}

impl ProgressManager {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        // Only enable progress if we're in a terminal and not in quiet mode
        let enabled = !quiet && io::stderr().is_terminal();

        Self { enabled, verbose }
    }

    /// Create a spinner for an in-flight lookup
    pub fn create_spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.enabled {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .map(|s| s.tick_strings(&["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"]))
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Some(pb)
    }

    /// Show a simple message (for verbose mode)
    pub fn show_message(&self, message: &str) {
        if self.verbose && self.enabled {
            eprintln!("🔍 {}", message);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Spinner shown while a lookup runs; cleared on drop
pub struct LookupProgress<'a> {
    spinner: Option<ProgressBar>,
    manager: &'a ProgressManager,
}

impl<'a> LookupProgress<'a> {
    pub fn new(manager: &'a ProgressManager, message: &str) -> Self {
        let spinner = manager.create_spinner(message);
        manager.show_message(message);
        Self { spinner, manager }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(ref pb) = self.spinner {
            pb.set_message(message.to_string());
        }
        self.manager.show_message(message);
    }

    pub fn finish_and_clear(&self) {
        if let Some(ref pb) = self.spinner {
            pb.finish_and_clear();
        }
    }
}

impl Drop for LookupProgress<'_> {
    fn drop(&mut self) {
        self.finish_and_clear();
    }
}

pub mod messages {
    pub fn searching_number(api_name: &str, number: &str) -> String {
        format!("{}: 法人番号 {} を検索中...", api_name, number)
    }

    pub fn searching_name(api_name: &str, name: &str) -> String {
        format!("{}: 法人名「{}」を検索中...", api_name, name)
    }

    pub fn fetching_details(count: usize) -> String {
        format!("詳細情報を取得中 ({}件)...", count)
    }
}
