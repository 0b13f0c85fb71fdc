//! Presentation sinks.
//!
//! The loop pushes every cycle's outcome (touching signal plus the raw
//! regions) to a presentation sink. Overlay rendering belongs to the
//! embedding application; the built-in sink renders a one-line terminal
//! status, pretty via a spinner when stderr is a TTY, plain log lines
//! otherwise.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::fusion::CycleUpdate;

/// Receives per-cycle results at loop cadence.
pub trait PresentationSink: Send {
    /// Called once per cycle with the touching signal and both detection sets.
    fn present(&mut self, update: &CycleUpdate<'_>);

    /// Called while the pipeline is failing cycles beyond the health
    /// threshold. Distinct from the touched/not-touched states.
    fn degraded(&mut self, consecutive_failures: u32);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiMode {
    Auto,
    Plain,
    Pretty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Clear,
    Touched,
    Degraded,
}

/// Terminal status line.
pub struct TerminalSink {
    spinner: Option<ProgressBar>,
    last: Option<Status>,
}

impl TerminalSink {
    pub fn new(mode: UiMode) -> Self {
        let use_pretty = match mode {
            UiMode::Pretty => true,
            UiMode::Plain => false,
            UiMode::Auto => std::io::stderr().is_terminal(),
        };

        let spinner = if use_pretty {
            let spinner = ProgressBar::new_spinner();
            spinner.set_draw_target(ProgressDrawTarget::stderr());
            spinner.enable_steady_tick(Duration::from_millis(120));
            let style = ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
            spinner.set_style(style);
            Some(spinner)
        } else {
            None
        };

        Self {
            spinner,
            last: None,
        }
    }

    fn show(&mut self, status: Status, message: &str) {
        if self.last == Some(status) {
            return;
        }
        self.last = Some(status);
        match &self.spinner {
            Some(spinner) => spinner.set_message(message.to_string()),
            None => log::info!("{}", message),
        }
    }
}

impl PresentationSink for TerminalSink {
    fn present(&mut self, update: &CycleUpdate<'_>) {
        if update.touching {
            self.show(Status::Touched, "touched! hands off the face");
        } else {
            self.show(Status::Clear, "not touched");
        }
    }

    fn degraded(&mut self, consecutive_failures: u32) {
        let message = format!(
            "detection degraded ({} consecutive failed cycles)",
            consecutive_failures
        );
        // Re-announce while degraded persists is noise; show() dedups.
        self.show(Status::Degraded, &message);
    }
}

impl Drop for TerminalSink {
    fn drop(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}
