//! Diagnostic output for resolution runs.
//!
//! The resolver reports progress and warnings through a [`Console`] handed to
//! it by the caller, never through a global logger.

use std::io::Write;
use std::sync::Mutex;

use console::{style, Term};

/// Sink for progress and warning messages
pub trait Console: Send + Sync {
    /// Write a progress or informational line
    fn write_line(&self, message: &str);

    /// Write a warning
    fn write_warning(&self, message: &str);
}

/// Verbosity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
}

/// Console writing styled output to stderr
pub struct TermConsole {
    term: Term,
    verbosity: Verbosity,
}

impl TermConsole {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            term: Term::stderr(),
            verbosity,
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

impl Default for TermConsole {
    fn default() -> Self {
        Self::new(Verbosity::Normal)
    }
}

impl Console for TermConsole {
    fn write_line(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            let _ = writeln!(&self.term, "{}", style(message).dim());
        }
    }

    // Warnings still show in quiet mode
    fn write_warning(&self, message: &str) {
        let _ = writeln!(&self.term, "{} {}", style("Warning:").yellow().bold(), message);
    }
}

/// Console forwarding to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogConsole;

impl Console for LogConsole {
    fn write_line(&self, message: &str) {
        log::info!("{}", message);
    }

    fn write_warning(&self, message: &str) {
        log::warn!("{}", message);
    }
}

/// A message captured by [`BufferedConsole`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleMessage {
    Line(String),
    Warning(String),
}

/// Console that records every message in memory
#[derive(Debug, Default)]
pub struct BufferedConsole {
    messages: Mutex<Vec<ConsoleMessage>>,
}

impl BufferedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages in the order they were written
    pub fn messages(&self) -> Vec<ConsoleMessage> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Only the plain lines
    pub fn lines(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                ConsoleMessage::Line(line) => Some(line),
                ConsoleMessage::Warning(_) => None,
            })
            .collect()
    }

    /// Only the warnings
    pub fn warnings(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                ConsoleMessage::Warning(warning) => Some(warning),
                ConsoleMessage::Line(_) => None,
            })
            .collect()
    }

    fn push(&self, message: ConsoleMessage) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message);
        }
    }
}

impl Console for BufferedConsole {
    fn write_line(&self, message: &str) {
        self.push(ConsoleMessage::Line(message.to_string()));
    }

    fn write_warning(&self, message: &str) {
        self.push(ConsoleMessage::Warning(message.to_string()));
    }
}
