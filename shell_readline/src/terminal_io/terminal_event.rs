// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::IntoDiagnostic;

/// Terminal dimensions, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerminalSize {
    pub columns: u16,
    pub rows: u16,
}

impl TerminalSize {
    #[must_use]
    pub fn new(columns: u16, rows: u16) -> Self { Self { columns, rows } }

    /// Asks the real terminal for its size.
    ///
    /// # Errors
    ///
    /// Returns an error if the size can't be determined (eg: stdout is not a TTY).
    pub fn try_get() -> miette::Result<Self> {
        let (columns, rows) = crossterm::terminal::size().into_diagnostic()?;
        Ok(Self::new(columns, rows))
    }
}

/// Everything the editor consumes from a terminal surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A chunk of raw input: a single key's bytes, or a burst (eg: a paste).
    Data(String),
    /// The terminal was resized.
    Resize(TerminalSize),
}

impl From<&str> for TerminalEvent {
    fn from(data: &str) -> Self { TerminalEvent::Data(data.to_string()) }
}

pub type TerminalEventResult = std::io::Result<TerminalEvent>;
