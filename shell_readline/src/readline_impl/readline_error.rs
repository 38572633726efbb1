// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::{Diagnostic, Report as ErrorReport};
use std::io;
use thiserror::Error;

/// Error returned from a pending [`crate::LineEditor::read()`] or
/// [`crate::LineEditor::read_char()`], and from the I/O that the editor performs.
#[derive(Debug, Error, Diagnostic)]
pub enum ReadlineError {
    /// Writing to the output device failed.
    #[error(transparent)]
    IO(#[from] io::Error),

    /// The read was cancelled with [`crate::LineEditor::abort_read()`].
    #[error("read aborted: {0}")]
    #[diagnostic(code(shell_readline::aborted))]
    Aborted(String),

    /// Another read of the same kind was started before this one settled.
    #[error("read superseded by a newer read")]
    #[diagnostic(code(shell_readline::superseded))]
    Superseded,

    /// The input stream ended, or the editor was dropped, while a read was pending.
    #[error("input closed")]
    #[diagnostic(code(shell_readline::closed))]
    Closed,

    /// The options could not be loaded.
    #[error("invalid readline options: {0}")]
    #[diagnostic(code(shell_readline::config))]
    Config(String),
}

/// For convenience, convert [`ErrorReport`] to [`ReadlineError`], so that
/// `into_diagnostic()` works.
impl From<ErrorReport> for ReadlineError {
    fn from(report: ErrorReport) -> Self { ReadlineError::IO(io::Error::other(format!("{report}"))) }
}
