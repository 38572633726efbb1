// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The `r3bl_shell_readline` library is a shell-like line editor for terminal surfaces
//! that have no line editing of their own. Every keystroke arrives as a raw control
//! sequence, and every visual change is produced by emitting cursor movement and erase
//! escape sequences. The terminal is treated as write-only: the editor never asks the
//! terminal where the caret is, it keeps its own model of what has been painted and
//! treats every prior write as ground truth.
//!
//! # Features
//!
//! 1. Cursor motion, word-boundary navigation (Alt+Left / Alt+Right), Home / End,
//!    Backspace, Delete, and Alt+Backspace (erase previous word).
//! 2. Multi-line continuation. When Enter is pressed and the input is incomplete (an
//!    unbalanced quote, a dangling `&&` / `||` / `|`, or a trailing `\`), a newline is
//!    inserted instead of completing the read, and every continuation line is prefixed
//!    with the continuation prompt. The predicate is pluggable.
//! 3. In-memory history ring with FIFO eviction, navigated with Up / Down.
//! 4. Tab completion from pluggable providers. The input is tokenized with shell
//!    quoting rules, the longest common prefix is auto-inserted, and the candidates are
//!    printed in columns. Large candidate lists ask for confirmation first.
//! 5. Resize support. The wrap points shift when the terminal width changes, so the
//!    input is cleared with the old geometry and repainted with the new one.
//! 6. Paste detection. A burst of characters arriving in one chunk is fed through the
//!    same code path as typed input, one character at a time.
//!
//! # How to use this crate
//!
//! ## [`ReadlineAsync::try_new()`], which is the main entry point for most use cases
//!
//! 1. To read user input, call [`ReadlineAsync::read_line()`].
//! 2. To ask a single character question, call [`ReadlineAsync::read_char()`].
//! 3. Register tab completion providers with
//!    [`ReadlineAsync::add_autocomplete_handler()`].
//! 4. Print between reads with [`ReadlineAsync::println()`] and
//!    [`ReadlineAsync::print_wide()`].
//!
//! ## [`LineEditor`], the state machine
//!
//! For tests, or to embed the editor on top of some other transport (a web socket, a
//! serial line, a PTY), drive [`LineEditor`] directly:
//!
//! - Call [`LineEditor::read()`] to start a line read. It returns a [`PendingRead`]
//!   future that settles when the user presses Enter on complete input, or when
//!   [`LineEditor::abort_read()`] is called.
//! - Feed every raw input chunk and resize notification to
//!   [`LineEditor::handle_event()`].
//!
//! ```
//! use r3bl_shell_readline::{LineEditor, OutputDevice, OutputDeviceExt,
//!                           ReadlineOptions, TerminalEvent, TerminalSize};
//!
//! # async fn demo() -> Result<(), r3bl_shell_readline::ReadlineError> {
//! let (output_device, _stdout_mock) = OutputDevice::new_mock();
//! let mut editor = LineEditor::new(
//!     output_device,
//!     TerminalSize::new(80, 24),
//!     ReadlineOptions::default(),
//! );
//! let pending = editor.read("$ ", "> ")?;
//! editor.handle_event(TerminalEvent::Data("hi".into()))?;
//! editor.handle_event(TerminalEvent::Data("\r".into()))?;
//! assert_eq!(pending.await?, "hi");
//! # Ok(())
//! # }
//! ```
//!
//! ## [`tracing_setup::init()`]
//!
//! This is a convenience method to set up Tokio [`tracing_subscriber`] with a file or
//! display output destination. Since the editor owns the terminal (in raw mode), logging
//! to a file is usually what you want.

// Enforce strict error handling in production code.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod public_api;
pub mod readline_impl;
pub mod terminal_io;
pub mod test_fixtures;
pub mod tracing_logging;

// Re-export the public API.
pub use public_api::*;
pub use readline_impl::*;
pub use terminal_io::*;
pub use test_fixtures::*;
pub use tracing_logging::*;

// Type aliases.
use futures_core::Stream;
use smallvec::SmallVec;
use std::{pin::Pin, sync::Arc};

/// Disambiguate the type of `StdMutex` from stdlib and tokio to avoid conflicts.
pub type StdMutex<T> = std::sync::Mutex<T>;

/// Type alias for a `Send`-able output device (raw terminal, mock, etc).
pub type SendRawTerminal = dyn std::io::Write + Send;
/// Type alias for a `Send`-able raw terminal wrapped in an `Arc<StdMutex>`.
pub type SafeRawTerminal = Arc<StdMutex<SendRawTerminal>>;

/// Type alias for a pinned stream. `T` is usually [`TerminalEventResult`].
pub type PinnedInputStream<T> = Pin<Box<dyn Stream<Item = T>>>;

/// Stack allocated list, used for short lists like tokens and candidates.
pub type InlineVec<T> = SmallVec<[T; DEFAULT_INLINE_VEC_SIZE]>;

// Constants.
/// Enable to log every key sequence the editor dispatches.
pub const DEBUG_READLINE_MOD: bool = false;
pub const DEFAULT_INLINE_VEC_SIZE: usize = 8;
pub const HISTORY_SIZE_DEFAULT: usize = 10;
pub const MAX_AUTOCOMPLETE_ENTRIES_DEFAULT: usize = 100;
pub const CONTINUATION_PROMPT_DEFAULT: &str = "> ";
pub const PRINT_WIDE_PADDING_DEFAULT: usize = 2;
pub const PASTE_THRESHOLD_DEFAULT: usize = 3;
pub const ABORT_REASON_DEFAULT: &str = "aborted";
/// Inserted when Tab is pressed and no completion provider is registered.
pub const TAB_EXPANSION: &str = "    ";

/// Shorthand for `Ok(())` / `Ok(value)`.
#[macro_export]
macro_rules! ok {
    () => {
        Ok(())
    };
    ($value:expr) => {
        Ok($value)
    };
}
