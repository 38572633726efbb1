// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The line editing state machine, and its screen reconciliation algorithm.
//!
//! # Architecture
//!
//! | Module           | Responsibility                                               |
//! |------------------|--------------------------------------------------------------|
//! | `core`           | [`LineEditor`] struct, accessors, provider registry          |
//! | `render`         | Clear and repaint the prompted input, cursor motion, editing |
//! | `output`         | Printing text and column listings between reads              |
//! | `pending_read`   | [`PendingRead`], starting and aborting reads                 |
//! | `event_handlers` | Input dispatch: paste, keys, Tab, Enter, Ctrl+C, resize      |
//!
//! # Write-only terminal
//!
//! The editor never asks the terminal where the caret is. After every write it knows
//! where the caret must be, from the "rendered view" (the prompt, followed by the
//! input, with the continuation prompt after each embedded newline) and the terminal
//! width. Every cursor move is a relative one, made of single step escape sequences.

// Private modules organized by functional responsibility.
mod core;
mod event_handlers;
mod output;
mod pending_read;
mod render;

// Public re-exports (expose stable API).
pub use core::*;
pub use pending_read::*;
