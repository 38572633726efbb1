// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod ansi_sequences;
pub mod completion;
pub mod key_sequence;
pub mod line_editor;
pub mod readline_error;
pub mod readline_history;
pub mod shell_syntax;
pub mod text_geometry;

// Re-export.
pub use ansi_sequences::*;
pub use completion::*;
pub use key_sequence::*;
pub use line_editor::*;
pub use readline_error::*;
pub use readline_history::*;
pub use shell_syntax::*;
pub use text_geometry::*;
