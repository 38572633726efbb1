// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CR, CTRL_C, DEL, ESC, KEY_ALT_B, KEY_ALT_BACKSPACE, KEY_ALT_F, KEY_DELETE,
            KEY_DOWN, KEY_END, KEY_HOME, KEY_LEFT, KEY_RIGHT, KEY_UP};

/// What a single chunk of raw terminal input means to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySequence {
    HistoryPrevious,
    HistoryNext,
    MoveLeft,
    MoveRight,
    Home,
    End,
    Delete,
    WordLeft,
    WordRight,
    EraseWordBackward,
    /// An escape sequence that has no binding. It is ignored.
    UnknownEscape(String),
    Enter,
    Backspace,
    Tab,
    Interrupt,
    /// A control character that has no binding. It is ignored.
    UnknownControl(String),
    /// Anything else is inserted at the cursor as is.
    Insert(String),
}

impl KeySequence {
    /// Chunks starting with ESC are matched on the bytes after ESC. Chunks starting with
    /// any other control character must be exactly one bound control character, or they
    /// are ignored.
    #[must_use]
    pub fn parse(data: &str) -> Self {
        if let Some(escape_tail) = data.strip_prefix(ESC) {
            return match escape_tail {
                KEY_UP => Self::HistoryPrevious,
                KEY_DOWN => Self::HistoryNext,
                KEY_LEFT => Self::MoveLeft,
                KEY_RIGHT => Self::MoveRight,
                KEY_DELETE => Self::Delete,
                KEY_END => Self::End,
                KEY_HOME => Self::Home,
                KEY_ALT_B => Self::WordLeft,
                KEY_ALT_F => Self::WordRight,
                KEY_ALT_BACKSPACE => Self::EraseWordBackward,
                _ => Self::UnknownEscape(escape_tail.to_string()),
            };
        }

        let mut chars = data.chars();
        match (chars.next(), chars.next()) {
            (Some(DEL), None) => Self::Backspace,
            (Some('\t'), None) => Self::Tab,
            (Some(CTRL_C), None) => Self::Interrupt,
            _ if data == CR => Self::Enter,
            (Some(first), _) if first.is_ascii_control() => {
                Self::UnknownControl(data.to_string())
            }
            _ => Self::Insert(data.to_string()),
        }
    }
}
