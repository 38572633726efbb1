// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! crossterm decodes terminal input into structured key events. The editor works on raw
//! byte sequences (so it can be driven by any transport), so this module encodes the key
//! events back into the bytes that a VT100 style terminal sends.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{CR, DEL, ESC, TerminalEvent, TerminalSize};

/// Returns [None] for events the editor has no use for.
#[must_use]
pub fn convert_crossterm_event(event: Event) -> Option<TerminalEvent> {
    match event {
        Event::Key(key_event) => encode_key_event(key_event).map(TerminalEvent::Data),
        Event::Paste(text) => Some(TerminalEvent::Data(text)),
        Event::Resize(columns, rows) => {
            Some(TerminalEvent::Resize(TerminalSize::new(columns, rows)))
        }
        _ => None,
    }
}

/// Encodes a key press as the bytes a terminal would have sent for it.
#[must_use]
pub fn encode_key_event(key_event: KeyEvent) -> Option<String> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    let KeyEvent {
        code, modifiers, ..
    } = key_event;

    if modifiers.contains(KeyModifiers::ALT) {
        return match code {
            KeyCode::Left | KeyCode::Char('b') => Some(format!("{ESC}b")),
            KeyCode::Right | KeyCode::Char('f') => Some(format!("{ESC}f")),
            KeyCode::Backspace => Some(format!("{ESC}{DEL}")),
            KeyCode::Char(ch) => Some(format!("{ESC}{ch}")),
            _ => None,
        };
    }

    if let (true, KeyCode::Char(ch)) = (modifiers.contains(KeyModifiers::CONTROL), code) {
        return ctrl_char_to_c0(ch).map(String::from);
    }

    let it = match code {
        KeyCode::Enter => CR.to_string(),
        KeyCode::Backspace => DEL.to_string(),
        KeyCode::Tab => "\t".to_string(),
        KeyCode::Esc => ESC.to_string(),
        KeyCode::Up => format!("{ESC}[A"),
        KeyCode::Down => format!("{ESC}[B"),
        KeyCode::Right => format!("{ESC}[C"),
        KeyCode::Left => format!("{ESC}[D"),
        KeyCode::Home => format!("{ESC}[H"),
        KeyCode::End => format!("{ESC}[F"),
        KeyCode::Delete => format!("{ESC}[3~"),
        KeyCode::Char(ch) => ch.to_string(),
        _ => return None,
    };
    Some(it)
}

/// Ctrl+A .. Ctrl+Z map to the C0 control codes 0x01 .. 0x1A.
fn ctrl_char_to_c0(ch: char) -> Option<char> {
    if !ch.is_ascii_alphabetic() {
        return None;
    }
    let byte = u8::try_from(ch.to_ascii_lowercase()).ok()?;
    Some(char::from(byte - b'a' + 1))
}
