// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::core::{ActiveCharPrompt, CharReadContinuation, LineEditor};
use crate::{CRLF, CompletionAction, DEBUG_READLINE_MOD, ESC, KeySequence, ReadlineError,
            TAB_EXPANSION, TerminalEvent, TerminalSize, char_len, char_slice,
            closest_left_boundary, closest_right_boundary, collect_candidates, ok,
            plan_completion};

/// Collapses every run of `\r` and `\n` into a single `\r`, so that each line break in a
/// paste acts like one press of Enter.
fn collapse_line_breaks_to_cr(text: &str) -> String {
    let mut acc = String::with_capacity(text.len());
    let mut in_break_run = false;
    for ch in text.chars() {
        let is_break = ch == '\r' || ch == '\n';
        if !is_break {
            acc.push(ch);
        } else if !in_break_run {
            acc.push('\r');
        }
        in_break_run = is_break;
    }
    acc
}

impl LineEditor {
    /// Process one event from the terminal surface. This is the only way input gets into
    /// the editor.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn handle_event(&mut self, event: TerminalEvent) -> Result<(), ReadlineError> {
        match event {
            TerminalEvent::Data(data) => self.handle_term_data(&data),
            TerminalEvent::Resize(new_size) => self.handle_resize(new_size),
        }
    }

    /// A pending single character read takes the chunk, whatever it is. Otherwise,
    /// chunks longer than the paste threshold (that aren't escape sequences) are fed one
    /// char at a time, as if typed.
    ///
    /// This paste detection is a heuristic. Fast typing can be mistaken for a paste, and
    /// the outcome is the same as typing those chars one by one.
    fn handle_term_data(&mut self, data: &str) -> Result<(), ReadlineError> {
        if data.is_empty() {
            return ok!();
        }

        if let Some(active_char_prompt) = self.maybe_active_char_prompt.take() {
            return self.handle_char_read(active_char_prompt, data);
        }

        if !self.is_active {
            return ok!();
        }

        let is_paste =
            char_len(data) > self.options.paste_threshold && !data.starts_with(ESC);
        if !is_paste {
            return self.handle_data(data);
        }

        // % is Display, ? is Debug.
        tracing::debug!(message = "Paste detected", char_count = char_len(data));
        for ch in collapse_line_breaks_to_cr(data).chars() {
            self.handle_data(ch.encode_utf8(&mut [0; 4]))?;
        }
        ok!()
    }

    fn handle_char_read(
        &mut self,
        active_char_prompt: ActiveCharPrompt,
        data: &str,
    ) -> Result<(), ReadlineError> {
        match active_char_prompt.continuation {
            CharReadContinuation::External(sender) => {
                sender.send(Ok(data.to_string())).ok();
                self.output_device.write_str(CRLF)?;
            }
            CharReadContinuation::CompletionConfirm {
                candidates,
                saved_cursor,
            } => {
                self.output_device.write_str(CRLF)?;
                if data == "y" || data == "Y" {
                    self.print_wide(&candidates, self.options.print_wide_padding)?;
                }
                if self.is_active {
                    self.restart_prompt(saved_cursor)?;
                }
            }
        }
        ok!()
    }

    /// Dispatch one key sequence. Ignored unless a line read is pending.
    fn handle_data(&mut self, data: &str) -> Result<(), ReadlineError> {
        if !self.is_active {
            return ok!();
        }

        let key_sequence = KeySequence::parse(data);
        DEBUG_READLINE_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "handle_data", key_sequence = ?key_sequence);
        });

        match key_sequence {
            KeySequence::HistoryPrevious => {
                if let Some(value) = self.history.get_previous().map(str::to_string) {
                    self.set_input(&value, true)?;
                    self.set_cursor(char_len(&value))?;
                }
            }
            KeySequence::HistoryNext => {
                let value = self
                    .history
                    .get_next()
                    .map(str::to_string)
                    .unwrap_or_default();
                self.set_input(&value, true)?;
                self.set_cursor(char_len(&value))?;
            }
            KeySequence::MoveLeft => self.handle_cursor_move(-1)?,
            KeySequence::MoveRight => self.handle_cursor_move(1)?,
            KeySequence::Home => self.set_cursor(0)?,
            KeySequence::End => self.set_cursor(char_len(&self.input))?,
            KeySequence::Delete => self.handle_cursor_erase(false)?,
            KeySequence::WordLeft => {
                if let Some(offset) = closest_left_boundary(&self.input, self.cursor) {
                    self.set_cursor(offset)?;
                }
            }
            KeySequence::WordRight => {
                if let Some(offset) = closest_right_boundary(&self.input, self.cursor) {
                    self.set_cursor(offset)?;
                }
            }
            KeySequence::EraseWordBackward => {
                if let Some(offset) = closest_left_boundary(&self.input, self.cursor) {
                    self.erase_to(offset)?;
                }
            }
            KeySequence::Enter => self.handle_enter()?,
            KeySequence::Backspace => self.handle_cursor_erase(true)?,
            KeySequence::Tab => self.handle_tab()?,
            KeySequence::Interrupt => self.handle_interrupt()?,
            KeySequence::UnknownEscape(_) | KeySequence::UnknownControl(_) => {}
            KeySequence::Insert(text) => self.handle_cursor_insert(&text)?,
        }

        ok!()
    }

    fn handle_enter(&mut self) -> Result<(), ReadlineError> {
        if self.is_input_incomplete() {
            self.handle_cursor_insert("\n")
        } else {
            self.handle_read_complete()
        }
    }

    /// Accept the input: save it to history, settle the pending read with it, and start a
    /// new line. The editor is idle afterwards, with an empty input.
    fn handle_read_complete(&mut self) -> Result<(), ReadlineError> {
        self.history.push(&self.input);
        self.history.rewind();
        let line = std::mem::take(&mut self.input);
        self.cursor = 0;
        self.is_active = false;

        DEBUG_READLINE_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "Read complete", line = ?line);
        });

        if let Some(active_prompt) = self.maybe_active_prompt.take() {
            active_prompt.sender.send(Ok(line)).ok();
        }

        self.output_device.write_str(CRLF)?;
        ok!()
    }

    /// Echo `^C`, start over on a fresh prompt. The read stays pending.
    fn handle_interrupt(&mut self) -> Result<(), ReadlineError> {
        self.set_cursor(char_len(&self.input))?;
        let echo = format!("^C{CRLF}{}", self.prompt());
        self.output_device.write_str(&echo)?;
        self.input.clear();
        self.cursor = 0;
        self.history.rewind();
        ok!()
    }

    fn handle_tab(&mut self) -> Result<(), ReadlineError> {
        if self.autocomplete_registry.is_empty() {
            return self.handle_cursor_insert(TAB_EXPANSION);
        }

        let input_fragment = char_slice(&self.input, 0, self.cursor).to_string();
        let candidates =
            collect_candidates(&self.autocomplete_registry.handlers, &input_fragment);
        let action = plan_completion(
            &input_fragment,
            candidates,
            self.options.max_autocomplete_entries,
        );

        match action {
            CompletionAction::None => ok!(),
            CompletionAction::InsertSpace => self.handle_cursor_insert(" "),
            CompletionAction::InsertUnique(text) => self.handle_cursor_insert(&text),
            CompletionAction::InsertAndList {
                maybe_insert,
                candidates,
            } => {
                if let Some(text) = maybe_insert {
                    self.handle_cursor_insert(&text)?;
                }
                let padding = self.options.print_wide_padding;
                self.print_and_restart_prompt(|editor| editor.print_wide(&candidates, padding))
            }
            CompletionAction::ConfirmThenList(candidates) => {
                let saved_cursor = self.begin_print_below_input()?;
                let prompt =
                    format!("Display all {} possibilities? (y or n)", candidates.len());
                self.start_char_read(
                    &prompt,
                    CharReadContinuation::CompletionConfirm {
                        candidates,
                        saved_cursor,
                    },
                )
            }
        }
    }

    /// The wrap points move when the width changes. So the input is cleared with the old
    /// width, and painted again with the new one.
    fn handle_resize(&mut self, new_size: TerminalSize) -> Result<(), ReadlineError> {
        if !self.is_active {
            self.term_size = new_size;
            return ok!();
        }

        self.clear_input()?;
        self.term_size = new_size;
        let input = self.input.clone();
        self.set_input(&input, false)
    }
}
