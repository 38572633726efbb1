// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::core::LineEditor;
use crate::{CNL_CURSOR_NEXT_LINE, CPL_CURSOR_PREV_LINE, CR, CRLF, CUB_CURSOR_BACKWARD,
            CUD_CURSOR_DOWN, CUF_CURSOR_FORWARD, CUU_CURSOR_UP, EL_ERASE_LINE, ReadlineError,
            char_len, char_slice, count_lines, offset_to_col_row, ok};

impl LineEditor {
    fn max_cols(&self) -> usize { usize::from(self.term_size.columns) }

    /// The rendered view of `text`: the prompt, then `text` with the continuation prompt
    /// inserted after every newline.
    #[must_use]
    pub fn apply_prompts(&self, text: &str) -> String {
        let continuation = format!("\n{}", self.continuation_prompt());
        format!("{}{}", self.prompt(), text.replace('\n', &continuation))
    }

    /// Converts a `char` offset into `text` into a `char` offset into its rendered view.
    #[must_use]
    pub fn apply_prompt_offset(&self, text: &str, offset: usize) -> usize {
        char_len(&self.apply_prompts(char_slice(text, 0, offset)))
    }

    /// Erases the rendered view of the current input. The cursor ends up at column 0 of
    /// the first row of the prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn clear_input(&mut self) -> Result<(), ReadlineError> {
        let rendered = self.apply_prompts(&self.input);
        let all_rows = count_lines(&rendered, self.max_cols());
        let rendered_cursor = self.apply_prompt_offset(&self.input, self.cursor);
        let cursor_row = offset_to_col_row(&rendered, rendered_cursor, self.max_cols()).row;

        let mut acc = String::new();
        // Go to the last row.
        acc.push_str(&CNL_CURSOR_NEXT_LINE.repeat(all_rows.saturating_sub(cursor_row + 1)));
        // Erase it, then erase each row above it.
        acc.push_str(CR);
        acc.push_str(EL_ERASE_LINE);
        for _ in 1..all_rows {
            acc.push_str(CPL_CURSOR_PREV_LINE);
            acc.push_str(EL_ERASE_LINE);
        }

        self.output_device.write_str(&acc)?;
        ok!()
    }

    /// Paints the rendered view of `new_input` and places the cursor at the current
    /// cursor offset (clamped to `new_input`). When `clear` is false the caller must have
    /// already cleared the old input.
    ///
    /// The cursor is positioned from absolute row and column counts of what was just
    /// written: return to column 0, go up from the last row, then forward.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn set_input(&mut self, new_input: &str, clear: bool) -> Result<(), ReadlineError> {
        if clear {
            self.clear_input()?;
        }

        // One row per `\n`, empty rows included, so the screen matches `count_lines`.
        let rendered = self.apply_prompts(new_input);
        self.output_device.write_str(&rendered.replace('\n', CRLF))?;

        self.cursor = self.cursor.min(char_len(new_input));
        let rendered_cursor = self.apply_prompt_offset(new_input, self.cursor);
        let all_rows = count_lines(&rendered, self.max_cols());
        let target = offset_to_col_row(&rendered, rendered_cursor, self.max_cols());

        let mut acc = String::from(CR);
        acc.push_str(&CPL_CURSOR_PREV_LINE.repeat(all_rows.saturating_sub(target.row + 1)));
        acc.push_str(&CUF_CURSOR_FORWARD.repeat(target.col));
        self.output_device.write_str(&acc)?;

        self.input = new_input.to_string();
        ok!()
    }

    /// Moves the cursor to `new_cursor` (clamped to the input) using relative moves:
    /// vertical first, then horizontal.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn set_cursor(&mut self, new_cursor: usize) -> Result<(), ReadlineError> {
        let new_cursor = new_cursor.min(char_len(&self.input));
        let rendered = self.apply_prompts(&self.input);

        let prev = offset_to_col_row(
            &rendered,
            self.apply_prompt_offset(&self.input, self.cursor),
            self.max_cols(),
        );
        let next = offset_to_col_row(
            &rendered,
            self.apply_prompt_offset(&self.input, new_cursor),
            self.max_cols(),
        );

        let mut acc = String::new();
        if next.row > prev.row {
            acc.push_str(&CUD_CURSOR_DOWN.repeat(next.row - prev.row));
        } else {
            acc.push_str(&CUU_CURSOR_UP.repeat(prev.row - next.row));
        }
        if next.col > prev.col {
            acc.push_str(&CUF_CURSOR_FORWARD.repeat(next.col - prev.col));
        } else {
            acc.push_str(&CUB_CURSOR_BACKWARD.repeat(prev.col - next.col));
        }
        self.output_device.write_str(&acc)?;

        self.cursor = new_cursor;
        ok!()
    }

    /// Moves the cursor by `delta` chars, clamped to the input.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn handle_cursor_move(&mut self, delta: isize) -> Result<(), ReadlineError> {
        let new_cursor = if delta >= 0 {
            self.cursor.saturating_add(delta.unsigned_abs())
        } else {
            self.cursor.saturating_sub(delta.unsigned_abs())
        };
        self.set_cursor(new_cursor.min(char_len(&self.input)))
    }

    /// Backspace removes the char before the cursor, delete removes the char at the
    /// cursor. Both are no-ops when there is nothing to remove.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn handle_cursor_erase(&mut self, is_backspace: bool) -> Result<(), ReadlineError> {
        let len = char_len(&self.input);
        if is_backspace {
            if self.cursor == 0 {
                return ok!();
            }
            let new_input = format!(
                "{}{}",
                char_slice(&self.input, 0, self.cursor - 1),
                char_slice(&self.input, self.cursor, len)
            );
            self.clear_input()?;
            self.cursor -= 1;
            self.set_input(&new_input, false)
        } else {
            if self.cursor >= len {
                return ok!();
            }
            let new_input = format!(
                "{}{}",
                char_slice(&self.input, 0, self.cursor),
                char_slice(&self.input, self.cursor + 1, len)
            );
            self.set_input(&new_input, true)
        }
    }

    /// Inserts `text` at the cursor and moves the cursor past it. Any `\r\n` or lone `\r`
    /// in `text` is stored as `\n`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn handle_cursor_insert(&mut self, text: &str) -> Result<(), ReadlineError> {
        let text = &text.replace(CRLF, "\n").replace('\r', "\n");
        let len = char_len(&self.input);
        let new_input = format!(
            "{}{}{}",
            char_slice(&self.input, 0, self.cursor),
            text,
            char_slice(&self.input, self.cursor, len)
        );
        // Clear with the cursor where it is on screen, before it moves.
        self.clear_input()?;
        self.cursor += char_len(text);
        self.set_input(&new_input, false)
    }

    /// Removes the chars between `word_start` and the cursor, and leaves the cursor at
    /// `word_start`.
    pub(crate) fn erase_to(&mut self, word_start: usize) -> Result<(), ReadlineError> {
        let len = char_len(&self.input);
        let new_input = format!(
            "{}{}",
            char_slice(&self.input, 0, word_start),
            char_slice(&self.input, self.cursor, len)
        );
        self.set_input(&new_input, true)?;
        self.set_cursor(word_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OutputDevice, OutputDeviceExt, ReadlineOptions, StdoutMock, TerminalSize};

    fn editor_with_prompt(
        columns: u16,
        prompt: &str,
        continuation_prompt: &str,
    ) -> (LineEditor, StdoutMock) {
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let mut editor = LineEditor::new(
            output_device,
            TerminalSize::new(columns, 24),
            ReadlineOptions::default(),
        );
        drop(editor.read(prompt, continuation_prompt).unwrap());
        stdout_mock.take_buffer_as_string();
        (editor, stdout_mock)
    }

    #[test]
    fn test_apply_prompts_and_offset() {
        let (editor, _) = editor_with_prompt(80, "$ ", "> ");
        assert_eq!(editor.apply_prompts("echo \"a\nb\""), "$ echo \"a\n> b\"");
        assert_eq!(editor.apply_prompt_offset("echo \"a\nb\"", 0), 2);
        assert_eq!(editor.apply_prompt_offset("echo \"a\nb\"", 8), 12);
    }

    #[test]
    fn test_set_input_on_single_row() {
        let (mut editor, stdout_mock) = editor_with_prompt(80, "$ ", "> ");
        editor.cursor = 2;
        editor.set_input("ls -la", false).unwrap();
        // Write, back to column 0, then forward past the prompt and 2 chars.
        assert_eq!(
            stdout_mock.take_buffer_as_string(),
            format!("$ ls -la\r{}", "\x1b[C".repeat(4))
        );
        assert_eq!(editor.input(), "ls -la");
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn test_set_input_clamps_cursor_and_goes_up_from_last_row() {
        let (mut editor, stdout_mock) = editor_with_prompt(80, "$ ", "> ");
        editor.cursor = 100;
        editor.set_input("a\nbc", false).unwrap();
        // Cursor clamps to 4, which is on the last row, col 2 + 2.
        assert_eq!(editor.cursor(), 4);
        assert_eq!(
            stdout_mock.take_buffer_as_string(),
            format!("$ a\r\n> bc\r{}", "\x1b[C".repeat(4))
        );

        editor.cursor = 0;
        editor.set_input("a\nbc", false).unwrap();
        assert_eq!(
            stdout_mock.take_buffer_as_string(),
            "$ a\r\n> bc\r\x1b[F\x1b[C\x1b[C"
        );
    }

    #[test]
    fn test_clear_input_from_middle_row() {
        let (mut editor, stdout_mock) = editor_with_prompt(80, "$ ", "> ");
        editor.input = "a\nb\nc".to_string();
        editor.cursor = 3; // Row 1.
        editor.clear_input().unwrap();
        assert_eq!(
            stdout_mock.take_buffer_as_string(),
            "\x1b[E\r\x1b[K\x1b[F\x1b[K\x1b[F\x1b[K"
        );
    }

    #[test]
    fn test_clear_input_counts_wrapped_rows() {
        // "$ " + 10 chars on a 5 column terminal wraps onto 3 rows.
        let (mut editor, stdout_mock) = editor_with_prompt(5, "$ ", "> ");
        editor.input = "0123456789".to_string();
        editor.cursor = 10;
        editor.clear_input().unwrap();
        assert_eq!(
            stdout_mock.take_buffer_as_string(),
            "\r\x1b[K\x1b[F\x1b[K\x1b[F\x1b[K"
        );
    }

    #[test]
    fn test_set_cursor_moves_relative_and_clamps() {
        let (mut editor, stdout_mock) = editor_with_prompt(80, "$ ", "> ");
        editor.input = "ab\ncd".to_string();
        editor.cursor = 5;

        editor.set_cursor(1).unwrap();
        // Row 1 col 4 -> row 0 col 3.
        assert_eq!(stdout_mock.take_buffer_as_string(), "\x1b[A\x1b[D");
        assert_eq!(editor.cursor(), 1);

        editor.set_cursor(99).unwrap();
        assert_eq!(stdout_mock.take_buffer_as_string(), "\x1b[B\x1b[C");
        assert_eq!(editor.cursor(), 5);
    }

    #[test]
    fn test_cursor_move_is_clamped_at_both_ends() {
        let (mut editor, stdout_mock) = editor_with_prompt(80, "$ ", "> ");
        editor.set_input("hi", false).unwrap();
        editor.cursor = 0;
        stdout_mock.take_buffer_as_string();

        editor.handle_cursor_move(-1).unwrap();
        assert_eq!(editor.cursor(), 0);
        assert_eq!(stdout_mock.take_buffer_as_string(), "");

        editor.handle_cursor_move(5).unwrap();
        assert_eq!(editor.cursor(), 2);
        assert_eq!(stdout_mock.take_buffer_as_string(), "\x1b[C\x1b[C");
    }

    #[test]
    fn test_insert_and_erase() {
        let (mut editor, _) = editor_with_prompt(80, "$ ", "> ");
        editor.handle_cursor_insert("hllo").unwrap();
        editor.cursor = 1;
        editor.handle_cursor_insert("e").unwrap();
        assert_eq!((editor.input(), editor.cursor()), ("hello", 2));

        editor.handle_cursor_erase(true).unwrap();
        assert_eq!((editor.input(), editor.cursor()), ("hllo", 1));

        editor.handle_cursor_erase(false).unwrap();
        assert_eq!((editor.input(), editor.cursor()), ("hlo", 1));

        editor.cursor = 0;
        editor.handle_cursor_erase(true).unwrap();
        assert_eq!((editor.input(), editor.cursor()), ("hlo", 0));

        editor.cursor = 3;
        editor.handle_cursor_erase(false).unwrap();
        assert_eq!((editor.input(), editor.cursor()), ("hlo", 3));
    }

    #[test]
    fn test_insert_multibyte_chars_uses_char_offsets() {
        let (mut editor, stdout_mock) = editor_with_prompt(80, "> ", "");
        editor.handle_cursor_insert("héllo").unwrap();
        assert_eq!(editor.cursor(), 5);
        editor.handle_cursor_move(-1).unwrap();
        editor.handle_cursor_insert("ö").unwrap();
        assert_eq!(editor.input(), "héllöo");
        assert!(
            stdout_mock
                .get_copy_of_buffer_as_string()
                .ends_with("> héllöo\r\x1b[C\x1b[C\x1b[C\x1b[C\x1b[C\x1b[C\x1b[C")
        );
    }

    #[test]
    fn test_empty_continuation_prompt_paints_every_row() {
        let (mut editor, stdout_mock) = editor_with_prompt(80, "$ ", "");
        editor.handle_cursor_insert("e'").unwrap();
        editor.handle_cursor_insert("\n").unwrap();
        stdout_mock.take_buffer_as_string();

        editor.handle_cursor_insert("\n").unwrap();
        assert_eq!(
            stdout_mock.take_buffer_as_string(),
            "\r\x1b[K\x1b[F\x1b[K$ e'\r\n\r\n\r"
        );

        // All 3 painted rows are erased, and no more.
        editor.clear_input().unwrap();
        assert_eq!(
            stdout_mock.take_buffer_as_string(),
            "\r\x1b[K\x1b[F\x1b[K\x1b[F\x1b[K"
        );
    }

    #[test]
    fn test_insert_stores_carriage_returns_as_newlines() {
        let (mut editor, stdout_mock) = editor_with_prompt(80, "$ ", "> ");
        editor.handle_cursor_insert("a\rb").unwrap();
        assert_eq!((editor.input(), editor.cursor()), ("a\nb", 3));
        assert_eq!(
            stdout_mock.take_buffer_as_string(),
            format!("\r\x1b[K$ a\r\n> b\r{}", "\x1b[C".repeat(3))
        );
        editor.handle_cursor_insert("\r\nc").unwrap();
        assert_eq!(editor.input(), "a\nb\nc");
    }

    #[test]
    fn test_erase_to_word_start() {
        let (mut editor, _) = editor_with_prompt(80, "$ ", "> ");
        editor.handle_cursor_insert("git commit").unwrap();
        editor.erase_to(4).unwrap();
        assert_eq!((editor.input(), editor.cursor()), ("git ", 4));
    }
}
