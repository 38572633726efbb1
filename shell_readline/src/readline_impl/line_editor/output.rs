// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::core::LineEditor;
use crate::{CRLF, ReadlineError, char_len, ok};

/// Collapses every run of `\r` and `\n` into a single `\r\n`.
#[must_use]
pub fn normalize_line_breaks(text: &str) -> String {
    let mut acc = String::with_capacity(text.len());
    let mut in_break_run = false;
    for ch in text.chars() {
        if ch == '\r' || ch == '\n' {
            if !in_break_run {
                acc.push_str(CRLF);
            }
            in_break_run = true;
        } else {
            acc.push(ch);
            in_break_run = false;
        }
    }
    acc
}

/// Lays out `items` in equal width columns, filling each row left to right. Each item
/// is padded with spaces to the column width. There is always at least one column.
#[must_use]
pub fn layout_wide(items: &[String], max_cols: usize, padding: usize) -> Vec<String> {
    let item_width = items.iter().map(|it| char_len(it)).max().unwrap_or(0) + padding;
    let column_count = (max_cols / item_width.max(1)).max(1);
    items
        .chunks(column_count)
        .map(|row_items| {
            row_items
                .iter()
                .map(|item| format!("{item}{}", " ".repeat(item_width - char_len(item))))
                .collect::<String>()
        })
        .collect()
}

impl LineEditor {
    /// Writes `text` with its line breaks normalized to `\r\n`. The prompt is not
    /// preserved when this is called during a read.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn print(&self, text: &str) -> Result<(), ReadlineError> {
        self.output_device.write_str(&normalize_line_breaks(text))?;
        ok!()
    }

    /// [`Self::print()`] followed by a line break.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn println(&self, text: &str) -> Result<(), ReadlineError> {
        self.print(&format!("{text}\n"))
    }

    /// Prints `items` in as many columns as fit the terminal width. See [`layout_wide`].
    /// Prints an empty line if there are no items.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn print_wide(&self, items: &[String], padding: usize) -> Result<(), ReadlineError> {
        if items.is_empty() {
            return self.println("");
        }
        for row in layout_wide(items, usize::from(self.term_size.columns), padding) {
            self.println(&row)?;
        }
        ok!()
    }

    /// First half of "print and restart prompt". Moves the cursor to the end of the
    /// input, and starts a new line. Returns the cursor offset to restore later.
    pub(crate) fn begin_print_below_input(&mut self) -> Result<usize, ReadlineError> {
        let saved_cursor = self.cursor;
        self.set_cursor(char_len(&self.input))?;
        self.output_device.write_str(CRLF)?;
        Ok(saved_cursor)
    }

    /// Second half of "print and restart prompt". Repaints the prompt and the input
    /// below whatever was printed, with the cursor back at `saved_cursor`. The caret is
    /// already on a fresh row, so nothing is cleared.
    pub(crate) fn restart_prompt(&mut self, saved_cursor: usize) -> Result<(), ReadlineError> {
        self.cursor = saved_cursor;
        let input = self.input.clone();
        self.set_input(&input, false)
    }

    /// Prints a listing below the input without losing the input. `print_fn` does the
    /// printing.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails, or `print_fn` fails.
    pub fn print_and_restart_prompt(
        &mut self,
        print_fn: impl FnOnce(&mut Self) -> Result<(), ReadlineError>,
    ) -> Result<(), ReadlineError> {
        let saved_cursor = self.begin_print_below_input()?;
        print_fn(self)?;
        self.restart_prompt(saved_cursor)
    }
}
