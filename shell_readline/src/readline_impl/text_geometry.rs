// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Pure functions that map a string and a terminal width to row / column coordinates,
//! and that find word boundaries. All offsets are `char` offsets (not byte offsets).
//! Each `char` occupies exactly one terminal column; wide glyphs are not accounted for.

use crate::InlineVec;

/// Position of the caret relative to the first cell that the text was written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColRow {
    pub col: usize,
    pub row: usize,
}

/// Which end of a word run a boundary refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundarySide {
    /// Offset where a run of word characters begins.
    Left,
    /// Offset just past the last character of a run of word characters.
    Right,
}

/// Word characters are `[A-Za-z0-9_]`.
#[must_use]
pub fn is_word_char(ch: char) -> bool { ch.is_ascii_alphanumeric() || ch == '_' }

/// Returns the offsets where maximal runs of word characters begin
/// ([`BoundarySide::Left`]) or end ([`BoundarySide::Right`]), in left to right order.
#[must_use]
pub fn word_boundaries(text: &str, side: BoundarySide) -> InlineVec<usize> {
    let mut acc = InlineVec::new();
    let mut push_run = |start: usize, end: usize| match side {
        BoundarySide::Left => acc.push(start),
        BoundarySide::Right => acc.push(end),
    };

    let mut maybe_run_start: Option<usize> = None;
    let mut char_count = 0;
    for (index, ch) in text.chars().enumerate() {
        char_count = index + 1;
        match (is_word_char(ch), maybe_run_start) {
            (true, None) => maybe_run_start = Some(index),
            (false, Some(run_start)) => {
                push_run(run_start, index);
                maybe_run_start = None;
            }
            _ => {}
        }
    }
    if let Some(run_start) = maybe_run_start {
        push_run(run_start, char_count);
    }

    acc
}

/// Nearest word start strictly before `offset`. [None] when there is no word start to
/// the left, in which case the caller should not move the cursor.
#[must_use]
pub fn closest_left_boundary(text: &str, offset: usize) -> Option<usize> {
    word_boundaries(text, BoundarySide::Left)
        .into_iter()
        .rev()
        .find(|it| *it < offset)
}

/// Nearest word end strictly after `offset`. [None] when there is no word end to the
/// right, in which case the caller should not move the cursor.
#[must_use]
pub fn closest_right_boundary(text: &str, offset: usize) -> Option<usize> {
    word_boundaries(text, BoundarySide::Right)
        .into_iter()
        .find(|it| *it > offset)
}

/// Simulates the caret advancing over the first `offset` characters of `text`, on a
/// terminal that is `max_cols` wide.
///
/// - `\n` resets the column to 0 and moves to the next row.
/// - Any other character advances the column by one. When the column goes past
///   `max_cols` it wraps to column 0 of the next row.
///
/// This has to match what the real terminal does with plain text, since every repaint
/// is computed from it.
#[must_use]
pub fn offset_to_col_row(text: &str, offset: usize, max_cols: usize) -> ColRow {
    let mut it = ColRow::default();
    for ch in text.chars().take(offset) {
        if ch == '\n' {
            it.col = 0;
            it.row += 1;
        } else {
            it.col += 1;
            if it.col > max_cols {
                it.col = 0;
                it.row += 1;
            }
        }
    }
    it
}

/// Number of terminal rows that `text` occupies. Always at least 1.
#[must_use]
pub fn count_lines(text: &str, max_cols: usize) -> usize {
    offset_to_col_row(text, char_len(text), max_cols).row + 1
}

#[must_use]
pub fn char_len(text: &str) -> usize { text.chars().count() }

/// Converts a `char` offset into a byte index that is safe to slice `text` with. Offsets
/// past the end are clamped to `text.len()`.
#[must_use]
pub fn byte_index(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map_or(text.len(), |(byte_index, _)| byte_index)
}

/// The characters in `[start, end)`, with both ends clamped to the text.
#[must_use]
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let start = byte_index(text, start);
    let end = byte_index(text, end).max(start);
    &text[start..end]
}
