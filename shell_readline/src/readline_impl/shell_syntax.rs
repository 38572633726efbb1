// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Shell-like lexical helpers: tokenization (POSIX quoting and escaping, via [`shlex`]),
//! trailing whitespace detection, and the multi-line continuation predicate.

use crate::CompletionError;

const ESCAPE_CHAR: char = '\\';

/// Caller supplied replacement for [`is_incomplete_input`]. Returns `true` when Enter
/// should insert a newline instead of completing the read.
pub type IncompleteInputPredicate = Box<dyn Fn(&str) -> bool + Send>;

/// Split `text` into shell tokens. Fails when quotes are unbalanced.
///
/// # Errors
///
/// Returns [`CompletionError::UnbalancedQuotes`] if the text can't be tokenized.
pub fn tokenize(text: &str) -> Result<Vec<String>, CompletionError> {
    shlex::split(text).ok_or_else(|| CompletionError::UnbalancedQuotes {
        input: text.to_string(),
    })
}

/// `true` if the char at `index` (in `chars`) is preceded by an odd number of escape
/// characters.
fn is_escaped(chars: &[char], index: usize) -> bool {
    let escape_run = chars[..index]
        .iter()
        .rev()
        .take_while(|it| **it == ESCAPE_CHAR)
        .count();
    escape_run % 2 == 1
}

/// `true` iff the text ends with whitespace that is not escaped.
#[must_use]
pub fn has_trailing_whitespace(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    match chars.last() {
        Some(last) if last.is_whitespace() => !is_escaped(&chars, chars.len() - 1),
        _ => false,
    }
}

/// The token that the cursor is currently completing. Empty if the text is blank, ends
/// in unescaped whitespace (a new token has not been started yet), or can't be
/// tokenized.
#[must_use]
pub fn get_last_token(text: &str) -> String {
    if text.trim().is_empty() || has_trailing_whitespace(text) {
        return String::new();
    }
    match tokenize(text) {
        Ok(mut tokens) => tokens.pop().unwrap_or_default(),
        Err(error) => {
            // % is Display, ? is Debug.
            tracing::debug!(message = "Could not tokenize input", error = %error);
            String::new()
        }
    }
}

/// Offset (in bytes) just past the last `&&`, `||`, or `|` operator in `text`.
fn end_of_last_operator(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut maybe_end = None;
    let mut index = 0;
    while index < bytes.len() {
        let rest = &bytes[index..];
        let op_len = if rest.starts_with(b"||") || rest.starts_with(b"&&") {
            2
        } else if rest.starts_with(b"|") {
            1
        } else {
            0
        };
        if op_len == 0 {
            index += 1;
        } else {
            index += op_len;
            maybe_end = Some(index);
        }
    }
    maybe_end
}

/// Decides whether Enter should continue the input on a new line. The input is
/// incomplete when any of these hold:
/// - odd number of unescaped `'`,
/// - odd number of unescaped `"`,
/// - it ends with a dangling `&&`, `||`, or `|`,
/// - it ends with an unescaped `\`.
///
/// Blank input is always complete.
#[must_use]
pub fn is_incomplete_input(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }

    let chars: Vec<char> = text.chars().collect();

    let (mut single_quotes, mut double_quotes) = (0_usize, 0_usize);
    for (index, ch) in chars.iter().enumerate() {
        match ch {
            '\'' if !is_escaped(&chars, index) => single_quotes += 1,
            '"' if !is_escaped(&chars, index) => double_quotes += 1,
            _ => {}
        }
    }
    if single_quotes % 2 == 1 || double_quotes % 2 == 1 {
        return true;
    }

    let ends_with_dangling_operator =
        end_of_last_operator(text).is_some_and(|op_end| text[op_end..].trim().is_empty());
    if ends_with_dangling_operator {
        return true;
    }

    // Trailing escape char, which itself isn't escaped.
    chars.last() == Some(&ESCAPE_CHAR) && !is_escaped(&chars, chars.len() - 1)
}
