// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Debug, Formatter};

use tokio::sync::oneshot;

use crate::{AutocompleteRegistry, History, IncompleteInputPredicate, OutputDevice,
            ReadlineError, ReadlineOptions, SafeAutocompleteFn, TerminalSize,
            is_incomplete_input};

/// Settles a [`crate::PendingRead`].
pub type ReadResultSender = oneshot::Sender<Result<String, ReadlineError>>;

/// The line read in progress. The prompts are fixed for the lifetime of the read.
#[derive(Debug)]
pub struct ActivePrompt {
    pub prompt: String,
    pub continuation_prompt: String,
    pub(crate) sender: ReadResultSender,
}

/// Who gets the answer to a single character read.
#[derive(Debug)]
pub enum CharReadContinuation {
    /// A caller of [`LineEditor::read_char()`].
    External(ReadResultSender),
    /// The "Display all N possibilities?" question asked by Tab. The listing is printed
    /// on `y` or `Y`, and then the prompt line is restored with the cursor at
    /// `saved_cursor`.
    CompletionConfirm {
        candidates: Vec<String>,
        saved_cursor: usize,
    },
}

#[derive(Debug)]
pub struct ActiveCharPrompt {
    pub prompt: String,
    pub(crate) continuation: CharReadContinuation,
}

/// This struct handles the line editing, and the rendering of the input to a write-only
/// terminal. It is driven by [`LineEditor::handle_event()`], and it reports accepted
/// lines through the [`crate::PendingRead`] futures returned by [`LineEditor::read()`]
/// and [`LineEditor::read_char()`].
///
/// There is no concurrency inside: each event is processed to completion before the
/// next one is handled. Providers and the continuation predicate are called
/// synchronously, and must not call back into the editor.
pub struct LineEditor {
    pub(crate) output_device: OutputDevice,
    pub(crate) options: ReadlineOptions,
    pub(crate) term_size: TerminalSize,

    /// Lives as long as the editor. Not reset between reads.
    pub(crate) history: History,
    pub(crate) autocomplete_registry: AutocompleteRegistry,
    pub(crate) maybe_incomplete_input_predicate: Option<IncompleteInputPredicate>,

    /// The text the user is composing, without any prompts.
    pub(crate) input: String,
    /// `char` offset into `input`, in `0..=input.chars().count()`.
    pub(crate) cursor: usize,

    /// `true` while a line read is pending.
    pub(crate) is_active: bool,
    pub(crate) maybe_active_prompt: Option<ActivePrompt>,
    pub(crate) maybe_active_char_prompt: Option<ActiveCharPrompt>,
}

impl Debug for LineEditor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineEditor")
            .field("options", &self.options)
            .field("term_size", &self.term_size)
            .field("history", &self.history)
            .field("autocomplete_registry", &self.autocomplete_registry)
            .field("input", &self.input)
            .field("cursor", &self.cursor)
            .field("is_active", &self.is_active)
            .field("maybe_active_prompt", &self.maybe_active_prompt)
            .field("maybe_active_char_prompt", &self.maybe_active_char_prompt)
            .finish_non_exhaustive()
    }
}

impl LineEditor {
    #[must_use]
    pub fn new(
        output_device: OutputDevice,
        term_size: TerminalSize,
        options: ReadlineOptions,
    ) -> Self {
        Self {
            output_device,
            history: History::new(options.history_size),
            options,
            term_size,
            autocomplete_registry: AutocompleteRegistry::default(),
            maybe_incomplete_input_predicate: None,
            input: String::new(),
            cursor: 0,
            is_active: false,
            maybe_active_prompt: None,
            maybe_active_char_prompt: None,
        }
    }

    #[must_use]
    pub fn options(&self) -> &ReadlineOptions { &self.options }

    /// `true` while a line read is pending.
    #[must_use]
    pub fn is_active(&self) -> bool { self.is_active }

    /// `true` while a single character read is pending.
    #[must_use]
    pub fn is_char_read_pending(&self) -> bool { self.maybe_active_char_prompt.is_some() }

    #[must_use]
    pub fn input(&self) -> &str { &self.input }

    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    #[must_use]
    pub fn terminal_size(&self) -> TerminalSize { self.term_size }

    #[must_use]
    pub fn history(&self) -> &History { &self.history }

    pub fn history_mut(&mut self) -> &mut History { &mut self.history }

    /// Prompt of the pending line read. Empty when there is none.
    #[must_use]
    pub fn prompt(&self) -> &str {
        self.maybe_active_prompt
            .as_ref()
            .map_or("", |it| it.prompt.as_str())
    }

    /// Continuation prompt of the pending line read. Empty when there is none.
    #[must_use]
    pub fn continuation_prompt(&self) -> &str {
        self.maybe_active_prompt
            .as_ref()
            .map_or("", |it| it.continuation_prompt.as_str())
    }
}

impl LineEditor {
    /// Register a completion provider. `args` are passed to every invocation of it.
    pub fn add_autocomplete_handler(&mut self, handler_fn: SafeAutocompleteFn, args: Vec<String>) {
        self.autocomplete_registry.add(handler_fn, args);
    }

    /// Unregister the first registration of `handler_fn` (compared by [`std::sync::Arc`]
    /// identity). Returns `false` if it wasn't registered.
    pub fn remove_autocomplete_handler(&mut self, handler_fn: &SafeAutocompleteFn) -> bool {
        self.autocomplete_registry.remove(handler_fn)
    }

    /// Replace the default continuation predicate ([`is_incomplete_input`]).
    pub fn set_incomplete_input_predicate(&mut self, predicate: IncompleteInputPredicate) {
        self.maybe_incomplete_input_predicate = Some(predicate);
    }

    /// Go back to [`is_incomplete_input`].
    pub fn reset_incomplete_input_predicate(&mut self) {
        self.maybe_incomplete_input_predicate = None;
    }

    pub(crate) fn is_input_incomplete(&self) -> bool {
        match &self.maybe_incomplete_input_predicate {
            Some(predicate) => predicate(&self.input),
            None => is_incomplete_input(&self.input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OutputDeviceExt, create_autocomplete_fn};

    fn new_editor() -> LineEditor {
        let (output_device, _) = OutputDevice::new_mock();
        LineEditor::new(
            output_device,
            TerminalSize::new(80, 24),
            ReadlineOptions {
                history_size: 3,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_new_editor_is_idle() {
        let editor = new_editor();
        assert!(!editor.is_active());
        assert!(!editor.is_char_read_pending());
        assert_eq!(editor.input(), "");
        assert_eq!(editor.cursor(), 0);
        assert_eq!(editor.prompt(), "");
        assert_eq!(editor.continuation_prompt(), "");
        assert_eq!(editor.terminal_size(), TerminalSize::new(80, 24));
        assert_eq!(editor.history().max_size, 3);
    }

    #[test]
    fn test_predicate_override_and_reset() {
        let mut editor = new_editor();
        editor.input = "echo 'a".to_string();
        assert!(editor.is_input_incomplete());

        editor.set_incomplete_input_predicate(Box::new(|text: &str| text.ends_with(';')));
        assert!(!editor.is_input_incomplete());
        editor.input = "x;".to_string();
        assert!(editor.is_input_incomplete());

        editor.reset_incomplete_input_predicate();
        assert!(!editor.is_input_incomplete());
    }

    #[test]
    fn test_add_and_remove_autocomplete_handler() {
        let mut editor = new_editor();
        let provider: SafeAutocompleteFn = create_autocomplete_fn(|_, _, _| Ok(vec![]));
        editor.add_autocomplete_handler(provider.clone(), vec![]);
        assert_eq!(editor.autocomplete_registry.len(), 1);
        assert!(editor.remove_autocomplete_handler(&provider));
        assert!(!editor.remove_autocomplete_handler(&provider));
    }
}
