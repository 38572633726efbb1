// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::IsTerminal as _;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use miette::IntoDiagnostic as _;

use crate::{IncompleteInputPredicate, InputDevice, LineEditor, OutputDevice, PendingRead,
            ReadlineError, ReadlineOptions, SafeAutocompleteFn, TerminalSize};

/// # Mental model and overview
///
/// [`LineEditor`] is a synchronous state machine: it has to be fed input events, and it
/// reports accepted lines through [`PendingRead`] futures. This struct pairs it with an
/// [`InputDevice`], and each call to [`Self::read_line()`] or [`Self::read_char()`]
/// pumps events from the device into the editor until the read settles.
///
/// Events that arrive between reads stay queued in the input device, they are not lost.
///
/// # Inputs and dependency injection
///
/// [`Self::try_new()`] attaches to the real terminal (via crossterm). For tests, or to
/// run the editor over some other transport, use [`Self::new_with_devices()`] with
/// [`crate::InputDeviceExt::new_mock()`] and [`crate::OutputDeviceExt::new_mock()`].
///
/// # How to terminate the session
///
/// Drop it. If it put the terminal in raw mode, raw mode is disabled.
#[allow(missing_debug_implementations)]
pub struct ReadlineAsync {
    pub line_editor: LineEditor,
    pub input_device: InputDevice,
    is_raw_mode_enabled: bool,
}

impl ReadlineAsync {
    /// Returns [None] if stdin or stdout is not an interactive terminal (eg: they are
    /// piped). Otherwise the terminal is put in raw mode until this is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal size can't be read, or raw mode can't be enabled.
    pub fn try_new(options: ReadlineOptions) -> miette::Result<Option<ReadlineAsync>> {
        if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
            tracing::debug!(message = "Not an interactive terminal, no readline");
            return Ok(None);
        }

        let term_size = TerminalSize::try_get()?;
        enable_raw_mode().into_diagnostic()?;

        let mut it = Self::new_with_devices(
            options,
            InputDevice::new_crossterm_event_stream(),
            OutputDevice::new_stdout(),
            term_size,
        );
        it.is_raw_mode_enabled = true;

        // % is Display, ? is Debug.
        tracing::debug!(message = "Attached to terminal", term_size = ?term_size);
        Ok(Some(it))
    }

    #[must_use]
    pub fn new_with_devices(
        options: ReadlineOptions,
        input_device: InputDevice,
        output_device: OutputDevice,
        term_size: TerminalSize,
    ) -> ReadlineAsync {
        ReadlineAsync {
            line_editor: LineEditor::new(output_device, term_size, options),
            input_device,
            is_raw_mode_enabled: false,
        }
    }

    /// Reads a line. The continuation prompt defaults to the one in the options.
    ///
    /// # Errors
    ///
    /// Returns an error if the read is aborted, the input device is closed, or
    /// terminal I/O fails.
    pub async fn read_line(
        &mut self,
        prompt: &str,
        maybe_continuation_prompt: Option<&str>,
    ) -> miette::Result<String> {
        let continuation_prompt = maybe_continuation_prompt
            .map(ToString::to_string)
            .unwrap_or_else(|| self.line_editor.options().continuation_prompt.clone());
        let pending_read = self.line_editor.read(prompt, &continuation_prompt)?;
        Ok(self.pump_until_settled(pending_read).await?)
    }

    /// Reads the next input chunk (usually one key press).
    ///
    /// # Errors
    ///
    /// Returns an error if the read is aborted, the input device is closed, or
    /// terminal I/O fails.
    pub async fn read_char(&mut self, prompt: &str) -> miette::Result<String> {
        let pending_read = self.line_editor.read_char(prompt)?;
        Ok(self.pump_until_settled(pending_read).await?)
    }

    /// Feeds input events to the editor until `pending_read` settles. If the input device
    /// ends first, the pending reads are aborted and [`ReadlineError::Closed`] is
    /// returned.
    async fn pump_until_settled(
        &mut self,
        mut pending_read: PendingRead,
    ) -> Result<String, ReadlineError> {
        loop {
            tokio::select! {
                // Check the read first, so no event is consumed after it has settled.
                biased;

                result = &mut pending_read => return result,

                maybe_event = self.input_device.next() => match maybe_event {
                    Some(Ok(event)) => self.line_editor.handle_event(event)?,
                    Some(Err(error)) => {
                        // % is Display, ? is Debug.
                        tracing::error!(message = "Input device error", error = ?error);
                        self.line_editor.abort_read(Some("input device error"))?;
                        return Err(ReadlineError::IO(error));
                    }
                    None => {
                        tracing::debug!(message = "Input device closed");
                        self.line_editor.abort_read(Some("input closed"))?;
                        return Err(ReadlineError::Closed);
                    }
                },
            }
        }
    }
}

impl ReadlineAsync {
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn abort_read(&mut self, maybe_reason: Option<&str>) -> miette::Result<()> {
        Ok(self.line_editor.abort_read(maybe_reason)?)
    }

    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn print(&self, text: &str) -> miette::Result<()> { Ok(self.line_editor.print(text)?) }

    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn println(&self, text: &str) -> miette::Result<()> {
        Ok(self.line_editor.println(text)?)
    }

    /// Prints `items` in columns, using the padding from the options.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn print_wide(&self, items: &[String]) -> miette::Result<()> {
        let padding = self.line_editor.options().print_wide_padding;
        Ok(self.line_editor.print_wide(items, padding)?)
    }

    pub fn add_autocomplete_handler(&mut self, handler_fn: SafeAutocompleteFn, args: Vec<String>) {
        self.line_editor.add_autocomplete_handler(handler_fn, args);
    }

    pub fn remove_autocomplete_handler(&mut self, handler_fn: &SafeAutocompleteFn) -> bool {
        self.line_editor.remove_autocomplete_handler(handler_fn)
    }

    pub fn set_incomplete_input_predicate(&mut self, predicate: IncompleteInputPredicate) {
        self.line_editor.set_incomplete_input_predicate(predicate);
    }
}

impl Drop for ReadlineAsync {
    fn drop(&mut self) {
        if self.is_raw_mode_enabled {
            if let Err(error) = disable_raw_mode() {
                // % is Display, ? is Debug.
                tracing::error!(message = "Could not disable raw mode", error = ?error);
            }
        }
    }
}
