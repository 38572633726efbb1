// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{pin::Pin,
          task::{Context, Poll}};

use tokio::sync::oneshot;

use super::core::{ActiveCharPrompt, ActivePrompt, CharReadContinuation, LineEditor};
use crate::{ABORT_REASON_DEFAULT, CRLF, ReadlineError, ok};

/// Future returned by [`LineEditor::read()`] and [`LineEditor::read_char()`].
///
/// - Resolves to the accepted line (without any prompts), or the single input chunk.
/// - Fails with [`ReadlineError::Aborted`] or [`ReadlineError::Superseded`] when the read
///   is cancelled, and [`ReadlineError::Closed`] if the editor is dropped first.
///
/// Dropping it does not cancel the read. Use [`LineEditor::abort_read()`] for that.
#[derive(Debug)]
pub struct PendingRead {
    receiver: oneshot::Receiver<Result<String, ReadlineError>>,
}

impl Future for PendingRead {
    type Output = Result<String, ReadlineError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver).poll(cx).map(|result| match result {
            Ok(it) => it,
            Err(_) => Err(ReadlineError::Closed),
        })
    }
}

impl PendingRead {
    fn new_pair() -> (oneshot::Sender<Result<String, ReadlineError>>, Self) {
        let (sender, receiver) = oneshot::channel();
        (sender, Self { receiver })
    }

    /// Returns the result if the read has already settled, without waiting.
    pub fn try_take(&mut self) -> Option<Result<String, ReadlineError>> {
        match self.receiver.try_recv() {
            Ok(it) => Some(it),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(ReadlineError::Closed)),
        }
    }
}

impl LineEditor {
    /// Writes `prompt` and starts a line read, with an empty input. A line read that is
    /// still pending fails with [`ReadlineError::Superseded`].
    ///
    /// # Errors
    ///
    /// Returns an error if writing the prompt fails.
    pub fn read(
        &mut self,
        prompt: &str,
        continuation_prompt: &str,
    ) -> Result<PendingRead, ReadlineError> {
        if let Some(old) = self.maybe_active_prompt.take() {
            // % is Display, ? is Debug.
            tracing::debug!(message = "Superseding pending line read", prompt = ?old.prompt);
            old.sender.send(Err(ReadlineError::Superseded)).ok();
        }

        self.output_device.write_str(prompt)?;

        let (sender, pending_read) = PendingRead::new_pair();
        self.maybe_active_prompt = Some(ActivePrompt {
            prompt: prompt.to_string(),
            continuation_prompt: continuation_prompt.to_string(),
            sender,
        });
        self.input.clear();
        self.cursor = 0;
        self.is_active = true;

        Ok(pending_read)
    }

    /// Writes `prompt` and starts a single character read. The next input chunk settles
    /// it, before any line editing sees that chunk. A pending single character read
    /// fails with [`ReadlineError::Superseded`].
    ///
    /// # Errors
    ///
    /// Returns an error if writing the prompt fails.
    pub fn read_char(&mut self, prompt: &str) -> Result<PendingRead, ReadlineError> {
        let (sender, pending_read) = PendingRead::new_pair();
        self.start_char_read(prompt, CharReadContinuation::External(sender))?;
        Ok(pending_read)
    }

    pub(crate) fn start_char_read(
        &mut self,
        prompt: &str,
        continuation: CharReadContinuation,
    ) -> Result<(), ReadlineError> {
        if let Some(old) = self.maybe_active_char_prompt.take() {
            reject_char_read(old, ReadlineError::Superseded);
        }

        self.output_device.write_str(prompt)?;

        self.maybe_active_char_prompt = Some(ActiveCharPrompt {
            prompt: prompt.to_string(),
            continuation,
        });
        ok!()
    }

    /// Fails any pending reads (line and single character) with
    /// [`ReadlineError::Aborted`], and deactivates the editor with an empty input. A line break is written if
    /// anything was pending. Calling it again is a no-op (apart from deactivating).
    ///
    /// # Errors
    ///
    /// Returns an error if writing the line break fails. The reads are rejected anyway.
    pub fn abort_read(&mut self, maybe_reason: Option<&str>) -> Result<(), ReadlineError> {
        let reason = maybe_reason.unwrap_or(ABORT_REASON_DEFAULT);
        let maybe_active_prompt = self.maybe_active_prompt.take();
        let maybe_active_char_prompt = self.maybe_active_char_prompt.take();
        self.is_active = false;
        self.input.clear();
        self.cursor = 0;

        let had_pending = maybe_active_prompt.is_some() || maybe_active_char_prompt.is_some();

        if let Some(active_prompt) = maybe_active_prompt {
            active_prompt
                .sender
                .send(Err(ReadlineError::Aborted(reason.to_string())))
                .ok();
        }
        if let Some(active_char_prompt) = maybe_active_char_prompt {
            reject_char_read(active_char_prompt, ReadlineError::Aborted(reason.to_string()));
        }

        if had_pending {
            // % is Display, ? is Debug.
            tracing::debug!(message = "Aborted pending reads", reason = %reason);
            self.output_device.write_str(CRLF)?;
        }
        ok!()
    }
}

/// The internal completion question has nobody to report to, so it is just dropped.
fn reject_char_read(active_char_prompt: ActiveCharPrompt, error: ReadlineError) {
    match active_char_prompt.continuation {
        CharReadContinuation::External(sender) => {
            sender.send(Err(error)).ok();
        }
        CharReadContinuation::CompletionConfirm { .. } => {}
    }
}
