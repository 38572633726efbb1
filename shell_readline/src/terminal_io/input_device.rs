// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::EventStream;
use futures_util::{FutureExt, StreamExt, future};

use crate::{PinnedInputStream, TerminalEventResult, convert_crossterm_event};

/// The input side of the terminal surface: a stream of [`crate::TerminalEvent`]s. See
/// [`crate::InputDeviceExt`] for testing features.
#[allow(missing_debug_implementations)]
pub struct InputDevice {
    pub resource: PinnedInputStream<TerminalEventResult>,
}

impl InputDevice {
    /// Reads the real terminal via crossterm, and translates key presses back into the
    /// raw byte sequences that the editor understands. Events with no such translation
    /// (mouse, focus, key releases) are dropped.
    #[must_use]
    pub fn new_crossterm_event_stream() -> InputDevice {
        let it = EventStream::new().filter_map(|result| {
            future::ready(match result {
                Ok(event) => convert_crossterm_event(event).map(Ok),
                Err(error) => Some(Err(error)),
            })
        });
        InputDevice {
            resource: Box::pin(it),
        }
    }

    /// Wrap any stream of events, eg: one fed from a socket.
    #[must_use]
    pub fn new_from_stream(resource: PinnedInputStream<TerminalEventResult>) -> InputDevice {
        InputDevice { resource }
    }
}

impl InputDevice {
    /// Returns [None] once the stream has ended.
    pub async fn next(&mut self) -> Option<TerminalEventResult> {
        self.resource.next().fuse().await
    }
}
