// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io::Write, sync::{Arc, MutexGuard, PoisonError}};

use crate::{SafeRawTerminal, SendRawTerminal, StdMutex};

pub type LockedOutputDevice<'a> = &'a mut dyn std::io::Write;

/// Macro to simplify locking and getting a mutable reference to the output device.
/// Don't call this again in the same scope, it will deadlock! A safe approach is
/// to use this macro in a separate block scope.
///
/// Usage example:
/// ```
/// use r3bl_shell_readline::{lock_output_device_as_mut, OutputDevice, LockedOutputDevice};
/// let device = OutputDevice::new_stdout();
/// { // Start a new block scope to avoid deadlock.
///     let mut_ref: LockedOutputDevice<'_> = lock_output_device_as_mut!(device);
///     let _ = mut_ref.write_all(b"Hello, world!\n");
/// } // The lock is released here.
/// ```
#[macro_export]
macro_rules! lock_output_device_as_mut {
    ($device:expr) => {
        &mut *$device.lock()
    };
}

/// The write-only side of the terminal surface. It is safe to clone, all clones write
/// to the same resource. See [`crate::OutputDeviceExt`] for testing features.
#[derive(Clone)]
#[allow(missing_debug_implementations)]
pub struct OutputDevice {
    pub resource: SafeRawTerminal,
    pub is_mock: bool,
}

impl Default for OutputDevice {
    fn default() -> Self { Self::new_stdout() }
}

impl OutputDevice {
    #[must_use]
    pub fn new_stdout() -> Self {
        Self {
            resource: Arc::new(StdMutex::new(std::io::stdout())),
            is_mock: false,
        }
    }

    /// Wrap any writer, eg: a socket or a PTY master.
    #[must_use]
    pub fn new_from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            resource: Arc::new(StdMutex::new(writer)),
            is_mock: false,
        }
    }
}

impl OutputDevice {
    /// Locks the output device for writing. A poisoned lock is recovered, since the
    /// writer holds no invariants of its own.
    pub fn lock(&self) -> MutexGuard<'_, SendRawTerminal> {
        self.resource.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Writes `text` as is, and flushes.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to or flushing the underlying resource fails.
    pub fn write_str(&self, text: &str) -> std::io::Result<()> {
        let mut_ref: LockedOutputDevice<'_> = lock_output_device_as_mut!(self);
        mut_ref.write_all(text.as_bytes())?;
        mut_ref.flush()
    }
}
