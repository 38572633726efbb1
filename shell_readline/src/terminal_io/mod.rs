// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod crossterm_bridge;
pub mod input_device;
pub mod output_device;
pub mod terminal_event;

// Re-export.
pub use crossterm_bridge::*;
pub use input_device::*;
pub use output_device::*;
pub use terminal_event::*;
