// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Mock input and output devices, so the editor can be driven without a real terminal.

// Attach sources.
pub mod input_device_fixtures;
pub mod output_device_fixtures;

// Re-export.
pub use input_device_fixtures::*;
pub use output_device_fixtures::*;
