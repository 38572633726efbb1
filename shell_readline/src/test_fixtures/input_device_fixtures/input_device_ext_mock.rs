// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{gen_input_stream, gen_input_stream_with_delay};
use crate::{InlineVec, InputDevice, TerminalEventResult};
use std::time::Duration;

pub trait InputDeviceExt {
    fn new_mock(generator_vec: InlineVec<TerminalEventResult>) -> InputDevice;

    fn new_mock_with_delay(
        generator_vec: InlineVec<TerminalEventResult>,
        delay: Duration,
    ) -> InputDevice;
}

impl InputDeviceExt for InputDevice {
    fn new_mock(generator_vec: InlineVec<TerminalEventResult>) -> InputDevice {
        InputDevice::new_from_stream(gen_input_stream(generator_vec))
    }

    fn new_mock_with_delay(
        generator_vec: InlineVec<TerminalEventResult>,
        delay: Duration,
    ) -> InputDevice {
        InputDevice::new_from_stream(gen_input_stream_with_delay(generator_vec, delay))
    }
}
