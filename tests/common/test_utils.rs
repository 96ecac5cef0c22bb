//! Test utilities and helper functions

use crate::common::mock_interface::{Chip, MockInterface};
use keypad_regs::lm8330::Lm8330;
use keypad_regs::tca8418::Tca8418;

/// Create a mock LM8330 driver for testing
/// Returns (driver, interface) where interface is a clone that shares state with the driver
pub fn create_mock_lm8330() -> (Lm8330<MockInterface>, MockInterface) {
    let interface = MockInterface::new(Chip::Lm8330);
    let interface_clone = interface.clone();
    (Lm8330::new(interface), interface_clone)
}

/// Create a mock TCA8418 driver for testing
/// Returns (driver, interface) where interface is a clone that shares state with the driver
pub fn create_mock_tca8418() -> (Tca8418<MockInterface>, MockInterface) {
    let interface = MockInterface::new(Chip::Tca8418);
    let interface_clone = interface.clone();
    (Tca8418::new(interface), interface_clone)
}

/// LM8330 EVTCODE byte for a key transition
pub fn lm8330_event(row: u8, column: u8, released: bool) -> u8 {
    (u8::from(released) << 7) | (row << 4) | column
}

/// TCA8418 KEY_EVENT byte for a matrix key transition
pub fn tca8418_event(row: u8, column: u8, pressed: bool) -> u8 {
    (u8::from(pressed) << 7) | (row * 10 + column + 1)
}
