//! Unit tests for error handling and recovery

use crate::common::{MockError, create_mock_lm8330, create_mock_tca8418, lm8330_event};
use keypad_regs::Error;
use keypad_regs::tca8418::codec::Cfg;

#[test]
fn test_read_failure_basic() {
    let (mut driver, interface) = create_mock_lm8330();

    // Inject a read failure
    interface.fail_next_read();

    // This read should fail
    let result = driver.read_interrupt_status();
    assert_eq!(result, Err(Error::Bus(MockError::Communication)));
}

#[test]
fn test_read_failure_recovery() {
    let (mut driver, interface) = create_mock_lm8330();

    interface.fail_next_read();
    assert!(driver.read_manufacturer_code().is_err(), "First read should fail");

    // Subsequent read should succeed (error was only for one operation)
    interface.set_register(0x80, 0x03);
    assert_eq!(driver.read_manufacturer_code(), Ok(0x03));
}

#[test]
fn test_write_failure_basic() {
    let (mut driver, interface) = create_mock_tca8418();

    interface.fail_next_write();

    let result = driver.configure(&Cfg::keypad_interrupts());
    assert_eq!(result, Err(Error::Bus(MockError::Communication)));
    assert!(interface.writes_to(0x01).is_empty());
}

#[test]
fn test_read_modify_write_aborts_on_read_failure() {
    let (mut driver, interface) = create_mock_lm8330();
    interface.set_register(0x8A, 0x04);

    interface.fail_next_read();
    assert!(driver.enable_keyboard(true).is_err());

    // The write half never ran
    assert!(interface.writes_to(0x8A).is_empty());
    assert_eq!(interface.get_register(0x8A), 0x04);
}

#[test]
fn test_drain_failure_leaves_rest_queued() {
    let (mut driver, interface) = create_mock_lm8330();
    interface.set_register(0x06, 0x04);
    interface.push_events(&[lm8330_event(0, 1, false), lm8330_event(0, 2, false)]);

    // KBDRIS read fails before any FIFO entry is popped
    interface.fail_next_read();
    assert!(driver.read_events().is_err());
    assert_eq!(interface.queued_events(), 2);

    let events = driver.read_events().unwrap();
    assert_eq!(events.len(), 2);
}

#[test]
fn test_bus_error_converts() {
    let error: Error<MockError> = MockError::Communication.into();
    assert_eq!(error, Error::Bus(MockError::Communication));
}
