//! Unit tests for the TCA8418 driver

use crate::common::{create_mock_tca8418, tca8418_event};
use keypad_regs::Error;
use keypad_regs::Transition;
use keypad_regs::tca8418::Register;
use keypad_regs::tca8418::codec::{Cfg, InterruptStatus, KeyLockEventCount};
use keypad_regs::tca8418::event::{Event, FIFO_DEPTH, GpiPin, KeyEvent};

#[test]
fn test_configure() {
    let (mut driver, interface) = create_mock_tca8418();

    driver.configure(&Cfg::keypad_interrupts()).unwrap();

    assert_eq!(interface.writes_to(0x01), vec![0b1001_1001]);
}

#[test]
fn test_read_interrupt_status() {
    let (mut driver, interface) = create_mock_tca8418();
    interface.set_register(0x02, 0b0000_0011);

    let status = driver.read_interrupt_status().unwrap();

    assert!(status.key_event);
    assert!(status.gpi);
    assert!(!status.overflow);
}

#[test]
fn test_clear_interrupts_is_write_one_to_clear() {
    let (mut driver, interface) = create_mock_tca8418();
    interface.set_register(0x02, 0b0000_1011);

    driver
        .clear_interrupts(&InterruptStatus {
            key_event: true,
            ..Default::default()
        })
        .unwrap();

    assert_eq!(interface.writes_to(0x02), vec![0x01]);
    assert_eq!(interface.get_register(0x02), 0b0000_1010);
}

#[test]
fn test_set_keypad_matrix() {
    let (mut driver, interface) = create_mock_tca8418();

    driver.set_keypad_matrix(4, 9).unwrap();

    assert_eq!(interface.writes_to(0x1D), vec![0x0F]);
    assert_eq!(interface.writes_to(0x1E), vec![0xFF]);
    assert_eq!(interface.writes_to(0x1F), vec![0x01]);
}

#[test]
fn test_set_keypad_matrix_rejects_oversize() {
    let (mut driver, interface) = create_mock_tca8418();

    assert_eq!(
        driver.set_keypad_matrix(8, 11),
        Err(Error::FieldOverflow {
            field: "KP_GPIO2",
            value: 11
        })
    );
    assert!(interface.operations().is_empty());
}

#[test]
fn test_read_events_by_count() {
    let (mut driver, interface) = create_mock_tca8418();
    interface.set_register(0x02, 0x01);
    interface.push_events(&[tca8418_event(0, 0, true), tca8418_event(0, 0, false)]);

    let events = driver.read_events().unwrap();

    assert_eq!(
        events.as_slice(),
        &[
            Event::Key(KeyEvent {
                row: 0,
                column: 0,
                transition: Transition::Pressed,
            }),
            Event::Key(KeyEvent {
                row: 0,
                column: 0,
                transition: Transition::Released,
            }),
        ]
    );
    // No extra read past the announced count
    assert_eq!(interface.read_count(0x04), 2);
}

#[test]
fn test_read_events_nothing_queued() {
    let (mut driver, interface) = create_mock_tca8418();

    let events = driver.read_events().unwrap();

    assert!(events.is_empty());
    assert_eq!(interface.read_count(0x04), 0);
}

#[test]
fn test_read_events_gpi() {
    let (mut driver, interface) = create_mock_tca8418();
    interface.push_events(&[0x80 | 97, 114]);

    let events = driver.read_events().unwrap();

    assert_eq!(
        events.as_slice(),
        &[
            Event::Gpi {
                pin: GpiPin::Row(0),
                transition: Transition::Pressed,
            },
            Event::Gpi {
                pin: GpiPin::Column(9),
                transition: Transition::Released,
            },
        ]
    );
}

#[test]
fn test_read_events_overflow() {
    let (mut driver, interface) = create_mock_tca8418();
    interface.set_register(0x02, 0b0000_1001);
    let codes: Vec<u8> = (0..12).map(|i| tca8418_event(i / 10, i % 10, true)).collect();
    interface.push_events(&codes);

    let events = driver.read_events().unwrap();

    assert_eq!(events[0], Event::EventLost);
    assert_eq!(events.len(), FIFO_DEPTH + 1);
    assert_eq!(interface.read_count(0x04), FIFO_DEPTH);
    // Only the overflow flag is cleared
    assert_eq!(interface.writes_to(0x02), vec![0x08]);
    assert_eq!(interface.get_register(0x02), 0x01);
}

#[test]
fn test_read_events_invalid_code() {
    let (mut driver, interface) = create_mock_tca8418();
    interface.set_register(0x02, 0x09);
    interface.push_events(&[tca8418_event(1, 2, true), 0x80 | 85, tca8418_event(3, 4, false)]);

    let events = driver.read_events().unwrap();

    assert_eq!(
        events.as_slice(),
        &[
            Event::EventLost,
            Event::Key(KeyEvent {
                row: 1,
                column: 2,
                transition: Transition::Pressed,
            }),
            Event::Invalid(0x80 | 85),
            Event::Key(KeyEvent {
                row: 3,
                column: 4,
                transition: Transition::Released,
            }),
        ]
    );
    assert_eq!(interface.queued_events(), 0);
    assert_eq!(interface.writes_to(0x02), vec![0x08]);
    assert_eq!(interface.get_register(0x02), 0x01);
}

#[test]
fn test_event_count_follows_fifo() {
    let (mut driver, interface) = create_mock_tca8418();
    interface.set_register(0x03, 0x40);
    interface.push_events(&[tca8418_event(1, 1, true), tca8418_event(2, 2, true)]);

    let lock_ec: KeyLockEventCount = driver.read(Register::KeyLckEc).unwrap();
    assert!(lock_ec.lock_enabled);
    assert_eq!(lock_ec.count, 2);

    driver.read_events().unwrap();

    let lock_ec: KeyLockEventCount = driver.read(Register::KeyLckEc).unwrap();
    assert!(lock_ec.lock_enabled);
    assert_eq!(lock_ec.count, 0);
}

#[test]
fn test_partial_register_rejected() {
    let (mut driver, interface) = create_mock_tca8418();

    let mut two = [0u8; 2];
    assert_eq!(
        driver.read_raw(Register::Cfg, &mut two),
        Err(Error::PartialRegister {
            expected: 1,
            actual: 2
        })
    );
    assert!(interface.operations().is_empty());
}
