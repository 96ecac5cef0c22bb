//! Async driver tests over the shared register mock

use crate::common::{MockError, create_mock_lm8330, create_mock_tca8418, lm8330_event, tca8418_event};
use keypad_regs::Error;
use keypad_regs::lm8330::event::Event as LmEvent;
use keypad_regs::tca8418::codec::Cfg;
use keypad_regs::tca8418::event::Event as TcaEvent;

fn block_on<F: core::future::Future>(f: F) -> F::Output {
    futures::executor::block_on(f)
}

#[test]
fn test_lm8330_read_events() {
    block_on(async {
        let (mut driver, interface) = create_mock_lm8330();
        interface.set_register(0x06, 0x0C);
        interface.push_events(&[lm8330_event(1, 1, false)]);

        let events = driver.read_events().await.unwrap();

        assert_eq!(events[0], LmEvent::EventLost);
        assert!(matches!(events[1], LmEvent::Key(_)));
        assert_eq!(interface.writes_to(0x08), vec![0x02]);
    });
}

#[test]
fn test_lm8330_drain_continues_past_invalid_code() {
    block_on(async {
        let (mut driver, interface) = create_mock_lm8330();
        interface.set_register(0x06, 0x04);
        interface.push_events(&[lm8330_event(1, 2, false), 0x0F, lm8330_event(3, 4, true)]);

        let events = driver.read_events().await.unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(events[1], LmEvent::Invalid(0x0F));
        assert!(matches!(events[2], LmEvent::Key(_)));
    });
}

#[test]
fn test_lm8330_loss_flag_kept_without_empty_sentinel() {
    block_on(async {
        let (mut driver, interface) = create_mock_lm8330();
        interface.set_register(0x06, 0x0C);
        let codes: Vec<u8> = (0..20).map(|i| lm8330_event(i % 8, 0, false)).collect();
        interface.push_events(&codes);

        driver.read_events().await.unwrap();

        assert!(interface.writes_to(0x08).is_empty());
        assert_eq!(interface.queued_events(), 5);
    });
}

#[test]
fn test_lm8330_low_byte_rejected() {
    block_on(async {
        let (mut driver, interface) = create_mock_lm8330();

        let result = driver
            .write_raw(keypad_regs::lm8330::Register::KbdDedCfg1, &[0x00])
            .await;

        assert_eq!(
            result,
            Err(Error::PartialRegister {
                expected: 2,
                actual: 1
            })
        );
        assert!(interface.operations().is_empty());
    });
}

#[test]
fn test_lm8330_enable_keyboard() {
    block_on(async {
        let (mut driver, interface) = create_mock_lm8330();
        interface.set_register(0x8A, 0x04);

        driver.enable_keyboard(true).await.unwrap();

        assert_eq!(interface.get_register(0x8A), 0x05);
    });
}

#[test]
fn test_lm8330_pressed_keys() {
    block_on(async {
        let (mut driver, interface) = create_mock_lm8330();
        interface.set_register(0x0B, 0x12);

        let keys = driver.read_pressed_keys().await.unwrap();

        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].row, 1);
    });
}

#[test]
fn test_tca8418_read_events() {
    block_on(async {
        let (mut driver, interface) = create_mock_tca8418();
        interface.push_events(&[tca8418_event(7, 9, true)]);

        let events = driver.read_events().await.unwrap();

        assert_eq!(events.len(), 1);
        let TcaEvent::Key(key) = events[0] else {
            panic!("expected key event");
        };
        assert_eq!((key.row, key.column), (7, 9));
    });
}

#[test]
fn test_tca8418_configure_failure() {
    block_on(async {
        let (mut driver, interface) = create_mock_tca8418();
        interface.fail_next_write();

        let result = driver.configure(&Cfg::keypad_interrupts()).await;

        assert_eq!(result, Err(Error::Bus(MockError::Communication)));
    });
}

#[test]
fn test_tca8418_drain_continues_past_invalid_code() {
    block_on(async {
        let (mut driver, interface) = create_mock_tca8418();
        interface.set_register(0x02, 0x09);
        interface.push_events(&[tca8418_event(1, 2, true), 0x80 | 85, tca8418_event(3, 4, false)]);

        let events = driver.read_events().await.unwrap();

        assert_eq!(events.len(), 4);
        assert_eq!(events[0], TcaEvent::EventLost);
        assert_eq!(events[2], TcaEvent::Invalid(0x80 | 85));
        assert!(matches!(events[3], TcaEvent::Key(_)));
        assert_eq!(interface.get_register(0x02), 0x01);
    });
}
