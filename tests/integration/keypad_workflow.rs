//! Integration tests for keypad scanning workflows
//!
//! These run the drivers over [`I2cInterface`] on top of a simulated I2C bus,
//! so the register protocol on the wire is checked as well as the decoding.

use crate::common::{create_mock_lm8330, create_mock_tca8418, lm8330_event, tca8418_event};
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation as I2cOperation};
use keypad_regs::lm8330::{self, Lm8330};
use keypad_regs::tca8418::codec::Cfg;
use keypad_regs::tca8418::{self, Tca8418};
use keypad_regs::{I2cInterface, Transition};
use std::collections::HashMap;

/// Bus transaction seen by the simulated I2C bus
#[derive(Debug, Clone, PartialEq)]
enum Transfer {
    WriteRead { address: u8, register: u8, len: usize },
    Write { address: u8, bytes: Vec<u8> },
}

#[derive(Debug)]
struct BusError;

impl embedded_hal::i2c::Error for BusError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// I2C bus with one register file and a log of transfers
#[derive(Default)]
struct SimulatedBus {
    registers: HashMap<u8, u8>,
    transfers: Vec<Transfer>,
}

impl ErrorType for SimulatedBus {
    type Error = BusError;
}

impl I2c for SimulatedBus {
    fn transaction(
        &mut self,
        _address: u8,
        _operations: &mut [I2cOperation<'_>],
    ) -> Result<(), Self::Error> {
        Err(BusError)
    }

    fn write(&mut self, address: u8, write: &[u8]) -> Result<(), Self::Error> {
        if let Some((&register, values)) = write.split_first() {
            for (offset, &value) in values.iter().enumerate() {
                self.registers.insert(register + offset as u8, value);
            }
        }
        self.transfers.push(Transfer::Write {
            address,
            bytes: write.to_vec(),
        });
        Ok(())
    }

    fn write_read(&mut self, address: u8, write: &[u8], read: &mut [u8]) -> Result<(), Self::Error> {
        let register = write[0];
        for (offset, byte) in read.iter_mut().enumerate() {
            *byte = self
                .registers
                .get(&(register + offset as u8))
                .copied()
                .unwrap_or(0);
        }
        self.transfers.push(Transfer::WriteRead {
            address,
            register,
            len: read.len(),
        });
        Ok(())
    }
}

#[test]
fn test_lm8330_wire_protocol() {
    let mut keypad = Lm8330::new(I2cInterface::lm8330(SimulatedBus::default()));

    keypad.set_keypad_size(4, 4).unwrap();
    keypad
        .write(
            lm8330::Register::IoPc1,
            &lm8330::codec::IoPc1::all(lm8330::codec::Pull::Up),
        )
        .unwrap();
    let pulls: lm8330::codec::IoPc1 = keypad.read(lm8330::Register::IoPc1).unwrap();
    assert_eq!(pulls, lm8330::codec::IoPc1::all(lm8330::codec::Pull::Up));

    let bus = keypad.release().release();
    assert_eq!(
        bus.transfers,
        vec![
            Transfer::Write {
                address: 0x44,
                bytes: vec![0x03, 0x44]
            },
            Transfer::Write {
                address: 0x44,
                bytes: vec![0xAC, 0xAA, 0xAA]
            },
            Transfer::WriteRead {
                address: 0x44,
                register: 0xAC,
                len: 2
            },
        ]
    );
}

#[test]
fn test_tca8418_wire_protocol() {
    let mut keypad = Tca8418::new(I2cInterface::tca8418(SimulatedBus::default()));

    keypad.configure(&Cfg::keypad_interrupts()).unwrap();
    keypad.set_keypad_matrix(8, 10).unwrap();

    let bus = keypad.release().release();
    assert_eq!(bus.registers.get(&0x01), Some(&0b1001_1001));
    assert_eq!(bus.registers.get(&0x1D), Some(&0xFF));
    assert_eq!(bus.registers.get(&0x1E), Some(&0xFF));
    assert_eq!(bus.registers.get(&0x1F), Some(&0x03));
    assert!(bus.transfers.iter().all(|transfer| match transfer {
        Transfer::Write { address, bytes } => *address == tca8418::I2C_ADDRESS && bytes.len() == 2,
        Transfer::WriteRead { .. } => false,
    }));
}

#[test]
fn test_lm8330_scan_session() {
    let (mut keypad, interface) = create_mock_lm8330();

    keypad.set_keypad_size(8, 12).unwrap();
    keypad.enable_keyboard(true).unwrap();

    // A key goes down and comes back up
    interface.set_register(0x91, 0x40);
    interface.set_register(0x06, 0x04);
    interface.push_events(&[lm8330_event(2, 7, false), lm8330_event(2, 7, true)]);

    assert!(keypad.read_interrupt_status().unwrap().keyboard);
    let events = keypad.read_events().unwrap();
    let transitions: Vec<Transition> = events
        .iter()
        .filter_map(|event| match event {
            lm8330::event::Event::Key(key) => Some(key.transition),
            _ => None,
        })
        .collect();
    assert_eq!(transitions, vec![Transition::Pressed, Transition::Released]);

    // Nothing left for the next interrupt
    assert!(keypad.read_events().unwrap().is_empty());
}

#[test]
fn test_tca8418_scan_session() {
    let (mut keypad, interface) = create_mock_tca8418();

    keypad.set_keypad_matrix(4, 4).unwrap();
    keypad.configure(&Cfg::keypad_interrupts()).unwrap();

    interface.set_register(0x02, 0x01);
    interface.push_events(&[tca8418_event(3, 2, true), tca8418_event(3, 2, false)]);

    let status = keypad.read_interrupt_status().unwrap();
    assert!(status.key_event);

    let events = keypad.read_events().unwrap();
    assert_eq!(events.len(), 2);
    for event in &events {
        let tca8418::event::Event::Key(key) = event else {
            panic!("expected key event, got {event:?}");
        };
        assert_eq!((key.row, key.column), (3, 2));
    }

    keypad.clear_interrupts(&status).unwrap();
    assert!(!keypad.read_interrupt_status().unwrap().any_set());
}
