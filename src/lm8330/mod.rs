//! LM8330 keypad and GPIO controller
//!
//! - [`registers`]: address map, including the multiplexed `0x80` address
//! - [`codec`]: typed register views
//! - [`event`]: event FIFO and `KBDCODE` decoding
//!
//! [`Lm8330`] is a thin driver that moves whole registers over a
//! `device-driver` register interface and runs them through the codecs. It
//! keeps no copy of device state; the chip is the only source of truth.

pub mod codec;
pub mod event;
pub mod registers;

use crate::field::RegisterValue;
use crate::{Access, CodecError, Error};
use codec::{ClkEn, IrqSt, KbdIc, KbdInterruptStatus, KbdSize};
use event::{Event, EventDecoder, FIFO_DEPTH, HeldKey, decode_key_code};
pub use registers::Register;

#[cfg(not(feature = "async"))]
use device_driver::RegisterInterface;

/// Bus address as quoted by the datasheet (8-bit form, includes R/W bit)
pub const DATASHEET_ADDRESS: u8 = 0x88;

/// 7-bit I2C address of the LM8330
pub const I2C_ADDRESS: u8 = DATASHEET_ADDRESS >> 1;

/// Events returned by one drain: the whole FIFO plus a lost-event marker
pub type EventBuffer = heapless::Vec<Event, { FIFO_DEPTH + 1 }>;

/// Keys returned by one walk of `KBDCODE0..3`
pub type HeldKeys = heapless::Vec<HeldKey, 4>;

const KBDCODE_CHAIN: [Register; 4] = [
    Register::KbdCode0,
    Register::KbdCode1,
    Register::KbdCode2,
    Register::KbdCode3,
];

/// Check that a transfer of `len` bytes matches the register width
///
/// The low byte of a 16-bit group is never transferred on its own.
const fn check_width<E>(register: Register, len: usize) -> Result<(), Error<E>> {
    if !register.is_standalone() {
        Err(Error::PartialRegister {
            expected: register.group().width(),
            actual: len,
        })
    } else if len == register.width() {
        Ok(())
    } else {
        Err(Error::PartialRegister {
            expected: register.width(),
            actual: len,
        })
    }
}

/// Check that codec `R` fits the register
const fn check_codec<R: RegisterValue, E>(register: Register) -> Result<(), Error<E>> {
    if R::WIDTH == register.width() {
        Ok(())
    } else {
        Err(Error::WidthMismatch {
            expected: register.width(),
            actual: R::WIDTH,
        })
    }
}

/// Check that the register has a name in the write context
const fn check_writable<E>(register: Register) -> Result<(), Error<E>> {
    if register.accepts(Access::Write) {
        Ok(())
    } else {
        Err(Error::InvalidAddress(register.address()))
    }
}

/// Driver for the LM8330
pub struct Lm8330<I> {
    interface: I,
}

impl<I> Lm8330<I> {
    /// Wrap a register interface
    pub const fn new(interface: I) -> Self {
        Self { interface }
    }

    /// Consume the driver and return the interface
    pub fn release(self) -> I {
        self.interface
    }

    /// Borrow the underlying interface
    pub const fn interface(&self) -> &I {
        &self.interface
    }
}

#[cfg(not(feature = "async"))]
impl<I> Lm8330<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Read the raw bytes of a register in one transaction
    ///
    /// # Errors
    ///
    /// Returns `PartialRegister` if `buffer` is not exactly the register
    /// width, or `Bus` if the transfer fails.
    pub fn read_raw(&mut self, register: Register, buffer: &mut [u8]) -> Result<(), Error<I::Error>> {
        check_width::<I::Error>(register, buffer.len())?;
        self.interface
            .read_register(register.address(), (buffer.len() * 8) as u32, buffer)?;
        Ok(())
    }

    /// Write the raw bytes of a register in one transaction
    ///
    /// # Errors
    ///
    /// Returns `PartialRegister` if `bytes` is not exactly the register
    /// width, `InvalidAddress` for a read-only name, or `Bus` if the transfer
    /// fails.
    pub fn write_raw(&mut self, register: Register, bytes: &[u8]) -> Result<(), Error<I::Error>> {
        check_width::<I::Error>(register, bytes.len())?;
        check_writable::<I::Error>(register)?;
        #[cfg(feature = "defmt")]
        defmt::trace!("LM8330 write {=u8:#x} <- {=[u8]:#x}", register.address(), bytes);
        self.interface
            .write_register(register.address(), (bytes.len() * 8) as u32, bytes)?;
        Ok(())
    }

    /// Read a register and decode it with codec `R`
    ///
    /// # Errors
    ///
    /// Returns `WidthMismatch` if `R` does not fit the register, or `Bus` if
    /// the transfer fails.
    pub fn read<R: RegisterValue>(&mut self, register: Register) -> Result<R, Error<I::Error>> {
        check_codec::<R, I::Error>(register)?;
        let mut buffer = [0u8; 2];
        let bytes = &mut buffer[..R::WIDTH];
        self.read_raw(register, bytes)?;
        R::decode(bytes).map_err(CodecError::lift)
    }

    /// Encode `value` with its codec and write it to a register
    ///
    /// # Errors
    ///
    /// Returns `FieldOverflow` if a field does not fit, `WidthMismatch` if
    /// the codec does not fit the register, or `Bus` if the transfer fails.
    pub fn write<R: RegisterValue>(&mut self, register: Register, value: &R) -> Result<(), Error<I::Error>> {
        check_codec::<R, I::Error>(register)?;
        let bytes = value.encode().map_err(CodecError::lift)?;
        self.write_raw(register, &bytes)
    }

    /// Read the manufacturer code (read context of address `0x80`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_manufacturer_code(&mut self) -> Result<u8, Error<I::Error>> {
        let mut code = [0u8];
        self.read_raw(Register::MfgCode, &mut code)?;
        Ok(code[0])
    }

    /// Set the keyboard matrix size
    ///
    /// # Errors
    ///
    /// Returns `FieldOverflow` if either dimension exceeds 4 bits, or `Bus`
    /// if the transfer fails.
    pub fn set_keypad_size(&mut self, rows: u8, columns: u8) -> Result<(), Error<I::Error>> {
        self.write(Register::KbdSize, &KbdSize { rows, columns })
    }

    /// Start or stop key scanning, leaving the timer clock untouched
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn enable_keyboard(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        let clocks: ClkEn = self.read(Register::ClkEn)?;
        self.write(
            Register::ClkEn,
            &ClkEn {
                keyboard: enable,
                ..clocks
            },
        )
    }

    /// Read the global interrupt status
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_interrupt_status(&mut self) -> Result<IrqSt, Error<I::Error>> {
        self.read(Register::IrqSt)
    }

    /// Flush the event FIFO and clear its interrupts
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn clear_events(&mut self) -> Result<(), Error<I::Error>> {
        self.write(
            Register::KbdIc,
            &KbdIc {
                clear_events: true,
                ..Default::default()
            },
        )
    }

    /// Drain the event FIFO
    ///
    /// Reads `KBDRIS` first; if events were lost the result starts with
    /// [`Event::EventLost`]. Then pops `EVTCODE` until it reads empty or the
    /// FIFO depth is reached. The lost-event flag is cleared only when the
    /// empty sentinel was read. Undefined entries are kept in place as
    /// [`Event::Invalid`]. [`Event::QueueEmpty`] is not included in the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns `Bus` if a transfer fails.
    pub fn read_events(&mut self) -> Result<EventBuffer, Error<I::Error>> {
        let mut events = EventBuffer::new();
        let mut decoder = EventDecoder::new();

        let status: KbdInterruptStatus = self.read(Register::KbdRis)?;
        let lost = decoder.start(status);
        if let Some(lost) = lost {
            #[cfg(feature = "defmt")]
            defmt::warn!("LM8330 event FIFO overflowed, events lost");
            let _ = events.push(lost);
        }

        let mut drained = false;
        for _ in 0..FIFO_DEPTH {
            let mut code = [0u8];
            self.read_raw(Register::EvtCode, &mut code)?;
            match decoder.decode_entry(code[0]) {
                Event::QueueEmpty => {
                    drained = true;
                    break;
                }
                event => {
                    if let Event::Invalid(_raw) = event {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("LM8330 undefined event code {=u8:#x}", _raw);
                    }
                    // Capacity covers the FIFO depth plus the lost marker.
                    let _ = events.push(event);
                }
            }
        }

        // EVTIC also flushes the FIFO, so ELINT stays set until a drain
        // reaches the empty sentinel and the next drain reports the loss again.
        if lost.is_some() && drained {
            self.clear_events()?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("LM8330 drained {} events", events.len());

        Ok(events)
    }

    /// Walk `KBDCODE0..3` and return the keys currently held down
    ///
    /// # Errors
    ///
    /// Returns `InvalidKeyCode` for an undefined key code, or `Bus` if a
    /// transfer fails.
    pub fn read_pressed_keys(&mut self) -> Result<HeldKeys, Error<I::Error>> {
        let mut keys = HeldKeys::new();
        for register in KBDCODE_CHAIN {
            let mut code = [0u8];
            self.read_raw(register, &mut code)?;
            let Some(key) = decode_key_code(code[0]).map_err(CodecError::lift)? else {
                break;
            };
            let _ = keys.push(key);
            if !key.more {
                break;
            }
        }
        Ok(keys)
    }
}

#[cfg(feature = "async")]
impl<I> Lm8330<I>
where
    I: device_driver::AsyncRegisterInterface<AddressType = u8>,
{
    /// Read the raw bytes of a register in one transaction (async version)
    ///
    /// # Errors
    ///
    /// Returns `PartialRegister` if `buffer` is not exactly the register
    /// width, or `Bus` if the transfer fails.
    pub async fn read_raw(
        &mut self,
        register: Register,
        buffer: &mut [u8],
    ) -> Result<(), Error<I::Error>> {
        check_width::<I::Error>(register, buffer.len())?;
        self.interface
            .read_register(register.address(), (buffer.len() * 8) as u32, buffer)
            .await?;
        Ok(())
    }

    /// Write the raw bytes of a register in one transaction (async version)
    ///
    /// # Errors
    ///
    /// Returns `PartialRegister` if `bytes` is not exactly the register
    /// width, `InvalidAddress` for a read-only name, or `Bus` if the transfer
    /// fails.
    pub async fn write_raw(&mut self, register: Register, bytes: &[u8]) -> Result<(), Error<I::Error>> {
        check_width::<I::Error>(register, bytes.len())?;
        check_writable::<I::Error>(register)?;
        #[cfg(feature = "defmt")]
        defmt::trace!("LM8330 write {=u8:#x} <- {=[u8]:#x}", register.address(), bytes);
        self.interface
            .write_register(register.address(), (bytes.len() * 8) as u32, bytes)
            .await?;
        Ok(())
    }

    /// Read a register and decode it with codec `R` (async version)
    ///
    /// # Errors
    ///
    /// Returns `WidthMismatch` if `R` does not fit the register, or `Bus` if
    /// the transfer fails.
    pub async fn read<R: RegisterValue>(&mut self, register: Register) -> Result<R, Error<I::Error>> {
        check_codec::<R, I::Error>(register)?;
        let mut buffer = [0u8; 2];
        let bytes = &mut buffer[..R::WIDTH];
        self.read_raw(register, bytes).await?;
        R::decode(bytes).map_err(CodecError::lift)
    }

    /// Encode `value` with its codec and write it to a register (async version)
    ///
    /// # Errors
    ///
    /// Returns `FieldOverflow` if a field does not fit, `WidthMismatch` if
    /// the codec does not fit the register, or `Bus` if the transfer fails.
    pub async fn write<R: RegisterValue>(
        &mut self,
        register: Register,
        value: &R,
    ) -> Result<(), Error<I::Error>> {
        check_codec::<R, I::Error>(register)?;
        let bytes = value.encode().map_err(CodecError::lift)?;
        self.write_raw(register, &bytes).await
    }

    /// Read the manufacturer code (async version)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_manufacturer_code(&mut self) -> Result<u8, Error<I::Error>> {
        let mut code = [0u8];
        self.read_raw(Register::MfgCode, &mut code).await?;
        Ok(code[0])
    }

    /// Set the keyboard matrix size (async version)
    ///
    /// # Errors
    ///
    /// Returns `FieldOverflow` if either dimension exceeds 4 bits, or `Bus`
    /// if the transfer fails.
    pub async fn set_keypad_size(&mut self, rows: u8, columns: u8) -> Result<(), Error<I::Error>> {
        self.write(Register::KbdSize, &KbdSize { rows, columns }).await
    }

    /// Start or stop key scanning (async version)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn enable_keyboard(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        let clocks: ClkEn = self.read(Register::ClkEn).await?;
        self.write(
            Register::ClkEn,
            &ClkEn {
                keyboard: enable,
                ..clocks
            },
        )
        .await
    }

    /// Read the global interrupt status (async version)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_interrupt_status(&mut self) -> Result<IrqSt, Error<I::Error>> {
        self.read(Register::IrqSt).await
    }

    /// Flush the event FIFO and clear its interrupts (async version)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn clear_events(&mut self) -> Result<(), Error<I::Error>> {
        self.write(
            Register::KbdIc,
            &KbdIc {
                clear_events: true,
                ..Default::default()
            },
        )
        .await
    }

    /// Drain the event FIFO (async version)
    ///
    /// # Errors
    ///
    /// Returns `Bus` if a transfer fails.
    pub async fn read_events(&mut self) -> Result<EventBuffer, Error<I::Error>> {
        let mut events = EventBuffer::new();
        let mut decoder = EventDecoder::new();

        let status: KbdInterruptStatus = self.read(Register::KbdRis).await?;
        let lost = decoder.start(status);
        if let Some(lost) = lost {
            #[cfg(feature = "defmt")]
            defmt::warn!("LM8330 event FIFO overflowed, events lost");
            let _ = events.push(lost);
        }

        let mut drained = false;
        for _ in 0..FIFO_DEPTH {
            let mut code = [0u8];
            self.read_raw(Register::EvtCode, &mut code).await?;
            match decoder.decode_entry(code[0]) {
                Event::QueueEmpty => {
                    drained = true;
                    break;
                }
                event => {
                    let _ = events.push(event);
                }
            }
        }

        if lost.is_some() && drained {
            self.clear_events().await?;
        }

        Ok(events)
    }

    /// Walk `KBDCODE0..3` (async version)
    ///
    /// # Errors
    ///
    /// Returns `InvalidKeyCode` for an undefined key code, or `Bus` if a
    /// transfer fails.
    pub async fn read_pressed_keys(&mut self) -> Result<HeldKeys, Error<I::Error>> {
        let mut keys = HeldKeys::new();
        for register in KBDCODE_CHAIN {
            let mut code = [0u8];
            self.read_raw(register, &mut code).await?;
            let Some(key) = decode_key_code(code[0]).map_err(CodecError::lift)? else {
                break;
            };
            let _ = keys.push(key);
            if !key.more {
                break;
            }
        }
        Ok(keys)
    }
}
