//! TCA8418 keypad scan controller
//!
//! [`Tca8418`] drives the 8x10 matrix through the same register interface as
//! the LM8330 driver. The event FIFO is drained by count: `KEY_LCK_EC` says
//! how many entries to pop from `KEY_EVENT_A`.

pub mod codec;
pub mod event;
pub mod registers;

use crate::field::RegisterValue;
use crate::{CodecError, Error};
use codec::{Cfg, ColumnBank, ColumnBankHigh, InterruptStatus, KeyLockEventCount, RowBank};
use event::{COLUMNS, Event, EventDecoder, FIFO_DEPTH, ROWS};
pub use registers::Register;

#[cfg(not(feature = "async"))]
use device_driver::RegisterInterface;

/// 7-bit I2C address of the TCA8418
pub const I2C_ADDRESS: u8 = 0x34;

/// Events returned by one drain: the whole FIFO plus a lost-event marker
pub type EventBuffer = heapless::Vec<Event, { FIFO_DEPTH + 1 }>;

/// Keypad selection banks for a matrix of `rows` by `columns`
fn keypad_banks<E>(rows: u8, columns: u8) -> Result<(RowBank, ColumnBank, ColumnBankHigh), Error<E>> {
    if rows > ROWS {
        return Err(Error::FieldOverflow {
            field: "KP_GPIO1",
            value: rows.into(),
        });
    }
    if columns > COLUMNS {
        return Err(Error::FieldOverflow {
            field: "KP_GPIO2",
            value: columns.into(),
        });
    }
    let columns = usize::from(columns);
    Ok((
        RowBank::first(rows.into()),
        ColumnBank::first(columns),
        ColumnBankHigh::first(columns),
    ))
}

/// Driver for the TCA8418
pub struct Tca8418<I> {
    interface: I,
}

impl<I> Tca8418<I> {
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
impl<I> Tca8418<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Read one register byte
    ///
    /// # Errors
    ///
    /// Returns `PartialRegister` if `buffer` is not one byte, or `Bus` if the
    /// transfer fails.
    pub fn read_raw(&mut self, register: Register, buffer: &mut [u8]) -> Result<(), Error<I::Error>> {
        if buffer.len() != register.width() {
            return Err(Error::PartialRegister {
                expected: register.width(),
                actual: buffer.len(),
            });
        }
        self.interface
            .read_register(register.address(), 8, buffer)?;
        Ok(())
    }

    /// Write one register byte
    ///
    /// # Errors
    ///
    /// Returns `PartialRegister` if `bytes` is not one byte, or `Bus` if the
    /// transfer fails.
    pub fn write_raw(&mut self, register: Register, bytes: &[u8]) -> Result<(), Error<I::Error>> {
        if bytes.len() != register.width() {
            return Err(Error::PartialRegister {
                expected: register.width(),
                actual: bytes.len(),
            });
        }
        #[cfg(feature = "defmt")]
        defmt::trace!("TCA8418 write {=u8:#x} <- {=[u8]:#x}", register.address(), bytes);
        self.interface
            .write_register(register.address(), 8, bytes)?;
        Ok(())
    }

    /// Read a register and decode it with codec `R`
    ///
    /// # Errors
    ///
    /// Returns `WidthMismatch` if `R` is wider than one byte, or `Bus` if the
    /// transfer fails.
    pub fn read<R: RegisterValue>(&mut self, register: Register) -> Result<R, Error<I::Error>> {
        if R::WIDTH != register.width() {
            return Err(Error::WidthMismatch {
                expected: register.width(),
                actual: R::WIDTH,
            });
        }
        let mut byte = [0u8];
        self.read_raw(register, &mut byte)?;
        R::decode(&byte).map_err(CodecError::lift)
    }

    /// Encode `value` with its codec and write it to a register
    ///
    /// # Errors
    ///
    /// Returns `FieldOverflow` if a field does not fit, `WidthMismatch` if
    /// the codec is wider than one byte, or `Bus` if the transfer fails.
    pub fn write<R: RegisterValue>(&mut self, register: Register, value: &R) -> Result<(), Error<I::Error>> {
        if R::WIDTH != register.width() {
            return Err(Error::WidthMismatch {
                expected: register.width(),
                actual: R::WIDTH,
            });
        }
        let bytes = value.encode().map_err(CodecError::lift)?;
        self.write_raw(register, &bytes)
    }

    /// Write the configuration register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure(&mut self, config: &Cfg) -> Result<(), Error<I::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("TCA8418 configure {}", config);
        self.write(Register::Cfg, config)
    }

    /// Read the interrupt status
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_interrupt_status(&mut self) -> Result<InterruptStatus, Error<I::Error>> {
        self.read(Register::IntStat)
    }

    /// Clear the interrupt flags set in `flags`
    ///
    /// `INT_STAT` is write-1-to-clear, so flags left false are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn clear_interrupts(&mut self, flags: &InterruptStatus) -> Result<(), Error<I::Error>> {
        self.write(Register::IntStat, flags)
    }

    /// Select which pins form the key matrix
    ///
    /// The first `rows` row pins and first `columns` column pins are put in
    /// keypad mode, all others become GPIO.
    ///
    /// # Errors
    ///
    /// Returns `FieldOverflow` if `rows` exceeds 8 or `columns` exceeds 10,
    /// or `Bus` if a transfer fails.
    pub fn set_keypad_matrix(&mut self, rows: u8, columns: u8) -> Result<(), Error<I::Error>> {
        let (row_bank, column_bank, column_bank_high) = keypad_banks::<I::Error>(rows, columns)?;
        self.write(Register::KpGpio1, &row_bank)?;
        self.write(Register::KpGpio2, &column_bank)?;
        self.write(Register::KpGpio3, &column_bank_high)
    }

    /// Drain the event FIFO
    ///
    /// Reads `INT_STAT` and `KEY_LCK_EC`, then pops `KEY_EVENT_A` once per
    /// queued event. On overflow the result starts with
    /// [`Event::EventLost`] and the overflow flag is cleared afterwards.
    /// Undefined entries are kept in place as [`Event::Invalid`].
    /// [`Event::QueueEmpty`] is not included in the result.
    ///
    /// # Errors
    ///
    /// Returns `Bus` if a transfer fails.
    pub fn read_events(&mut self) -> Result<EventBuffer, Error<I::Error>> {
        let mut events = EventBuffer::new();
        let mut decoder = EventDecoder::new();

        let status: InterruptStatus = self.read(Register::IntStat)?;
        let lock_ec: KeyLockEventCount = self.read(Register::KeyLckEc)?;
        let lost = decoder.start(status, lock_ec);
        if let Some(lost) = lost {
            #[cfg(feature = "defmt")]
            defmt::warn!("TCA8418 event FIFO overflowed, events lost");
            let _ = events.push(lost);
        }

        while decoder.pending() > 0 {
            let mut code = [0u8];
            self.read_raw(Register::KeyEventA, &mut code)?;
            match decoder.decode_entry(code[0]) {
                Event::QueueEmpty => break,
                event => {
                    if let Event::Invalid(_raw) = event {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("TCA8418 undefined event code {=u8:#x}", _raw);
                    }
                    // Pending is clamped to the FIFO depth.
                    let _ = events.push(event);
                }
            }
        }

        if lost.is_some() {
            self.clear_interrupts(&InterruptStatus {
                overflow: true,
                ..Default::default()
            })?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("TCA8418 drained {} events", events.len());

        Ok(events)
    }
}

#[cfg(feature = "async")]
impl<I> Tca8418<I>
where
    I: device_driver::AsyncRegisterInterface<AddressType = u8>,
{
    /// Read one register byte (async version)
    ///
    /// # Errors
    ///
    /// Returns `PartialRegister` if `buffer` is not one byte, or `Bus` if the
    /// transfer fails.
    pub async fn read_raw(
        &mut self,
        register: Register,
        buffer: &mut [u8],
    ) -> Result<(), Error<I::Error>> {
        if buffer.len() != register.width() {
            return Err(Error::PartialRegister {
                expected: register.width(),
                actual: buffer.len(),
            });
        }
        self.interface
            .read_register(register.address(), 8, buffer)
            .await?;
        Ok(())
    }

    /// Write one register byte (async version)
    ///
    /// # Errors
    ///
    /// Returns `PartialRegister` if `bytes` is not one byte, or `Bus` if the
    /// transfer fails.
    pub async fn write_raw(&mut self, register: Register, bytes: &[u8]) -> Result<(), Error<I::Error>> {
        if bytes.len() != register.width() {
            return Err(Error::PartialRegister {
                expected: register.width(),
                actual: bytes.len(),
            });
        }
        #[cfg(feature = "defmt")]
        defmt::trace!("TCA8418 write {=u8:#x} <- {=[u8]:#x}", register.address(), bytes);
        self.interface
            .write_register(register.address(), 8, bytes)
            .await?;
        Ok(())
    }

    /// Read a register and decode it with codec `R` (async version)
    ///
    /// # Errors
    ///
    /// Returns `WidthMismatch` if `R` is wider than one byte, or `Bus` if the
    /// transfer fails.
    pub async fn read<R: RegisterValue>(&mut self, register: Register) -> Result<R, Error<I::Error>> {
        if R::WIDTH != register.width() {
            return Err(Error::WidthMismatch {
                expected: register.width(),
                actual: R::WIDTH,
            });
        }
        let mut byte = [0u8];
        self.read_raw(register, &mut byte).await?;
        R::decode(&byte).map_err(CodecError::lift)
    }

    /// Encode `value` with its codec and write it to a register (async version)
    ///
    /// # Errors
    ///
    /// Returns `FieldOverflow` if a field does not fit, `WidthMismatch` if
    /// the codec is wider than one byte, or `Bus` if the transfer fails.
    pub async fn write<R: RegisterValue>(
        &mut self,
        register: Register,
        value: &R,
    ) -> Result<(), Error<I::Error>> {
        if R::WIDTH != register.width() {
            return Err(Error::WidthMismatch {
                expected: register.width(),
                actual: R::WIDTH,
            });
        }
        let bytes = value.encode().map_err(CodecError::lift)?;
        self.write_raw(register, &bytes).await
    }

    /// Write the configuration register (async version)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn configure(&mut self, config: &Cfg) -> Result<(), Error<I::Error>> {
        self.write(Register::Cfg, config).await
    }

    /// Read the interrupt status (async version)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_interrupt_status(&mut self) -> Result<InterruptStatus, Error<I::Error>> {
        self.read(Register::IntStat).await
    }

    /// Clear the interrupt flags set in `flags` (async version)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn clear_interrupts(&mut self, flags: &InterruptStatus) -> Result<(), Error<I::Error>> {
        self.write(Register::IntStat, flags).await
    }

    /// Select which pins form the key matrix (async version)
    ///
    /// # Errors
    ///
    /// Returns `FieldOverflow` if `rows` exceeds 8 or `columns` exceeds 10,
    /// or `Bus` if a transfer fails.
    pub async fn set_keypad_matrix(&mut self, rows: u8, columns: u8) -> Result<(), Error<I::Error>> {
        let (row_bank, column_bank, column_bank_high) = keypad_banks::<I::Error>(rows, columns)?;
        self.write(Register::KpGpio1, &row_bank).await?;
        self.write(Register::KpGpio2, &column_bank).await?;
        self.write(Register::KpGpio3, &column_bank_high).await
    }

    /// Drain the event FIFO (async version)
    ///
    /// # Errors
    ///
    /// Returns `Bus` if a transfer fails.
    pub async fn read_events(&mut self) -> Result<EventBuffer, Error<I::Error>> {
        let mut events = EventBuffer::new();
        let mut decoder = EventDecoder::new();

        let status: InterruptStatus = self.read(Register::IntStat).await?;
        let lock_ec: KeyLockEventCount = self.read(Register::KeyLckEc).await?;
        let lost = decoder.start(status, lock_ec);
        if let Some(lost) = lost {
            #[cfg(feature = "defmt")]
            defmt::warn!("TCA8418 event FIFO overflowed, events lost");
            let _ = events.push(lost);
        }

        while decoder.pending() > 0 {
            let mut code = [0u8];
            self.read_raw(Register::KeyEventA, &mut code).await?;
            match decoder.decode_entry(code[0]) {
                Event::QueueEmpty => break,
                event => {
                    let _ = events.push(event);
                }
            }
        }

        if lost.is_some() {
            self.clear_interrupts(&InterruptStatus {
                overflow: true,
                ..Default::default()
            })
            .await?;
        }

        Ok(events)
    }
}
