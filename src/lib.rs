#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

use core::convert::Infallible;

pub mod field;
pub mod interface;

pub mod lm8330;
pub mod tca8418;

// Re-export main types
pub use field::{Field, FieldKind, RegisterBytes, RegisterValue};
pub use interface::I2cInterface;

/// How a register address is being accessed
///
/// Some controllers multiplex two registers onto one address and pick the
/// meaning from the direction of the transfer, so address lookups take the
/// access context as well as the address byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    /// Register is being read from the device
    Read,
    /// Register is being written to the device
    Write,
}

/// Direction of a key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Key went down
    Pressed,
    /// Key came back up
    Released,
}

/// Driver errors
///
/// `E` is the error type of the bus transport. Pure codec and decoder
/// operations never touch the bus and return [`CodecError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Address is not part of the controller's register map
    InvalidAddress(u8),
    /// Field value does not fit in the field's bit width
    FieldOverflow {
        /// Datasheet name of the field
        field: &'static str,
        /// Value that was rejected
        value: u16,
    },
    /// Wrong number of bytes supplied for a register
    PartialRegister {
        /// Register width in bytes
        expected: usize,
        /// Number of bytes supplied
        actual: usize,
    },
    /// Codec width does not match the width of the addressed register
    WidthMismatch {
        /// Width of the addressed register in bytes
        expected: usize,
        /// Width of the codec in bytes
        actual: usize,
    },
    /// Key-event byte is neither a key code nor the empty-queue sentinel
    InvalidKeyCode(u8),
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}

/// Error produced by codec and decoder operations, which never touch the bus
pub type CodecError = Error<Infallible>;

impl CodecError {
    /// Re-type a bus-independent error for a driver with transport error `E`
    pub const fn lift<E>(self) -> Error<E> {
        match self {
            Self::Bus(never) => match never {},
            Self::InvalidAddress(address) => Error::InvalidAddress(address),
            Self::FieldOverflow { field, value } => Error::FieldOverflow { field, value },
            Self::PartialRegister { expected, actual } => {
                Error::PartialRegister { expected, actual }
            }
            Self::WidthMismatch { expected, actual } => Error::WidthMismatch { expected, actual },
            Self::InvalidKeyCode(code) => Error::InvalidKeyCode(code),
        }
    }
}
