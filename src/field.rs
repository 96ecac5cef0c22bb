//! Bit-field primitives shared by the register codecs
//!
//! Every register with structure is described by a *field layout*: an ordered
//! list of [`Field`]s, written most-significant field first, that covers the
//! full register width without gaps or overlaps. Reserved ranges are part of
//! the layout so coverage can be checked, but they never show up in a decoded
//! value and are always encoded as zero.
//!
//! Register values travel over the bus as 1 or 2 bytes. Two-byte registers are
//! big-endian: the lower address holds bits 15..8. A codec only ever accepts
//! or produces the full byte group, so a half-written 16-bit value cannot be
//! observed through this crate.

use crate::CodecError;
use crate::Error;

/// What kind of value a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldKind {
    /// Single-bit flag
    Flag,
    /// Unsigned number limited only by the bit width
    Numeric,
    /// Enumerated value with named states
    Enumerated,
    /// Reserved: dropped on decode, forced to zero on encode
    Reserved,
}

/// A named bit range inside a register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    /// Datasheet name
    pub name: &'static str,
    /// Bit position of the least significant bit
    pub offset: u8,
    /// Width in bits
    pub width: u8,
    /// Value domain
    pub kind: FieldKind,
}

impl Field {
    /// Single-bit flag at `offset`
    pub const fn flag(name: &'static str, offset: u8) -> Self {
        Self {
            name,
            offset,
            width: 1,
            kind: FieldKind::Flag,
        }
    }

    /// Unsigned number occupying `width` bits starting at `offset`
    pub const fn numeric(name: &'static str, offset: u8, width: u8) -> Self {
        Self {
            name,
            offset,
            width,
            kind: FieldKind::Numeric,
        }
    }

    /// Enumerated value occupying `width` bits starting at `offset`
    pub const fn enumerated(name: &'static str, offset: u8, width: u8) -> Self {
        Self {
            name,
            offset,
            width,
            kind: FieldKind::Enumerated,
        }
    }

    /// Reserved range occupying `width` bits starting at `offset`
    pub const fn reserved(offset: u8, width: u8) -> Self {
        Self {
            name: "RESERVED",
            offset,
            width,
            kind: FieldKind::Reserved,
        }
    }

    /// Largest value the field can hold
    pub const fn max(&self) -> u16 {
        ((1u32 << self.width) - 1) as u16
    }

    /// Mask of the field's bits in register position
    pub const fn mask(&self) -> u16 {
        self.max() << self.offset
    }

    /// Whether the field is a reserved range
    pub const fn is_reserved(&self) -> bool {
        matches!(self.kind, FieldKind::Reserved)
    }

    /// Extract the field from a raw register value
    pub const fn extract(&self, raw: u16) -> u16 {
        (raw & self.mask()) >> self.offset
    }

    /// Read a flag field
    pub const fn get(&self, raw: u16) -> bool {
        self.extract(raw) != 0
    }

    /// Place `value` into the field's bits of `raw`
    ///
    /// Reserved fields ignore `value` and clear their bits.
    ///
    /// # Errors
    ///
    /// Returns `FieldOverflow` if `value` does not fit in the field's width.
    pub const fn insert(&self, raw: u16, value: u16) -> Result<u16, CodecError> {
        if self.is_reserved() {
            return Ok(raw & !self.mask());
        }
        if value > self.max() {
            return Err(Error::FieldOverflow {
                field: self.name,
                value,
            });
        }
        Ok((raw & !self.mask()) | (value << self.offset))
    }

    /// Set or clear a flag field
    pub const fn set(&self, raw: u16, value: bool) -> u16 {
        if value {
            raw | self.mask()
        } else {
            raw & !self.mask()
        }
    }
}

/// Combined mask of every reserved range in a layout
pub const fn reserved_mask(layout: &[Field]) -> u16 {
    let mut mask = 0;
    let mut i = 0;
    while i < layout.len() {
        if layout[i].is_reserved() {
            mask |= layout[i].mask();
        }
        i += 1;
    }
    mask
}

/// Raw bytes of one register, exactly as exchanged over the bus
pub type RegisterBytes = heapless::Vec<u8, 2>;

/// Codec between raw register bytes and a typed register view
///
/// Implementors describe their layout in [`LAYOUT`](Self::LAYOUT) and provide
/// the raw-value conversions; the byte-level [`decode`](Self::decode) and
/// [`encode`](Self::encode) are shared.
pub trait RegisterValue: Sized {
    /// Register width in bytes (1 or 2)
    const WIDTH: usize;

    /// Field layout, most significant field first
    const LAYOUT: &'static [Field];

    /// Build the typed view from a raw value
    ///
    /// Reserved bits are ignored, so values differing only in reserved bits
    /// decode identically.
    fn from_raw(raw: u16) -> Self;

    /// Pack the typed view into a raw value with reserved bits cleared
    ///
    /// # Errors
    ///
    /// Returns `FieldOverflow` if a numeric field exceeds its bit width.
    fn to_raw(&self) -> Result<u16, CodecError>;

    /// Decode the register from the full group of bytes read off the bus
    ///
    /// # Errors
    ///
    /// Returns `PartialRegister` unless exactly [`WIDTH`](Self::WIDTH) bytes
    /// are supplied.
    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() != Self::WIDTH {
            return Err(Error::PartialRegister {
                expected: Self::WIDTH,
                actual: bytes.len(),
            });
        }
        let raw = bytes
            .iter()
            .fold(0u16, |raw, &byte| (raw << 8) | u16::from(byte));
        Ok(Self::from_raw(raw))
    }

    /// Encode the register into the full group of bytes to write to the bus
    ///
    /// # Errors
    ///
    /// Returns `FieldOverflow` if a numeric field exceeds its bit width.
    fn encode(&self) -> Result<RegisterBytes, CodecError> {
        let raw = self.to_raw()? & !reserved_mask(Self::LAYOUT);
        let [high, low] = raw.to_be_bytes();
        let mut bytes = RegisterBytes::new();
        if Self::WIDTH == 2 {
            // Capacity is 2, both pushes fit.
            let _ = bytes.push(high);
        }
        let _ = bytes.push(low);
        Ok(bytes)
    }
}
