//! Register value codecs for the TCA8418
//!
//! Bit positions follow the datasheet; layouts are listed from bit 7 down.
//!
//! The GPIO registers come in banks of three that share a layout:
//! [`RowBank`] for R0..R7, [`ColumnBank`] for C0..C7 and [`ColumnBankHigh`]
//! for C8..C9. The same three types serve the interrupt status, data status,
//! data output, interrupt enable, keypad selection, GPI event mode,
//! direction, interrupt level, debounce disable and pull-up disable banks.

use crate::field::{Field, RegisterValue};
use crate::CodecError;

/// CFG - configuration
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct Cfg {
    /// Auto-increment the address on multi-byte reads and writes (AI)
    pub auto_increment: bool,
    /// GPI events are tracked while the keypad is locked (GPI_E_CFG)
    pub gpi_events_when_locked: bool,
    /// On overflow, push out the oldest event instead of dropping new ones (OVR_FLOW_M)
    pub overflow_rollover: bool,
    /// Deassert INT for 50 µs and reassert while interrupts remain (INT_CFG)
    pub interrupt_retrigger: bool,
    /// Overflow interrupt enable (OVR_FLOW_IEN)
    pub overflow_interrupt: bool,
    /// Keypad lock interrupt enable (K_LCK_IEN)
    pub key_lock_interrupt: bool,
    /// GPI interrupt enable (GPI_IEN)
    pub gpi_interrupt: bool,
    /// Key events interrupt enable (KE_IEN)
    pub key_event_interrupt: bool,
}

impl Cfg {
    const AI: Field = Field::flag("AI", 7);
    const GPI_E_CFG: Field = Field::flag("GPI_E_CFG", 6);
    const OVR_FLOW_M: Field = Field::flag("OVR_FLOW_M", 5);
    const INT_CFG: Field = Field::flag("INT_CFG", 4);
    const OVR_FLOW_IEN: Field = Field::flag("OVR_FLOW_IEN", 3);
    const K_LCK_IEN: Field = Field::flag("K_LCK_IEN", 2);
    const GPI_IEN: Field = Field::flag("GPI_IEN", 1);
    const KE_IEN: Field = Field::flag("KE_IEN", 0);

    /// Key event and overflow interrupts with auto-increment, the usual
    /// interrupt-driven keypad setup
    pub const fn keypad_interrupts() -> Self {
        Self {
            auto_increment: true,
            gpi_events_when_locked: false,
            overflow_rollover: false,
            interrupt_retrigger: true,
            overflow_interrupt: true,
            key_lock_interrupt: false,
            gpi_interrupt: false,
            key_event_interrupt: true,
        }
    }
}

impl RegisterValue for Cfg {
    const WIDTH: usize = 1;
    const LAYOUT: &'static [Field] = &[
        Self::AI,
        Self::GPI_E_CFG,
        Self::OVR_FLOW_M,
        Self::INT_CFG,
        Self::OVR_FLOW_IEN,
        Self::K_LCK_IEN,
        Self::GPI_IEN,
        Self::KE_IEN,
    ];

    fn from_raw(raw: u16) -> Self {
        Self {
            auto_increment: Self::AI.get(raw),
            gpi_events_when_locked: Self::GPI_E_CFG.get(raw),
            overflow_rollover: Self::OVR_FLOW_M.get(raw),
            interrupt_retrigger: Self::INT_CFG.get(raw),
            overflow_interrupt: Self::OVR_FLOW_IEN.get(raw),
            key_lock_interrupt: Self::K_LCK_IEN.get(raw),
            gpi_interrupt: Self::GPI_IEN.get(raw),
            key_event_interrupt: Self::KE_IEN.get(raw),
        }
    }

    fn to_raw(&self) -> Result<u16, CodecError> {
        let raw = Self::AI.set(0, self.auto_increment);
        let raw = Self::GPI_E_CFG.set(raw, self.gpi_events_when_locked);
        let raw = Self::OVR_FLOW_M.set(raw, self.overflow_rollover);
        let raw = Self::INT_CFG.set(raw, self.interrupt_retrigger);
        let raw = Self::OVR_FLOW_IEN.set(raw, self.overflow_interrupt);
        let raw = Self::K_LCK_IEN.set(raw, self.key_lock_interrupt);
        let raw = Self::GPI_IEN.set(raw, self.gpi_interrupt);
        Ok(Self::KE_IEN.set(raw, self.key_event_interrupt))
    }
}

/// INT_STAT - interrupt status
///
/// Flags are cleared by writing 1 to them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct InterruptStatus {
    /// CTRL-ALT-DEL key sequence detected (CAD_INT)
    pub ctrl_alt_del: bool,
    /// Event FIFO overflowed (OVR_FLOW_INT)
    pub overflow: bool,
    /// Keypad lock state changed (K_LCK_INT)
    pub key_lock: bool,
    /// GPI interrupt pending (GPI_INT)
    pub gpi: bool,
    /// Key event pending (K_INT)
    pub key_event: bool,
}

impl InterruptStatus {
    const CAD_INT: Field = Field::flag("CAD_INT", 4);
    const OVR_FLOW_INT: Field = Field::flag("OVR_FLOW_INT", 3);
    const K_LCK_INT: Field = Field::flag("K_LCK_INT", 2);
    const GPI_INT: Field = Field::flag("GPI_INT", 1);
    const K_INT: Field = Field::flag("K_INT", 0);

    /// Check if any interrupt flag is set
    pub const fn any_set(&self) -> bool {
        self.ctrl_alt_del || self.overflow || self.key_lock || self.gpi || self.key_event
    }
}

impl RegisterValue for InterruptStatus {
    const WIDTH: usize = 1;
    const LAYOUT: &'static [Field] = &[
        Field::reserved(5, 3),
        Self::CAD_INT,
        Self::OVR_FLOW_INT,
        Self::K_LCK_INT,
        Self::GPI_INT,
        Self::K_INT,
    ];

    fn from_raw(raw: u16) -> Self {
        Self {
            ctrl_alt_del: Self::CAD_INT.get(raw),
            overflow: Self::OVR_FLOW_INT.get(raw),
            key_lock: Self::K_LCK_INT.get(raw),
            gpi: Self::GPI_INT.get(raw),
            key_event: Self::K_INT.get(raw),
        }
    }

    fn to_raw(&self) -> Result<u16, CodecError> {
        let raw = Self::CAD_INT.set(0, self.ctrl_alt_del);
        let raw = Self::OVR_FLOW_INT.set(raw, self.overflow);
        let raw = Self::K_LCK_INT.set(raw, self.key_lock);
        let raw = Self::GPI_INT.set(raw, self.gpi);
        Ok(Self::K_INT.set(raw, self.key_event))
    }
}

/// KEY_LCK_EC - keypad lock status and FIFO event count
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyLockEventCount {
    /// Key lock enable (K_LCK_EN)
    pub lock_enabled: bool,
    /// Keypad lock status, second unlock key (LCK2)
    pub lock2: bool,
    /// Keypad lock status, first unlock key (LCK1)
    pub lock1: bool,
    /// Number of events in the FIFO, 0..=10 (KEC, 4 bits)
    pub count: u8,
}

impl KeyLockEventCount {
    const K_LCK_EN: Field = Field::flag("K_LCK_EN", 6);
    const LCK2: Field = Field::flag("LCK2", 5);
    const LCK1: Field = Field::flag("LCK1", 4);
    const KEC: Field = Field::numeric("KEC", 0, 4);
}

impl RegisterValue for KeyLockEventCount {
    const WIDTH: usize = 1;
    const LAYOUT: &'static [Field] = &[
        Field::reserved(7, 1),
        Self::K_LCK_EN,
        Self::LCK2,
        Self::LCK1,
        Self::KEC,
    ];

    fn from_raw(raw: u16) -> Self {
        Self {
            lock_enabled: Self::K_LCK_EN.get(raw),
            lock2: Self::LCK2.get(raw),
            lock1: Self::LCK1.get(raw),
            count: Self::KEC.extract(raw) as u8,
        }
    }

    fn to_raw(&self) -> Result<u16, CodecError> {
        let raw = Self::K_LCK_EN.set(0, self.lock_enabled);
        let raw = Self::LCK2.set(raw, self.lock2);
        let raw = Self::LCK1.set(raw, self.lock1);
        Self::KEC.insert(raw, self.count.into())
    }
}

/// KEY_EVENT_A..J - one entry of the key event FIFO
///
/// A zero byte means the FIFO is empty; see [`super::event`] for the key
/// code table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEventCode {
    /// Set for a press, clear for a release
    pub pressed: bool,
    /// Key or GPI code (7 bits)
    pub code: u8,
}

impl KeyEventCode {
    const PRESS: Field = Field::flag("PRESS", 7);
    const KEYCODE: Field = Field::numeric("KEYCODE", 0, 7);
}

impl RegisterValue for KeyEventCode {
    const WIDTH: usize = 1;
    const LAYOUT: &'static [Field] = &[Self::PRESS, Self::KEYCODE];

    fn from_raw(raw: u16) -> Self {
        Self {
            pressed: Self::PRESS.get(raw),
            code: Self::KEYCODE.extract(raw) as u8,
        }
    }

    fn to_raw(&self) -> Result<u16, CodecError> {
        let raw = Self::PRESS.set(0, self.pressed);
        Self::KEYCODE.insert(raw, self.code.into())
    }
}

/// Bank 1 of a GPIO register group: one bit per row pin R0..R7
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RowBank {
    /// Bit per row pin, indexed by row number
    pub rows: [bool; 8],
}

impl RowBank {
    const R: [Field; 8] = [
        Field::flag("R0", 0),
        Field::flag("R1", 1),
        Field::flag("R2", 2),
        Field::flag("R3", 3),
        Field::flag("R4", 4),
        Field::flag("R5", 5),
        Field::flag("R6", 6),
        Field::flag("R7", 7),
    ];

    /// First `count` rows set, the rest clear
    pub fn first(count: usize) -> Self {
        Self {
            rows: core::array::from_fn(|row| row < count),
        }
    }
}

impl RegisterValue for RowBank {
    const WIDTH: usize = 1;
    const LAYOUT: &'static [Field] = &[
        Self::R[7],
        Self::R[6],
        Self::R[5],
        Self::R[4],
        Self::R[3],
        Self::R[2],
        Self::R[1],
        Self::R[0],
    ];

    fn from_raw(raw: u16) -> Self {
        Self {
            rows: Self::R.map(|field| field.get(raw)),
        }
    }

    fn to_raw(&self) -> Result<u16, CodecError> {
        Ok(Self::R
            .iter()
            .zip(self.rows)
            .fold(0, |raw, (field, bit)| field.set(raw, bit)))
    }
}

/// Bank 2 of a GPIO register group: one bit per column pin C0..C7
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColumnBank {
    /// Bit per column pin, indexed by column number
    pub columns: [bool; 8],
}

impl ColumnBank {
    const C: [Field; 8] = [
        Field::flag("C0", 0),
        Field::flag("C1", 1),
        Field::flag("C2", 2),
        Field::flag("C3", 3),
        Field::flag("C4", 4),
        Field::flag("C5", 5),
        Field::flag("C6", 6),
        Field::flag("C7", 7),
    ];

    /// First `count` columns set, the rest clear
    pub fn first(count: usize) -> Self {
        Self {
            columns: core::array::from_fn(|column| column < count),
        }
    }
}

impl RegisterValue for ColumnBank {
    const WIDTH: usize = 1;
    const LAYOUT: &'static [Field] = &[
        Self::C[7],
        Self::C[6],
        Self::C[5],
        Self::C[4],
        Self::C[3],
        Self::C[2],
        Self::C[1],
        Self::C[0],
    ];

    fn from_raw(raw: u16) -> Self {
        Self {
            columns: Self::C.map(|field| field.get(raw)),
        }
    }

    fn to_raw(&self) -> Result<u16, CodecError> {
        Ok(Self::C
            .iter()
            .zip(self.columns)
            .fold(0, |raw, (field, bit)| field.set(raw, bit)))
    }
}

/// Bank 3 of a GPIO register group: column pins C8 and C9
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColumnBankHigh {
    /// C8 bit
    pub c8: bool,
    /// C9 bit
    pub c9: bool,
}

impl ColumnBankHigh {
    const C9: Field = Field::flag("C9", 1);
    const C8: Field = Field::flag("C8", 0);

    /// Columns 8.. of the first `count` columns set
    pub const fn first(count: usize) -> Self {
        Self {
            c8: count > 8,
            c9: count > 9,
        }
    }
}

impl RegisterValue for ColumnBankHigh {
    const WIDTH: usize = 1;
    const LAYOUT: &'static [Field] = &[Field::reserved(2, 6), Self::C9, Self::C8];

    fn from_raw(raw: u16) -> Self {
        Self {
            c8: Self::C8.get(raw),
            c9: Self::C9.get(raw),
        }
    }

    fn to_raw(&self) -> Result<u16, CodecError> {
        let raw = Self::C9.set(0, self.c9);
        Ok(Self::C8.set(raw, self.c8))
    }
}
