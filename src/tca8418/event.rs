//! Key event decoding for the TCA8418
//!
//! The TCA8418 queues up to ten events behind `KEY_EVENT_A`. Every read pops
//! one entry and a zero byte means the FIFO is empty. `KEY_LCK_EC` reports
//! how many entries are queued, so a drain knows its length up front.
//!
//! Key codes 1..=80 address the 8x10 matrix as `row * 10 + column + 1`.
//! Codes 97..=114 report GPI transitions on pins configured as inputs.

use super::codec::{InterruptStatus, KeyEventCode, KeyLockEventCount};
use crate::field::RegisterValue;
use crate::{CodecError, Error, Transition};

/// Depth of the hardware event FIFO
pub const FIFO_DEPTH: usize = 10;

/// Matrix rows
pub const ROWS: u8 = 8;

/// Matrix columns
pub const COLUMNS: u8 = 10;

const FIRST_GPI_ROW: u8 = 97;
const FIRST_GPI_COLUMN: u8 = 105;

/// A pin reporting GPI events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpiPin {
    /// ROW0..ROW7
    Row(u8),
    /// COL0..COL9
    Column(u8),
}

/// A single key transition from the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    /// Row index 0..=7
    pub row: u8,
    /// Column index 0..=9
    pub column: u8,
    /// Press or release
    pub transition: Transition,
}

impl KeyEvent {
    /// FIFO key code for this key, 1..=80
    pub const fn code(&self) -> u8 {
        self.row * COLUMNS + self.column + 1
    }
}

/// Outcome of decoding one FIFO read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A matrix key was pressed or released
    Key(KeyEvent),
    /// A GPI pin changed level
    Gpi {
        /// Pin that changed
        pin: GpiPin,
        /// Press maps to the active level of the pin
        transition: Transition,
    },
    /// The FIFO has no more entries
    QueueEmpty,
    /// The FIFO overflowed and events were dropped
    EventLost,
    /// An entry with an undefined key code was popped
    Invalid(u8),
}

/// Decode one `KEY_EVENT_A` byte
///
/// # Errors
///
/// Returns `InvalidKeyCode` for codes 81..=96 and 115..=127.
pub fn decode_event(raw: u8) -> Result<Event, CodecError> {
    let entry = KeyEventCode::from_raw(raw.into());
    let transition = if entry.pressed {
        Transition::Pressed
    } else {
        Transition::Released
    };
    let event = match entry.code {
        0 => Event::QueueEmpty,
        code @ 1..=80 => Event::Key(KeyEvent {
            row: (code - 1) / COLUMNS,
            column: (code - 1) % COLUMNS,
            transition,
        }),
        code @ FIRST_GPI_ROW..=104 => Event::Gpi {
            pin: GpiPin::Row(code - FIRST_GPI_ROW),
            transition,
        },
        code @ FIRST_GPI_COLUMN..=114 => Event::Gpi {
            pin: GpiPin::Column(code - FIRST_GPI_COLUMN),
            transition,
        },
        _ => return Err(Error::InvalidKeyCode(raw)),
    };
    Ok(event)
}

/// Decoder state between FIFO reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecoderState {
    /// No event pending
    Idle,
    /// Events remain in the FIFO
    Reading,
}

/// Counts down the FIFO entries announced by `KEY_LCK_EC`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventDecoder {
    pending: u8,
}

impl EventDecoder {
    /// New decoder with nothing pending
    pub const fn new() -> Self {
        Self { pending: 0 }
    }

    /// Current state
    pub const fn state(&self) -> DecoderState {
        if self.pending == 0 {
            DecoderState::Idle
        } else {
            DecoderState::Reading
        }
    }

    /// Entries still expected in the FIFO
    pub const fn pending(&self) -> u8 {
        self.pending
    }

    /// Begin a drain from `INT_STAT` and `KEY_LCK_EC`
    ///
    /// Returns [`Event::EventLost`] if the FIFO overflowed. The event count
    /// is clamped to the FIFO depth.
    pub fn start(&mut self, status: InterruptStatus, lock_ec: KeyLockEventCount) -> Option<Event> {
        self.pending = lock_ec.count.min(FIFO_DEPTH as u8);
        status.overflow.then_some(Event::EventLost)
    }

    /// Decode the next `KEY_EVENT_A` byte
    ///
    /// An empty entry ends the drain even if the count said otherwise.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKeyCode` for an undefined code. The entry still counts
    /// as popped.
    pub fn decode(&mut self, raw: u8) -> Result<Event, CodecError> {
        let event = decode_event(raw);
        self.pending = match event {
            Ok(Event::QueueEmpty) => 0,
            _ => self.pending.saturating_sub(1),
        };
        event
    }

    /// Decode the next `KEY_EVENT_A` byte, keeping an undefined entry as
    /// [`Event::Invalid`] so a drain can carry on past it
    pub fn decode_entry(&mut self, raw: u8) -> Event {
        self.decode(raw).unwrap_or(Event::Invalid(raw))
    }
}
