//! Key event decoding for the LM8330
//!
//! The LM8330 reports key transitions through a 15-entry FIFO behind the
//! `EVTCODE` register: every read pops one entry, and an empty FIFO reads as
//! `0x7F`. Events that did not fit are dropped and flagged through `ELINT` in
//! `KBDRIS`/`KBDMIS`, which the decoder surfaces as [`Event::EventLost`].
//!
//! Separately, `KBDCODE0..3` hold the keys currently held down, chained by
//! their `MULTIKEY` bit. [`decode_key_code`] interprets one link of that chain.
//!
//! Nothing here touches the bus: the caller reads the registers, in order, and
//! feeds the bytes in.

use super::codec::{EvtCode, KbdCode, KbdInterruptStatus};
use crate::field::RegisterValue;
use crate::{CodecError, Error, Transition};

/// Depth of the hardware event FIFO
pub const FIFO_DEPTH: usize = 15;

/// Column of a decoded key
///
/// Column codes 12..=14 are not matrix columns and are tagged separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Column {
    /// Physical matrix column 0..=11
    Matrix(u8),
    /// Special function key (code 12)
    SpecialFunction,
    /// Dedicated key 0 or 1 (codes 13 and 14)
    Dedicated(u8),
}

impl Column {
    /// Highest matrix column code
    pub const MAX_MATRIX: u8 = 11;

    /// Interpret a 4-bit KEYCOL value; code 15 is not a key
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0..=Self::MAX_MATRIX => Some(Self::Matrix(code)),
            12 => Some(Self::SpecialFunction),
            13 | 14 => Some(Self::Dedicated(code - 13)),
            _ => None,
        }
    }

    /// Raw 4-bit KEYCOL value
    pub const fn code(self) -> u8 {
        match self {
            Self::Matrix(column) => column,
            Self::SpecialFunction => 12,
            Self::Dedicated(index) => 13 + index,
        }
    }
}

/// A single key transition popped from the FIFO
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    /// Row index 0..=7
    pub row: u8,
    /// Column of the key
    pub column: Column,
    /// Press or release
    pub transition: Transition,
}

/// Outcome of decoding one FIFO read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A key was pressed or released
    Key(KeyEvent),
    /// The FIFO has no more entries
    QueueEmpty,
    /// The FIFO overflowed; events between the previous and next key are gone
    EventLost,
    /// An entry with an undefined key code was popped
    Invalid(u8),
}

/// Decode one `EVTCODE` byte
///
/// # Errors
///
/// Returns `InvalidKeyCode` for a column code of 15 other than the empty
/// sentinel.
pub fn decode_event(raw: u8) -> Result<Event, CodecError> {
    if raw & EvtCode::EMPTY == EvtCode::EMPTY {
        return Ok(Event::QueueEmpty);
    }
    let code = EvtCode::from_raw(raw.into());
    let column = Column::from_code(code.column).ok_or(Error::InvalidKeyCode(raw))?;
    Ok(Event::Key(KeyEvent {
        row: code.row,
        column,
        transition: if code.release {
            Transition::Released
        } else {
            Transition::Pressed
        },
    }))
}

/// Decoder state between FIFO reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecoderState {
    /// No event pending
    Idle,
    /// An event was decoded; more may follow until the FIFO reads empty
    Reading,
}

/// Tracks where the caller is in draining the event FIFO
///
/// ```ignore
/// let mut decoder = EventDecoder::new();
/// if let Some(lost) = decoder.start(kbdris) {
///     handle(lost);
/// }
/// while decoder.state() == DecoderState::Reading {
///     match decoder.decode(read(Register::EvtCode)?)? {
///         Event::Key(key) => handle_key(key),
///         _ => break,
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventDecoder {
    state: DecoderState,
}

impl EventDecoder {
    /// New decoder in the idle state
    pub const fn new() -> Self {
        Self {
            state: DecoderState::Idle,
        }
    }

    /// Current state
    pub const fn state(&self) -> DecoderState {
        self.state
    }

    /// Begin a drain from a `KBDRIS`/`KBDMIS` reading
    ///
    /// Returns [`Event::EventLost`] if the FIFO overflowed since it was last
    /// cleared. Enters [`DecoderState::Reading`] when an event is pending or
    /// events were lost, since the FIFO is full in that case.
    pub fn start(&mut self, status: KbdInterruptStatus) -> Option<Event> {
        if status.event || status.event_lost {
            self.state = DecoderState::Reading;
        }
        status.event_lost.then_some(Event::EventLost)
    }

    /// Decode the next `EVTCODE` byte
    ///
    /// An empty FIFO returns the decoder to [`DecoderState::Idle`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidKeyCode` for an undefined column code. The state is
    /// left unchanged so the caller may keep reading.
    pub fn decode(&mut self, raw: u8) -> Result<Event, CodecError> {
        let event = decode_event(raw)?;
        self.state = match event {
            Event::QueueEmpty => DecoderState::Idle,
            Event::Key(_) | Event::EventLost | Event::Invalid(_) => DecoderState::Reading,
        };
        Ok(event)
    }

    /// Decode the next `EVTCODE` byte, keeping an undefined entry as
    /// [`Event::Invalid`] so a drain can carry on past it
    pub fn decode_entry(&mut self, raw: u8) -> Event {
        self.decode(raw).unwrap_or(Event::Invalid(raw))
    }
}

impl Default for EventDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// A key currently held down, from one `KBDCODE` register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeldKey {
    /// Row index 0..=7
    pub row: u8,
    /// Column of the key
    pub column: Column,
    /// The next `KBDCODE` register holds another key
    pub more: bool,
}

/// Decode one `KBDCODE` byte
///
/// Returns `None` when the register holds no key (row and column all ones).
///
/// # Errors
///
/// Returns `InvalidKeyCode` for a column code of 15 with any other row.
pub fn decode_key_code(raw: u8) -> Result<Option<HeldKey>, CodecError> {
    let code = KbdCode::from_raw(raw.into());
    if code.row == 7 && code.column == 15 {
        return Ok(None);
    }
    let column = Column::from_code(code.column).ok_or(Error::InvalidKeyCode(raw))?;
    Ok(Some(HeldKey {
        row: code.row,
        column,
        more: code.multikey,
    }))
}
