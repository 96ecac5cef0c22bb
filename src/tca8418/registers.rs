//! Register address map for the TCA8418
//!
//! All registers are one byte wide. GPIO configuration is spread over banks
//! of three registers (rows R0..R7, columns C0..C7, columns C8..C9) that share
//! one layout each, see [`super::codec`]. The map has no multiplexed
//! addresses, but lookups still take an [`Access`] so both controllers are
//! driven the same way.

use crate::{Access, CodecError, Error};

/// TCA8418 registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Reserved address 0x00
    Reserved,
    /// CFG - Configuration
    Cfg,
    /// INT_STAT - Interrupt status
    IntStat,
    /// KEY_LCK_EC - Key lock and event counter
    KeyLckEc,
    /// KEY_EVENT_A - Key event FIFO head
    KeyEventA,
    /// KEY_EVENT_B - Key event FIFO entry 2
    KeyEventB,
    /// KEY_EVENT_C - Key event FIFO entry 3
    KeyEventC,
    /// KEY_EVENT_D - Key event FIFO entry 4
    KeyEventD,
    /// KEY_EVENT_E - Key event FIFO entry 5
    KeyEventE,
    /// KEY_EVENT_F - Key event FIFO entry 6
    KeyEventF,
    /// KEY_EVENT_G - Key event FIFO entry 7
    KeyEventG,
    /// KEY_EVENT_H - Key event FIFO entry 8
    KeyEventH,
    /// KEY_EVENT_I - Key event FIFO entry 9
    KeyEventI,
    /// KEY_EVENT_J - Key event FIFO entry 10
    KeyEventJ,
    /// KP_LCK_TIMER - Keypad lock and interrupt mask timer
    KpLckTimer,
    /// UNLOCK1 - First unlock key
    Unlock1,
    /// UNLOCK2 - Second unlock key
    Unlock2,
    /// GPIO_INT_STAT1 - GPIO interrupt status, rows
    GpioIntStat1,
    /// GPIO_INT_STAT2 - GPIO interrupt status, columns 0..7
    GpioIntStat2,
    /// GPIO_INT_STAT3 - GPIO interrupt status, columns 8..9
    GpioIntStat3,
    /// GPIO_DAT_STAT1 - GPIO data status, rows
    GpioDatStat1,
    /// GPIO_DAT_STAT2 - GPIO data status, columns 0..7
    GpioDatStat2,
    /// GPIO_DAT_STAT3 - GPIO data status, columns 8..9
    GpioDatStat3,
    /// GPIO_DAT_OUT1 - GPIO data out, rows
    GpioDatOut1,
    /// GPIO_DAT_OUT2 - GPIO data out, columns 0..7
    GpioDatOut2,
    /// GPIO_DAT_OUT3 - GPIO data out, columns 8..9
    GpioDatOut3,
    /// GPIO_INT_EN1 - GPIO interrupt enable, rows
    GpioIntEn1,
    /// GPIO_INT_EN2 - GPIO interrupt enable, columns 0..7
    GpioIntEn2,
    /// GPIO_INT_EN3 - GPIO interrupt enable, columns 8..9
    GpioIntEn3,
    /// KP_GPIO1 - Keypad or GPIO selection, rows
    KpGpio1,
    /// KP_GPIO2 - Keypad or GPIO selection, columns 0..7
    KpGpio2,
    /// KP_GPIO3 - Keypad or GPIO selection, columns 8..9
    KpGpio3,
    /// GPI_EM1 - GPI event mode, rows
    GpiEm1,
    /// GPI_EM2 - GPI event mode, columns 0..7
    GpiEm2,
    /// GPI_EM3 - GPI event mode, columns 8..9
    GpiEm3,
    /// GPIO_DIR1 - GPIO data direction, rows
    GpioDir1,
    /// GPIO_DIR2 - GPIO data direction, columns 0..7
    GpioDir2,
    /// GPIO_DIR3 - GPIO data direction, columns 8..9
    GpioDir3,
    /// GPIO_INT_LVL1 - GPIO edge/level detect, rows
    GpioIntLvl1,
    /// GPIO_INT_LVL2 - GPIO edge/level detect, columns 0..7
    GpioIntLvl2,
    /// GPIO_INT_LVL3 - GPIO edge/level detect, columns 8..9
    GpioIntLvl3,
    /// DEBOUNCE_DIS1 - Debounce disable, rows
    DebounceDis1,
    /// DEBOUNCE_DIS2 - Debounce disable, columns 0..7
    DebounceDis2,
    /// DEBOUNCE_DIS3 - Debounce disable, columns 8..9
    DebounceDis3,
    /// GPIO_PULL1 - GPIO pull-up disable, rows
    GpioPull1,
    /// GPIO_PULL2 - GPIO pull-up disable, columns 0..7
    GpioPull2,
    /// GPIO_PULL3 - GPIO pull-up disable, columns 8..9
    GpioPull3,
}

impl Register {
    /// Every register in the map, in address order
    pub const ALL: &'static [Self] = &[
        Self::Reserved,
        Self::Cfg,
        Self::IntStat,
        Self::KeyLckEc,
        Self::KeyEventA,
        Self::KeyEventB,
        Self::KeyEventC,
        Self::KeyEventD,
        Self::KeyEventE,
        Self::KeyEventF,
        Self::KeyEventG,
        Self::KeyEventH,
        Self::KeyEventI,
        Self::KeyEventJ,
        Self::KpLckTimer,
        Self::Unlock1,
        Self::Unlock2,
        Self::GpioIntStat1,
        Self::GpioIntStat2,
        Self::GpioIntStat3,
        Self::GpioDatStat1,
        Self::GpioDatStat2,
        Self::GpioDatStat3,
        Self::GpioDatOut1,
        Self::GpioDatOut2,
        Self::GpioDatOut3,
        Self::GpioIntEn1,
        Self::GpioIntEn2,
        Self::GpioIntEn3,
        Self::KpGpio1,
        Self::KpGpio2,
        Self::KpGpio3,
        Self::GpiEm1,
        Self::GpiEm2,
        Self::GpiEm3,
        Self::GpioDir1,
        Self::GpioDir2,
        Self::GpioDir3,
        Self::GpioIntLvl1,
        Self::GpioIntLvl2,
        Self::GpioIntLvl3,
        Self::DebounceDis1,
        Self::DebounceDis2,
        Self::DebounceDis3,
        Self::GpioPull1,
        Self::GpioPull2,
        Self::GpioPull3,
    ];

    /// Bus address byte
    ///
    /// The map is contiguous from `0x00` to `0x2E`, so the address is the
    /// position in [`ALL`](Self::ALL).
    pub const fn address(self) -> u8 {
        self as u8
    }

    /// Width in bytes of one bus transfer for this register
    pub const fn width(self) -> usize {
        1
    }

    /// Whether the register has this name in the given access context
    pub const fn accepts(self, access: Access) -> bool {
        let _ = access;
        true
    }

    /// Look up the register at `address` for the given access context
    ///
    /// # Errors
    ///
    /// Returns `InvalidAddress` if no register lives at `address`.
    pub fn from_address(address: u8, access: Access) -> Result<Self, CodecError> {
        Self::ALL
            .get(usize::from(address))
            .copied()
            .filter(|register| register.accepts(access))
            .ok_or(Error::InvalidAddress(address))
    }
}
