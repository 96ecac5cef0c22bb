//! Register address map for the LM8330
//!
//! Most registers are a single byte. The dedicated-key configuration and the
//! pull resistor configuration registers are 16 bits wide and occupy two
//! consecutive addresses; they are listed once, at the address of their high
//! byte, with [`Register::width`] returning 2.
//!
//! Address `0x80` is multiplexed: writing it sets the I2C slave address
//! (`I2CSA`), reading it returns the manufacturer code (`MFGCODE`). Both names
//! are kept and told apart by [`Access`].

use crate::{Access, CodecError, Error};

/// LM8330 registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// KBDSETTLE - Keypad settle time
    KbdSettle,
    /// KBDBOUNCE - Debounce time
    KbdBounce,
    /// KBDSIZE - Keypad size
    KbdSize,
    /// KBDDEDCFG - Dedicated key configuration, high byte (16-bit with `KbdDedCfg1`)
    KbdDedCfg0,
    /// KBDDEDCFG - Dedicated key configuration, low byte
    KbdDedCfg1,
    /// KBDRIS - Keyboard raw interrupt status
    KbdRis,
    /// KBDMIS - Keyboard masked interrupt status
    KbdMis,
    /// KBDIC - Keypad interrupt clear
    KbdIc,
    /// KBDMSK - Keypad interrupt mask
    KbdMsk,
    /// KBDCODE0 - First detected key
    KbdCode0,
    /// KBDCODE1 - Second detected key
    KbdCode1,
    /// KBDCODE2 - Third detected key
    KbdCode2,
    /// KBDCODE3 - Fourth detected key
    KbdCode3,
    /// EVTCODE - Key event FIFO (no auto-increment)
    EvtCode,
    /// TIMCFG0 - Timer 0 configuration
    TimCfg0,
    /// PWMCFG0 - PWM 0 configuration
    PwmCfg0,
    /// TIMCFG1 - Timer 1 configuration
    TimCfg1,
    /// PWMCFG1 - PWM 1 configuration
    PwmCfg1,
    /// TIMCFG2 - Timer 2 configuration
    TimCfg2,
    /// PWMCFG2 - PWM 2 configuration
    PwmCfg2,
    /// TIMSWRES - Timer software reset
    TimSwRes,
    /// TIMRIS - Timer raw interrupt status
    TimRis,
    /// TIMMIS - Timer masked interrupt status
    TimMis,
    /// TIMIC - Timer interrupt clear
    TimIc,
    /// PWMWP - PWM pattern write pointer
    PwmWp,
    /// PWMCFG - PWM pattern data
    PwmCfg,
    /// I2CSA - Slave address (write context of 0x80)
    I2cSa,
    /// MFGCODE - Manufacturer code (read context of 0x80)
    MfgCode,
    /// SWREV - Software revision
    SwRev,
    /// RSTCTRL - Reset control
    RstCtrl,
    /// RSTINTCLR - Clear power-on interrupt
    RstIntClr,
    /// CLKMODE - Clock mode
    ClkMode,
    /// CLKEN - Clock enable
    ClkEn,
    /// AUTOSLP - Auto-sleep enable
    AutoSlp,
    /// AUTOSLPTI - Auto-sleep time, low byte
    AutoSlpTiL,
    /// AUTOSLPTI - Auto-sleep time, high byte
    AutoSlpTiH,
    /// IRQST - Global interrupt status
    IrqSt,
    /// IOCFG - Input/output pin mapping
    IoCfg,
    /// IOPC0 - Pull resistor configuration 0 (16-bit)
    IoPc0,
    /// IOPC1 - Pull resistor configuration 1 (16-bit)
    IoPc1,
    /// IOPC2 - Pull resistor configuration 2 (16-bit)
    IoPc2,
    /// GPIODATA0 - GPIO data, port 0
    GpioData0,
    /// GPIODATA1 - GPIO data, port 1
    GpioData1,
    /// GPIODATA2 - GPIO data, port 2
    GpioData2,
    /// GPIODIR0 - GPIO direction, port 0
    GpioDir0,
    /// GPIODIR1 - GPIO direction, port 1
    GpioDir1,
    /// GPIODIR2 - GPIO direction, port 2
    GpioDir2,
    /// GPIOIS0 - GPIO interrupt sense, port 0
    GpioIs0,
    /// GPIOIS1 - GPIO interrupt sense, port 1
    GpioIs1,
    /// GPIOIS2 - GPIO interrupt sense, port 2
    GpioIs2,
    /// GPIOIBE0 - GPIO interrupt on both edges, port 0
    GpioIbe0,
    /// GPIOIBE1 - GPIO interrupt on both edges, port 1
    GpioIbe1,
    /// GPIOIBE2 - GPIO interrupt on both edges, port 2
    GpioIbe2,
    /// GPIOIEV0 - GPIO interrupt event select, port 0
    GpioIev0,
    /// GPIOIEV1 - GPIO interrupt event select, port 1
    GpioIev1,
    /// GPIOIEV2 - GPIO interrupt event select, port 2
    GpioIev2,
    /// GPIOIE0 - GPIO interrupt enable, port 0
    GpioIe0,
    /// GPIOIE1 - GPIO interrupt enable, port 1
    GpioIe1,
    /// GPIOIE2 - GPIO interrupt enable, port 2
    GpioIe2,
    /// GPIORIS0 - GPIO raw interrupt status, port 0
    GpioRis0,
    /// GPIORIS1 - GPIO raw interrupt status, port 1
    GpioRis1,
    /// GPIORIS2 - GPIO raw interrupt status, port 2
    GpioRis2,
    /// GPIOMIS0 - GPIO masked interrupt status, port 0
    GpioMis0,
    /// GPIOMIS1 - GPIO masked interrupt status, port 1
    GpioMis1,
    /// GPIOMIS2 - GPIO masked interrupt status, port 2
    GpioMis2,
    /// GPIOIC0 - GPIO interrupt clear, port 0
    GpioIc0,
    /// GPIOIC1 - GPIO interrupt clear, port 1
    GpioIc1,
    /// GPIOIC2 - GPIO interrupt clear, port 2
    GpioIc2,
    /// GPIOOME0 - GPIO open-drain mode enable, port 0
    GpioOme0,
    /// GPIOOMS0 - GPIO open-drain mode select, port 0
    GpioOms0,
    /// GPIOOME1 - GPIO open-drain mode enable, port 1
    GpioOme1,
    /// GPIOOMS1 - GPIO open-drain mode select, port 1
    GpioOms1,
    /// GPIOOME2 - GPIO open-drain mode enable, port 2
    GpioOme2,
    /// GPIOOMS2 - GPIO open-drain mode select, port 2
    GpioOms2,
    /// GPIOWAKE0 - GPIO wake-up enable, port 0
    GpioWake0,
    /// GPIOWAKE1 - GPIO wake-up enable, port 1
    GpioWake1,
    /// GPIOWAKE2 - GPIO wake-up enable, port 2
    GpioWake2,
}

impl Register {
    /// Every register in the map, in address order
    pub const ALL: &'static [Self] = &[
        Self::KbdSettle,
        Self::KbdBounce,
        Self::KbdSize,
        Self::KbdDedCfg0,
        Self::KbdDedCfg1,
        Self::KbdRis,
        Self::KbdMis,
        Self::KbdIc,
        Self::KbdMsk,
        Self::KbdCode0,
        Self::KbdCode1,
        Self::KbdCode2,
        Self::KbdCode3,
        Self::EvtCode,
        Self::TimCfg0,
        Self::PwmCfg0,
        Self::TimCfg1,
        Self::PwmCfg1,
        Self::TimCfg2,
        Self::PwmCfg2,
        Self::TimSwRes,
        Self::TimRis,
        Self::TimMis,
        Self::TimIc,
        Self::PwmWp,
        Self::PwmCfg,
        Self::I2cSa,
        Self::MfgCode,
        Self::SwRev,
        Self::RstCtrl,
        Self::RstIntClr,
        Self::ClkMode,
        Self::ClkEn,
        Self::AutoSlp,
        Self::AutoSlpTiL,
        Self::AutoSlpTiH,
        Self::IrqSt,
        Self::IoCfg,
        Self::IoPc0,
        Self::IoPc1,
        Self::IoPc2,
        Self::GpioData0,
        Self::GpioData1,
        Self::GpioData2,
        Self::GpioDir0,
        Self::GpioDir1,
        Self::GpioDir2,
        Self::GpioIs0,
        Self::GpioIs1,
        Self::GpioIs2,
        Self::GpioIbe0,
        Self::GpioIbe1,
        Self::GpioIbe2,
        Self::GpioIev0,
        Self::GpioIev1,
        Self::GpioIev2,
        Self::GpioIe0,
        Self::GpioIe1,
        Self::GpioIe2,
        Self::GpioRis0,
        Self::GpioRis1,
        Self::GpioRis2,
        Self::GpioMis0,
        Self::GpioMis1,
        Self::GpioMis2,
        Self::GpioIc0,
        Self::GpioIc1,
        Self::GpioIc2,
        Self::GpioOme0,
        Self::GpioOms0,
        Self::GpioOme1,
        Self::GpioOms1,
        Self::GpioOme2,
        Self::GpioOms2,
        Self::GpioWake0,
        Self::GpioWake1,
        Self::GpioWake2,
    ];

    /// Bus address byte
    pub const fn address(self) -> u8 {
        match self {
            Self::KbdSettle => 0x01,
            Self::KbdBounce => 0x02,
            Self::KbdSize => 0x03,
            Self::KbdDedCfg0 => 0x04,
            Self::KbdDedCfg1 => 0x05,
            Self::KbdRis => 0x06,
            Self::KbdMis => 0x07,
            Self::KbdIc => 0x08,
            Self::KbdMsk => 0x09,
            Self::KbdCode0 => 0x0B,
            Self::KbdCode1 => 0x0C,
            Self::KbdCode2 => 0x0D,
            Self::KbdCode3 => 0x0E,
            Self::EvtCode => 0x10,
            Self::TimCfg0 => 0x60,
            Self::PwmCfg0 => 0x61,
            Self::TimCfg1 => 0x68,
            Self::PwmCfg1 => 0x69,
            Self::TimCfg2 => 0x70,
            Self::PwmCfg2 => 0x71,
            Self::TimSwRes => 0x78,
            Self::TimRis => 0x7A,
            Self::TimMis => 0x7B,
            Self::TimIc => 0x7C,
            Self::PwmWp => 0x7D,
            Self::PwmCfg => 0x7E,
            // Same byte, meaning picked by transfer direction
            Self::I2cSa | Self::MfgCode => 0x80,
            Self::SwRev => 0x81,
            Self::RstCtrl => 0x82,
            Self::RstIntClr => 0x84,
            Self::ClkMode => 0x88,
            Self::ClkEn => 0x8A,
            Self::AutoSlp => 0x8B,
            Self::AutoSlpTiL => 0x8C,
            Self::AutoSlpTiH => 0x8D,
            Self::IrqSt => 0x91,
            Self::IoCfg => 0xA7,
            Self::IoPc0 => 0xAA,
            Self::IoPc1 => 0xAC,
            Self::IoPc2 => 0xAE,
            Self::GpioData0 => 0xC0,
            Self::GpioData1 => 0xC2,
            Self::GpioData2 => 0xC4,
            Self::GpioDir0 => 0xC6,
            Self::GpioDir1 => 0xC7,
            Self::GpioDir2 => 0xC8,
            Self::GpioIs0 => 0xC9,
            Self::GpioIs1 => 0xCA,
            Self::GpioIs2 => 0xCB,
            Self::GpioIbe0 => 0xCC,
            Self::GpioIbe1 => 0xCD,
            Self::GpioIbe2 => 0xCE,
            Self::GpioIev0 => 0xCF,
            Self::GpioIev1 => 0xD0,
            Self::GpioIev2 => 0xD1,
            Self::GpioIe0 => 0xD2,
            Self::GpioIe1 => 0xD3,
            Self::GpioIe2 => 0xD4,
            Self::GpioRis0 => 0xD6,
            Self::GpioRis1 => 0xD7,
            Self::GpioRis2 => 0xD8,
            Self::GpioMis0 => 0xD9,
            Self::GpioMis1 => 0xDA,
            Self::GpioMis2 => 0xDB,
            Self::GpioIc0 => 0xDC,
            Self::GpioIc1 => 0xDD,
            Self::GpioIc2 => 0xDE,
            Self::GpioOme0 => 0xE0,
            Self::GpioOms0 => 0xE1,
            Self::GpioOme1 => 0xE2,
            Self::GpioOms1 => 0xE3,
            Self::GpioOme2 => 0xE4,
            Self::GpioOms2 => 0xE5,
            Self::GpioWake0 => 0xE9,
            Self::GpioWake1 => 0xEA,
            Self::GpioWake2 => 0xEB,
        }
    }

    /// First register of the byte group this register belongs to
    ///
    /// `KbdDedCfg1` is the low byte of the 16-bit KBDDEDCFG and only moves
    /// together with `KbdDedCfg0`; every other register is its own group.
    pub const fn group(self) -> Self {
        match self {
            Self::KbdDedCfg1 => Self::KbdDedCfg0,
            other => other,
        }
    }

    /// Whether the register can be transferred on its own
    pub const fn is_standalone(self) -> bool {
        !matches!(self, Self::KbdDedCfg1)
    }

    /// Width in bytes of one bus transfer for this register
    pub const fn width(self) -> usize {
        match self {
            Self::KbdDedCfg0 | Self::IoPc0 | Self::IoPc1 | Self::IoPc2 => 2,
            _ => 1,
        }
    }

    /// Whether the register has this name in the given access context
    pub const fn accepts(self, access: Access) -> bool {
        match self {
            Self::I2cSa => matches!(access, Access::Write),
            Self::MfgCode => matches!(access, Access::Read),
            _ => true,
        }
    }

    /// Look up the register at `address` for the given access context
    ///
    /// # Errors
    ///
    /// Returns `InvalidAddress` if no register lives at `address`.
    pub fn from_address(address: u8, access: Access) -> Result<Self, CodecError> {
        Self::ALL
            .iter()
            .copied()
            .find(|register| register.address() == address && register.accepts(access))
            .ok_or(Error::InvalidAddress(address))
    }
}
