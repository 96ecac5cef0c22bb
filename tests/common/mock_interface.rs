//! Mock register interface for testing the keypad drivers

#[cfg(feature = "async")]
use device_driver::AsyncRegisterInterface;
use device_driver::RegisterInterface;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

/// Which controller the mock behaves like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chip {
    /// LM8330: EVTCODE FIFO at 0x10, reads 0x7F when empty
    Lm8330,
    /// TCA8418: KEY_EVENT_A FIFO at 0x04, reads 0x00 when empty
    Tca8418,
}

impl Chip {
    const fn event_register(self) -> u8 {
        match self {
            Self::Lm8330 => 0x10,
            Self::Tca8418 => 0x04,
        }
    }

    const fn empty_code(self) -> u8 {
        match self {
            Self::Lm8330 => 0x7F,
            Self::Tca8418 => 0x00,
        }
    }
}

/// LM8330 KBDRIS
const LM8330_KBDRIS: u8 = 0x06;
/// LM8330 KBDIC
const LM8330_KBDIC: u8 = 0x08;
/// TCA8418 INT_STAT
const TCA8418_INT_STAT: u8 = 0x02;
/// TCA8418 KEY_LCK_EC
const TCA8418_KEY_LCK_EC: u8 = 0x03;

/// Records operations performed on the mock interface
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Read register operation
    ReadRegister {
        /// Register address
        address: u8,
        /// Value that was returned
        value: u8,
    },
    /// Write register operation
    WriteRegister {
        /// Register address
        address: u8,
        /// Value that was written
        value: u8,
    },
}

/// Shared state for mock interface (uses interior mutability)
#[derive(Debug)]
struct MockState {
    chip: Chip,

    /// Simulated register values
    registers: HashMap<u8, u8>,

    /// Queued key event bytes behind the FIFO register
    events: VecDeque<u8>,

    /// Operations log for verification
    operations: Vec<Operation>,

    /// Failure injection flags
    fail_next_read: bool,
    fail_next_write: bool,
}

impl MockState {
    fn new(chip: Chip) -> Self {
        Self {
            chip,
            registers: HashMap::new(),
            events: VecDeque::new(),
            operations: Vec::new(),
            fail_next_read: false,
            fail_next_write: false,
        }
    }

    /// Mirror the queue length into KEY_LCK_EC.KEC
    fn sync_event_count(&mut self) {
        if self.chip == Chip::Tca8418 {
            let count = self.events.len().min(10) as u8;
            let lock_ec = self.registers.entry(TCA8418_KEY_LCK_EC).or_insert(0);
            *lock_ec = (*lock_ec & 0xF0) | count;
        }
    }

    fn read_byte(&mut self, address: u8) -> u8 {
        if address == self.chip.event_register() {
            let value = self.events.pop_front().unwrap_or(self.chip.empty_code());
            self.sync_event_count();
            return value;
        }
        self.registers.get(&address).copied().unwrap_or(0)
    }

    fn write_byte(&mut self, address: u8, value: u8) {
        match (self.chip, address) {
            // INT_STAT is write-1-to-clear
            (Chip::Tca8418, TCA8418_INT_STAT) => {
                let status = self.registers.entry(address).or_insert(0);
                *status &= !value;
            }
            // KBDIC.EVTIC flushes the FIFO and clears ELINT/EVTINT
            (Chip::Lm8330, LM8330_KBDIC) => {
                if value & 0x02 != 0 {
                    self.events.clear();
                    let status = self.registers.entry(LM8330_KBDRIS).or_insert(0);
                    *status &= !0x0C;
                }
                self.registers.insert(address, value);
            }
            _ => {
                self.registers.insert(address, value);
            }
        }
    }
}

/// Mock interface for testing
#[derive(Clone)]
pub struct MockInterface {
    state: Rc<RefCell<MockState>>,
}

impl MockInterface {
    /// Create a new mock interface with all registers reading zero
    pub fn new(chip: Chip) -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState::new(chip))),
        }
    }

    /// Set a register value
    pub fn set_register(&self, address: u8, value: u8) {
        self.state.borrow_mut().registers.insert(address, value);
    }

    /// Get a register value
    pub fn get_register(&self, address: u8) -> u8 {
        self.state
            .borrow()
            .registers
            .get(&address)
            .copied()
            .unwrap_or(0)
    }

    /// Queue raw event bytes behind the FIFO register
    pub fn push_events(&self, events: &[u8]) {
        let mut state = self.state.borrow_mut();
        state.events.extend(events.iter().copied());
        state.sync_event_count();
    }

    /// Number of event bytes still queued
    pub fn queued_events(&self) -> usize {
        self.state.borrow().events.len()
    }

    /// Inject a read failure on the next read operation
    pub fn fail_next_read(&self) {
        self.state.borrow_mut().fail_next_read = true;
    }

    /// Inject a write failure on the next write operation
    pub fn fail_next_write(&self) {
        self.state.borrow_mut().fail_next_write = true;
    }

    /// Get the operations log
    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    /// Clear the operations log
    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }

    /// Values written to `address`, in order
    pub fn writes_to(&self, address: u8) -> Vec<u8> {
        self.state
            .borrow()
            .operations
            .iter()
            .filter_map(|op| match *op {
                Operation::WriteRegister { address: a, value } if a == address => Some(value),
                _ => None,
            })
            .collect()
    }

    /// Number of reads of `address`
    pub fn read_count(&self, address: u8) -> usize {
        self.state
            .borrow()
            .operations
            .iter()
            .filter(|op| matches!(op, Operation::ReadRegister { address: a, .. } if *a == address))
            .count()
    }
}

/// Mock error type
#[derive(Debug, Clone, PartialEq)]
pub enum MockError {
    /// Simulated communication error
    Communication,
}

impl RegisterInterface for MockInterface {
    type Error = MockError;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        // Check for injected failure
        if state.fail_next_read {
            state.fail_next_read = false;
            return Err(MockError::Communication);
        }

        assert_eq!(size_bits as usize, read_data.len() * 8);

        for (i, byte) in read_data.iter_mut().enumerate() {
            let reg_addr = address.wrapping_add(i as u8);
            *byte = state.read_byte(reg_addr);
            state.operations.push(Operation::ReadRegister {
                address: reg_addr,
                value: *byte,
            });
        }

        Ok(())
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        // Check for injected failure
        if state.fail_next_write {
            state.fail_next_write = false;
            return Err(MockError::Communication);
        }

        assert_eq!(size_bits as usize, write_data.len() * 8);

        for (i, &byte) in write_data.iter().enumerate() {
            let reg_addr = address.wrapping_add(i as u8);
            state.write_byte(reg_addr, byte);
            state.operations.push(Operation::WriteRegister {
                address: reg_addr,
                value: byte,
            });
        }

        Ok(())
    }
}

#[cfg(feature = "async")]
impl AsyncRegisterInterface for MockInterface {
    type Error = MockError;
    type AddressType = u8;

    async fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        // Delegate to synchronous implementation
        RegisterInterface::read_register(self, address, size_bits, read_data)
    }

    async fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        // Delegate to synchronous implementation
        RegisterInterface::write_register(self, address, size_bits, write_data)
    }
}
