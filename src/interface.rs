//! Bus interface implementation for the keypad controllers
//!
//! Both controllers sit on I2C and use the usual register protocol: a read
//! writes the register address and then reads the value bytes, a write sends
//! the address followed by the value bytes. This module adapts an
//! `embedded-hal` I2C bus to the `device-driver` register traits the drivers
//! are generic over, so any other transport can be swapped in by implementing
//! those traits instead.

use device_driver::RegisterInterface;

/// Largest register group written in one transaction
const MAX_WRITE_LEN: usize = 2;

/// I2C interface for a keypad controller
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create an I2C interface for an LM8330 at its fixed address
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::lm8330(i2c);
    /// let mut keypad = Lm8330::new(interface);
    /// ```
    pub const fn lm8330(i2c: I2C) -> Self {
        Self::new(i2c, crate::lm8330::I2C_ADDRESS)
    }

    /// Create an I2C interface for a TCA8418 at its fixed address
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::tca8418(i2c);
    /// let mut keypad = Tca8418::new(interface);
    /// ```
    pub const fn tca8418(i2c: I2C) -> Self {
        Self::new(i2c, crate::tca8418::I2C_ADDRESS)
    }

    /// Create a new I2C interface with a custom 7-bit device address
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral
    /// * `address` - The 7-bit I2C device address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// 7-bit bus address this interface talks to
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

/// Prefix `data` with the register address for a single bus write
///
/// Returns the buffer and the number of valid bytes in it.
fn write_frame(address: u8, data: &[u8]) -> ([u8; MAX_WRITE_LEN + 1], usize) {
    let mut buffer = [0u8; MAX_WRITE_LEN + 1];
    buffer[0] = address;
    let len = data.len().min(MAX_WRITE_LEN);
    buffer[1..=len].copy_from_slice(&data[..len]);
    (buffer, len + 1)
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        let (buffer, len) = write_frame(address, write_data);
        self.i2c.write(self.address, &buffer[..len])
    }
}

#[cfg(feature = "async")]
impl<I2C, E> device_driver::AsyncRegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal_async::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    async fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.i2c
            .write_read(self.address, &[address], read_data)
            .await
    }

    async fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        let (buffer, len) = write_frame(address, write_data);
        self.i2c.write(self.address, &buffer[..len]).await
    }
}
