//! Mock `embedded-hal` I2C peripheral with a register-pointer device model

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

/// One recorded transaction: the address and the operations in order
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Write(Vec<u8>),
    Read(usize),
}

/// Emulates a device whose first written byte sets a register pointer;
/// further written bytes are stored and reads are served from the pointer
/// onwards.
pub struct MockI2c {
    pub device_address: u8,
    pub registers: [u8; 256],
    pub transactions: Vec<(u8, Vec<Frame>)>,
}

impl MockI2c {
    pub fn new(device_address: u8) -> Self {
        Self {
            device_address,
            registers: [0; 256],
            transactions: Vec::new(),
        }
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut frames = Vec::new();
        for op in operations.iter() {
            match op {
                Operation::Write(bytes) => frames.push(Frame::Write(bytes.to_vec())),
                Operation::Read(buf) => frames.push(Frame::Read(buf.len())),
            }
        }
        self.transactions.push((address, frames));

        if address != self.device_address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        let mut pointer: Option<usize> = None;
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    for &byte in bytes.iter() {
                        match pointer {
                            None => pointer = Some(byte as usize),
                            Some(p) => {
                                self.registers[p] = byte;
                                pointer = Some(p + 1);
                            }
                        }
                    }
                }
                Operation::Read(buf) => {
                    let start = pointer.unwrap_or(0);
                    buf.copy_from_slice(&self.registers[start..start + buf.len()]);
                    pointer = Some(start + buf.len());
                }
            }
        }
        Ok(())
    }
}
