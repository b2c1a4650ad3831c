//! In-memory stand-ins for the I2C bus and delay used by the driver tests.

use std::{collections::VecDeque, convert::Infallible};

use embedded_hal::{
    delay::DelayNs,
    i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation},
};

/// Keeps every write as `(address, bytes)` and answers reads from `reads`
/// (zeros once that runs dry). Never fails.
#[derive(Debug, Default)]
pub struct RecordingBus {
    pub writes: Vec<(u8, Vec<u8>)>,
    pub reads: VecDeque<u8>,
}

impl RecordingBus {
    pub fn answering(reads: impl IntoIterator<Item = u8>) -> Self {
        Self {
            writes: Vec::new(),
            reads: reads.into_iter().collect(),
        }
    }
}

impl ErrorType for RecordingBus {
    type Error = Infallible;
}

impl I2c for RecordingBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for op in operations {
            match op {
                Operation::Write(bytes) => self.writes.push((address, bytes.to_vec())),
                Operation::Read(buf) => {
                    for b in buf.iter_mut() {
                        *b = self.reads.pop_front().unwrap_or(0);
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct Unplugged;

impl embedded_hal::i2c::Error for Unplugged {
    fn kind(&self) -> ErrorKind {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
    }
}

/// Nothing answers on this bus.
#[derive(Debug)]
pub struct DeadBus;

impl ErrorType for DeadBus {
    type Error = Unplugged;
}

impl I2c for DeadBus {
    fn transaction(
        &mut self,
        _address: u8,
        _operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        Err(Unplugged)
    }
}

#[derive(Debug)]
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
