use embedded_storage::nor_flash::{
    ErrorType, NorFlash, NorFlashError, NorFlashErrorKind, ReadNorFlash,
};

#[derive(Debug)]
pub enum FlashStubError {
    Unknown,
    OutOfBounds,
}

/// In-memory NOR flash that counts erases and writes.
pub struct NorFlashStub<const FLASH_SIZE: usize> {
    pub buf: [u8; FLASH_SIZE],
    pub erases: usize,
    pub writes: usize,
    /// Make every erase and write fail.
    pub broken: bool,
}
impl NorFlashError for FlashStubError {
    fn kind(&self) -> NorFlashErrorKind {
        match self {
            FlashStubError::Unknown => NorFlashErrorKind::Other,
            FlashStubError::OutOfBounds => NorFlashErrorKind::OutOfBounds,
        }
    }
}
impl<const FLASH_SIZE: usize> ErrorType for NorFlashStub<FLASH_SIZE> {
    type Error = FlashStubError;
}
impl<const FLASH_SIZE: usize> NorFlashStub<FLASH_SIZE> {
    fn check(&self, offset: usize, len: usize) -> Result<(), FlashStubError> {
        if self.broken {
            Err(FlashStubError::Unknown)
        } else if offset + len > FLASH_SIZE {
            Err(FlashStubError::OutOfBounds)
        } else {
            Ok(())
        }
    }
}
impl<const FLASH_SIZE: usize> ReadNorFlash for NorFlashStub<FLASH_SIZE> {
    const READ_SIZE: usize = 1;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let offset = offset as usize;
        if offset + bytes.len() > FLASH_SIZE {
            return Err(FlashStubError::OutOfBounds);
        }
        bytes.copy_from_slice(&self.buf[offset..offset + bytes.len()]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        FLASH_SIZE
    }
}
impl<const FLASH_SIZE: usize> NorFlash for NorFlashStub<FLASH_SIZE> {
    const WRITE_SIZE: usize = 1;

    const ERASE_SIZE: usize = 64;

    fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        let (from, to) = (from as usize, to as usize);
        self.check(from, to - from)?;
        self.erases += 1;
        self.buf[from..to].fill(0xff);
        Ok(())
    }

    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let offset = offset as usize;
        self.check(offset, bytes.len())?;
        self.writes += 1;
        // NOR flash can only clear bits
        for (t, f) in self.buf[offset..offset + bytes.len()]
            .iter_mut()
            .zip(bytes.iter())
        {
            *t &= *f;
        }
        Ok(())
    }
}
impl<const FLASH_SIZE: usize> Default for NorFlashStub<FLASH_SIZE> {
    fn default() -> Self {
        Self {
            buf: [0xff; FLASH_SIZE],
            erases: 0,
            writes: 0,
            broken: false,
        }
    }
}
