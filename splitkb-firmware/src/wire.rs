//! Packed little-endian layout used at the link and storage boundary.
//!
//! Structs stay strongly typed in memory; they only become bytes through [Packed].

/// A fixed-size byte layout.
pub trait Packed: Sized {
    /// Exact number of bytes [Packed::pack] writes.
    const SIZE: usize;

    fn pack(&self, w: &mut Writer<'_>);

    fn unpack(r: &mut Reader<'_>) -> Self;

    /// Decode from a buffer that must be exactly [Packed::SIZE] bytes.
    fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() != Self::SIZE {
            return None;
        }
        Some(Self::unpack(&mut Reader::new(data)))
    }

    /// Encode into the start of `buf`, returning the bytes written.
    fn pack_into<'b>(&self, buf: &'b mut [u8]) -> &'b [u8] {
        let mut w = Writer::new(&mut buf[..Self::SIZE]);
        self.pack(&mut w);
        let len = w.position();
        &buf[..len]
    }
}

pub struct Writer<'b> {
    buf: &'b mut [u8],
    pos: usize,
}

impl<'b> Writer<'b> {
    pub fn new(buf: &'b mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn put_u8(&mut self, v: u8) {
        self.put_bytes(&[v]);
    }

    pub fn put_i8(&mut self, v: i8) {
        self.put_bytes(&v.to_le_bytes());
    }

    pub fn put_u16(&mut self, v: u16) {
        self.put_bytes(&v.to_le_bytes());
    }

    pub fn put_u32(&mut self, v: u32) {
        self.put_bytes(&v.to_le_bytes());
    }

    pub fn put_f32(&mut self, v: f32) {
        self.put_bytes(&v.to_le_bytes());
    }

    /// Pack up to eight booleans into one byte, first flag in bit 0.
    pub fn put_flags(&mut self, flags: &[bool]) {
        debug_assert!(flags.len() <= 8);
        let byte = flags
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, f)| acc | ((*f as u8) << i));
        self.put_u8(byte);
    }

    pub fn put_bytes(&mut self, data: &[u8]) {
        let end = self.pos + data.len();
        self.buf[self.pos..end].copy_from_slice(data);
        self.pos = end;
    }
}

pub struct Reader<'b> {
    buf: &'b [u8],
    pos: usize,
}

impl<'b> Reader<'b> {
    pub fn new(buf: &'b [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn u8(&mut self) -> u8 {
        self.array::<1>()[0]
    }

    pub fn i8(&mut self) -> i8 {
        i8::from_le_bytes(self.array())
    }

    pub fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.array())
    }

    pub fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.array())
    }

    pub fn f32(&mut self) -> f32 {
        f32::from_le_bytes(self.array())
    }

    /// Unpack a byte written by [Writer::put_flags].
    pub fn flags<const N: usize>(&mut self) -> [bool; N] {
        let byte = self.u8();
        core::array::from_fn(|i| byte & (1 << i) != 0)
    }

    pub fn array<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        out
    }
}

#[cfg(test)]
#[path = "wire_test.rs"]
mod test;
