//! Byte sources and the per-instruction fetch window.

use crate::error::Abort;
use dasm86_core::FetchError;

/// Longest legal x86 instruction.
pub const MAX_CODE_LENGTH: usize = 15;

/// Supplies instruction bytes on demand.
///
/// Implementations copy exactly `buf.len()` bytes starting at `address`, or
/// fail without partial success.
pub trait ByteSource {
    fn fetch(&mut self, address: u64, buf: &mut [u8]) -> Result<(), FetchError>;
}

/// A byte source backed by an in-memory slice mapped at `base`.
#[derive(Debug, Clone, Copy)]
pub struct SliceSource<'a> {
    base: u64,
    data: &'a [u8],
}

impl<'a> SliceSource<'a> {
    pub fn new(base: u64, data: &'a [u8]) -> Self {
        Self { base, data }
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl ByteSource for SliceSource<'_> {
    fn fetch(&mut self, address: u64, buf: &mut [u8]) -> Result<(), FetchError> {
        let offset = address
            .checked_sub(self.base)
            .and_then(|off| usize::try_from(off).ok())
            .ok_or(FetchError::at(address))?;
        let end = offset
            .checked_add(buf.len())
            .filter(|&end| end <= self.data.len())
            .ok_or(FetchError::at(address))?;
        buf.copy_from_slice(&self.data[offset..end]);
        Ok(())
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn fetch(&mut self, address: u64, buf: &mut [u8]) -> Result<(), FetchError> {
        (**self).fetch(address, buf)
    }
}

/// Window over the bytes of the instruction currently being decoded.
///
/// Bytes are pulled from the source lazily and never re-fetched; `fetched`
/// is the high-water mark of bytes actually obtained.
pub(crate) struct FetchWindow<'s, S: ByteSource + ?Sized> {
    source: &'s mut S,
    start: u64,
    buf: [u8; MAX_CODE_LENGTH],
    fetched: usize,
    pos: usize,
}

impl<'s, S: ByteSource + ?Sized> FetchWindow<'s, S> {
    pub fn new(source: &'s mut S, start: u64) -> Self {
        Self {
            source,
            start,
            buf: [0; MAX_CODE_LENGTH],
            fetched: 0,
            pos: 0,
        }
    }

    /// Makes bytes `[0, upto)` available.
    pub fn ensure(&mut self, upto: usize) -> Result<(), Abort> {
        if upto <= self.fetched {
            return Ok(());
        }
        if upto > MAX_CODE_LENGTH {
            return Err(Abort::TooLong);
        }
        let address = self.start.wrapping_add(self.fetched as u64);
        self.source
            .fetch(address, &mut self.buf[self.fetched..upto])
            .map_err(|_| Abort::Truncated { needed: upto })?;
        self.fetched = upto;
        Ok(())
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn fetched(&self) -> usize {
        self.fetched
    }

    /// Byte at `pos + ahead` without consuming it.
    pub fn peek_ahead(&mut self, ahead: usize) -> Result<u8, Abort> {
        let at = self.pos + ahead;
        self.ensure(at + 1)?;
        Ok(self.buf[at])
    }

    pub fn peek(&mut self) -> Result<u8, Abort> {
        self.peek_ahead(0)
    }

    pub fn next_u8(&mut self) -> Result<u8, Abort> {
        let byte = self.peek()?;
        self.pos += 1;
        Ok(byte)
    }

    fn next_bytes<const N: usize>(&mut self) -> Result<[u8; N], Abort> {
        self.ensure(self.pos + N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    pub fn next_u16(&mut self) -> Result<u16, Abort> {
        Ok(u16::from_le_bytes(self.next_bytes()?))
    }

    pub fn next_u32(&mut self) -> Result<u32, Abort> {
        Ok(u32::from_le_bytes(self.next_bytes()?))
    }

    pub fn next_u64(&mut self) -> Result<u64, Abort> {
        Ok(u64::from_le_bytes(self.next_bytes()?))
    }

    /// Reads a little-endian value of `width` bytes (1, 2, 4 or 8).
    pub fn next_sized(&mut self, width: usize) -> Result<u64, Abort> {
        Ok(match width {
            1 => u64::from(self.next_u8()?),
            2 => u64::from(self.next_u16()?),
            4 => u64::from(self.next_u32()?),
            _ => self.next_u64()?,
        })
    }

    /// All bytes fetched so far.
    pub fn bytes(&self) -> &[u8] {
        &self.buf[..self.fetched]
    }

    /// Byte at an absolute offset that is known to be fetched.
    pub fn byte_at(&self, offset: usize) -> u8 {
        self.buf[offset]
    }
}
