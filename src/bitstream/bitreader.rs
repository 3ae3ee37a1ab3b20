//! BitReader: reads packed bytes back into bits.
//!
//! The reader is told how many bits are real. Anything after that in the last byte is padding
//! and is never returned.
//!

use crate::error::{Error, Result};

const BIT_MASK: u8 = 0x80;

/// Reads bits, most significant first, from a packed byte slice.
#[derive(Debug)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    bit_index: usize,
    remaining: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new BitReader that yields at most `bit_len` bits. Fails if the buffer does not
    /// hold that many bits.
    pub fn new(buffer: &'a [u8], bit_len: usize) -> Result<Self> {
        if bit_len > buffer.len() * 8 {
            return Err(Error::corrupt(format!(
                "bit length {} exceeds the {} bits available in {} bytes",
                bit_len,
                buffer.len() * 8,
                buffer.len()
            )));
        }
        Ok(Self {
            buffer,
            cursor: 0,
            bit_index: 0,
            remaining: bit_len,
        })
    }

    /// Return the next bit, or None once `bit_len` bits have been read
    pub fn bit(&mut self) -> Option<bool> {
        if self.remaining == 0 {
            return None;
        }
        let bit = self.buffer[self.cursor] & (BIT_MASK >> self.bit_index) != 0;
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        self.remaining -= 1;
        Some(bit)
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Expand packed bytes to bits and drop everything past `bit_len`.
pub fn unpack(bytes: &[u8], bit_len: usize) -> Result<Vec<bool>> {
    Ok(BitReader::new(bytes, bit_len)?.collect())
}
