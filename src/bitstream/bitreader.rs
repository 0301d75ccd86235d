//! BitReader: reads a packed bitstream most significant bit first.
//!
//! NOTE: This module can read from any I/O source that supports the read() call.
//!

const BUFFER_SIZE: usize = 64 * 1024;
const BIT_MASK: u8 = 0xff;

/// Reads a binary huffpress container.
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    bit_index: usize,
    bits_read: u64,
    source: R,
}

impl<R: std::io::Read> BitReader<R> {
    /// Creates a new BitReader (with a 64k buffer).
    pub fn new(source: R) -> Self {
        Self {
            buffer: vec![0; BUFFER_SIZE],
            cursor: BUFFER_SIZE,
            bit_index: 0,
            bits_read: 0,
            source,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> std::io::Result<bool> {
        // Only try to read more data when the buffer length is equal to the buffer cursor location
        if self.cursor == self.buffer.len() {
            self.buffer.resize(BUFFER_SIZE, 0);
            let size = loop {
                match self.source.read(&mut self.buffer) {
                    Ok(size) => break size,
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            };
            // If nothing came back from our read attempt, then we have no more data.
            self.buffer.truncate(size);
            self.cursor = 0;
            self.bit_index = 0;
            if size == 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Return the next bit (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> std::io::Result<Option<u8>> {
        // If bit_index is == 0, check if we have a byte to read. Return None if we have no data
        if self.bit_index == 0 && !self.have_data()? {
            return Ok(None);
        }
        let bit = (self.buffer[self.cursor] & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        self.bits_read += 1;
        Ok(Some(bit))
    }

    /// Return *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bool_bit(&mut self) -> std::io::Result<Option<bool>> {
        Ok(self.bit()?.map(|bit| bit == 1))
    }

    /// Return the next n bits (n <= 64), or None if the data ran out first.
    pub fn bint(&mut self, n: usize) -> std::io::Result<Option<u64>> {
        debug_assert!(n <= 64);
        let mut result = 0_u64;
        for _ in 0..n {
            match self.bit()? {
                Some(bit) => result = result << 1 | bit as u64,
                None => return Ok(None),
            }
        }
        Ok(Some(result))
    }

    /// Returns a byte, or None if there is no more data to read. This is
    /// a convenience function, and calls bint(8).
    pub fn byte(&mut self) -> std::io::Result<Option<u8>> {
        Ok(self.bint(8)?.map(|byte| byte as u8))
    }

    /// Returns n bytes, or None if the data ran out first.
    pub fn bytes(&mut self, n: usize) -> std::io::Result<Option<Vec<u8>>> {
        let mut result: Vec<u8> = Vec::with_capacity(n);
        for _ in 0..n {
            match self.byte()? {
                Some(byte) => result.push(byte),
                None => return Ok(None),
            }
        }
        Ok(Some(result))
    }

    /// Total bits consumed so far.
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Debugging function. Report current position in the stream as bytes.bits.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.bits_read / 8, self.bits_read % 8)
    }
}
