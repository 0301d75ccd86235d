use std::io::Write;

use log::trace;

/// Bytes held in the output buffer before they are handed to the writer.
const BUFFER_SIZE: usize = 64 * 1024;

/// Writes a packed bitstream. Bits are queued most significant bit first and pushed to an
/// internal buffer a byte at a time; the buffer is written to the sink whenever it fills.
/// Call finish() when done, otherwise the last partial byte is lost.
pub struct BitWriter<W: Write> {
    /// Output buffer used to write the bitstream.
    output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into the output buffer.
    queue: u64,
    /// Count of valid bits in the queue.
    q_bits: u8,
    /// Total bits accepted so far, padding excluded.
    bits_written: u64,
    /// Handle to the output stream
    writer: W,
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter that sends its bytes to writer.
    pub fn new(writer: W) -> Self {
        Self {
            output: Vec::with_capacity(BUFFER_SIZE),
            queue: 0,
            q_bits: 0,
            bits_written: 0,
            writer,
        }
    }

    /// Move full bytes from the queue to the output buffer until `n` more bits fit.
    fn make_room(&mut self, n: u8) -> std::io::Result<()> {
        if self.q_bits + n > 64 {
            while self.q_bits > 7 {
                let byte = (self.queue >> (self.q_bits - 8)) as u8;
                self.output.push(byte); //push the packed byte out
                self.q_bits -= 8; //adjust the count of bits left in the queue
            }
        }
        if self.output.len() >= BUFFER_SIZE {
            self.writer.write_all(&self.output)?;
            self.output.clear();
        }
        Ok(())
    }

    /// Put a single bit on the stream.
    pub fn write_bit(&mut self, bit: bool) -> std::io::Result<()> {
        self.make_room(1)?;
        self.queue <<= 1;
        self.queue |= bit as u64;
        self.q_bits += 1;
        self.bits_written += 1;
        Ok(())
    }

    /// Put a byte of pre-packed binary encoded data on the stream.
    pub fn out8(&mut self, data: u8) -> std::io::Result<()> {
        self.make_room(8)?;
        self.queue <<= 8; //shift queue by one byte
        self.queue |= data as u64; //add the byte to queue
        self.q_bits += 8; //update depth of queue bits
        self.bits_written += 8;
        Ok(())
    }

    /// Puts a 16 bit word of pre-packed binary encoded data on the stream.
    pub fn out16(&mut self, data: u16) -> std::io::Result<()> {
        self.make_room(16)?;
        self.queue <<= 16;
        self.queue |= data as u64;
        self.q_bits += 16;
        self.bits_written += 16;
        Ok(())
    }

    /// Puts a 32 bit word of pre-packed binary encoded data on the stream.
    pub fn out32(&mut self, data: u32) -> std::io::Result<()> {
        self.make_room(32)?;
        self.queue <<= 32;
        self.queue |= data as u64;
        self.q_bits += 32;
        self.bits_written += 32;
        Ok(())
    }

    /// Puts a 64 bit word on the stream, high half first.
    pub fn out64(&mut self, data: u64) -> std::io::Result<()> {
        self.out32((data >> 32) as u32)?;
        self.out32(data as u32)
    }

    /// Flushes the queue into the output buffer. Any trailing 1-7 bits are padded with 0s
    /// in the least significant bits of the last byte.
    fn flush(&mut self) {
        // First push out all the full bytes
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte);
            self.q_bits -= 8;
        }
        // Then push out the remaining bits
        if self.q_bits > 0 {
            let byte = ((self.queue & (0xff >> (8 - self.q_bits))) as u8) << (8 - self.q_bits);
            trace!("Padding last byte with {} zero bits", 8 - self.q_bits);
            self.output.push(byte);
            self.q_bits = 0;
        }
    }

    /// Number of bits written so far, not counting padding.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Pad the final byte, write everything out and hand back the writer.
    pub fn finish(mut self) -> std::io::Result<W> {
        self.flush();
        self.writer.write_all(&self.output)?;
        self.output.clear();
        self.writer.flush()?;
        Ok(self.writer)
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.bits_written / 8, self.bits_written % 8)
    }
}
