//! The container header: the frequency table that lets the decompressor rebuild the tree.
//!
//! Layout (big endian, byte aligned):
//! - signature `HUF`
//! - entry count, u16
//! - per entry: symbol id u16, count u64, in ascending symbol id order
//!
//! The huffman payload starts on the very next bit.

use std::io::{Read, Write};

use log::{error, trace};

use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::error::{HuffError, Result};
use crate::huffman_coding::symbol::{Symbol, EOS_ID};
use crate::tools::freq_count::FrequencyTable;

pub const SIGNATURE: [u8; 3] = *b"HUF";
/// Every byte value plus the sentinel.
pub const MAX_ENTRIES: usize = EOS_ID as usize + 1;
const ENTRY_BYTES: usize = 2 + 8;

/// Header size in bytes for a table with `entries` symbols.
pub fn header_len(entries: usize) -> usize {
    SIGNATURE.len() + 2 + entries * ENTRY_BYTES
}

/// Put the frequency table on the stream.
pub fn write_header<W: Write>(bw: &mut BitWriter<W>, table: &FrequencyTable) -> Result<()> {
    if table.len() > MAX_ENTRIES {
        return Err(HuffError::MalformedHeader(format!(
            "{} entries is more than the {} allowed",
            table.len(),
            MAX_ENTRIES
        )));
    }
    for byte in SIGNATURE {
        bw.out8(byte)?;
    }
    bw.out16(table.len() as u16)?;
    for (symbol, count) in table.sorted() {
        bw.out16(symbol.id())?;
        bw.out64(count)?;
    }
    trace!("Wrote header with {} entries, ending at {}", table.len(), bw.loc());
    Ok(())
}

fn malformed(message: &str) -> HuffError {
    error!("Fatal error: {}", message);
    HuffError::MalformedHeader(message.to_string())
}

/// Read the frequency table back off the stream, leaving the reader at the first payload bit.
pub fn read_header<R: Read>(br: &mut BitReader<R>) -> Result<FrequencyTable> {
    const EOF_MESSAGE: &str = "header ends early";

    // Look for a valid signature.
    match br.bytes(SIGNATURE.len())? {
        Some(sig) if sig == SIGNATURE => trace!("Found a valid huffpress signature."),
        Some(_) => return Err(malformed("not a huffpress container")),
        None => return Err(malformed(EOF_MESSAGE)),
    }

    let entries = br.bint(16)?.ok_or_else(|| malformed(EOF_MESSAGE))? as usize;
    if entries == 0 || entries > MAX_ENTRIES {
        return Err(malformed(&format!("invalid entry count {}", entries)));
    }

    let mut table = FrequencyTable::new();
    for _ in 0..entries {
        let id = br.bint(16)?.ok_or_else(|| malformed(EOF_MESSAGE))? as u16;
        let count = br.bint(64)?.ok_or_else(|| malformed(EOF_MESSAGE))?;
        let symbol =
            Symbol::from_id(id).ok_or_else(|| malformed(&format!("unknown symbol id {}", id)))?;
        if count == 0 {
            return Err(malformed(&format!("symbol {} has a zero count", symbol)));
        }
        if table.contains(symbol) {
            return Err(malformed(&format!("symbol {} listed twice", symbol)));
        }
        table.insert(symbol, count);
    }

    if !table.contains(Symbol::EndOfStream) {
        return Err(malformed("no end-of-stream entry"));
    }
    trace!("Read header with {} entries at {}", entries, br.loc());
    Ok(table)
}
