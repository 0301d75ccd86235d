use std::io::{Read, Write};

use log::debug;

use crate::bitstream::bitwriter::BitWriter;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::{Code, CodeTable};
use crate::huffman_coding::symbol::Symbol;

fn lookup(table: &CodeTable, symbol: Symbol) -> Result<&Code> {
    table.get(symbol).ok_or(HuffError::Lookup(symbol))
}

/// Encode every byte of input, then the end-of-stream code, onto bw.
/// Returns the number of payload bits written.
pub fn encode<R: Read, W: Write>(
    mut input: R,
    table: &CodeTable,
    bw: &mut BitWriter<W>,
) -> Result<u64> {
    if table.is_empty() {
        return Err(HuffError::EmptyTable);
    }
    let start = bw.bits_written();
    let mut buf = vec![0_u8; 64 * 1024];
    loop {
        let size = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(size) => size,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        for &byte in &buf[..size] {
            for &bit in lookup(table, Symbol::Literal(byte))?.bits() {
                bw.write_bit(bit)?;
            }
        }
    }
    for &bit in lookup(table, Symbol::EndOfStream)?.bits() {
        bw.write_bit(bit)?;
    }

    let bits = bw.bits_written() - start;
    debug!("Encoded payload is {} bits, ending at {}", bits, bw.loc());
    Ok(bits)
}
