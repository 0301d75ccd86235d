use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{info, warn};

use super::decode::{decode, DecodeEnd};
use super::header::read_header;
use super::{discard_on_error, open_input, open_output};
use crate::bitstream::bitreader::BitReader;
use crate::error::Result;
use crate::huffman_coding::huffman::HuffmanTree;
use crate::tools::freq_count::FrequencyTable;
use crate::huffman_coding::symbol::Symbol;
use crate::tools::cli::HufOpts;
use crate::tools::file_names::decompressed_name;

/// What one decompression run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecompressStats {
    /// Distinct symbols listed in the header, sentinel included.
    pub table_entries: usize,
    /// Literal bytes the header says the payload holds.
    pub expected_bytes: u64,
    /// Literal bytes actually written.
    pub bytes_out: u64,
    pub payload_bits: u64,
    pub end: DecodeEnd,
}

impl DecompressStats {
    /// The payload ended with the sentinel and held as many bytes as the header counted.
    pub fn is_intact(&self) -> bool {
        self.end == DecodeEnd::Sentinel && self.bytes_out == self.expected_bytes
    }
}

/// Read a container from input and write the original bytes to output.
///
/// On error, whatever was decoded before the failure has already been written.
pub fn decompress<R: Read, W: Write>(input: R, output: &mut W) -> Result<DecompressStats> {
    let mut br = BitReader::new(input);
    let (table, tree) = read_table(&mut br)?;
    decode_payload(&mut br, &table, &tree, output)
}

/// Read and check the header, then rebuild the tree it describes.
fn read_table<R: Read>(br: &mut BitReader<R>) -> Result<(FrequencyTable, HuffmanTree)> {
    let table = read_header(br)?;
    let tree = HuffmanTree::build(&table)?;
    Ok((table, tree))
}

fn decode_payload<R: Read, W: Write>(
    br: &mut BitReader<R>,
    table: &FrequencyTable,
    tree: &HuffmanTree,
    output: &mut W,
) -> Result<DecompressStats> {
    let mut out = BufWriter::new(output);
    let summary = decode(br, tree, &mut out)?;
    out.flush()?;

    let stats = DecompressStats {
        table_entries: table.len(),
        expected_bytes: table.total() - table.get(Symbol::EndOfStream).unwrap_or(0),
        bytes_out: summary.symbols,
        payload_bits: summary.bits_read,
        end: summary.end,
    };
    if stats.bytes_out != stats.expected_bytes {
        warn!(
            "Header counts {} bytes but {} were decoded",
            stats.expected_bytes, stats.bytes_out
        );
    }
    Ok(stats)
}

/// Decompress an in-memory container.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decompress(data, &mut out)?;
    Ok(out)
}

/// Decompress name.ext.huf into name_unc.ext (or to stdout, per opts).
pub fn decompress_file(path: &Path, opts: &HufOpts) -> Result<DecompressStats> {
    info!("Decompressing {}", path.display());
    let target = decompressed_name(path)?;
    let mut br = BitReader::new(BufReader::new(open_input(path)?));
    // A bad header fails here, before any output file exists.
    let (table, tree) = read_table(&mut br)?;

    let result = {
        let mut output = open_output(&target, opts)?;
        decode_payload(&mut br, &table, &tree, &mut output)
    };
    let stats = discard_on_error(result, &target, opts)?;
    info!("{}: wrote {} bytes", path.display(), stats.bytes_out);
    Ok(stats)
}

/// Decode path without keeping the output and report whether it is intact.
pub fn test_file(path: &Path) -> Result<DecompressStats> {
    let input = BufReader::new(open_input(path)?);
    let stats = decompress(input, &mut io::sink())?;
    if stats.is_intact() {
        info!("{}: ok", path.display());
    } else {
        warn!("{}: damaged ({:?})", path.display(), stats.end);
    }
    Ok(stats)
}
