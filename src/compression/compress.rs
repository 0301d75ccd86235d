use std::io::{BufReader, Read, Seek, Write};
use std::path::Path;

use log::{debug, info, warn};

use super::encode::encode;
use super::header::{header_len, write_header};
use super::{discard_on_error, open_input, open_output};
use crate::bitstream::bitwriter::BitWriter;
use crate::error::Result;
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::huffman::HuffmanTree;
use crate::huffman_coding::symbol::Symbol;
use crate::tools::cli::HufOpts;
use crate::tools::file_names::compressed_name;
use crate::tools::freq_count::{build_frequency_table, count_reader, FrequencyTable, Source};

/// What one compression run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressStats {
    /// Literal bytes read from the input.
    pub bytes_in: u64,
    pub header_bytes: u64,
    /// Payload length in bits, end-of-stream code included, padding excluded.
    pub payload_bits: u64,
    /// Total container size.
    pub bytes_out: u64,
}

impl CompressStats {
    /// Output size as a percentage of input size. Zero for empty input.
    pub fn ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            return 0.0;
        }
        self.bytes_out as f64 * 100.0 / self.bytes_in as f64
    }
}

/// Build tree and codes from table, then write header and payload for input to output.
fn write_container<R: Read, W: Write>(
    input: R,
    output: W,
    table: &FrequencyTable,
) -> Result<(W, CompressStats)> {
    let tree = HuffmanTree::build(table)?;
    let codes = CodeTable::build(&tree);

    let mut bw = BitWriter::new(output);
    write_header(&mut bw, table)?;
    let payload_bits = encode(input, &codes, &mut bw)?;
    let output = bw.finish()?;
    if payload_bits != codes.weighted_length(table) {
        // The input changed between counting and encoding.
        warn!(
            "Encoded {} payload bits but the counts call for {}",
            payload_bits,
            codes.weighted_length(table)
        );
    }

    let header_bytes = header_len(table.len()) as u64;
    let stats = CompressStats {
        bytes_in: table.total() - table.get(Symbol::EndOfStream).unwrap_or(0),
        header_bytes,
        payload_bits,
        bytes_out: header_bytes + (payload_bits + 7) / 8,
    };
    debug!("{:?}", stats);
    Ok((output, stats))
}

/// Compress a seekable input: one pass to count, rewind, one pass to encode.
pub fn compress<R: Read + Seek, W: Write>(input: &mut R, output: &mut W) -> Result<CompressStats> {
    let table = count_reader(&mut *input)?;
    input.rewind()?;
    let (_, stats) = write_container(input, output, &table)?;
    Ok(stats)
}

/// Compress an in-memory buffer into a new container.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let table = build_frequency_table(Source::Bytes(data))?;
    let (out, _) = write_container(data, Vec::new(), &table)?;
    Ok(out)
}

/// Compress path into path.huf (or to stdout, per opts). Files are closed when this returns.
pub fn compress_file(path: &Path, opts: &HufOpts) -> Result<CompressStats> {
    info!("Compressing {}", path.display());
    let table = build_frequency_table(Source::File(path))?;

    let input = BufReader::new(open_input(path)?);
    let target = compressed_name(path);
    let output = open_output(&target, opts)?;
    let (_, stats) = discard_on_error(write_container(input, output, &table), &target, opts)?;

    info!(
        "{}: {} -> {} bytes ({:.1}%)",
        path.display(),
        stats.bytes_in,
        stats.bytes_out,
        stats.ratio()
    );
    Ok(stats)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn sample_container_test() {
        let out = compress_bytes(b"aaabbc").unwrap();
        // header: HUF, 4 entries of 10 bytes; payload: 13 bits -> 2 bytes
        assert_eq!(out.len(), 3 + 2 + 40 + 2);
        assert_eq!(&out[..3], b"HUF");
        assert_eq!(&out[45..], &[0b0001_0101, 0b1011_1000]);
    }

    #[test]
    fn seekable_matches_bytes_test() {
        let data = b"a man, a plan, a canal: panama".to_vec();
        let mut output = Vec::new();
        let stats = compress(&mut Cursor::new(&data), &mut output).unwrap();
        assert_eq!(output, compress_bytes(&data).unwrap());
        assert_eq!(stats.bytes_in, data.len() as u64);
        assert_eq!(stats.bytes_out, output.len() as u64);
        assert_eq!(
            stats.bytes_out,
            stats.header_bytes + (stats.payload_bits + 7) / 8
        );
    }

    #[test]
    fn empty_stats_test() {
        let mut output = Vec::new();
        let stats = compress(&mut Cursor::new(Vec::<u8>::new()), &mut output).unwrap();
        assert_eq!(stats.bytes_in, 0);
        assert_eq!(stats.payload_bits, 1);
        assert_eq!(stats.ratio(), 0.0);
        assert_eq!(output.len(), 3 + 2 + 10 + 1);
    }
}
