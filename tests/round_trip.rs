//! In-memory compress/decompress round trips.

use huffpress::compression::decode::DecodeEnd;
use huffpress::huffman_coding::code_table::CodeTable;
use huffpress::huffman_coding::huffman::HuffmanTree;
use huffpress::huffman_coding::symbol::Symbol;
use huffpress::tools::freq_count::{build_frequency_table, FrequencyTable, Source};
use huffpress::{compress, compress_bytes, decompress, decompress_bytes};
use std::io::Cursor;

fn round_trip(data: &[u8]) -> Vec<u8> {
    let packed = compress_bytes(data).expect("compression failed");
    decompress_bytes(&packed).expect("decompression failed")
}

/// Small xorshift generator so the test data is the same on every run.
fn pseudo_random(len: usize, mut state: u64) -> Vec<u8> {
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect()
}

#[test]
fn test_sample_string() {
    assert_eq!(round_trip(b"aaabbc"), b"aaabbc");
}

#[test]
fn test_empty_input() {
    let packed = compress_bytes(b"").unwrap();
    // Header holding only the sentinel, then its single "0" bit.
    let mut expected = b"HUF".to_vec();
    expected.extend([0, 1, 1, 0]);
    expected.extend(1_u64.to_be_bytes());
    expected.push(0);
    assert_eq!(packed, expected);
    assert!(decompress_bytes(&packed).unwrap().is_empty());
}

#[test]
fn test_single_repeated_byte() {
    let original = vec![b'a'; 1000];
    let packed = compress_bytes(&original).unwrap();
    // One bit per byte plus the sentinel.
    assert_eq!(packed.len(), 3 + 2 + 20 + 126);
    assert_eq!(decompress_bytes(&packed).unwrap(), original);
}

#[test]
fn test_single_byte() {
    assert_eq!(round_trip(b"A"), b"A");
}

#[test]
fn test_every_byte_value() {
    let original: Vec<u8> = (0..=255).cycle().take(256 * 5 + 17).collect();
    assert_eq!(round_trip(&original), original);
}

#[test]
fn test_random_data() {
    for (len, seed) in [(1, 1), (7, 2), (100, 3), (4096, 4), (100_000, 5)] {
        let original = pseudo_random(len, seed);
        assert_eq!(round_trip(&original), original, "length {}", len);
    }
}

#[test]
fn test_skewed_data_compresses() {
    let mut original = b"The quick brown fox jumps over the lazy dog. ".repeat(200);
    original.extend(vec![b' '; 5000]);
    let packed = compress_bytes(&original).unwrap();
    assert!(
        packed.len() < original.len() / 2,
        "{} bytes packed to {}",
        original.len(),
        packed.len()
    );
    assert_eq!(decompress_bytes(&packed).unwrap(), original);
}

#[test]
fn test_fibonacci_counts_deep_tree() {
    // Fibonacci counts (with the sentinel as the first 1) give a tree that is one long chain.
    let mut original = Vec::new();
    let (mut a, mut b) = (1_usize, 2_usize);
    for byte in 0..20_u8 {
        original.extend(std::iter::repeat(byte).take(a));
        (a, b) = (b, a + b);
    }
    let freqs = build_frequency_table(Source::Bytes(&original)).unwrap();
    assert_eq!(HuffmanTree::build(&freqs).unwrap().depth(), 20);
    assert_eq!(round_trip(&original), original);
}

#[test]
fn test_streaming_api() {
    let original = pseudo_random(20_000, 99);
    let mut packed = Vec::new();
    let cstats = compress(&mut Cursor::new(&original), &mut packed).unwrap();
    let mut restored = Vec::new();
    let dstats = decompress(packed.as_slice(), &mut restored).unwrap();
    assert_eq!(restored, original);
    assert_eq!(dstats.end, DecodeEnd::Sentinel);
    assert_eq!(dstats.bytes_out, cstats.bytes_in);
    assert_eq!(dstats.payload_bits, cstats.payload_bits);
}

#[test]
fn test_textbook_optimal_length() {
    let freqs: FrequencyTable = [(b'a', 5), (b'b', 9), (b'c', 12), (b'd', 13), (b'e', 16), (b'f', 45)]
        .into_iter()
        .map(|(byte, count)| (Symbol::from(byte), count))
        .collect();
    let codes = CodeTable::build(&HuffmanTree::build(&freqs).unwrap());
    assert_eq!(codes.weighted_length(&freqs), 224);
}

#[test]
fn test_corrupted_payload_never_panics() {
    let original = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit.".repeat(3);
    let packed = compress_bytes(&original).unwrap();
    let header = 3 + 2 + 10 * build_frequency_table(Source::Bytes(&original)).unwrap().len();
    for i in header..packed.len() {
        let mut damaged = packed.clone();
        damaged[i] ^= 0x5a;
        // Any outcome is fine except a panic; a full tree has no missing children.
        let _ = decompress_bytes(&damaged);
    }
}
