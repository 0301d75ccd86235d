//! huffpress: lossless file compression with static Huffman coding.
//!
//! Version 0.1.0
//!
//! Every byte of the input is counted, a huffman tree is built from those counts, and each
//! byte is replaced by its code. The counts are stored at the front of the output so the
//! decompressor can rebuild the identical tree; a reserved end-of-stream code marks where
//! the payload stops.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> huffpress test.txt`
//!
//! This will compress the file and create the file test.txt.huf. `huffpress -d test.txt.huf`
//! restores it as test_unc.txt.
//!
//! The same operations are available on in-memory buffers:
//!
//! ```
//! let packed = huffpress::compress_bytes(b"aaabbc")?;
//! assert_eq!(huffpress::decompress_bytes(&packed)?, b"aaabbc");
//! # Ok::<(), huffpress::HuffError>(())
//! ```
#![warn(rust_2018_idioms)]

pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::{compress, compress_bytes, compress_file, CompressStats};
pub use compression::decompress::{
    decompress, decompress_bytes, decompress_file, test_file, DecompressStats,
};
pub use error::{HuffError, Result};
