//! Error types for huffpress.
//!
//! Every failure in counting, tree building, encoding, decoding or file handling is reported
//! through [`HuffError`]. Nothing is retried; the error aborts the current compress or
//! decompress call and is handed back to the caller.

use std::io;
use thiserror::Error;

use crate::huffman_coding::symbol::Symbol;

/// The main error type for huffpress operations.
#[derive(Debug, Error)]
pub enum HuffError {
    /// Source file could not be opened or read.
    #[error("Can't read {path}: {source}")]
    InputUnavailable {
        /// Path of the file we tried to open.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The frequency table header could not be parsed back from a container.
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// A symbol seen while encoding has no code. Counting and encoding disagree.
    #[error("No code for symbol {0}")]
    Lookup(Symbol),

    /// The decoder stepped to a child that does not exist.
    #[error("Invalid code path at bit position {bit_position}")]
    Traversal {
        /// Number of payload bits consumed when the walk failed.
        bit_position: u64,
    },

    /// A tree was requested from a table with no symbols in it.
    #[error("Can't build a tree from an empty frequency table")]
    EmptyTable,

    /// The file name does not follow the `.huf` convention.
    #[error("{0} does not end in .huf")]
    BadFileName(String),

    /// The payload stopped early or held a different number of bytes than the header counted.
    #[error("{0} failed the integrity test")]
    Damaged(String),

    /// Output file exists and overwriting was not requested.
    #[error("Output file {0} already exists (use -f to overwrite)")]
    OutputExists(String),

    /// I/O error from the underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, HuffError>;
