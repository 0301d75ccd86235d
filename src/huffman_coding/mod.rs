//! The huffman module turns symbol counts into codes for huffpress.
//!
//! - symbol: the leaf alphabet, literal bytes plus the end-of-stream sentinel.
//! - huffman: builds the tree from a frequency table with a min-count-first merge.
//! - code_table: walks the tree and records each leaf's path as its code.
//!
//! Encoding and decoding with these live in the compression module.
//!

pub mod code_table;
pub mod huffman;
pub mod symbol;
