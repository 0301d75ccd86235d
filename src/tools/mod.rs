//! The tools module provides the helpers around the huffman core.
//!
//! The tools are:
//! - cli: Command line interface and the option set shared by the library entry points.
//! - file_names: Output names for compressed (`.huf`) and restored (`_unc`) files.
//! - freq_count: Byte frequency count used to size the huffman tree.
//!
pub mod cli;
pub mod file_names;
pub mod freq_count;
