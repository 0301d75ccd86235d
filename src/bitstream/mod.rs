//! The bitstream module forms the I/O subsystem for huffpress.
//!
//! The container is a byte aligned frequency table header followed by a payload of huffman
//! codes packed most significant bit first. BitWriter and BitReader handle both halves: the
//! header goes through the byte/word calls, the payload through single bit calls.
//!
//! This I/O subsystem is designed to interface with the other modules within huffpress. It is not intended for
//! more general use.
//!
pub mod bitreader;
pub mod bitwriter;
