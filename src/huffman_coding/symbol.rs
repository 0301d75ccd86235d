use std::fmt::{Display, Formatter};

/// Symbol id reserved for the end-of-stream sentinel.
pub const EOS_ID: u16 = 256;
/// Symbol id reserved for internal tree nodes. Never encoded and never valid in a header.
pub const INTERNAL_ID: u16 = 257;

/// Anything that can sit on a leaf of the huffman tree: a literal byte or the sentinel that
/// marks the logical end of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Literal(u8),
    EndOfStream,
}

impl Symbol {
    /// Integer id used on disk. Literals keep their byte value, the sentinel is 256.
    pub fn id(&self) -> u16 {
        match self {
            Symbol::Literal(byte) => *byte as u16,
            Symbol::EndOfStream => EOS_ID,
        }
    }

    /// Inverse of id(). Returns None for INTERNAL_ID and anything above it.
    pub fn from_id(id: u16) -> Option<Symbol> {
        match id {
            0..=255 => Some(Symbol::Literal(id as u8)),
            EOS_ID => Some(Symbol::EndOfStream),
            _ => None,
        }
    }
}

impl From<u8> for Symbol {
    fn from(byte: u8) -> Self {
        Symbol::Literal(byte)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Literal(byte) if byte.is_ascii_graphic() => write!(f, "'{}'", *byte as char),
            Symbol::Literal(byte) => write!(f, "0x{:02x}", byte),
            Symbol::EndOfStream => write!(f, "EOS"),
        }
    }
}
