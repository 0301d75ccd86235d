use std::io::{Read, Write};

use log::{debug, warn};

use crate::bitstream::bitreader::BitReader;
use crate::error::{HuffError, Result};
use crate::huffman_coding::huffman::{HuffmanTree, Node, NodeData};
use crate::huffman_coding::symbol::Symbol;

/// Why decoding stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeEnd {
    /// The end-of-stream code was read. Anything after it was ignored.
    Sentinel,
    /// The input ran out before the end-of-stream code.
    Truncated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Literal bytes written to the output.
    pub symbols: u64,
    /// Payload bits consumed, up to and including the last one interpreted.
    pub bits_read: u64,
    pub end: DecodeEnd,
}

/// Walk the tree one bit at a time from the root, writing a byte to out at every literal
/// leaf and stopping at the end-of-stream leaf.
///
/// A tree that is a single leaf uses "0" as that leaf's code, so a 0 bit reaches it and a
/// 1 bit is a traversal error. Output already written is left in place on error.
pub fn decode<R: Read, W: Write>(
    br: &mut BitReader<R>,
    tree: &HuffmanTree,
    out: &mut W,
) -> Result<DecodeSummary> {
    let root = tree.root();
    let mut current: &Node = root;
    let mut symbols = 0;
    let mut bits_read = 0;

    let end = loop {
        let Some(bit) = br.bool_bit()? else {
            break DecodeEnd::Truncated;
        };
        bits_read += 1;

        current = match (&current.node_data, bit) {
            (NodeData::Kids(zero, _), false) => &**zero,
            (NodeData::Kids(_, one), true) => &**one,
            (NodeData::Leaf(_), false) => current,
            (NodeData::Leaf(_), true) => {
                return Err(HuffError::Traversal {
                    bit_position: bits_read,
                })
            }
        };

        match current.node_data {
            NodeData::Leaf(Symbol::EndOfStream) => break DecodeEnd::Sentinel,
            NodeData::Leaf(Symbol::Literal(byte)) => {
                out.write_all(&[byte])?;
                symbols += 1;
                current = root;
            }
            NodeData::Kids(..) => {}
        }
    };

    if end == DecodeEnd::Truncated {
        warn!(
            "Input ended before the end-of-stream code after {} symbols",
            symbols
        );
    }
    debug!("Decoded {} symbols from {} bits", symbols, bits_read);
    Ok(DecodeSummary {
        symbols,
        bits_read,
        end,
    })
}
