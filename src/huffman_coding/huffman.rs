use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, trace};

use crate::error::{HuffError, Result};
use crate::huffman_coding::symbol::Symbol;
use crate::tools::freq_count::FrequencyTable;

/// Either two children (zero side first) or a symbol.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    Kids(Box<Node>, Box<Node>),
    Leaf(Symbol),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    /// Sum of the leaf counts below this node. Only meaningful while building.
    pub count: u64,
    pub node_data: NodeData,
}

impl Node {
    /// Create a new leaf
    pub fn leaf(symbol: Symbol, count: u64) -> Node {
        Node {
            count,
            node_data: NodeData::Leaf(symbol),
        }
    }

    /// Join two nodes under a new parent. `zero` becomes the 0 branch.
    pub fn join(zero: Node, one: Node) -> Node {
        Node {
            count: zero.count.saturating_add(one.count),
            node_data: NodeData::Kids(Box::new(zero), Box::new(one)),
        }
    }

    /// The symbol on this node, or None for an internal node.
    pub fn symbol(&self) -> Option<Symbol> {
        match self.node_data {
            NodeData::Leaf(symbol) => Some(symbol),
            NodeData::Kids(..) => None,
        }
    }
}

/// Heap slot. `seq` records push order so that equal counts pop first-in first-out.
struct Queued {
    node: Node,
    seq: usize,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    /// BinaryHeap is a max heap, so sort Nodes by decreasing count and decreasing sequence
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .count
            .cmp(&self.node.count)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A huffman tree, built from (and only from) a frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree by repeatedly joining the two lowest counts.
    ///
    /// Leaves are queued in ascending symbol id order and ties pop in the order they were
    /// queued, so the same table always yields the same tree. A table with a single entry
    /// gives a tree that is just one leaf.
    pub fn build(table: &FrequencyTable) -> Result<HuffmanTree> {
        if table.is_empty() {
            return Err(HuffError::EmptyTable);
        }

        let mut seq = 0;
        let mut heap: BinaryHeap<Queued> = table
            .sorted()
            .into_iter()
            .map(|(symbol, count)| {
                seq += 1;
                Queued {
                    node: Node::leaf(symbol, count),
                    seq,
                }
            })
            .collect();

        // Pare the heap down to one single node with child nodes
        while heap.len() > 1 {
            let (Some(zero), Some(one)) = (heap.pop(), heap.pop()) else {
                break;
            };
            trace!(
                "Joining counts {} (#{}) and {} (#{})",
                zero.node.count,
                zero.seq,
                one.node.count,
                one.seq
            );
            seq += 1;
            heap.push(Queued {
                node: Node::join(zero.node, one.node),
                seq,
            });
        }

        let root = heap.pop().ok_or(HuffError::EmptyTable)?.node;
        let tree = HuffmanTree { root };
        debug!(
            "Built huffman tree: {} leaves, depth {}",
            tree.leaf_count(),
            tree.depth()
        );
        Ok(tree)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of leaves, which is the number of distinct symbols.
    pub fn leaf_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            match &node.node_data {
                NodeData::Kids(zero, one) => count(zero) + count(one),
                NodeData::Leaf(_) => 1,
            }
        }
        count(&self.root)
    }

    /// Length of the longest root to leaf path. A single leaf tree has depth 0.
    pub fn depth(&self) -> usize {
        fn depth(node: &Node) -> usize {
            match &node.node_data {
                NodeData::Kids(zero, one) => 1 + depth(zero).max(depth(one)),
                NodeData::Leaf(_) => 0,
            }
        }
        depth(&self.root)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tools::freq_count::{build_frequency_table, Source};

    fn table(entries: &[(Symbol, u64)]) -> FrequencyTable {
        entries.iter().copied().collect()
    }

    #[test]
    fn empty_table_test() {
        assert!(matches!(
            HuffmanTree::build(&FrequencyTable::new()),
            Err(HuffError::EmptyTable)
        ));
    }

    #[test]
    fn single_leaf_test() {
        let tree = HuffmanTree::build(&table(&[(Symbol::EndOfStream, 1)])).unwrap();
        assert_eq!(tree.root().symbol(), Some(Symbol::EndOfStream));
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn sample_shape_test() {
        // a:3 b:2 c:1 EOS:1 -> c and EOS join first, then b with that, then a.
        let tree = HuffmanTree::build(&build_frequency_table(Source::Bytes(b"aaabbc")).unwrap())
            .unwrap();
        assert_eq!(tree.root().count, 7);
        let NodeData::Kids(zero, one) = &tree.root().node_data else {
            panic!("root should be internal");
        };
        assert_eq!(zero.symbol(), Some(Symbol::from(b'a')));
        let NodeData::Kids(b, rest) = &one.node_data else {
            panic!("one side should be internal");
        };
        assert_eq!(b.symbol(), Some(Symbol::from(b'b')));
        let NodeData::Kids(c, eos) = &rest.node_data else {
            panic!("expected c/EOS pair");
        };
        assert_eq!(c.symbol(), Some(Symbol::from(b'c')));
        assert_eq!(eos.symbol(), Some(Symbol::EndOfStream));
    }

    #[test]
    fn one_leaf_per_symbol_test() {
        let data: Vec<u8> = (0..=255).collect();
        let tree =
            HuffmanTree::build(&build_frequency_table(Source::Bytes(&data)).unwrap()).unwrap();
        assert_eq!(tree.leaf_count(), 257);
        assert_eq!(tree.root().count, 257);
    }

    #[test]
    fn deterministic_build_test() {
        let text = b"it was the best of times, it was the worst of times";
        let freqs = build_frequency_table(Source::Bytes(text)).unwrap();
        // Rebuild the table in a different insertion order; the tree must not change.
        let mut reversed = freqs.sorted();
        reversed.reverse();
        let reordered: FrequencyTable = reversed.into_iter().collect();
        assert_eq!(
            HuffmanTree::build(&freqs).unwrap(),
            HuffmanTree::build(&reordered).unwrap()
        );
    }

    #[test]
    fn fifo_tie_break_test() {
        // All equal: first two queued join first, so 'a' lands on the zero side.
        let tree = HuffmanTree::build(&table(&[
            (Symbol::from(b'a'), 1),
            (Symbol::from(b'b'), 1),
            (Symbol::from(b'c'), 1),
            (Symbol::from(b'd'), 1),
        ]))
        .unwrap();
        let NodeData::Kids(zero, one) = &tree.root().node_data else {
            panic!("root should be internal");
        };
        let NodeData::Kids(a, b) = &zero.node_data else {
            panic!("expected a/b pair");
        };
        let NodeData::Kids(c, d) = &one.node_data else {
            panic!("expected c/d pair");
        };
        assert_eq!(a.symbol(), Some(Symbol::from(b'a')));
        assert_eq!(b.symbol(), Some(Symbol::from(b'b')));
        assert_eq!(c.symbol(), Some(Symbol::from(b'c')));
        assert_eq!(d.symbol(), Some(Symbol::from(b'd')));
    }
}
