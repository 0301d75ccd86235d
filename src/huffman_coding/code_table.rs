use std::fmt::{Display, Formatter};

use log::{log_enabled, trace, Level};
use rustc_hash::FxHashMap;

use super::huffman::{HuffmanTree, Node, NodeData};
use super::symbol::Symbol;
use crate::tools::freq_count::FrequencyTable;

/// The path from the root to a leaf. `false` is the zero branch, `true` the one branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol -> code, covering every leaf of the tree it was built from.
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    codes: FxHashMap<Symbol, Code>,
}

impl CodeTable {
    /// Walk the tree depth first, appending 0 for each zero branch and 1 for each one branch.
    ///
    /// A tree that is a single leaf would give that leaf an empty code, which could never be
    /// sent. That leaf is given the code "0" instead.
    pub fn build(tree: &HuffmanTree) -> CodeTable {
        let mut table = CodeTable::default();
        let mut path = Vec::new();
        match tree.root().symbol() {
            Some(symbol) => {
                table.codes.insert(symbol, Code { bits: vec![false] });
            }
            None => walk(tree.root(), &mut path, &mut table.codes),
        }
        trace!("Built code table with {} entries", table.len());
        if log_enabled!(Level::Trace) {
            for (symbol, code) in table.sorted() {
                trace!("  {} -> {}", symbol, code);
            }
        }
        table
    }

    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries ordered by symbol id.
    pub fn sorted(&self) -> Vec<(Symbol, &Code)> {
        let mut entries: Vec<(Symbol, &Code)> = self.codes.iter().map(|(&s, c)| (s, c)).collect();
        entries.sort_unstable_by_key(|(symbol, _)| symbol.id());
        entries
    }

    /// Total payload bits for the counts in freqs: the sum of code length times count.
    /// Symbols without a code are skipped. Saturates at u64::MAX.
    pub fn weighted_length(&self, freqs: &FrequencyTable) -> u64 {
        freqs
            .iter()
            .filter_map(|(symbol, count)| {
                self.get(symbol)
                    .map(|code| (code.len() as u64).saturating_mul(count))
            })
            .fold(0, |sum, bits| sum.saturating_add(bits))
    }
}

/// Recursively walk the tree, recording the path to every leaf.
fn walk(node: &Node, path: &mut Vec<bool>, codes: &mut FxHashMap<Symbol, Code>) {
    match &node.node_data {
        NodeData::Kids(zero, one) => {
            path.push(false);
            walk(zero, path, codes);
            path.pop();
            path.push(true);
            walk(one, path, codes);
            path.pop();
        }
        NodeData::Leaf(symbol) => {
            codes.insert(*symbol, Code { bits: path.clone() });
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tools::freq_count::{build_frequency_table, Source};

    fn codes_for(data: &[u8]) -> (FrequencyTable, CodeTable) {
        let freqs = build_frequency_table(Source::Bytes(data)).unwrap();
        let codes = CodeTable::build(&HuffmanTree::build(&freqs).unwrap());
        (freqs, codes)
    }

    #[test]
    fn sample_codes_test() {
        let (_, codes) = codes_for(b"aaabbc");
        let rendered: Vec<String> = codes
            .sorted()
            .iter()
            .map(|(s, c)| format!("{}={}", s, c))
            .collect();
        assert_eq!(rendered, vec!["'a'=0", "'b'=10", "'c'=110", "EOS=111"]);
    }

    #[test]
    fn single_leaf_code_test() {
        let (_, codes) = codes_for(b"");
        assert_eq!(codes.len(), 1);
        assert_eq!(codes.get(Symbol::EndOfStream).unwrap().to_string(), "0");
    }

    #[test]
    fn one_repeated_byte_test() {
        let (_, codes) = codes_for(&[b'a'; 1000]);
        assert_eq!(codes.len(), 2);
        assert_eq!(codes.get(Symbol::from(b'a')).unwrap().len(), 1);
        assert_eq!(codes.get(Symbol::EndOfStream).unwrap().len(), 1);
    }

    #[test]
    fn prefix_free_test() {
        let text = b"Sphinx of black quartz, judge my vow! 0123456789 \x00\x01\xfe\xff";
        let (freqs, codes) = codes_for(text);
        assert_eq!(codes.len(), freqs.len());
        let entries = codes.sorted();
        for (i, (_, a)) in entries.iter().enumerate() {
            assert!(!a.is_empty());
            for (j, (_, b)) in entries.iter().enumerate() {
                if i != j {
                    assert!(!b.bits().starts_with(a.bits()), "{} is a prefix of {}", a, b);
                }
            }
        }
    }

    #[test]
    fn optimal_weighted_length_test() {
        let freqs: FrequencyTable = [(b'a', 5), (b'b', 9), (b'c', 12), (b'd', 13), (b'e', 16), (b'f', 45)]
            .iter()
            .map(|&(byte, count)| (Symbol::from(byte), count))
            .collect();
        let codes = CodeTable::build(&HuffmanTree::build(&freqs).unwrap());
        assert_eq!(codes.weighted_length(&freqs), 224);
        assert_eq!(codes.get(Symbol::from(b'f')).unwrap().len(), 1);
    }

    #[test]
    fn huge_counts_saturate_test() {
        let freqs: FrequencyTable = [
            (Symbol::from(b'a'), u64::MAX - 1),
            (Symbol::from(b'b'), u64::MAX / 2),
            (Symbol::EndOfStream, 1),
        ]
        .into_iter()
        .collect();
        let codes = CodeTable::build(&HuffmanTree::build(&freqs).unwrap());
        assert_eq!(codes.weighted_length(&freqs), u64::MAX);
    }

    #[test]
    fn code_lengths_repeatable_test() {
        let text = b"abracadabra, the magic word of the ancients";
        let (freqs, first) = codes_for(text);
        let second = CodeTable::build(&HuffmanTree::build(&freqs).unwrap());
        for (symbol, code) in first.sorted() {
            assert_eq!(second.get(symbol).map(Code::len), Some(code.len()));
        }
    }
}
