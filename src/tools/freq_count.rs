use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;
use rustc_hash::FxHashMap;

use crate::error::{HuffError, Result};
use crate::huffman_coding::symbol::Symbol;

/// Symbol -> occurrence count. This table, not the tree, is what gets stored in the container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: FxHashMap<Symbol, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of symbol, inserting it with a count of 1 the first time.
    pub fn increment(&mut self, symbol: Symbol) {
        *self.counts.entry(symbol).or_insert(0) += 1;
    }

    /// Set the count for symbol, replacing any previous value.
    pub fn insert(&mut self, symbol: Symbol, count: u64) {
        self.counts.insert(symbol, count);
    }

    pub fn get(&self, symbol: Symbol) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.counts.contains_key(&symbol)
    }

    /// Count the end-of-stream sentinel once.
    pub fn add_end_of_stream(&mut self) {
        self.increment(Symbol::EndOfStream);
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }

    /// Entries ordered by symbol id. Use this wherever the order must be reproducible.
    pub fn sorted(&self) -> Vec<(Symbol, u64)> {
        let mut entries: Vec<(Symbol, u64)> = self.iter().collect();
        entries.sort_unstable_by_key(|(symbol, _)| symbol.id());
        entries
    }

    /// Sum of all counts, sentinel included.
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0, |sum, &count| sum.saturating_add(count))
    }
}

impl FromIterator<(Symbol, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (Symbol, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Where the symbols to be counted come from.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    File(&'a Path),
    Bytes(&'a [u8]),
}

/// Returns the byte frequencies of data as a 256 entry vec.
pub fn freqs(data: &[u8]) -> Vec<u64> {
    let mut freqs = vec![0_u64; 256];
    data.iter().for_each(|&el| freqs[el as usize] += 1);
    freqs
}

/// Turn a 256 entry byte count into a table, adding the sentinel.
fn table_from_freqs(freqs: &[u64]) -> FrequencyTable {
    let mut table: FrequencyTable = freqs
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(byte, &count)| (Symbol::Literal(byte as u8), count))
        .collect();
    table.add_end_of_stream();
    table
}

/// Count every byte the reader yields. The sentinel is always included, so an empty reader
/// gives a table holding only END-OF-STREAM.
pub fn count_reader<R: Read>(mut reader: R) -> std::io::Result<FrequencyTable> {
    let mut counts = vec![0_u64; 256];
    let mut buf = vec![0_u8; 64 * 1024];
    loop {
        let size = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(size) => size,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        buf[..size].iter().for_each(|&el| counts[el as usize] += 1);
    }
    Ok(table_from_freqs(&counts))
}

/// Build the frequency table for a file or for an in-memory buffer.
pub fn build_frequency_table(source: Source<'_>) -> Result<FrequencyTable> {
    let table = match source {
        Source::File(path) => {
            let unavailable = |source| HuffError::InputUnavailable {
                path: path.display().to_string(),
                source,
            };
            let file = File::open(path).map_err(unavailable)?;
            count_reader(BufReader::new(file)).map_err(unavailable)?
        }
        Source::Bytes(data) => table_from_freqs(&freqs(data)),
    };
    debug!(
        "Counted {} distinct symbols, {} in total",
        table.len(),
        table.total()
    );
    Ok(table)
}
