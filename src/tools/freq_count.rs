use log::trace;

use super::symbol_map::{Symbol, ALPHABET};

/// Count of every alphabet symbol over a sequence. Symbols that never occur keep a zero count,
/// so the table always has one entry per symbol in `ALPHABET` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET.len()],
}

impl FrequencyTable {
    /// Build a table from explicit counts given in `ALPHABET` order.
    pub fn from_counts(counts: [u64; ALPHABET.len()]) -> Self {
        Self { counts }
    }

    pub fn get(&self, sym: Symbol) -> u64 {
        self.counts[sym.index()]
    }

    /// Sum of all counts. Equals the length (in characters) of the counted sequence.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// (symbol, count) pairs in `ALPHABET` order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        ALPHABET.iter().map(move |&sym| (sym, self.counts[sym.index()]))
    }
}

/// Returns a frequency count of the input sequence. Anything outside A, C, T and G (either
/// case) is counted as the catch-all symbol.
pub fn freqs(sequence: &str) -> FrequencyTable {
    let mut counts = [0_u64; ALPHABET.len()];
    sequence
        .chars()
        .for_each(|c| counts[Symbol::from_char(c).index()] += 1);
    trace!("Frequencies (ACTGN): {:?}", counts);
    FrequencyTable { counts }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn freqs_test() {
        let table = freqs("AACGTTTX");
        assert_eq!(table.get(Symbol::A), 2);
        assert_eq!(table.get(Symbol::C), 1);
        assert_eq!(table.get(Symbol::G), 1);
        assert_eq!(table.get(Symbol::T), 3);
        assert_eq!(table.get(Symbol::N), 1);
        assert_eq!(table.total(), 8);
    }

    #[test]
    fn freqs_lowercase_and_other_test() {
        let table = freqs("acgt$n?");
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![
            (Symbol::A, 1),
            (Symbol::C, 1),
            (Symbol::T, 1),
            (Symbol::G, 1),
            (Symbol::N, 3),
        ]);
    }

    #[test]
    fn freqs_empty_test() {
        let table = freqs("");
        assert_eq!(table.total(), 0);
        assert_eq!(table.iter().count(), 5);
    }

    #[test]
    fn total_is_char_count_test() {
        // Multi-byte characters count once each
        let seq = "AçGé";
        assert_eq!(freqs(seq).total(), seq.chars().count() as u64);
    }
}
