//! The nucleotide alphabet and the sentinel ordering used by the transforms.
//!
//! The alphabet is closed: four nucleotide letters plus `N`, which stands in for any other
//! character. The leaf order of the Huffman tree follows `ALPHABET`, so changing the order
//! here changes every codeword table this crate produces.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Terminator appended once to a sequence before the BWT. Always sorts first.
pub const SENTINEL: char = '$';

/// One symbol of the closed alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    A,
    C,
    T,
    G,
    /// Catch-all for anything that is not A, C, T or G.
    N,
}

/// Every symbol, in leaf order.
pub const ALPHABET: [Symbol; 5] = [Symbol::A, Symbol::C, Symbol::T, Symbol::G, Symbol::N];

impl Symbol {
    /// Map a character onto the alphabet. Lowercase nucleotides are accepted; everything
    /// else lands on the catch-all.
    pub fn from_char(c: char) -> Symbol {
        match c.to_ascii_uppercase() {
            'A' => Symbol::A,
            'C' => Symbol::C,
            'T' => Symbol::T,
            'G' => Symbol::G,
            _ => Symbol::N,
        }
    }

    /// Like `from_char`, but returns None for characters outside the four named symbols.
    pub fn named(c: char) -> Option<Symbol> {
        match Symbol::from_char(c) {
            Symbol::N => None,
            sym => Some(sym),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::A => 'A',
            Symbol::C => 'C',
            Symbol::T => 'T',
            Symbol::G => 'G',
            Symbol::N => 'N',
        }
    }

    /// Position of this symbol in `ALPHABET`.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Ordering key for one character: the sentinel first, then plain character codes.
///
/// The sentinel is pinned below everything rather than relying on `'$'` happening to have a
/// small code point. Space and `!` both sort below `'$'` by code point alone.
#[inline(always)]
pub fn sort_key(c: char) -> (bool, char) {
    (c != SENTINEL, c)
}

/// Compare two rows (rotations or partial reconstructions) character by character using
/// `sort_key`. A row that is a prefix of another sorts first.
pub fn compare_rows(a: &[char], b: &[char]) -> Ordering {
    a.iter()
        .map(|&c| sort_key(c))
        .cmp(b.iter().map(|&c| sort_key(c)))
}
