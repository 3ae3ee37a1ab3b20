//! Codeword tables: generated from a Huffman tree, used to encode and decode, and written to or
//! read from the JSON form kept in the Huffman artifact.
//!
//! A table read back from an artifact is never trusted as-is. It must list each symbol once,
//! every codeword must be a non-empty string of `0` and `1`, and no codeword may be a prefix of
//! another. Decoding relies on that last rule.

use std::fmt::{Display, Formatter};

use log::{debug, trace};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::huffman::{HuffmanTree, NodeData};
use crate::error::{Error, Result};
use crate::tools::symbol_map::Symbol;

/// One row of the serialized table. Unknown fields are rejected.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CodewordEntry {
    symbol: Symbol,
    codeword: String,
}

/// Prefix-free mapping from symbol to codeword, kept in alphabet order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodewordTable {
    entries: Vec<(Symbol, Vec<bool>)>,
}

impl CodewordTable {
    /// Walk the tree from the root and record the path of edge bits to every leaf.
    pub fn from_tree(tree: &HuffmanTree) -> CodewordTable {
        let mut entries = vec![];
        return_leaves(tree, tree.root(), &mut vec![], &mut entries);
        entries.sort_by_key(|(sym, _)| *sym);
        debug!("Codewords: {}", CodewordTable { entries: entries.clone() });
        CodewordTable { entries }
    }

    /// Build a table from (symbol, codeword string) pairs, checking every rule a table must
    /// follow.
    pub fn from_pairs<S: AsRef<str>>(pairs: &[(Symbol, S)]) -> Result<CodewordTable> {
        if pairs.is_empty() {
            return Err(Error::invalid("codeword table is empty"));
        }
        let mut entries: Vec<(Symbol, Vec<bool>)> = Vec::with_capacity(pairs.len());
        for (sym, code) in pairs {
            if entries.iter().any(|(other, _)| other == sym) {
                return Err(Error::invalid(format!("symbol {} has two codewords", sym)));
            }
            entries.push((*sym, parse_bits(code.as_ref())?));
        }
        for (sym, code) in entries.iter() {
            if let Some((other, _)) = entries
                .iter()
                .find(|(other, other_code)| other != sym && other_code.starts_with(code))
            {
                return Err(Error::invalid(format!(
                    "codeword of {} is a prefix of the codeword of {}",
                    sym, other
                )));
            }
        }
        entries.sort_by_key(|(sym, _)| *sym);
        Ok(CodewordTable { entries })
    }

    /// Parse the JSON form written by `to_json`: an array of `{"symbol", "codeword"}` objects.
    pub fn from_json(text: &str) -> Result<CodewordTable> {
        let rows: Vec<CodewordEntry> = serde_json::from_str(text)
            .map_err(|e| Error::invalid(format!("malformed codeword table: {}", e)))?;
        let pairs = rows
            .into_iter()
            .map(|row| (row.symbol, row.codeword))
            .collect::<Vec<(Symbol, String)>>();
        Self::from_pairs(&pairs)
    }

    pub fn to_json(&self) -> Result<String> {
        let rows = self
            .iter()
            .map(|(symbol, code)| CodewordEntry {
                symbol,
                codeword: bits_to_string(code),
            })
            .collect::<Vec<CodewordEntry>>();
        serde_json::to_string(&rows)
            .map_err(|e| Error::invalid(format!("cannot serialize codeword table: {}", e)))
    }

    pub fn get(&self, sym: Symbol) -> Option<&[bool]> {
        self.entries
            .iter()
            .find(|(other, _)| *other == sym)
            .map(|(_, code)| code.as_slice())
    }

    /// (symbol, codeword) pairs in alphabet order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &[bool])> + '_ {
        self.entries.iter().map(|(sym, code)| (*sym, code.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode a sequence. Characters outside the four named symbols use the catch-all
    /// codeword. The length of the returned bits is the exact (unpadded) bit length.
    pub fn encode(&self, sequence: &str) -> Result<Vec<bool>> {
        let mut lookup: [Option<&[bool]>; 5] = [None; 5];
        for (sym, code) in self.iter() {
            lookup[sym.index()] = Some(code);
        }
        let mut bits = vec![];
        for c in sequence.chars() {
            let sym = Symbol::from_char(c);
            match lookup[sym.index()] {
                Some(code) => bits.extend_from_slice(code),
                None => {
                    return Err(Error::invalid(format!(
                        "no codeword for symbol {} (from {:?})",
                        sym, c
                    )))
                }
            }
        }
        trace!("Encoded {} characters into {} bits", sequence.chars().count(), bits.len());
        Ok(bits)
    }

    /// Decode bits one at a time, emitting a symbol each time the running prefix equals a
    /// codeword. Bits left over at the end that match nothing mean the data is corrupt.
    pub fn decode(&self, bits: &[bool]) -> Result<String> {
        let lookup: FxHashMap<&[bool], Symbol> = self
            .entries
            .iter()
            .map(|(sym, code)| (code.as_slice(), *sym))
            .collect();

        let mut sequence = String::new();
        let mut start = 0;
        for end in 1..=bits.len() {
            if let Some(sym) = lookup.get(&bits[start..end]) {
                sequence.push(sym.as_char());
                start = end;
            }
        }
        if start != bits.len() {
            return Err(Error::corrupt(format!(
                "{} trailing bits do not match any codeword",
                bits.len() - start
            )));
        }
        Ok(sequence)
    }
}

impl Display for CodewordTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let parts = self
            .iter()
            .map(|(sym, code)| format!("{}={}", sym, bits_to_string(code)))
            .collect::<Vec<String>>();
        write!(f, "{}", parts.join(" "))
    }
}

/// Recursively walk the tree and push every leaf with the path of edge bits that reaches it.
/// A root that is itself a leaf has no edge bit, so it gets the single bit 0.
fn return_leaves(
    tree: &HuffmanTree,
    idx: usize,
    path: &mut Vec<bool>,
    leaves: &mut Vec<(Symbol, Vec<bool>)>,
) {
    let node = tree.node(idx);
    if let Some(bit) = node.bit {
        path.push(bit);
    }
    match node.node_data {
        NodeData::Kids(left, right) => {
            return_leaves(tree, left, path, leaves);
            return_leaves(tree, right, path, leaves);
        }
        NodeData::Leaf(sym) => {
            if path.is_empty() {
                leaves.push((sym, vec![false]));
            } else {
                leaves.push((sym, path.clone()));
            }
        }
    };
    if node.bit.is_some() {
        path.pop();
    }
}

/// Turn a string of `0` and `1` characters into bits.
pub fn parse_bits(text: &str) -> Result<Vec<bool>> {
    if text.is_empty() {
        return Err(Error::invalid("empty codeword"));
    }
    text.chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(Error::invalid(format!("{:?} is not a bit", other))),
        })
        .collect()
}

pub fn bits_to_string(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}
