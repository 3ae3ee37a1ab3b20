use log::info;

use super::artifact::HuffmanArtifact;
use crate::bitstream::bitreader::unpack;
use crate::bwt_algorithms::bwt_sort::bwt_decode;
use crate::error::Result;
use crate::huffman_coding::codewords::CodewordTable;
use crate::tools::symbol_map::{Symbol, SENTINEL};

/// Decode a Huffman artifact back to its sequence.
pub fn decompress(artifact: &HuffmanArtifact) -> Result<String> {
    decompress_parts(&artifact.bytes, artifact.bit_len, &artifact.table)
}

/// Decode from the three artifact fields: unpack `bit_len` bits, then walk them against the
/// table.
pub fn decompress_parts(bytes: &[u8], bit_len: usize, table: &CodewordTable) -> Result<String> {
    let bits = unpack(bytes, bit_len)?;
    let sequence = table.decode(&bits)?;
    info!(
        "Decompressed {} bits into {} characters.",
        bit_len,
        sequence.chars().count()
    );
    Ok(sequence)
}

/// Put the sentinel back where the catch-all symbol stood in for it.
pub fn restore_sentinel(decoded: &str) -> String {
    decoded
        .chars()
        .map(|c| if c == Symbol::N.as_char() { SENTINEL } else { c })
        .collect()
}

/// Reverse `compress_bwt`: decode, restore the sentinel and undo the BWT.
pub fn decompress_bwt(artifact: &HuffmanArtifact) -> Result<String> {
    let bwt = restore_sentinel(&decompress(artifact)?);
    bwt_decode(&bwt)
}
