use log::{debug, info};

use super::artifact::HuffmanArtifact;
use crate::bitstream::bitpacker::BitPacker;
use crate::bwt_algorithms::bwt_sort::bwt_encode;
use crate::error::{Error, Result};
use crate::huffman_coding::codewords::CodewordTable;
use crate::huffman_coding::huffman::HuffmanTree;
use crate::tools::freq_count::freqs;
use crate::tools::symbol_map::Symbol;

/// Huffman-compress a sequence: count symbols, build the tree and its codewords, encode and
/// pack. The sequence is uppercased first and must not be empty.
pub fn compress(sequence: &str) -> Result<HuffmanArtifact> {
    if sequence.is_empty() {
        return Err(Error::invalid("cannot compress an empty sequence"));
    }
    let sequence = sequence.to_uppercase();

    let freqs = freqs(&sequence);
    let tree = HuffmanTree::from_frequencies(&freqs);
    debug!("Huffman tree is {}", tree);
    let table = CodewordTable::from_tree(&tree);

    let bits = table.encode(&sequence)?;
    let mut bp = BitPacker::new((bits.len() + 7) / 8);
    bp.out_bits(&bits);
    bp.flush();

    info!(
        "Compressed {} characters into {} bits ({} bytes).",
        freqs.total(),
        bp.bit_len,
        bp.output.len()
    );
    Ok(HuffmanArtifact {
        bit_len: bp.bit_len,
        bytes: bp.output,
        table,
    })
}

/// Run the BWT and Huffman-compress the result. The sentinel has no codeword of its own and
/// travels as the catch-all symbol, so the input may only hold A, C, G and T.
pub fn compress_bwt(sequence: &str) -> Result<HuffmanArtifact> {
    if let Some((pos, c)) = sequence
        .chars()
        .enumerate()
        .find(|&(_, c)| Symbol::named(c).is_none())
    {
        return Err(Error::invalid(format!(
            "{:?} at position {} is not A, C, G or T; the catch-all symbol is reserved for the sentinel",
            c, pos
        )));
    }
    let bwt = bwt_encode(sequence)?;
    compress(&bwt)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn compress_acgt_test() {
        let artifact = compress("acgt").unwrap();
        assert_eq!(artifact.bytes, [0xe4, 0x80]);
        assert_eq!(artifact.bit_len, 9);
        assert_eq!(artifact.table.to_string(), "A=111 C=00 T=01 G=10 N=110");
    }

    #[test]
    fn compress_rejects_empty_test() {
        assert!(matches!(compress(""), Err(Error::InvalidInput(_))));
        assert!(matches!(compress_bwt(""), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn compress_bwt_test() {
        // BWT of ACGT is T$ACG, with the sentinel counted as N
        let artifact = compress_bwt("ACGT").unwrap();
        assert_eq!(artifact, compress("TNACG").unwrap());
    }

    #[test]
    fn compress_bwt_rejects_other_test() {
        assert!(matches!(compress_bwt("ACNGT"), Err(Error::InvalidInput(_))));
        assert!(matches!(compress_bwt("AC$GT"), Err(Error::InvalidInput(_))));
    }
}
