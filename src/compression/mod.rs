//! The compression module runs the full pipeline on top of the core pieces.
//!
//! Compression happens in the following steps:
//! - Burrows Wheeler Transform (optional): sort the rotations so that similar characters
//!   gather together. The sentinel is carried through the coder as the catch-all symbol.
//! - Frequency count over the five-symbol alphabet.
//! - Huffman tree and codeword table.
//! - Encoding: replace every character with its codeword.
//! - Bit packing: pad to whole bytes, keeping the exact bit length.
//!
//! Decompression follows the inverse of the compression process. The artifact module owns the
//! flat-file forms of the results.
//!

pub mod artifact;
pub mod compress;
pub mod decompress;
