//! The huffman module builds the entropy coder used after (or instead of) the BWT.
//!
//! Every symbol of the alphabet gets a leaf, even when it never occurs, so a sequence always
//! produces a table covering all five symbols. The tree is built by repeatedly merging the two
//! lightest nodes. Ties are broken by list position through a stable sort, which makes the
//! resulting codeword table reproducible.
//!
//! Encoding and decoding are inherently sequential and do not benefit from multithreading.
//!
pub mod codewords;
pub mod huffman;
