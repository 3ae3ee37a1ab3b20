//! Burrows-Wheeler Transform and Huffman coding for nucleotide sequences.
//!
//! Version 0.1.0
//!
//! The core is a set of pure, single-threaded functions:
//! - `bwt_algorithms`: the transform, its inverse, and step-by-step views of both.
//! - `huffman_coding`: frequency-driven tree building, codeword tables, encode and decode.
//! - `bitstream`: packing bits into bytes and back.
//!
//! `compression` strings them together into a compress/decompress pipeline and owns the flat
//! file artifacts. Basic usage of the command line tool is as follows:
//!
//! `$> nucleozip zip --sequence ACGTTGCA --bwt`
//!
//! This writes huffile.txt to the current directory.
//!
pub mod bitstream;
pub mod bwt_algorithms;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use error::{Error, Result};
