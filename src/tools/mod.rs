//! The tools module provides the helper pieces shared by the transforms and the coder.
//!
//! The tools are:
//! - cli: Command line interface for nucleozip.
//! - freq_count: Frequency count over the nucleotide alphabet.
//! - symbol_map: The closed alphabet, the sentinel and its sort order.
//!
pub mod cli;
pub mod freq_count;
pub mod symbol_map;
