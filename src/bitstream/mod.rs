//! The bitstream module converts between bit sequences and byte-aligned storage.
//!
//! Huffman codewords rarely add up to a whole number of bytes. The packer pads the last byte
//! with zero bits, so the exact bit length has to travel with the bytes for the reader to
//! know where the real bits stop.
//!
pub mod bitpacker;
pub mod bitreader;
