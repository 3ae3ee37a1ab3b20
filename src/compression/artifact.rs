//! The three flat-file artifacts and their text forms.
//!
//! - `bwt.txt`: the BWT string as plain text.
//! - `huffile.txt`: three lines. The packed bytes as lowercase hex, the unpadded bit length in
//!   decimal, and the codeword table as JSON.
//! - `dechuffile.txt`: decompressed text.
//!
//! The core never touches files. Everything here sits on top of it.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::bitstream::bitreader::unpack;
use crate::error::{Error, Result};
use crate::huffman_coding::codewords::CodewordTable;

pub const BWT_FILE: &str = "bwt.txt";
pub const HUFFMAN_FILE: &str = "huffile.txt";
pub const DECOMPRESSED_FILE: &str = "dechuffile.txt";

/// Which artifact a file holds, judged by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Bwt,
    Huffman,
    Decompressed,
}

impl ArtifactKind {
    /// Match the end of the file name against the three artifact names.
    pub fn from_path(path: &Path) -> Option<ArtifactKind> {
        let name = path.file_name()?.to_str()?;
        [
            ArtifactKind::Decompressed,
            ArtifactKind::Huffman,
            ArtifactKind::Bwt,
        ]
        .into_iter()
        .find(|kind| name.ends_with(kind.file_name()))
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ArtifactKind::Bwt => BWT_FILE,
            ArtifactKind::Huffman => HUFFMAN_FILE,
            ArtifactKind::Decompressed => DECOMPRESSED_FILE,
        }
    }
}

/// Everything needed to decode a Huffman-compressed sequence. None of the three parts is
/// enough on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanArtifact {
    /// Packed codeword bits, zero-padded to a whole byte.
    pub bytes: Vec<u8>,
    /// Bit count before padding.
    pub bit_len: usize,
    pub table: CodewordTable,
}

impl HuffmanArtifact {
    /// The unpadded bit sequence.
    pub fn bits(&self) -> Result<Vec<bool>> {
        unpack(&self.bytes, self.bit_len)
    }

    /// Three-line text form, fields in artifact order.
    pub fn to_text(&self) -> Result<String> {
        Ok(format!(
            "{}\n{}\n{}",
            hex::encode(&self.bytes),
            self.bit_len,
            self.table.to_json()?
        ))
    }

    /// Parse the three-line text form. A single trailing newline is allowed.
    pub fn from_text(text: &str) -> Result<HuffmanArtifact> {
        let text = text.strip_suffix('\n').unwrap_or(text);
        let fields = text.split('\n').collect::<Vec<&str>>();
        let (hex_bytes, bit_len, table) = match fields.as_slice() {
            [a, b, c] => (*a, *b, *c),
            _ => {
                return Err(Error::invalid(format!(
                    "Huffman artifact needs 3 lines, found {}",
                    fields.len()
                )))
            }
        };
        let bytes = hex::decode(hex_bytes.trim_end_matches('\r'))
            .map_err(|e| Error::invalid(format!("packed bytes are not valid hex: {}", e)))?;
        let bit_len = bit_len
            .trim_end_matches('\r')
            .parse::<usize>()
            .map_err(|e| Error::invalid(format!("bit length {:?} is not a number: {}", bit_len, e)))?;
        let table = CodewordTable::from_json(table)?;
        Ok(HuffmanArtifact {
            bytes,
            bit_len,
            table,
        })
    }
}

/// Write `text` as the given artifact under `dir`. Returns the path written.
pub fn write_text(dir: &Path, kind: ArtifactKind, text: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(kind.file_name());
    fs::write(&path, text)?;
    info!("Wrote {}", path.display());
    Ok(path)
}

pub fn read_text(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)?;
    debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

pub fn write_huffman(dir: &Path, artifact: &HuffmanArtifact) -> Result<PathBuf> {
    write_text(dir, ArtifactKind::Huffman, &artifact.to_text()?)
}

pub fn read_huffman(path: &Path) -> Result<HuffmanArtifact> {
    HuffmanArtifact::from_text(&read_text(path)?)
}
