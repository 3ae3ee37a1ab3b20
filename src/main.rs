//Enable more cargo lint tests
#![warn(rust_2018_idioms)]

use std::path::Path;

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

use nucleozip::bwt_algorithms::bwt_sort::{bwt_decode, Reconstruction, Rotations};
use nucleozip::compression::artifact::{
    read_huffman, read_text, write_huffman, write_text, ArtifactKind, HuffmanArtifact,
};
use nucleozip::compression::compress::{compress, compress_bwt};
use nucleozip::compression::decompress::{decompress, restore_sentinel};
use nucleozip::huffman_coding::codewords::bits_to_string;
use nucleozip::tools::cli::{opts_init, Mode, Opts};
use nucleozip::tools::symbol_map::SENTINEL;
use nucleozip::{Error, Result};

fn main() -> Result<()> {
    // Available log levels are Error, Warn, Info, Debug, Trace
    if TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stdout,
        simplelog::ColorChoice::AlwaysAnsi,
    )
    .is_err()
    {
        eprintln!("Logger was already initialized.");
    }

    let opts = opts_init();

    //----- Figure how what we need to do and go do it
    let result = match opts.op_mode {
        Mode::Bwt => transform(&opts),
        Mode::Unbwt => opts.input_text().and_then(|bwt| reconstruct(&bwt, opts.steps)),
        Mode::Zip => zip(&opts),
        Mode::Unzip => opts.input_path().and_then(|path| unzip(path, &opts)),
        Mode::Open => opts.input_path().and_then(|path| open(path, &opts)),
    };

    match &result {
        Ok(()) => info!("Done.\n"),
        Err(e) => error!("{}", e),
    }
    result
}

/// Run the BWT, print the rows if asked, and write bwt.txt.
fn transform(opts: &Opts) -> Result<()> {
    let rotations = Rotations::new(&opts.input_text()?)?;
    if opts.steps {
        println!("Rotations:");
        rotations.steps().for_each(|row| println!("{}", row));
        println!("Sorted:");
        rotations.sorted_rows().for_each(|row| println!("{}", row));
    }
    let bwt = rotations.bwt();
    write_text(&opts.out_dir, ArtifactKind::Bwt, &bwt)?;
    println!("BWT sequence : {}", bwt);
    Ok(())
}

/// Rebuild the sequence behind a BWT string, printing each reconstruction round if asked.
fn reconstruct(bwt: &str, steps: bool) -> Result<()> {
    if steps {
        for (round, rows) in Reconstruction::new(bwt)?.steps().enumerate() {
            println!("Round {}:", round + 1);
            rows.iter().for_each(|row| println!("{}", row));
        }
    }
    println!("The initial sequence is : {}", bwt_decode(bwt)?);
    Ok(())
}

/// Huffman compress (optionally after the BWT) and write huffile.txt.
fn zip(opts: &Opts) -> Result<()> {
    let sequence = opts.input_text()?;
    let artifact = if opts.bwt {
        compress_bwt(&sequence)?
    } else {
        compress(&sequence)?
    };
    if opts.steps {
        print_artifact(&artifact)?;
    }
    write_huffman(&opts.out_dir, &artifact)?;
    println!(
        "Compressed {} characters into {} bits.",
        sequence.chars().count(),
        artifact.bit_len
    );
    Ok(())
}

/// Decompress a Huffman artifact and write dechuffile.txt. With --bwt the file receives the
/// decoded BWT string, which is then reconstructed.
fn unzip(path: &Path, opts: &Opts) -> Result<()> {
    let artifact = read_huffman(path)?;
    if opts.steps {
        print_artifact(&artifact)?;
    }
    let decoded = decompress(&artifact)?;
    if opts.bwt {
        let bwt = restore_sentinel(&decoded);
        write_text(&opts.out_dir, ArtifactKind::Decompressed, &bwt)?;
        println!("Your BWT sequence is : {}", bwt);
        reconstruct(&bwt, opts.steps)
    } else {
        write_text(&opts.out_dir, ArtifactKind::Decompressed, &decoded)?;
        println!("The initial sequence is : {}", decoded);
        Ok(())
    }
}

/// Pick the action from the artifact's file name.
fn open(path: &Path, opts: &Opts) -> Result<()> {
    match ArtifactKind::from_path(path) {
        Some(ArtifactKind::Huffman) => unzip(path, opts),
        Some(ArtifactKind::Bwt) => {
            let bwt = read_text(path)?;
            println!("Your BWT sequence is : {}", bwt);
            reconstruct(&bwt, opts.steps)
        }
        // Holds a BWT string only when it came out of `unzip --bwt`
        Some(ArtifactKind::Decompressed) => {
            let text = read_text(path)?;
            if text.contains(SENTINEL) {
                println!("Your BWT sequence is : {}", text);
                reconstruct(&text, opts.steps)
            } else {
                println!("The initial sequence is : {}", text);
                Ok(())
            }
        }
        None => Err(Error::invalid(format!(
            "{} is not bwt.txt, huffile.txt or dechuffile.txt",
            path.display()
        ))),
    }
}

fn print_artifact(artifact: &HuffmanArtifact) -> Result<()> {
    println!("Codewords: {}", artifact.table);
    println!("Bits: {}", bits_to_string(&artifact.bits()?));
    println!("Bytes: {}", hex::encode(&artifact.bytes));
    Ok(())
}
