use std::path::PathBuf;
use std::{fmt::Display, fmt::Formatter};

use clap::{ArgGroup, Parser, Subcommand};
use log::info;

use crate::compression::artifact::read_text;
use crate::error::{Error, Result};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Warnings,
    Info,
    Debug,
    Trace,
}

/// Bwt, Unbwt, Zip, Unzip, Open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Bwt,
    Unbwt,
    Zip,
    Unzip,
    Open,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Where the input sequence comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Sequence(String),
    File(PathBuf),
}

#[derive(Debug)]
pub struct Opts {
    /// What to do
    pub op_mode: Mode,
    /// Sequence or file to read
    pub input: Input,
    /// Directory the artifacts are written to
    pub out_dir: PathBuf,
    /// Show the intermediate rows or bits
    pub steps: bool,
    /// Run the BWT before Huffman coding (or undo it after decoding)
    pub bwt: bool,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl Opts {
    /// The input text. File contents lose their trailing line break.
    pub fn input_text(&self) -> Result<String> {
        match &self.input {
            Input::Sequence(seq) => Ok(seq.clone()),
            Input::File(path) => Ok(read_text(path)?.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    /// The input as a path, for modes that only read artifact files.
    pub fn input_path(&self) -> Result<&PathBuf> {
        match &self.input {
            Input::File(path) => Ok(path),
            Input::Sequence(_) => Err(Error::invalid(format!(
                "{} needs an artifact file, not a sequence",
                self.op_mode
            ))),
        }
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Burrows-Wheeler Transform and Huffman coding for nucleotide sequences",
    long_about = "
    Transforms DNA sequences with the Burrows-Wheeler Transform, compresses them with Huffman
    coding, and reverses both. Results are written as bwt.txt, huffile.txt and dechuffile.txt
    in the output directory."
)]
pub struct Args {
    #[clap(subcommand)]
    command: Command,

    /// Directory for the output artifacts
    #[clap(short = 'o', long = "out-dir", global = true, default_value = ".")]
    out_dir: PathBuf,

    /// Sets verbosity. -v shows progress, -vv debug detail, -vvv everything
    #[clap(short = 'v', long = "verbose", global = true, parse(from_occurrences))]
    verbose: u64,

    /// Suppress everything but the results
    #[clap(short = 'q', long = "quiet", global = true)]
    quiet: bool,
}

#[derive(clap::Args, Debug)]
#[clap(group(ArgGroup::new("input").required(true).args(&["file", "sequence"])))]
struct SequenceArgs {
    /// File holding the sequence
    #[clap(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Sequence given on the command line
    #[clap(short = 's', long = "sequence")]
    sequence: Option<String>,

    /// Print every intermediate row
    #[clap(long = "steps")]
    steps: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Burrows-Wheeler transform a sequence and write bwt.txt
    Bwt(SequenceArgs),
    /// Rebuild a sequence from its BWT
    Unbwt(SequenceArgs),
    /// Huffman compress a sequence and write huffile.txt
    Zip {
        #[clap(flatten)]
        input: SequenceArgs,
        /// Apply the BWT before compressing
        #[clap(long = "bwt")]
        bwt: bool,
    },
    /// Decompress huffile.txt and write dechuffile.txt
    Unzip {
        #[clap(value_name = "FILE")]
        file: PathBuf,
        /// The artifact holds a compressed BWT; reverse it after decoding
        #[clap(long = "bwt")]
        bwt: bool,
        /// Print the unpacked bits
        #[clap(long = "steps")]
        steps: bool,
    },
    /// Open bwt.txt, huffile.txt or dechuffile.txt and do what the file calls for
    Open {
        #[clap(value_name = "FILE")]
        file: PathBuf,
        /// The Huffman artifact holds a compressed BWT
        #[clap(long = "bwt")]
        bwt: bool,
        /// Print every intermediate row
        #[clap(long = "steps")]
        steps: bool,
    },
}

impl SequenceArgs {
    fn input(self) -> Input {
        match (self.sequence, self.file) {
            (Some(seq), _) => Input::Sequence(seq),
            (None, Some(path)) => Input::File(path),
            // clap requires one of the two
            (None, None) => Input::Sequence(String::new()),
        }
    }
}

impl From<Args> for Opts {
    /// Put command line information from CLAP into our internal structure.
    fn from(args: Args) -> Self {
        let (op_mode, steps, bwt, input) = match args.command {
            Command::Bwt(seq) => (Mode::Bwt, seq.steps, false, seq.input()),
            Command::Unbwt(seq) => (Mode::Unbwt, seq.steps, false, seq.input()),
            Command::Zip { input, bwt } => (Mode::Zip, input.steps, bwt, input.input()),
            Command::Unzip { file, bwt, steps } => (Mode::Unzip, steps, bwt, Input::File(file)),
            Command::Open { file, bwt, steps } => (Mode::Open, steps, bwt, Input::File(file)),
        };
        Opts {
            op_mode,
            input,
            out_dir: args.out_dir,
            steps,
            bwt,
            verbose: verbosity(args.quiet, args.verbose),
        }
    }
}

fn verbosity(quiet: bool, count: u64) -> Verbosity {
    match (quiet, count) {
        (true, _) => Verbosity::Quiet,
        (false, 0) => Verbosity::Warnings,
        (false, 1) => Verbosity::Info,
        (false, 2) => Verbosity::Debug,
        _ => Verbosity::Trace,
    }
}

/// Parse the command line, set the log level and report the settings.
pub fn opts_init() -> Opts {
    let opts = Opts::from(Args::parse());

    // Set the log level
    match opts.verbose {
        Verbosity::Quiet => log::set_max_level(log::LevelFilter::Off),
        Verbosity::Warnings => log::set_max_level(log::LevelFilter::Warn),
        Verbosity::Info => log::set_max_level(log::LevelFilter::Info),
        Verbosity::Debug => log::set_max_level(log::LevelFilter::Debug),
        Verbosity::Trace => log::set_max_level(log::LevelFilter::Trace),
    };

    // Below we report initialization status to the user
    info!("---- Nucleozip Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    match &opts.input {
        Input::File(path) => info!("Getting input from the file {}", path.display()),
        Input::Sequence(seq) => info!(
            "Getting input from the command line ({} characters)",
            seq.chars().count()
        ),
    }
    info!("Writing artifacts to {}", opts.out_dir.display());
    if opts.bwt {
        info!("BWT stage enabled")
    };
    info!("---- Nucleozip Initialization End ----\n");
    opts
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> Opts {
        Opts::from(Args::try_parse_from(args).unwrap())
    }

    #[test]
    fn bwt_sequence_test() {
        let opts = parse(&["nucleozip", "bwt", "-s", "ACGT", "--steps"]);
        assert_eq!(opts.op_mode, Mode::Bwt);
        assert_eq!(opts.input, Input::Sequence("ACGT".to_string()));
        assert!(opts.steps);
        assert!(!opts.bwt);
        assert_eq!(opts.out_dir, PathBuf::from("."));
        assert_eq!(opts.verbose, Verbosity::Warnings);
        assert_eq!(opts.input_text().unwrap(), "ACGT");
    }

    #[test]
    fn zip_file_test() {
        let opts = parse(&["nucleozip", "-vv", "zip", "seq.txt", "--bwt", "-o", "data"]);
        assert_eq!(opts.op_mode, Mode::Zip);
        assert_eq!(opts.input, Input::File(PathBuf::from("seq.txt")));
        assert!(opts.bwt);
        assert_eq!(opts.out_dir, PathBuf::from("data"));
        assert_eq!(opts.verbose, Verbosity::Debug);
    }

    #[test]
    fn unzip_and_open_test() {
        let opts = parse(&["nucleozip", "unzip", "huffile.txt", "-q"]);
        assert_eq!(opts.op_mode, Mode::Unzip);
        assert_eq!(opts.verbose, Verbosity::Quiet);
        assert_eq!(opts.input_path().unwrap(), &PathBuf::from("huffile.txt"));

        let opts = parse(&["nucleozip", "open", "data/bwt.txt", "--steps", "-vvvv"]);
        assert_eq!(opts.op_mode, Mode::Open);
        assert!(opts.steps);
        assert_eq!(opts.verbose, Verbosity::Trace);
    }

    #[test]
    fn input_required_test() {
        assert!(Args::try_parse_from(["nucleozip", "bwt"]).is_err());
        assert!(Args::try_parse_from(["nucleozip", "zip", "f.txt", "-s", "ACGT"]).is_err());
        assert!(Args::try_parse_from(["nucleozip", "unzip"]).is_err());
    }

    #[test]
    fn input_path_rejects_sequence_test() {
        let opts = parse(&["nucleozip", "unbwt", "-s", "T$ACG"]);
        assert!(matches!(opts.input_path(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn input_text_from_file_test() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seq.txt");
        std::fs::write(&path, "GATTACA\r\n").unwrap();
        let opts = parse(&["nucleozip", "bwt", path.to_str().unwrap()]);
        assert_eq!(opts.input_text().unwrap(), "GATTACA");
    }
}
