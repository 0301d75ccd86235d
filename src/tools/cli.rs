use std::path::PathBuf;
use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{debug, info, LevelFilter};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn level_filter(&self) -> LevelFilter {
        match self {
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Zip, Unzip, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Huffman coding file compressor",
    long_about = "
    Compresses each file into <file>.huf: a frequency table header followed by the huffman
    coded bytes. Decompressing <name>.<ext>.huf writes <name>_unc.<ext>.

    If no file names are given, huffpress compresses or decompresses from standard input
    to standard output."
)]
pub struct Args {
    /// Files to process
    #[clap()]
    files: Vec<PathBuf>,

    /// Compress the input files (default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Decompress the input files
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Test compressed file integrity
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Send output to standard out
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Overwrite existing output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Be verbose (a 2nd -v gives more)
    #[clap(short = 'v', long = "verbose", parse(from_occurrences))]
    verbose: u8,

    /// Suppress noncritical messages
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,
}

/// All user settable options that control program behavior
#[derive(Debug, Clone)]
pub struct HufOpts {
    /// Names of files to read for input. Empty means standard input.
    pub files: Vec<PathBuf>,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HufOpts {
    pub fn new() -> Self {
        Self {
            files: vec![],
            op_mode: Mode::Zip,
            output: Output::File,
            force_overwrite: false,
            verbose: Verbosity::Warnings,
        }
    }
}

impl Default for HufOpts {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Args> for HufOpts {
    fn from(args: Args) -> Self {
        let mut opts = HufOpts::new();
        opts.files = args.files;
        // Test wins over decompress, decompress over compress.
        if args.compress {
            opts.op_mode = Mode::Zip;
        }
        if args.decompress {
            opts.op_mode = Mode::Unzip;
        }
        if args.test {
            opts.op_mode = Mode::Test;
        }
        if args.stdout || opts.files.is_empty() {
            opts.output = Output::Stdout;
        }
        opts.force_overwrite = args.force;
        opts.verbose = match (args.quiet, args.verbose) {
            (true, _) => Verbosity::Errors,
            (false, 0) => Verbosity::Warnings,
            (false, 1) => Verbosity::Info,
            (false, 2) => Verbosity::Debug,
            (false, _) => Verbosity::Trace,
        };
        opts
    }
}

/// Parse the command line, set the log level and report the settings.
pub fn hufopts_init() -> HufOpts {
    let opts = HufOpts::from(Args::parse());

    // Set the log level
    log::set_max_level(opts.verbose.level_filter());

    // Below we report initialization status to the user
    debug!("---- huffpress Initialization Start ----");
    debug!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    if opts.files.is_empty() {
        info!("Getting input from stdin");
    }
    debug!("Sending output to {}", opts.output);
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    debug!("---- huffpress Initialization End ----");
    opts
}
