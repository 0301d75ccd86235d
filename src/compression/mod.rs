//! The compression module manages both directions of huffpress.
//!
//! Compression happens in the following steps:
//! - Count every byte of the input, plus one end-of-stream sentinel.
//! - Build the huffman tree from those counts and derive a code for each symbol.
//! - Write the counts as the container header.
//! - Write the code of every input byte, then the end-of-stream code.
//!
//! Decompression reads the header back, rebuilds the very same tree from it, and walks that
//! tree bit by bit until it reaches the end-of-stream leaf.
//!

pub mod compress;
pub mod decode;
pub mod decompress;
pub mod encode;
pub mod header;

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use log::{debug, error, warn};

use crate::error::{HuffError, Result};
use crate::tools::cli::{HufOpts, Output};

/// Open a file for reading, reporting failure as InputUnavailable.
pub(crate) fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| HuffError::InputUnavailable {
        path: path.display().to_string(),
        source,
    })
}

/// Open the destination chosen by opts: target, or stdout when asked.
/// An existing target is only replaced when force_overwrite is set.
pub(crate) fn open_output(target: &Path, opts: &HufOpts) -> Result<Box<dyn Write>> {
    if opts.output == Output::Stdout {
        debug!("Writing to stdout");
        return Ok(Box::new(std::io::stdout().lock()));
    }

    let mut options = OpenOptions::new();
    options.write(true);
    if opts.force_overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    match options.open(target) {
        Ok(file) => {
            debug!("Writing to {}", target.display());
            Ok(Box::new(file))
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            error!("{} already exists. Use -f to overwrite.", target.display());
            Err(HuffError::OutputExists(target.display().to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Pass result through, first deleting the output file if result is an error.
/// The writer for target must already be dropped.
pub(crate) fn discard_on_error<T>(result: Result<T>, target: &Path, opts: &HufOpts) -> Result<T> {
    if result.is_err() && opts.output == Output::File {
        match fs::remove_file(target) {
            Ok(()) => warn!("Removed incomplete output {}", target.display()),
            Err(e) => error!("Can't remove incomplete output {}: {}", target.display(), e),
        }
    }
    result
}
