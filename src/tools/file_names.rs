//! Output file names.
//!
//! Compressing `name.ext` writes `name.ext.huf`. Decompressing `name.ext.huf` writes
//! `name_unc.ext`, so the restored file never lands on top of the original.

use std::path::{Path, PathBuf};

use crate::error::{HuffError, Result};

pub const EXTENSION: &str = "huf";

/// `name.ext` -> `name.ext.huf`
pub fn compressed_name(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(EXTENSION);
    PathBuf::from(name)
}

/// `name.ext.huf` -> `name_unc.ext`, `name.huf` -> `name_unc`. The directory is kept.
pub fn decompressed_name(path: &Path) -> Result<PathBuf> {
    let bad_name = || HuffError::BadFileName(path.display().to_string());

    if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
        return Err(bad_name());
    }
    // Strip .huf, then split what is left into stem and extension.
    let inner = Path::new(path.file_stem().ok_or_else(bad_name)?);
    let stem = inner
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(bad_name)?;

    let mut name = format!("{}_unc", stem);
    if let Some(ext) = inner.extension().and_then(|ext| ext.to_str()) {
        name.push('.');
        name.push_str(ext);
    }
    Ok(path.with_file_name(name))
}
