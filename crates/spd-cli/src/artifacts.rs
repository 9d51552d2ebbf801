//! Output files for decoded windows.
//!
//! Each window produces `<OFFSET>.spd.hex` (annotated dump) and
//! `<OFFSET>.spd.bin` (the window as received). The offset is eight
//! uppercase hex digits, so windows never collide on a name.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use spd_decode::RawWindow;

/// Paths written for one window
#[derive(Debug, Clone)]
pub struct Artifacts {
    /// `<dir>/<OFFSET>`, used in progress output
    pub base: PathBuf,
    /// Annotated dump
    pub hex: PathBuf,
    /// Raw window
    pub bin: PathBuf,
}

/// File stem for a window at `offset`
pub fn base_name(offset: u64) -> String {
    format!("{offset:08X}")
}

/// Write both artifacts for `window` into `out_dir`.
///
/// # Errors
///
/// Returns an error if either file cannot be written.
pub fn write_artifacts(out_dir: &Path, window: &RawWindow<'_>, annotated: &str) -> Result<Artifacts> {
    let name = base_name(window.offset());
    let base = out_dir.join(&name);
    let hex = out_dir.join(format!("{name}.spd.hex"));
    let bin = out_dir.join(format!("{name}.spd.bin"));

    fs::write(&hex, annotated).with_context(|| format!("Could not write {}", hex.display()))?;
    fs::write(&bin, window.bytes()).with_context(|| format!("Could not write {}", bin.display()))?;

    Ok(Artifacts { base, hex, bin })
}
