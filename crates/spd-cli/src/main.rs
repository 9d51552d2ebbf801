//! `spdutil` — find and decode DDR4 SPD records in memory dumps.
//!
//! ```text
//! USAGE:
//!   spdutil [-o <dir>] [--require-crc] <input>
//!
//! For every DDR4 SPD image found in <input>, writes
//!   <dir>/<OFFSET>.spd.hex   annotated hex dump
//!   <dir>/<OFFSET>.spd.bin   raw 512-byte image
//!
//! Exit codes: 0 ok (including "nothing found"), 1 usage or write error,
//! 2 input unreadable.
//! ```
//!
//! Set `RUST_LOG=info` to see each candidate as it is found.

mod artifacts;
mod locate;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use bytes::Bytes;
use clap::Parser;
use spd_decode::{annotate, SpdLayout};
use tracing_subscriber::EnvFilter;

use crate::locate::LocateOptions;

/// Exit status for an unreadable input file.
const EXIT_UNREADABLE_INPUT: u8 = 2;
/// Exit status for usage errors.
const EXIT_USAGE: u8 = 1;

#[derive(Parser)]
#[command(
    name = "spdutil",
    about = "Find and decode DDR4 SPD records in memory dumps and EEPROM images",
    version
)]
struct Cli {
    /// Memory dump or EEPROM image to scan.
    input: PathBuf,

    /// Output folder for .spd.hex / .spd.bin files.
    #[arg(short = 'o', long = "output", default_value = ".")]
    output: PathBuf,

    /// Only decode windows whose stored CRC matches.
    #[arg(long)]
    require_crc: bool,
}

/// How a run ended, short of an I/O error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// Input could not be read
    UnreadableInput,
    /// No candidate windows in the input
    NothingFound,
    /// Candidates were processed
    Processed {
        /// Windows decoded and written
        written: usize,
        /// Windows rejected by the decoder
        skipped: usize,
    },
}

impl Outcome {
    fn exit_status(self) -> u8 {
        match self {
            Self::UnreadableInput => EXIT_UNREADABLE_INPUT,
            Self::NothingFound | Self::Processed { .. } => 0,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version also land here
            return if e.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&cli) {
        Ok(outcome) => {
            if let Outcome::Processed { written, skipped } = outcome {
                tracing::info!("Decoded {written} of {} candidate windows", written + skipped);
            }
            ExitCode::from(outcome.exit_status())
        }
        Err(e) => {
            tracing::debug!("Run failed: {e:?}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Outcome> {
    let blob = match fs::read(&cli.input) {
        Ok(data) => Bytes::from(data),
        Err(e) => {
            eprintln!("Could not read {}: {e}", cli.input.display());
            return Ok(Outcome::UnreadableInput);
        }
    };
    tracing::info!("Scanning {} ({} bytes)", cli.input.display(), blob.len());

    let options = LocateOptions {
        require_crc: cli.require_crc,
    };
    let matches = locate::locate(&blob, options);

    if matches.is_empty() {
        println!("No DDR4 SPDs found!");
        return Ok(Outcome::NothingFound);
    }

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("Could not create {}", cli.output.display()))?;

    let mut written = 0usize;
    let mut skipped = 0usize;
    for found in &matches {
        let window = found.raw_window();

        let (layout, spd) = match SpdLayout::new(&window)
            .and_then(|layout| layout.decode().map(|spd| (layout, spd)))
        {
            Ok(pair) => pair,
            Err(e) => {
                // one bad window never stops the batch
                tracing::debug!("Skipping window: {e:?}");
                eprintln!("Skipping: {e}");
                skipped += 1;
                continue;
            }
        };

        let text = annotate::render(&layout, &spd);
        let paths = artifacts::write_artifacts(&cli.output, &window, &text)?;
        written += 1;
        tracing::debug!("Wrote {} and {}", paths.hex.display(), paths.bin.display());

        println!(
            "{} has a validity of {:.3}",
            paths.base.display(),
            spd.validity_score()
        );
    }

    Ok(Outcome::Processed { written, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use spd_decode::{crc16_xmodem, WINDOW_LEN};
    use std::path::Path;
    use tempfile::TempDir;

    fn image() -> Vec<u8> {
        let mut bytes = vec![0u8; WINDOW_LEN];
        bytes[..3].copy_from_slice(&[0x23, 0x11, 0x0C]);
        bytes[0x149..0x15D].copy_from_slice(b"M378A1K43CB2-CTD    ");
        bytes[0x15E..0x160].copy_from_slice(&[0x80, 0xCE]);
        let crc = crc16_xmodem(&bytes[..126]);
        bytes[126..128].copy_from_slice(&crc.to_le_bytes());
        bytes
    }

    fn cli(input: &Path, output: &Path) -> Cli {
        Cli {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            require_crc: false,
        }
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_unreadable_input_exits_2() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.bin");

        let outcome = run(&cli(&missing, temp_dir.path())).unwrap();

        assert_eq!(outcome, Outcome::UnreadableInput);
        assert_eq!(outcome.exit_status(), 2);
    }

    #[test]
    fn test_blob_without_headers_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("dump.bin");
        fs::write(&input, vec![0xFFu8; 0x1000]).unwrap();
        let out = temp_dir.path().join("out");

        let outcome = run(&cli(&input, &out)).unwrap();

        assert_eq!(outcome, Outcome::NothingFound);
        assert_eq!(outcome.exit_status(), 0);
        assert!(!out.exists());
    }

    #[test]
    fn test_bad_windows_skipped_good_ones_written() {
        let temp_dir = TempDir::new().unwrap();
        let mut blob = vec![0xFFu8; 0x900];
        // DDR3 header, never a candidate
        blob[0x010..0x013].copy_from_slice(&[0x23, 0x11, 0x0B]);
        blob[0x200..0x400].copy_from_slice(&image());
        // header too close to the end for a full image
        blob[0x880..0x883].copy_from_slice(&[0x23, 0x11, 0x0C]);
        let input = temp_dir.path().join("dump.bin");
        fs::write(&input, &blob).unwrap();
        let out = temp_dir.path().join("nested").join("out");

        let outcome = run(&cli(&input, &out)).unwrap();

        assert_eq!(
            outcome,
            Outcome::Processed {
                written: 1,
                skipped: 1
            }
        );
        assert_eq!(outcome.exit_status(), 0);
        assert_eq!(entries(&out), ["00000200.spd.bin", "00000200.spd.hex"]);
        assert_eq!(fs::read(out.join("00000200.spd.bin")).unwrap(), image());

        let hex = fs::read_to_string(out.join("00000200.spd.hex")).unwrap();
        assert!(hex.contains("\"Samsung\""));
        assert!(hex.contains("Match!"));
    }

    #[test]
    fn test_output_path_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("dump.bin");
        fs::write(&input, image()).unwrap();
        let not_a_dir = temp_dir.path().join("taken");
        fs::write(&not_a_dir, b"x").unwrap();

        let err = run(&cli(&input, &not_a_dir)).unwrap_err();

        assert!(err.to_string().contains("Could not create"), "{err:#}");
    }

    #[test]
    fn test_missing_input_argument_is_usage_error() {
        let err = Cli::try_parse_from(["spdutil"]).err().unwrap();
        assert!(err.use_stderr());

        let parsed = Cli::try_parse_from(["spdutil", "-o", "/tmp/x", "dump.bin"]).unwrap();
        assert_eq!(parsed.output, PathBuf::from("/tmp/x"));
        assert!(!parsed.require_crc);
    }
}
