//! # Fingerprint Subcommand
//!
//! Prints `<sha256-hex>  <path>` for each file, in the layout of
//! `sha256sum`. The digests are valid `contentFingerprint` and
//! `artifactRefs` values.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use etlc_core::{EtlcError, Fingerprint};

/// Arguments for the `etlc fingerprint` subcommand.
#[derive(Args, Debug)]
pub struct FingerprintArgs {
    /// Files to fingerprint.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

/// Execute the fingerprint subcommand.
///
/// Returns exit code: 0 if every file was hashed, 2 if any could not be read.
pub fn run_fingerprint(args: &FingerprintArgs) -> Result<u8> {
    let mut code = crate::EXIT_OK;
    for path in &args.paths {
        match fingerprint_file(path) {
            Ok(fp) => println!("{fp}  {}", path.display()),
            Err(e) => {
                eprintln!("ERROR: {}: {e}", path.display());
                code = crate::EXIT_OPERATIONAL;
            }
        }
    }
    Ok(code)
}

fn fingerprint_file(path: &Path) -> Result<Fingerprint, EtlcError> {
    let fp = Fingerprint::of_file(path)?;
    tracing::debug!(path = %path.display(), fingerprint = %fp, "fingerprinted file");
    Ok(fp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_file_matches_compute() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, b"statute text").unwrap();
        assert_eq!(fingerprint_file(&path).unwrap(), Fingerprint::compute(b"statute text"));
    }

    #[test]
    fn missing_file_sets_operational_exit() {
        let dir = tempfile::tempdir().unwrap();
        let args = FingerprintArgs {
            paths: vec![dir.path().join("absent.pdf")],
        };
        assert_eq!(run_fingerprint(&args).unwrap(), crate::EXIT_OPERATIONAL);
    }
}
