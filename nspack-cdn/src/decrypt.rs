//! The decryption seam.
//!
//! Content archives are decrypted by an external tool; everything past
//! this boundary only ever sees the tool's output directories as plain
//! bytes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::Error;

/// Name of the header blob the tool writes into the output directory.
pub const HEADER_BLOB_NAME: &str = "header.bin";

pub trait Decryptor {
    /// Decrypt `input` into `out_dir`, creating the directory as needed.
    fn decrypt(&self, input: &Path, out_dir: &Path) -> Result<(), Error>;
}

/// Runs the external `hactool` binary with a fixed set of output flags.
pub struct HactoolDecryptor {
    program: PathBuf,
}

impl HactoolDecryptor {
    pub fn new(program: impl Into<PathBuf>) -> HactoolDecryptor {
        HactoolDecryptor {
            program: program.into(),
        }
    }
}

impl Decryptor for HactoolDecryptor {
    fn decrypt(&self, input: &Path, out_dir: &Path) -> Result<(), Error> {
        fs::create_dir_all(out_dir).map_err(|source| Error::Io {
            path: out_dir.to_path_buf(),
            context: "create decryption output directory",
            source,
        })?;
        debug!(input = %input.display(), out = %out_dir.display(), "invoking decryption tool");

        let status = Command::new(&self.program)
            .arg(format!("--exefsdir={}", out_dir.join("exefs").display()))
            .arg(format!("--romfsdir={}", out_dir.join("romfs").display()))
            .arg(format!("--section0dir={}", out_dir.join("section0").display()))
            .arg(format!("--section1dir={}", out_dir.join("section1").display()))
            .arg(format!("--section2dir={}", out_dir.join("section2").display()))
            .arg(format!("--section3dir={}", out_dir.join("section3").display()))
            .arg(format!("--header={}", out_dir.join(HEADER_BLOB_NAME).display()))
            .arg(input)
            .status()
            .map_err(|source| Error::Io {
                path: self.program.clone(),
                context: "spawn decryption tool",
                source,
            })?;

        if !status.success() {
            return Err(Error::Decrypt {
                tool: self.program.clone(),
                status,
            });
        }
        Ok(())
    }
}
