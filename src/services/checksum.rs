// src/services/checksum.rs
//
// Digest calculation for local files.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait ChecksumCalculator: Send + Sync {
    /// Hex-encoded digest of the file contents.
    fn calculate(&self, file: &Path) -> AppResult<String>;

    /// Name of the digest algorithm, in checksum-file notation (`SHA-256`).
    fn algorithm(&self) -> &str;
}

pub struct Sha256Calculator;

impl ChecksumCalculator for Sha256Calculator {
    fn calculate(&self, path: &Path) -> AppResult<String> {
        let mut file = File::open(path)?;
        let mut hasher = Sha256::new();
        let mut buffer = [0u8; 8192];

        loop {
            let bytes_read = file.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        let result = hasher.finalize();
        Ok(format!("{:x}", result))
    }

    fn algorithm(&self) -> &str {
        "SHA-256"
    }
}
