use std::fmt;
use std::path::{Path, PathBuf};

use crate::algorithm::KeyAlgorithm;
use crate::error::KeyGenResult;

/// Parameters for a single key generation.
///
/// An empty comment means no comment, an empty passphrase means an
/// unencrypted private key, and an absent or empty output directory means
/// nothing is written to disk.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyRequest {
    algorithm: KeyAlgorithm,
    comment: String,
    passphrase: String,
    output_dir: Option<PathBuf>,
}

impl KeyRequest {
    pub fn new(algorithm: KeyAlgorithm) -> Self {
        Self {
            algorithm,
            comment: String::new(),
            passphrase: String::new(),
            output_dir: None,
        }
    }

    /// Build a request from raw caller input. `output_dir` may be empty.
    pub fn from_parts(
        tag: &str,
        size: u32,
        comment: &str,
        passphrase: &str,
        output_dir: &str,
    ) -> KeyGenResult<Self> {
        let algorithm = KeyAlgorithm::from_parts(tag, size)?;
        Ok(Self::new(algorithm)
            .with_comment(comment)
            .with_passphrase(passphrase)
            .with_output_dir(output_dir))
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = passphrase.into();
        self
    }

    /// Set the directory both key files are written to. An empty path is
    /// the same as not asking for persistence.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        self.output_dir = if dir.as_os_str().is_empty() {
            None
        } else {
            Some(dir)
        };
        self
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        self.algorithm
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    /// Whether the private key will be wrapped in a passphrase envelope.
    pub fn is_encrypted(&self) -> bool {
        !self.passphrase.is_empty()
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }
}

impl fmt::Debug for KeyRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyRequest")
            .field("algorithm", &self.algorithm)
            .field("comment", &self.comment)
            .field("encrypted", &self.is_encrypted())
            .field("output_dir", &self.output_dir)
            .finish()
    }
}
