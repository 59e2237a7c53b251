use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::generator::KeyPair;

/// Errors produced by key generation, persistence and inspection.
#[derive(Debug, Error)]
pub enum KeyGenError {
    #[error("unsupported key parameters: {0}")]
    UnsupportedParameters(String),

    #[error("key generation failed: {0}")]
    GenerationFailure(String),

    /// One or both key files could not be written. The generated pair is
    /// kept so the caller can still show it.
    #[error("failed to write key pair: {}", join_failures(.failures))]
    PersistenceFailure {
        failures: Vec<WriteFailure>,
        pair: Box<KeyPair>,
    },

    #[error("key generation cancelled")]
    Cancelled,

    #[error("invalid key: {0}")]
    InvalidKey(String),
}

impl KeyGenError {
    /// Recover the key pair from a failure that happened after generation.
    pub fn into_key_pair(self) -> Option<KeyPair> {
        match self {
            KeyGenError::PersistenceFailure { pair, .. } => Some(*pair),
            _ => None,
        }
    }
}

/// A single file that could not be written.
#[derive(Debug, Error)]
#[error("{}: {}", .path.display(), .source)]
pub struct WriteFailure {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

fn join_failures(failures: &[WriteFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type KeyGenResult<T> = Result<T, KeyGenError>;
