//! Writing a generated pair to disk.
//!
//! Files land directly in the requested directory:
//! - Private key: `<stem>` (mode 0600 on unix)
//! - Public key: `<stem>.pub` (mode 0644 on unix)
//!
//! where `<stem>` is `rsa-<bits>`, `ed25519` or `ecdsa-<bits>`.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::algorithm::KeyAlgorithm;
use crate::error::WriteFailure;
use crate::generator::KeyPair;

/// Locations of the two files of a persisted pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFiles {
    pub private: PathBuf,
    pub public: PathBuf,
}

impl KeyFiles {
    pub fn in_dir(dir: &Path, algorithm: KeyAlgorithm) -> Self {
        let stem = algorithm.file_stem();
        Self {
            private: dir.join(&stem),
            public: dir.join(format!("{stem}.pub")),
        }
    }
}

/// Write both halves of `pair` into `dir`, overwriting existing files.
///
/// Both writes are attempted; every file that failed is reported. The
/// directory must already exist.
pub fn write_key_pair(dir: &Path, pair: &KeyPair) -> Result<KeyFiles, Vec<WriteFailure>> {
    let files = KeyFiles::in_dir(dir, pair.algorithm);

    let failures: Vec<WriteFailure> = [
        (&files.private, &pair.private_encoded, 0o600),
        (&files.public, &pair.public_encoded, 0o644),
    ]
    .into_iter()
    .filter_map(|(path, contents, mode)| {
        write_text(path, contents, mode)
            .err()
            .map(|source| WriteFailure {
                path: path.clone(),
                source,
            })
    })
    .collect();

    if failures.is_empty() {
        Ok(files)
    } else {
        Err(failures)
    }
}

fn write_text(path: &Path, contents: &str, mode: u32) -> io::Result<()> {
    let mut file = open_truncated(path, mode)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

/// Open `path` for writing with permissions `mode` in force before any
/// byte is written.
fn open_truncated(path: &Path, mode: u32) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }

    let file = options.open(path)?;

    // `mode` only applies on creation; tighten files that already existed.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    Ok(file)
}
