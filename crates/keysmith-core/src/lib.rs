//! keysmith-core: SSH key pair generation.
//!
//! Generates RSA, Ed25519 and ECDSA key pairs in OpenSSH text format,
//! optionally passphrase-protected, and optionally writes them to a
//! directory as `<stem>` / `<stem>.pub`. Each call is independent; nothing
//! is cached between calls, nothing is logged.

pub mod algorithm;
pub mod error;
pub mod generator;
pub mod inspect;
pub mod persist;
pub mod request;

// Re-export commonly used items at crate root.
pub use algorithm::{KeyAlgorithm, NistCurve, RsaKeySize};
pub use tokio_util::sync::CancellationToken;
pub use error::{KeyGenError, KeyGenResult, WriteFailure};
pub use generator::{generate, generate_with_cancel, KeyPair};
pub use inspect::{inspect_public_key, is_encrypted_private_key, PublicKeyInfo};
pub use persist::{write_key_pair, KeyFiles};
pub use request::KeyRequest;
