//! Supported key families and sizes.
//!
//! Only the combinations the generator can produce are representable:
//! RSA at 1024/2048/3072/4096 bits, Ed25519, and ECDSA on NIST P-256,
//! P-384 and P-521.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{KeyGenError, KeyGenResult};

/// RSA modulus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RsaKeySize {
    Bits1024,
    Bits2048,
    Bits3072,
    Bits4096,
}

impl RsaKeySize {
    pub const ALL: [RsaKeySize; 4] = [
        RsaKeySize::Bits1024,
        RsaKeySize::Bits2048,
        RsaKeySize::Bits3072,
        RsaKeySize::Bits4096,
    ];

    pub fn bits(self) -> u32 {
        match self {
            RsaKeySize::Bits1024 => 1024,
            RsaKeySize::Bits2048 => 2048,
            RsaKeySize::Bits3072 => 3072,
            RsaKeySize::Bits4096 => 4096,
        }
    }
}

impl TryFrom<u32> for RsaKeySize {
    type Error = KeyGenError;

    fn try_from(bits: u32) -> KeyGenResult<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.bits() == bits)
            .ok_or_else(|| {
                KeyGenError::UnsupportedParameters(format!(
                    "rsa key size {bits} (expected 1024, 2048, 3072 or 4096)"
                ))
            })
    }
}

/// NIST curve used for ECDSA keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NistCurve {
    P256,
    P384,
    P521,
}

impl NistCurve {
    pub const ALL: [NistCurve; 3] = [NistCurve::P256, NistCurve::P384, NistCurve::P521];

    pub fn bits(self) -> u32 {
        match self {
            NistCurve::P256 => 256,
            NistCurve::P384 => 384,
            NistCurve::P521 => 521,
        }
    }
}

impl TryFrom<u32> for NistCurve {
    type Error = KeyGenError;

    fn try_from(bits: u32) -> KeyGenResult<Self> {
        Self::ALL
            .into_iter()
            .find(|curve| curve.bits() == bits)
            .ok_or_else(|| {
                KeyGenError::UnsupportedParameters(format!(
                    "ecdsa key size {bits} (expected 256, 384 or 521)"
                ))
            })
    }
}

impl From<NistCurve> for ssh_key::EcdsaCurve {
    fn from(curve: NistCurve) -> Self {
        match curve {
            NistCurve::P256 => ssh_key::EcdsaCurve::NistP256,
            NistCurve::P384 => ssh_key::EcdsaCurve::NistP384,
            NistCurve::P521 => ssh_key::EcdsaCurve::NistP521,
        }
    }
}

impl From<ssh_key::EcdsaCurve> for NistCurve {
    fn from(curve: ssh_key::EcdsaCurve) -> Self {
        match curve {
            ssh_key::EcdsaCurve::NistP256 => NistCurve::P256,
            ssh_key::EcdsaCurve::NistP384 => NistCurve::P384,
            ssh_key::EcdsaCurve::NistP521 => NistCurve::P521,
        }
    }
}

/// Key family together with its size parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KeyAlgorithm {
    Rsa(RsaKeySize),
    Ed25519,
    Ecdsa(NistCurve),
}

impl KeyAlgorithm {
    /// Build an algorithm from a family tag (`rsa`, `ed25519`, `ecdsa`) and
    /// a numeric size. The size is ignored for Ed25519.
    pub fn from_parts(tag: &str, size: u32) -> KeyGenResult<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "rsa" => Ok(KeyAlgorithm::Rsa(RsaKeySize::try_from(size)?)),
            "ed25519" => Ok(KeyAlgorithm::Ed25519),
            "ecdsa" => Ok(KeyAlgorithm::Ecdsa(NistCurve::try_from(size)?)),
            other => Err(KeyGenError::UnsupportedParameters(format!(
                "key type '{other}' (expected rsa, ed25519 or ecdsa)"
            ))),
        }
    }

    /// Short family identifier used in file names.
    pub fn family_tag(&self) -> &'static str {
        match self {
            KeyAlgorithm::Rsa(_) => "rsa",
            KeyAlgorithm::Ed25519 => "ed25519",
            KeyAlgorithm::Ecdsa(_) => "ecdsa",
        }
    }

    /// Key size in bits. Ed25519 is always 256.
    pub fn bits(&self) -> u32 {
        match self {
            KeyAlgorithm::Rsa(size) => size.bits(),
            KeyAlgorithm::Ed25519 => 256,
            KeyAlgorithm::Ecdsa(curve) => curve.bits(),
        }
    }

    /// File name (without extension) for the private key: `rsa-2048`,
    /// `ed25519`, `ecdsa-384`.
    pub fn file_stem(&self) -> String {
        match self {
            KeyAlgorithm::Ed25519 => self.family_tag().to_string(),
            _ => format!("{}-{}", self.family_tag(), self.bits()),
        }
    }

    /// OpenSSH algorithm identifier for this family.
    pub fn ssh_algorithm(&self) -> ssh_key::Algorithm {
        match self {
            KeyAlgorithm::Rsa(_) => ssh_key::Algorithm::Rsa { hash: None },
            KeyAlgorithm::Ed25519 => ssh_key::Algorithm::Ed25519,
            KeyAlgorithm::Ecdsa(curve) => ssh_key::Algorithm::Ecdsa {
                curve: (*curve).into(),
            },
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_stem())
    }
}

impl FromStr for KeyAlgorithm {
    type Err = KeyGenError;

    /// Parse the file-stem form: `ed25519`, `rsa-4096`, `ecdsa-256`.
    fn from_str(s: &str) -> KeyGenResult<Self> {
        let s = s.trim();
        match s.split_once('-') {
            Some((tag, size)) => {
                let size: u32 = size.parse().map_err(|_| {
                    KeyGenError::UnsupportedParameters(format!("key size '{size}' in '{s}'"))
                })?;
                if tag.eq_ignore_ascii_case("ed25519") {
                    return Err(KeyGenError::UnsupportedParameters(format!(
                        "ed25519 takes no size: '{s}'"
                    )));
                }
                Self::from_parts(tag, size)
            }
            None if s.eq_ignore_ascii_case("ed25519") => Ok(KeyAlgorithm::Ed25519),
            None => Err(KeyGenError::UnsupportedParameters(format!(
                "algorithm '{s}' (expected ed25519, rsa-<bits> or ecdsa-<bits>)"
            ))),
        }
    }
}

impl TryFrom<String> for KeyAlgorithm {
    type Error = KeyGenError;

    fn try_from(s: String) -> KeyGenResult<Self> {
        s.parse()
    }
}

impl From<KeyAlgorithm> for String {
    fn from(algorithm: KeyAlgorithm) -> Self {
        algorithm.to_string()
    }
}
