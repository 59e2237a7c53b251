//! Reading OpenSSH keys back.
//!
//! Used to check what a public key file actually holds: family, size,
//! comment and SHA-256 fingerprint.

use serde::Serialize;
use ssh_key::public::KeyData;
use ssh_key::{Algorithm, HashAlg, PrivateKey, PublicKey};

use crate::algorithm::{KeyAlgorithm, NistCurve, RsaKeySize};
use crate::error::{KeyGenError, KeyGenResult};

/// What a parsed public key contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicKeyInfo {
    pub algorithm: KeyAlgorithm,
    pub comment: String,
    pub fingerprint: String,
}

/// Parse a single-line OpenSSH public key.
pub fn inspect_public_key(text: &str) -> KeyGenResult<PublicKeyInfo> {
    let public = PublicKey::from_openssh(text.trim())
        .map_err(|e| KeyGenError::InvalidKey(e.to_string()))?;

    let algorithm = match (public.algorithm(), public.key_data()) {
        (Algorithm::Ed25519, _) => KeyAlgorithm::Ed25519,
        (Algorithm::Ecdsa { curve }, _) => KeyAlgorithm::Ecdsa(NistCurve::from(curve)),
        (Algorithm::Rsa { .. }, KeyData::Rsa(rsa_key)) => {
            let modulus = rsa::BigUint::try_from(&rsa_key.n)
                .map_err(|e| KeyGenError::InvalidKey(e.to_string()))?;
            let bits = u32::try_from(modulus.bits()).map_err(|_| {
                KeyGenError::UnsupportedParameters("rsa modulus too large".into())
            })?;
            KeyAlgorithm::Rsa(RsaKeySize::try_from(bits)?)
        }
        (other, _) => {
            return Err(KeyGenError::UnsupportedParameters(format!(
                "key algorithm {other}"
            )))
        }
    };

    Ok(PublicKeyInfo {
        algorithm,
        comment: public.comment().to_string(),
        fingerprint: public.fingerprint(HashAlg::Sha256).to_string(),
    })
}

/// Whether an OpenSSH private key is wrapped in a passphrase envelope.
pub fn is_encrypted_private_key(text: &str) -> KeyGenResult<bool> {
    let private =
        PrivateKey::from_openssh(text).map_err(|e| KeyGenError::InvalidKey(e.to_string()))?;
    Ok(private.is_encrypted())
}
