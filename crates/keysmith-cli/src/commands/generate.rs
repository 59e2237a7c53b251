//! `keysmith generate` — generate an SSH key pair.
//!
//! Resolves flags against the config defaults, runs the generation on the
//! blocking pool and prints the public key, private key and fingerprint.
//! When an output directory is set the pair is also written there.

use anyhow::{Context, Result};
use keysmith_core::{KeyAlgorithm, KeyFiles, KeyGenError, KeyPair, KeyRequest};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::GenerateDefaults;
use crate::worker::KeygenWorker;

/// Flags given on the command line; `None` falls back to the config.
#[derive(Debug, Default)]
pub struct GenerateArgs {
    pub key_type: Option<String>,
    pub bits: Option<u32>,
    pub comment: Option<String>,
    pub passphrase: Option<String>,
    pub ask_passphrase: bool,
    pub output_dir: Option<String>,
    pub no_save: bool,
    pub json: bool,
}

/// JSON shape printed with `--json`.
#[derive(Serialize)]
struct GenerateOutput<'a> {
    algorithm: KeyAlgorithm,
    fingerprint: &'a str,
    public_key: &'a str,
    private_key: &'a str,
    private_key_path: Option<String>,
    public_key_path: Option<String>,
}

/// Generate a key pair as described by `args` and `defaults`.
pub async fn run(args: GenerateArgs, defaults: &GenerateDefaults) -> Result<()> {
    let json = args.json;
    let request = build_request(args, defaults)?;
    let files = request
        .output_dir()
        .map(|dir| KeyFiles::in_dir(dir, request.algorithm()));

    let worker = KeygenWorker::new();
    let ticket = worker.submit(request);
    let id = ticket.id();

    let outcome = tokio::select! {
        outcome = worker.finish(ticket) => outcome,
        _ = tokio::signal::ctrl_c() => {
            worker.cancel();
            anyhow::bail!("interrupted");
        }
    };
    let Some(result) = outcome else {
        anyhow::bail!("request {id} was superseded");
    };

    match result {
        Ok(pair) => {
            info!(algorithm = %pair.algorithm, fingerprint = %pair.fingerprint, "key generated");
            if let Some(files) = &files {
                info!(private = %files.private.display(), public = %files.public.display(), "key pair saved");
            }
            emit(&pair, files.as_ref(), json)
        }
        Err(err) => {
            // Generation succeeded; show the keys before reporting the write error.
            if let KeyGenError::PersistenceFailure { pair, .. } = &err {
                warn!(fingerprint = %pair.fingerprint, "key generated but not saved");
                emit(pair, None, json)?;
            }
            Err(err).context("failed to generate key pair")
        }
    }
}

/// Merge flags over config defaults into a request.
pub fn build_request(args: GenerateArgs, defaults: &GenerateDefaults) -> Result<KeyRequest> {
    let algorithm = resolve_algorithm(args.key_type.as_deref(), args.bits, defaults.algorithm)?;

    let passphrase = match (args.passphrase, args.ask_passphrase) {
        (Some(passphrase), _) => passphrase,
        (None, true) => prompt_passphrase()?,
        (None, false) => String::new(),
    };

    let output_dir = if args.no_save {
        String::new()
    } else {
        args.output_dir.unwrap_or_else(|| defaults.output_dir.clone())
    };

    Ok(KeyRequest::new(algorithm)
        .with_comment(args.comment.unwrap_or_else(|| defaults.comment.clone()))
        .with_passphrase(passphrase)
        .with_output_dir(output_dir))
}

/// Pick the algorithm from `--type`/`--bits`, falling back to the configured
/// one. A missing size takes the family default (rsa 3072, ecdsa 256).
fn resolve_algorithm(
    key_type: Option<&str>,
    bits: Option<u32>,
    configured: KeyAlgorithm,
) -> Result<KeyAlgorithm> {
    let algorithm = match (key_type, bits) {
        (None, None) => configured,
        (None, Some(bits)) => KeyAlgorithm::from_parts(configured.family_tag(), bits)?,
        (Some(tag), Some(bits)) => KeyAlgorithm::from_parts(tag, bits)?,
        (Some(tag), None) => {
            let bits = match tag.trim().to_ascii_lowercase().as_str() {
                "rsa" => 3072,
                "ecdsa" => 256,
                _ => 0,
            };
            KeyAlgorithm::from_parts(tag, bits)?
        }
    };
    Ok(algorithm)
}

fn prompt_passphrase() -> Result<String> {
    dialoguer::Password::new()
        .with_prompt("Enter passphrase (empty for no passphrase)")
        .with_confirmation("Enter same passphrase again", "Passphrases do not match")
        .allow_empty_password(true)
        .interact()
        .context("failed to read passphrase")
}

fn emit(pair: &KeyPair, files: Option<&KeyFiles>, json: bool) -> Result<()> {
    if json {
        let output = GenerateOutput {
            algorithm: pair.algorithm,
            fingerprint: &pair.fingerprint,
            public_key: &pair.public_encoded,
            private_key: &pair.private_encoded,
            private_key_path: files.map(|f| f.private.display().to_string()),
            public_key_path: files.map(|f| f.public.display().to_string()),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Generated {} key pair", pair.algorithm);
    println!("  Fingerprint: {}", pair.fingerprint);
    if let Some(files) = files {
        println!("  Private key: {}", files.private.display());
        println!("  Public key:  {}", files.public.display());
    }
    println!();
    println!("{}", pair.public_encoded);
    println!();
    print!("{}", pair.private_encoded);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use keysmith_core::{NistCurve, RsaKeySize};
    use std::path::Path;

    #[test]
    fn no_flags_uses_config() {
        let defaults = GenerateDefaults {
            algorithm: KeyAlgorithm::Ecdsa(NistCurve::P384),
            comment: "cfg".into(),
            output_dir: "/keys".into(),
        };
        let req = build_request(GenerateArgs::default(), &defaults).unwrap();
        assert_eq!(req.algorithm(), KeyAlgorithm::Ecdsa(NistCurve::P384));
        assert_eq!(req.comment(), "cfg");
        assert_eq!(req.output_dir(), Some(Path::new("/keys")));
        assert!(!req.is_encrypted());
    }

    #[test]
    fn flags_override_config() {
        let defaults = GenerateDefaults {
            output_dir: "/keys".into(),
            ..GenerateDefaults::default()
        };
        let args = GenerateArgs {
            key_type: Some("rsa".into()),
            bits: Some(4096),
            comment: Some("me@host".into()),
            passphrase: Some("pw".into()),
            no_save: true,
            ..GenerateArgs::default()
        };
        let req = build_request(args, &defaults).unwrap();
        assert_eq!(req.algorithm(), KeyAlgorithm::Rsa(RsaKeySize::Bits4096));
        assert_eq!(req.comment(), "me@host");
        assert!(req.is_encrypted());
        assert!(req.output_dir().is_none());
    }

    #[test]
    fn family_default_sizes() {
        let ed = KeyAlgorithm::Ed25519;
        assert_eq!(
            resolve_algorithm(Some("rsa"), None, ed).unwrap(),
            KeyAlgorithm::Rsa(RsaKeySize::Bits3072)
        );
        assert_eq!(
            resolve_algorithm(Some("ecdsa"), None, ed).unwrap(),
            KeyAlgorithm::Ecdsa(NistCurve::P256)
        );
        assert_eq!(resolve_algorithm(Some("ed25519"), None, ed).unwrap(), ed);
    }

    #[test]
    fn bits_alone_applies_to_configured_family() {
        let configured = KeyAlgorithm::Rsa(RsaKeySize::Bits3072);
        assert_eq!(
            resolve_algorithm(None, Some(2048), configured).unwrap(),
            KeyAlgorithm::Rsa(RsaKeySize::Bits2048)
        );
    }

    #[test]
    fn unsupported_size_is_an_error() {
        assert!(resolve_algorithm(Some("rsa"), Some(9999), KeyAlgorithm::Ed25519).is_err());
        assert!(resolve_algorithm(Some("dsa"), None, KeyAlgorithm::Ed25519).is_err());
    }
}
