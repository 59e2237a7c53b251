//! `keysmith inspect <file>` — show what an OpenSSH public key holds.

use anyhow::{Context, Result};
use std::path::Path;

/// Print algorithm, size, comment and fingerprint of a public key file.
pub fn run(path: &Path, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let info = keysmith_core::inspect_public_key(&text)
        .with_context(|| format!("failed to parse public key in {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let comment = if info.comment.is_empty() {
        "(none)"
    } else {
        info.comment.as_str()
    };
    println!("Algorithm:   {} ({} bits)", info.algorithm.family_tag(), info.algorithm.bits());
    println!("Comment:     {comment}");
    println!("Fingerprint: {}", info.fingerprint);

    Ok(())
}
