use std::fmt::Write as _;

use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

/// Bytes of entropy in a generated secret.
pub const SECRET_BYTES: usize = 64;

#[derive(Serialize)]
struct SecretResponse {
    secret: String,
}

/// Print a fresh random secret, e.g. for a backend's JWT signing key.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let secret = generate()?;
    if flags.format == OutputFormat::Json {
        return output(&SecretResponse { secret }, flags.format);
    }
    println!("{secret}");
    Ok(())
}

fn generate() -> anyhow::Result<String> {
    let mut bytes = [0u8; SECRET_BYTES];
    getrandom::fill(&mut bytes)
        .map_err(|error| anyhow::anyhow!("failed to read OS randomness: {error}"))?;
    Ok(to_hex(&bytes))
}

fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}
