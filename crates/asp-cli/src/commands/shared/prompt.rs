use std::io::{BufRead, IsTerminal};

use anyhow::Context;

/// The `--password` value, or one line read from stdin.
pub fn password(given: Option<&str>) -> anyhow::Result<String> {
    if let Some(password) = given {
        return Ok(password.to_string());
    }
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprint!("password: ");
    }
    read_password(stdin.lock())
}

fn read_password(mut reader: impl BufRead) -> anyhow::Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        anyhow::bail!("a password is required (pass --password or pipe it on stdin)");
    }
    Ok(password.to_string())
}
