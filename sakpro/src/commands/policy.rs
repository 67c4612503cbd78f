//! `policy` command: show the fixed tables the sanitizer applies.

use anyhow::{Context, Result};
use std::io::{self, Write};

use sakpro_core::Policy;

pub fn run_policy<W: Write>(writer: &mut W) -> Result<()> {
    let yaml = Policy::standard()
        .to_yaml()
        .context("Failed to render policy")?;
    writer.write_all(yaml.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Prints the policy to stdout.
pub fn print_policy() -> Result<()> {
    run_policy(&mut io::stdout().lock())
}
