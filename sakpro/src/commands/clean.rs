//! `clean` command: read one document, clean it, write the result.

use anyhow::{anyhow, bail, Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sakpro_core::{clean_html_with_summary, CleanSummary};

use crate::ui::output_format;

/// Where the cleaned document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Next to the input, with `suffix` inserted before `.htm`.
    Derived { suffix: String },
    File(PathBuf),
    Stdout,
}

/// Options for the `clean` operation.
#[derive(Debug, Clone)]
pub struct CleanOptions {
    /// Input path; `-` means stdin.
    pub input: PathBuf,
    pub output: OutputTarget,
    pub no_summary: bool,
    pub quiet: bool,
}

/// Derives the output path by inserting `suffix` before the first `.htm` in
/// the input's file name (`page.html` becomes `page_clean.html`). A file name
/// without `.htm` gets `<suffix>.htm` appended.
pub fn derive_output_path(input: &Path, suffix: &str) -> Result<PathBuf> {
    let file_name = input
        .file_name()
        .ok_or_else(|| anyhow!("Input path has no file name: {}", input.display()))?
        .to_str()
        .ok_or_else(|| anyhow!("Input file name is not valid UTF-8: {}", input.display()))?;

    let derived = if file_name.contains(".htm") {
        file_name.replacen(".htm", &format!("{suffix}.htm"), 1)
    } else {
        format!("{file_name}{suffix}.htm")
    };

    if derived == file_name {
        bail!(
            "Derived output path would overwrite the input: {}",
            input.display()
        );
    }
    Ok(input.with_file_name(derived))
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn resolve_output(opts: &CleanOptions) -> Result<Option<PathBuf>> {
    match &opts.output {
        OutputTarget::Stdout => Ok(None),
        OutputTarget::File(path) => Ok(Some(path.clone())),
        // Without an input file name there is nothing to derive from.
        OutputTarget::Derived { .. } if is_stdin(&opts.input) => Ok(None),
        OutputTarget::Derived { suffix } => derive_output_path(&opts.input, suffix).map(Some),
    }
}

fn read_and_clean(input: &Path) -> Result<(String, CleanSummary)> {
    if is_stdin(input) {
        debug!("Reading HTML from stdin.");
        return clean_html_with_summary(io::stdin().lock()).context("Failed to clean HTML from stdin");
    }
    let file = fs::File::open(input)
        .with_context(|| format!("Failed to open input file: {}", input.display()))?;
    clean_html_with_summary(file)
        .with_context(|| format!("Failed to clean HTML from {}", input.display()))
}

/// Writes the document exactly as cleaned, with no trailing newline, so
/// stdout output matches the file output byte for byte.
fn write_document<W: Write>(writer: &mut W, cleaned: &str) -> io::Result<()> {
    writer.write_all(cleaned.as_bytes())?;
    writer.flush()
}

/// Runs the `clean` command.
///
/// The output destination is only created after the document has been
/// cleaned successfully.
pub fn run_clean(opts: &CleanOptions) -> Result<()> {
    info!("Starting clean of {}.", opts.input.display());

    let destination = resolve_output(opts)?;
    let (cleaned, summary) = read_and_clean(&opts.input)?;

    match &destination {
        Some(path) => {
            fs::write(path, &cleaned)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            info!("Wrote cleaned document to {}.", path.display());
            if !opts.quiet {
                let supports_color = io::stderr().is_terminal();
                let _ = output_format::print_info_message(
                    &mut io::stderr(),
                    &format!("Cleaned document written to: {}", path.display()),
                    supports_color,
                );
            }
        }
        None => {
            write_document(&mut io::stdout().lock(), &cleaned)
                .context("Failed to write to stdout")?;
        }
    }

    if !opts.no_summary && !opts.quiet {
        let stderr_supports_color = io::stderr().is_terminal();
        output_format::print_summary(&summary, &mut io::stderr(), stderr_supports_color)?;
    }

    info!("Clean completed.");
    Ok(())
}
