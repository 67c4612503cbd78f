// sakpro/src/ui/output_format.rs
//! Formatting of the messages and summary written to stderr.

use std::io::{self, Write};

use owo_colors::OwoColorize;
use sakpro_core::CleanSummary;

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{}", msg.cyan())
    } else {
        writeln!(writer, "{msg}")
    }
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "Error:".red().bold(), msg)
    } else {
        writeln!(writer, "Error: {msg}")
    }
}

/// Prints the counters of a finished clean run.
pub fn print_summary<W: Write>(
    summary: &CleanSummary,
    writer: &mut W,
    supports_color: bool,
) -> io::Result<()> {
    let rows = [
        ("Tags kept", summary.tags_kept),
        ("Tags dropped", summary.tags_dropped),
        ("Suppressed elements", summary.ignored_regions),
        ("Attributes dropped", summary.attributes_dropped),
        ("Bytes before cleanup", summary.filtered_bytes),
        ("Bytes written", summary.output_bytes),
    ];

    if supports_color {
        writeln!(writer, "{}", "Clean Summary:".bold())?;
    } else {
        writeln!(writer, "Clean Summary:")?;
    }
    for (label, count) in rows {
        if supports_color {
            writeln!(writer, "  {:<22}{}", label.yellow(), count.bold())?;
        } else {
            writeln!(writer, "  {label:<22}{count}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_summary() {
        let summary = CleanSummary {
            tags_kept: 4,
            ignored_regions: 1,
            ..CleanSummary::default()
        };
        let mut out = Vec::new();
        print_summary(&summary, &mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Clean Summary:\n"));
        assert!(text.contains("  Tags kept             4\n"));
        assert!(text.contains("Suppressed elements   1"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_plain_error_message() {
        let mut out = Vec::new();
        print_error_message(&mut out, "boom", false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Error: boom\n");
    }
}
