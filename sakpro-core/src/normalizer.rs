//! normalizer.rs - Structural cleanup of the sanitizer's output.
//!
//! Stripping tags leaves debris behind: empty paragraphs, runs of line
//! breaks, emphasis wrapped around nothing. The passes below remove it. Each
//! pass is a total `&str -> String` rewrite and they run in a fixed order,
//! since later passes rely on the whitespace collapsing done by earlier ones.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

// Whitespace is the ASCII set `[\t\n\f\r ]` throughout. Other Unicode spaces
// are document text and must survive.

static NBSP_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x{A0}+").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\t\n\f\r ]+").unwrap());
static BREAK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(<br>[\t\n\f\r ]*)+").unwrap());
static LEADING_PARAGRAPH_BREAKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<p>([\t\n\f\r ]*<br>[\t\n\f\r ]*)+").unwrap());
static TRAILING_PARAGRAPH_BREAKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\t\n\f\r ]*<br>[\t\n\f\r ]*)+</p>").unwrap());
static BLANK_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"<h.>[\t\n\f\r ]*</h.>").unwrap());
static BLANK_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"<b>[\t\n\f\r ]*</b>").unwrap());
static BLANK_ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"<i>[\t\n\f\r ]*</i>").unwrap());
static BLANK_PARAGRAPH: Lazy<Regex> = Lazy::new(|| Regex::new(r"<p>[\t\n\f\r ]*</p>").unwrap());
static PARAGRAPH_IN_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<td>[\t\n\f\r ]*<p>(.*?)</p>[\t\n\f\r ]*</td>").unwrap());
static NAME_ONLY_ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<a name="[^"]+">(.*?)</a>"#).unwrap());
static MASTHEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"<p>[\t\n\f\r ]*(Tidsskriftet Sakprosa)[\t\n\f\r ]*</p>[\t\n\f\r ]*",
        r"<p>[\t\n\f\r ]*(Bind [0-9]+, Nummer [0-9]+)[\t\n\f\r ]*</p>[\t\n\f\r ]*",
        r"<p>[\t\n\f\r ]*(Â© [0-9]+)[\t\n\f\r ]*</p>",
    ))
    .unwrap()
});

/// Replaces every run of non-breaking spaces with one ordinary space.
pub fn replace_nbsp(s: &str) -> String {
    NBSP_RUN.replace_all(s, NoExpand(" ")).into_owned()
}

/// Collapses runs of ASCII whitespace into a single space.
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s, NoExpand(" ")).into_owned()
}

pub fn collapse_breaks(s: &str) -> String {
    BREAK_RUN.replace_all(s, NoExpand("<br>")).into_owned()
}

/// `<p><br> text` becomes `<p>text`.
pub fn strip_leading_paragraph_breaks(s: &str) -> String {
    LEADING_PARAGRAPH_BREAKS.replace_all(s, NoExpand("<p>")).into_owned()
}

/// `text <br></p>` becomes `text</p>`.
pub fn strip_trailing_paragraph_breaks(s: &str) -> String {
    TRAILING_PARAGRAPH_BREAKS.replace_all(s, NoExpand("</p>")).into_owned()
}

pub fn remove_bold_break(s: &str) -> String {
    s.replace("<b><br></b>", "")
}

/// Blank headings, bold and italic pairs are replaced by a space so the
/// words around them stay apart.
pub fn remove_blank_inline(s: &str) -> String {
    let s = BLANK_HEADING.replace_all(s, NoExpand(" "));
    let s = BLANK_BOLD.replace_all(&s, NoExpand(" "));
    BLANK_ITALIC.replace_all(&s, NoExpand(" ")).into_owned()
}

pub fn remove_blank_paragraphs(s: &str) -> String {
    BLANK_PARAGRAPH.replace_all(s, NoExpand("")).into_owned()
}

/// `<td><p>x</p></td>` becomes `<td>x</td>`.
pub fn unwrap_cell_paragraphs(s: &str) -> String {
    PARAGRAPH_IN_CELL.replace_all(s, "<td>${1}</td>").into_owned()
}

/// Drops `<a name="...">` targets, keeping the text they wrap.
pub fn unwrap_name_anchors(s: &str) -> String {
    NAME_ONLY_ANCHOR.replace_all(s, "${1}").into_owned()
}

/// Joins the three-paragraph journal masthead (title, volume/issue line,
/// copyright line) into one paragraph separated by line breaks.
pub fn merge_masthead(s: &str) -> String {
    MASTHEAD.replace_all(s, "<p>${1}<br>${2}<br>${3}</p>").into_owned()
}

pub fn merge_break_before_rule(s: &str) -> String {
    s.replace("<br><hr>", "<hr>")
}

pub fn demote_h2(s: &str) -> String {
    s.replace("<h2>", "<h3>").replace("</h2>", "</h3>")
}

/// Runs every pass once, in order.
fn run_passes(input: &str) -> String {
    let s = replace_nbsp(input);
    let s = collapse_whitespace(&s);
    let s = collapse_breaks(&s);
    let s = strip_leading_paragraph_breaks(&s);
    let s = strip_trailing_paragraph_breaks(&s);
    let s = remove_bold_break(&s);
    let s = remove_blank_inline(&s);
    let s = remove_blank_paragraphs(&s);
    let s = unwrap_cell_paragraphs(&s);
    let s = unwrap_name_anchors(&s);
    let s = merge_masthead(&s);
    let s = collapse_whitespace(&s);
    let s = merge_break_before_rule(&s);
    demote_h2(&s)
}

/// Normalizes sanitized markup.
///
/// The pass sequence is repeated until it no longer changes the document, so
/// that removing an empty element cannot leave behind a pattern an earlier
/// pass would have caught. No pass lengthens the string and the only
/// same-length rewrites (`h2` demotion, lone whitespace to space) cannot be
/// undone, so the loop terminates.
pub fn normalize(input: &str) -> String {
    let mut current = run_passes(input);
    let mut iterations = 1;
    loop {
        let next = run_passes(&current);
        if next == current {
            break;
        }
        trace!(
            target: "sakpro_core::normalizer",
            "Iteration {} shortened document from {} to {} bytes.",
            iterations,
            current.len(),
            next.len()
        );
        current = next;
        iterations += 1;
    }
    debug!(
        target: "sakpro_core::normalizer",
        "Normalized {} bytes into {} bytes in {} iteration(s).",
        input.len(),
        current.len(),
        iterations
    );
    current
}
