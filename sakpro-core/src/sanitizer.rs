//! sanitizer.rs - Token-level filtering of an HTML document.
//!
//! The input is tokenized with `html5gum` and each token is checked against
//! the fixed [`Policy`]. Allowed tags are re-rendered with their attributes
//! filtered, ignored elements are suppressed together with their content, and
//! everything else is dropped. Once the stream is exhausted the accumulated
//! markup is handed to [`normalize`].
//!
//! License: MIT OR APACHE 2.0

use std::fmt::Write as _;
use std::io::Read;

use html5gum::{IoReader, Tokenizer};
use log::debug;

use crate::emitter::OrderedEmitter;
use crate::errors::SakproError;
use crate::normalizer::normalize;
use crate::policy::{Policy, ALLOWED_CLASS_VALUE};
use crate::token::{Attribute, Tag, Token};

/// Counters collected while cleaning a single document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanSummary {
    /// Tokens pulled from the tokenizer, of any kind.
    pub tokens_seen: usize,
    /// Start, end and self-closing tags written to the output.
    pub tags_kept: usize,
    /// Tags dropped, including every tag inside an ignored element.
    pub tags_dropped: usize,
    /// Ignored elements whose content was suppressed.
    pub ignored_regions: usize,
    /// Attributes removed from tags that were kept.
    pub attributes_dropped: usize,
    /// Size of the filtered markup before normalization.
    pub filtered_bytes: usize,
    /// Size of the final document.
    pub output_bytes: usize,
}

/// Filters `attributes` down to allowed keys with non-empty values.
///
/// A `class` attribute only survives when its value is `abstract`, compared
/// case-insensitively; any other class is emptied and therefore removed.
/// Relative order is preserved.
pub fn clean_attributes(attributes: &[Attribute], policy: &Policy) -> Vec<Attribute> {
    attributes
        .iter()
        .filter(|attr| policy.is_allowed_attribute(&attr.key))
        .filter_map(|attr| {
            let value = if attr.key == "class" && attr.value.to_lowercase() != ALLOWED_CLASS_VALUE {
                ""
            } else {
                attr.value.as_str()
            };
            (!value.is_empty()).then(|| Attribute::new(attr.key.clone(), value))
        })
        .collect()
}

/// The per-call filtering state: output buffer and the ignore marker.
///
/// Only one ignored element is tracked at a time and it is matched by name,
/// not by nesting depth. A nested element of the same name therefore ends
/// suppression at its own end tag, and an ignored element opened inside
/// another one is dropped without opening a region of its own.
#[derive(Debug)]
pub struct Sanitizer<'p> {
    policy: &'p Policy,
    ignore: Option<String>,
    buffer: String,
    summary: CleanSummary,
}

impl<'p> Sanitizer<'p> {
    pub fn new(policy: &'p Policy) -> Self {
        Self {
            policy,
            ignore: None,
            buffer: String::new(),
            summary: CleanSummary::default(),
        }
    }

    /// Name of the element currently being suppressed, if any.
    pub fn ignored(&self) -> Option<&str> {
        self.ignore.as_deref()
    }

    /// The filtered markup accumulated so far, before normalization.
    pub fn filtered(&self) -> &str {
        &self.buffer
    }

    pub fn process(&mut self, token: Token) {
        self.summary.tokens_seen += 1;
        match token {
            Token::StartTag(tag) => {
                if self.ignore.is_none() && self.policy.is_allowed(&tag.name) {
                    self.keep_tag(tag, false);
                } else if self.ignore.is_none() && self.policy.is_ignored(&tag.name) {
                    debug!(target: "sakpro_core::sanitizer", "Suppressing <{}> element.", tag.name);
                    self.summary.ignored_regions += 1;
                    self.summary.tags_dropped += 1;
                    self.ignore = Some(tag.name);
                } else {
                    self.summary.tags_dropped += 1;
                }
            }
            Token::SelfClosingTag(tag) => {
                if self.ignore.is_none() && self.policy.is_allowed(&tag.name) {
                    self.keep_tag(tag, true);
                } else {
                    self.close_if_ignored(&tag.name);
                    self.summary.tags_dropped += 1;
                }
            }
            Token::EndTag(tag) => {
                if self.ignore.is_none() && self.policy.is_allowed(&tag.name) {
                    // End tags never carry attributes in the output.
                    let _ = write!(self.buffer, "{}", Token::EndTag(Tag::new(tag.name)));
                    self.summary.tags_kept += 1;
                } else {
                    self.close_if_ignored(&tag.name);
                    self.summary.tags_dropped += 1;
                }
            }
            Token::Text(text) => {
                if self.ignore.is_none() {
                    let _ = write!(self.buffer, "{}", Token::Text(text));
                }
            }
            Token::Other => {}
        }
    }

    /// Normalizes the accumulated markup and returns it with the counters.
    pub fn finish(mut self) -> (String, CleanSummary) {
        if let Some(name) = &self.ignore {
            debug!(
                target: "sakpro_core::sanitizer",
                "Input ended inside suppressed <{}> element.",
                name
            );
        }
        let output = normalize(&self.buffer);
        self.summary.filtered_bytes = self.buffer.len();
        self.summary.output_bytes = output.len();
        (output, self.summary)
    }

    fn keep_tag(&mut self, tag: Tag, self_closing: bool) {
        let attributes = clean_attributes(&tag.attributes, self.policy);
        self.summary.attributes_dropped += tag.attributes.len() - attributes.len();
        self.summary.tags_kept += 1;
        let tag = Tag::with_attributes(tag.name, attributes);
        let token = if self_closing {
            Token::SelfClosingTag(tag)
        } else {
            Token::StartTag(tag)
        };
        let _ = write!(self.buffer, "{token}");
    }

    fn close_if_ignored(&mut self, name: &str) {
        if self.ignore.as_deref() == Some(name) {
            debug!(target: "sakpro_core::sanitizer", "Leaving suppressed <{}> element.", name);
            self.ignore = None;
        }
    }
}

/// Cleans the HTML document read from `reader` and reports what was removed.
///
/// The reader is consumed to the end. Any read or decoding failure aborts the
/// whole operation and no partial output is returned.
pub fn clean_html_with_summary<R: Read>(reader: R) -> Result<(String, CleanSummary), SakproError> {
    let mut emitter = OrderedEmitter::default();
    // Treat script, style and similar bodies as raw text rather than markup.
    emitter.switch_states(true);
    let tokenizer = Tokenizer::new_with_emitter(IoReader::new(reader), emitter);

    let mut sanitizer = Sanitizer::new(Policy::standard());
    for token in tokenizer {
        sanitizer.process(Token::try_from(token?)?);
    }

    let (output, summary) = sanitizer.finish();
    debug!(
        target: "sakpro_core::sanitizer",
        "Cleaned document: {} tokens, {} tags kept, {} dropped, {} suppressed element(s).",
        summary.tokens_seen,
        summary.tags_kept,
        summary.tags_dropped,
        summary.ignored_regions
    );
    Ok((output, summary))
}

/// Cleans the HTML document read from `reader`.
pub fn clean_html<R: Read>(reader: R) -> Result<String, SakproError> {
    clean_html_with_summary(reader).map(|(output, _)| output)
}

/// Cleans an in-memory HTML document.
pub fn clean_html_str(input: &str) -> Result<String, SakproError> {
    clean_html(input.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(name: &str, attributes: &[(&str, &str)]) -> Token {
        Token::StartTag(Tag::with_attributes(
            name,
            attributes.iter().map(|(k, v)| Attribute::new(*k, *v)).collect(),
        ))
    }

    fn end(name: &str) -> Token {
        Token::EndTag(Tag::new(name))
    }

    fn text(s: &str) -> Token {
        Token::Text(s.to_string())
    }

    fn run(tokens: Vec<Token>) -> String {
        let mut sanitizer = Sanitizer::new(Policy::standard());
        for token in tokens {
            sanitizer.process(token);
        }
        sanitizer.filtered().to_string()
    }

    #[test]
    fn test_clean_attributes_keeps_allowed_in_order() {
        let attrs = vec![
            Attribute::new("title", "T"),
            Attribute::new("style", "color: red"),
            Attribute::new("href", "/a"),
            Attribute::new("onclick", "x()"),
            Attribute::new("alt", ""),
        ];
        let cleaned = clean_attributes(&attrs, Policy::standard());
        assert_eq!(cleaned, vec![Attribute::new("title", "T"), Attribute::new("href", "/a")]);
    }

    #[test]
    fn test_clean_attributes_class_allowlist() {
        let attrs = vec![
            Attribute::new("class", "other"),
            Attribute::new("class", "ABSTRACT"),
            Attribute::new("class", "abstract lead"),
        ];
        let cleaned = clean_attributes(&attrs, Policy::standard());
        assert_eq!(cleaned, vec![Attribute::new("class", "ABSTRACT")]);
    }

    #[test]
    fn test_clean_attributes_key_match_is_exact() {
        let attrs = vec![Attribute::new("HREF", "/a")];
        assert!(clean_attributes(&attrs, Policy::standard()).is_empty());
    }

    #[test]
    fn test_disallowed_tags_drop_but_text_survives() {
        let out = run(vec![start("div", &[]), start("span", &[]), text("hi"), end("span"), end("div")]);
        assert_eq!(out, "hi");
    }

    #[test]
    fn test_end_tag_attributes_are_stripped() {
        let out = run(vec![Token::EndTag(Tag::with_attributes(
            "p",
            vec![Attribute::new("title", "x")],
        ))]);
        assert_eq!(out, "</p>");
    }

    #[test]
    fn test_ignored_subtree_is_suppressed() {
        let out = run(vec![
            text("a"),
            start("style", &[]),
            start("p", &[]),
            text("hidden"),
            end("p"),
            end("style"),
            text("b"),
        ]);
        assert_eq!(out, "ab");
    }

    #[test]
    fn test_nested_same_name_closes_early() {
        let out = run(vec![
            start("object", &[]),
            start("object", &[]),
            text("x"),
            end("object"),
            text("y"),
            end("object"),
            text("z"),
        ]);
        assert_eq!(out, "yz");
    }

    #[test]
    fn test_second_ignored_tag_does_not_replace_region() {
        let mut sanitizer = Sanitizer::new(Policy::standard());
        sanitizer.process(start("object", &[]));
        sanitizer.process(start("embed", &[]));
        assert_eq!(sanitizer.ignored(), Some("object"));
        sanitizer.process(text("a"));
        sanitizer.process(end("object"));
        sanitizer.process(text("b"));
        assert_eq!(sanitizer.ignored(), None);
        assert_eq!(sanitizer.filtered(), "b");
    }

    #[test]
    fn test_self_closing_of_ignored_name_clears_region() {
        let out = run(vec![
            start("object", &[]),
            text("x"),
            Token::SelfClosingTag(Tag::new("object")),
            text("y"),
        ]);
        assert_eq!(out, "y");
    }

    #[test]
    fn test_self_closing_ignored_tag_does_not_open_region() {
        let out = run(vec![Token::SelfClosingTag(Tag::new("embed")), text("y")]);
        assert_eq!(out, "y");
    }

    #[test]
    fn test_allowed_tag_inside_region_is_dropped() {
        let out = run(vec![start("title", &[]), start("b", &[]), end("b"), end("title")]);
        assert_eq!(out, "");
    }

    #[test]
    fn test_self_closing_allowed_tag_is_rendered() {
        let out = run(vec![Token::SelfClosingTag(Tag::with_attributes(
            "img",
            vec![Attribute::new("src", "a.png"), Attribute::new("width", "10")],
        ))]);
        assert_eq!(out, r#"<img src="a.png"/>"#);
    }

    #[test]
    fn test_other_tokens_have_no_effect() {
        let mut sanitizer = Sanitizer::new(Policy::standard());
        sanitizer.process(start("script", &[]));
        sanitizer.process(Token::Other);
        assert_eq!(sanitizer.ignored(), Some("script"));
    }

    #[test]
    fn test_summary_counts() {
        let mut sanitizer = Sanitizer::new(Policy::standard());
        for token in [
            start("p", &[("class", "x"), ("title", "t")]),
            text("a"),
            start("script", &[]),
            text("b"),
            end("script"),
            start("div", &[]),
            end("p"),
            Token::Other,
        ] {
            sanitizer.process(token);
        }
        let (output, summary) = sanitizer.finish();
        assert_eq!(output, r#"<p title="t">a</p>"#);
        assert_eq!(summary.tokens_seen, 8);
        assert_eq!(summary.tags_kept, 2);
        assert_eq!(summary.tags_dropped, 3);
        assert_eq!(summary.ignored_regions, 1);
        assert_eq!(summary.attributes_dropped, 1);
        assert_eq!(summary.output_bytes, output.len());
    }

    #[test]
    fn test_summary_byte_counts_bracket_normalization() {
        let mut sanitizer = Sanitizer::new(Policy::standard());
        for token in [start("p", &[]), text("a  \n b"), end("p"), start("p", &[]), end("p")] {
            sanitizer.process(token);
        }
        let filtered_len = sanitizer.filtered().len();
        let (output, summary) = sanitizer.finish();
        assert_eq!(output, "<p>a b</p>");
        assert_eq!(summary.filtered_bytes, filtered_len);
        assert_eq!(summary.output_bytes, output.len());
        assert!(summary.filtered_bytes > summary.output_bytes);
    }
}
