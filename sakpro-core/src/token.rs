//! token.rs - The markup token model the sanitizer filters.
//!
//! Raw tokens collected by [`crate::emitter::OrderedEmitter`] are converted
//! here into owned, decoded values. Rendering re-escapes text and attribute
//! values so that a token written back out is well-formed markup.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;

use crate::emitter::RawToken;
use crate::errors::SakproError;

/// A single `key="value"` pair on a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A tag name with its attributes in the order they were tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tag {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attributes(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    fn write_name_and_attributes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for attr in &self.attributes {
            write!(f, " {}=\"", attr.key)?;
            write_escaped(f, &attr.value)?;
            f.write_str("\"")?;
        }
        Ok(())
    }
}

/// One unit of the tokenized input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    StartTag(Tag),
    EndTag(Tag),
    SelfClosingTag(Tag),
    /// Decoded character data.
    Text(String),
    /// Comments, doctypes and tokenizer diagnostics.
    Other,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::StartTag(tag) => {
                f.write_str("<")?;
                tag.write_name_and_attributes(f)?;
                f.write_str(">")
            }
            Token::SelfClosingTag(tag) => {
                f.write_str("<")?;
                tag.write_name_and_attributes(f)?;
                f.write_str("/>")
            }
            Token::EndTag(tag) => write!(f, "</{}>", tag.name),
            Token::Text(text) => write_escaped(f, text),
            Token::Other => Ok(()),
        }
    }
}

impl TryFrom<RawToken> for Token {
    type Error = SakproError;

    fn try_from(token: RawToken) -> Result<Self, Self::Error> {
        let converted = match token {
            RawToken::StartTag(start) => {
                let mut attributes = Vec::with_capacity(start.attributes.len());
                for (key, value) in &start.attributes {
                    attributes.push(Attribute {
                        key: decode(key, "attribute name")?,
                        value: decode(value, "attribute value")?,
                    });
                }
                let tag = Tag {
                    name: decode(&start.name, "tag name")?,
                    attributes,
                };
                if start.self_closing {
                    Token::SelfClosingTag(tag)
                } else {
                    Token::StartTag(tag)
                }
            }
            RawToken::EndTag(end) => Token::EndTag(Tag::new(decode(&end.name, "tag name")?)),
            RawToken::Text(text) => Token::Text(decode(&text, "text run")?),
            RawToken::Other => Token::Other,
        };
        Ok(converted)
    }
}

fn decode(bytes: &[u8], what: &'static str) -> Result<String, SakproError> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|source| SakproError::InvalidUtf8 { what, source })
}

/// Writes `s` with the five markup-significant characters and CR escaped.
fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let mut last = 0;
    for (i, c) in s.char_indices() {
        let replacement = match c {
            '&' => "&amp;",
            '\'' => "&#39;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' => "&#34;",
            '\r' => "&#13;",
            _ => continue,
        };
        f.write_str(&s[last..i])?;
        f.write_str(replacement)?;
        last = i + c.len_utf8();
    }
    f.write_str(&s[last..])
}
