//! emitter.rs - Collects `html5gum` tokenizer callbacks into raw tokens.
//!
//! The stock `html5gum` emitter keeps start-tag attributes in a map, which
//! reorders them by name and drops repeated keys. The sanitizer filters every
//! attribute pair in the order it was written, so tags are assembled here
//! with their attributes in a plain vector.
//!
//! Values stay as bytes; [`crate::token::Token`] decodes them.
//!
//! License: MIT OR APACHE 2.0

use std::collections::VecDeque;
use std::mem;

use html5gum::{naive_next_state, Emitter, Error, State};

/// A tag as tokenized: name and attribute pairs in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTag {
    pub name: Vec<u8>,
    pub attributes: Vec<(Vec<u8>, Vec<u8>)>,
    pub self_closing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawToken {
    StartTag(RawTag),
    EndTag(RawTag),
    Text(Vec<u8>),
    /// A comment or doctype.
    Other,
}

#[derive(Debug)]
enum Pending {
    StartTag(RawTag),
    EndTag(RawTag),
    Comment,
    Doctype,
}

/// An [`Emitter`] that preserves attribute order and duplicates.
///
/// Parse errors are not reported; the tokenizer recovers from them the same
/// way regardless.
#[derive(Debug, Default)]
pub struct OrderedEmitter {
    current_characters: Vec<u8>,
    current: Option<Pending>,
    current_attribute: Option<(Vec<u8>, Vec<u8>)>,
    last_start_tag: Vec<u8>,
    emitted: VecDeque<RawToken>,
    switch_states: bool,
}

impl OrderedEmitter {
    /// Whether to guess raw-text states (script, style, title, ...) from the
    /// name of each start tag. Off by default.
    pub fn switch_states(&mut self, yes: bool) {
        self.switch_states = yes;
    }

    fn emit_token(&mut self, token: RawToken) {
        self.flush_current_characters();
        self.emitted.push_back(token);
    }

    fn flush_current_attribute(&mut self) {
        if let Some(pair) = self.current_attribute.take() {
            // Attributes on end tags are discarded.
            if let Some(Pending::StartTag(tag)) = &mut self.current {
                tag.attributes.push(pair);
            }
        }
    }

    fn flush_current_characters(&mut self) {
        if self.current_characters.is_empty() {
            return;
        }
        let text = mem::take(&mut self.current_characters);
        self.emitted.push_back(RawToken::Text(text));
    }
}

impl Emitter for OrderedEmitter {
    type Token = RawToken;

    fn set_last_start_tag(&mut self, last_start_tag: Option<&[u8]>) {
        self.last_start_tag.clear();
        self.last_start_tag
            .extend_from_slice(last_start_tag.unwrap_or_default());
    }

    fn emit_eof(&mut self) {
        self.flush_current_characters();
    }

    fn emit_error(&mut self, _error: Error) {}

    fn should_emit_errors(&mut self) -> bool {
        false
    }

    fn pop_token(&mut self) -> Option<Self::Token> {
        self.emitted.pop_front()
    }

    fn emit_string(&mut self, s: &[u8]) {
        self.current_characters.extend_from_slice(s);
    }

    fn init_start_tag(&mut self) {
        self.current = Some(Pending::StartTag(RawTag::default()));
    }

    fn init_end_tag(&mut self) {
        self.current = Some(Pending::EndTag(RawTag::default()));
    }

    fn init_comment(&mut self) {
        self.current = Some(Pending::Comment);
    }

    fn emit_current_tag(&mut self) -> Option<State> {
        self.flush_current_attribute();
        let token = match self.current.take() {
            Some(Pending::StartTag(tag)) => {
                self.set_last_start_tag(Some(tag.name.as_slice()));
                RawToken::StartTag(tag)
            }
            Some(Pending::EndTag(tag)) => {
                self.set_last_start_tag(None);
                RawToken::EndTag(tag)
            }
            _ => return None,
        };
        self.emit_token(token);
        if self.switch_states {
            naive_next_state(&self.last_start_tag)
        } else {
            None
        }
    }

    fn emit_current_comment(&mut self) {
        self.current = None;
        self.emit_token(RawToken::Other);
    }

    fn emit_current_doctype(&mut self) {
        self.current = None;
        self.emit_token(RawToken::Other);
    }

    fn set_self_closing(&mut self) {
        if let Some(Pending::StartTag(tag)) = &mut self.current {
            tag.self_closing = true;
        }
    }

    fn set_force_quirks(&mut self) {}

    fn push_tag_name(&mut self, s: &[u8]) {
        if let Some(Pending::StartTag(tag) | Pending::EndTag(tag)) = &mut self.current {
            tag.name.extend_from_slice(s);
        }
    }

    fn push_comment(&mut self, _s: &[u8]) {}

    fn push_doctype_name(&mut self, _s: &[u8]) {}

    fn init_doctype(&mut self) {
        self.current = Some(Pending::Doctype);
    }

    fn init_attribute(&mut self) {
        self.flush_current_attribute();
        self.current_attribute = Some(Default::default());
    }

    fn push_attribute_name(&mut self, s: &[u8]) {
        if let Some((name, _)) = &mut self.current_attribute {
            name.extend_from_slice(s);
        }
    }

    fn push_attribute_value(&mut self, s: &[u8]) {
        if let Some((_, value)) = &mut self.current_attribute {
            value.extend_from_slice(s);
        }
    }

    fn set_doctype_public_identifier(&mut self, _value: &[u8]) {}

    fn set_doctype_system_identifier(&mut self, _value: &[u8]) {}

    fn push_doctype_public_identifier(&mut self, _s: &[u8]) {}

    fn push_doctype_system_identifier(&mut self, _s: &[u8]) {}

    fn current_is_appropriate_end_tag_token(&mut self) -> bool {
        match &self.current {
            Some(Pending::EndTag(tag)) => {
                !self.last_start_tag.is_empty() && self.last_start_tag == tag.name
            }
            _ => false,
        }
    }
}
