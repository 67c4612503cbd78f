//! policy.rs - The fixed tag and attribute policy applied by the sanitizer.
//!
//! The tables are compiled in and built once per process. They are exposed
//! read-only so callers can display them, never so they can change them.
//!
//! License: MIT OR APACHE 2.0

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::errors::SakproError;

/// Elements dropped together with everything up to their matching end tag.
const IGNORE_TAGS: [&str; 12] = [
    "title", "script", "style", "iframe", "frame", "frameset", "noframes", "noembed", "embed",
    "applet", "object", "base",
];

/// Elements that pass through to the output.
const ALLOWED_TAGS: [&str; 30] = [
    "html", "body", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "p", "br", "b", "i", "strong", "em",
    "ol", "ul", "li", "a", "img", "pre", "code", "blockquote", "table", "tr", "th", "td", "tbody",
    "thead", "caption",
];

/// Attribute keys that may survive on an allowed start tag.
const ALLOWED_ATTRIBUTES: [&str; 6] = ["class", "src", "href", "title", "alt", "name"];

/// The only `class` value that is kept (compared lower-cased).
pub const ALLOWED_CLASS_VALUE: &str = "abstract";

static STANDARD_POLICY: Lazy<Policy> = Lazy::new(|| Policy {
    ignore_tags: IGNORE_TAGS.into_iter().collect(),
    allowed_tags: ALLOWED_TAGS.into_iter().collect(),
    allowed_attributes: ALLOWED_ATTRIBUTES.into_iter().collect(),
});

/// Immutable tag and attribute tables.
///
/// Sets are ordered so the serialized form is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Policy {
    /// Tags whose whole subtree is suppressed.
    pub ignore_tags: BTreeSet<&'static str>,
    /// Tags emitted to the output.
    pub allowed_tags: BTreeSet<&'static str>,
    /// Attribute keys kept on allowed start tags.
    pub allowed_attributes: BTreeSet<&'static str>,
}

impl Policy {
    /// Returns the process-wide policy.
    pub fn standard() -> &'static Policy {
        &STANDARD_POLICY
    }

    pub fn is_allowed(&self, tag: &str) -> bool {
        self.allowed_tags.contains(tag)
    }

    pub fn is_ignored(&self, tag: &str) -> bool {
        self.ignore_tags.contains(tag)
    }

    pub fn is_allowed_attribute(&self, key: &str) -> bool {
        self.allowed_attributes.contains(key)
    }

    /// Renders the tables as YAML.
    pub fn to_yaml(&self) -> Result<String, SakproError> {
        serde_yml::to_string(self).map_err(|e| SakproError::SerializationError(e.to_string()))
    }
}
