// sakpro-core/src/lib.rs
//! # sakpro Core Library
//!
//! `sakpro-core` strips an HTML document down to a small, display-ready subset
//! of markup and then tidies up what the stripping leaves behind. It performs
//! no file-system access: callers hand it a reader and receive a string.
//!
//! ## Modules
//!
//! * `policy`: The fixed ignore, allow and attribute tables.
//! * `emitter`: Collects `html5gum` tokenizer output with attributes in source order.
//! * `token`: The decoded token model and its rendering.
//! * `sanitizer`: Token-level filtering against the policy.
//! * `normalizer`: The ordered structural cleanup passes.
//! * `errors`: The library error type.
//!
//! ## Public API
//!
//! * [`clean_html`]: Cleans a document read from any `std::io::Read`.
//! * [`clean_html_with_summary`]: Same, plus a [`CleanSummary`] of what was removed.
//! * [`clean_html_str`]: Convenience wrapper for in-memory input.
//! * [`normalize`]: The structural cleanup on its own.
//! * [`Policy`]: Read-only access to the tables, e.g. for display.
//!
//! ## Usage Example
//!
//! ```rust
//! use sakpro_core::clean_html;
//!
//! let input = r#"<script>alert(1)</script><h2 class="x">Title</h2><p><br></p>"#;
//! let cleaned = clean_html(input.as_bytes()).unwrap();
//! assert_eq!(cleaned, "<h3>Title</h3>");
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`SakproError`]. Disallowed tags and attributes
//! are never errors; only a failing reader or undecodable input is.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod emitter;
pub mod errors;
pub mod normalizer;
pub mod policy;
pub mod sanitizer;
pub mod token;

/// Re-exports the custom error type for clear error reporting.
pub use errors::SakproError;

/// Re-exports the policy tables.
pub use policy::Policy;

/// Re-exports the token model.
pub use token::{Attribute, Tag, Token};

/// Re-exports the sanitizer entry points.
pub use sanitizer::{
    clean_attributes,
    clean_html,
    clean_html_str,
    clean_html_with_summary,
    CleanSummary,
    Sanitizer,
};

/// Re-exports the structural normalizer.
pub use normalizer::normalize;
