//! errors.rs - Custom error types for the sakpro-core library.
//!
//! Cleaning either succeeds with the full document or fails with exactly one
//! of these errors. Disallowed tags and attributes are not errors; they are
//! dropped silently.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `sakpro-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SakproError {
    /// The input stream failed for a reason other than reaching its end.
    #[error("Failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),

    /// A tag name, attribute or text run was not valid UTF-8.
    #[error("Input contains an undecodable {what}: {source}")]
    InvalidUtf8 {
        what: &'static str,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("Failed to serialize policy: {0}")]
    SerializationError(String),
}
