//! Implementations of the `sakpro` subcommands.

pub mod clean;
pub mod policy;
