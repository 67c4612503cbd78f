// sakpro/src/lib.rs
//! # sakpro CLI Application
//!
//! Thin command-line layer over `sakpro-core`: argument parsing, logging
//! setup, file I/O and summary output.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
