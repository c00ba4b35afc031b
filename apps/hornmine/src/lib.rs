//! # hornmine
//!
//! Command-line surface of hornmine: configuration, input documents and the
//! `index` / `score` commands. All scoring logic lives in `hornmine-core`.

pub mod cli;
pub mod config;
pub mod documents;
