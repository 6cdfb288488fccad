//! Glue between the CLI and the library crates.
//!
//! Config discovery, logging setup, and the concurrent fetch pipeline.

pub(crate) mod logging;
pub(crate) mod pipeline;
pub(crate) mod settings;
