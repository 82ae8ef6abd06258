//! # CLI Layer
//!
//! The `aide` binary: one client of the library, not the application itself.
//!
//! This is the only place that:
//! - parses shell arguments (clap, in [`setup`])
//! - resolves the data directory and opens the collections
//! - writes to stdout/stderr (in [`print`])
//! - initialises logging
//!
//! Input shape is checked while parsing: dates must be `DD-MM-YYYY`, phones
//! and emails must validate, titles and names must not be blank. Anything
//! that reaches [`commands`] is well-formed, and business rules live in the
//! library's command layer.

mod commands;
mod print;
mod setup;

pub use commands::run;
