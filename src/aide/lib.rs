//! # Aide Architecture
//!
//! Aide is a personal assistant for the terminal: notes, tasks, contacts and
//! finance entries, each kept in its own JSON file, plus a small calculator.
//! The library holds all of the behaviour; the `aide` binary is a thin CLI
//! client on top of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, validates input shape, prints output   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Per-domain logic: filters, search, finance reports       │
//! │  - Returns CmdResult (records + messages), never prints     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Generic Collection<R: Record, B: StorageBackend>         │
//! │  - FileBackend (production), MemBackend (testing)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One Pattern, Four Collections
//!
//! Every collection behaves the same way: the full list is loaded once,
//! each mutation rewrites the whole file, ids are `max + 1`. The entity types
//! in [`model`] only add their fields, their edit rules and their CSV import
//! policy (see [`store::ImportPolicy`]).
//!
//! ## Module Overview
//!
//! - [`store`]: `Collection`, `Record`, storage backends, CSV helpers
//! - [`model`]: `Note`, `Task`, `Contact`, `FinanceRecord` and their update patches
//! - [`commands`]: business logic for each domain
//! - [`validation`]: phone and email predicates
//! - [`calc`]: arithmetic expression evaluator
//! - [`dates`]: date/timestamp formats and money rendering
//! - [`config`]: `config.json` handling
//! - [`error`]: error types

pub mod calc;
pub mod commands;
pub mod config;
pub mod dates;
pub mod error;
pub mod model;
pub mod store;
pub mod validation;
