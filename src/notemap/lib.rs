//! # Notemap Architecture
//!
//! Notemap is a **UI-agnostic vault engine**. This is not a CLI application that
//! happens to have some library code—it's a library that happens to have a CLI
//! client. The library maintains a structured view over a directory tree of
//! Markdown notes: front-matter and body, addressable sections, link and tag
//! references, the bidirectional link graph, and folder-to-template mappings.
//!
//! ## The Layered Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic per operation                             │
//! │  - Generic over the store, no I/O assumptions               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract VaultStore trait                                │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Text Engines
//!
//! Underneath the command layer sit four pure engines with no storage
//! dependency at all:
//!
//! - [`markdown::sections`]: fence-aware section tokenizer and its inverse
//! - [`markdown::extract`]: link and inline-tag reference extraction
//! - [`resolve`]: link-target normalization against the known path set
//! - [`pattern`]: wildcard folder-pattern matching with specificity ranking
//!
//! Every derived view (sections, tags, the graph) is recomputed from the
//! current on-disk state per call. The only durable state the engine owns is
//! the folder-template mapping, rewritten as a whole JSON document on every
//! mutation.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, commands, engines, storage), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<T>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Metadata`, `Section`, `Graph`)
//! - [`frontmatter`]: Front-matter split/serialize
//! - [`markdown`]: Section tokenizer and reference extraction
//! - [`resolve`]: Link-target normalization
//! - [`pattern`]: Folder wildcard patterns and template precedence
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod error;
pub mod frontmatter;
pub mod markdown;
pub mod model;
pub mod pattern;
pub mod resolve;
pub mod store;
