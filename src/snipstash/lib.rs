//! # Snipstash Architecture
//!
//! Snipstash is a **UI-agnostic snippet vault**. The CLI is one client of
//! the library, not the other way around, and that distinction drives the
//! layering.
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
//! │  API Layer (api.rs)                 Bus (bus.rs)            │
//! │  - Thin facade over commands       - Capture/undo/delete   │
//! │  - Normalizes selector strings       ride a worker queue   │
//! │  - Returns structured results      - Worker owns its store │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic on Rust types, no I/O assumptions         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract VaultBackend trait                              │
//! │  - FileVault (production), InMemoryVault (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Write Paths
//!
//! Management commands (edit, tag, delete from the CLI) go through the
//! API facade to a store they borrow. The capture path instead sends a
//! typed request over the bus to a worker that owns its own store, which
//! serializes capture-side writes and gives the undo window something to
//! talk to. Both paths end at the same [`store::SnippetStore`].
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns
//! `Result<CmdResult>`, and never touches stdout, stderr, the process
//! exit code, or the terminal. The same core could back a daemon or a
//! browser-extension host.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for vault management
//! - [`bus`]: Request/response plumbing for the capture path
//! - [`capture`]: Selection validation and context extraction
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Snippet`, `SnippetPatch`)
//! - [`config`]: Configuration management
//! - [`editor`]: External editor integration
//! - [`clipboard`]: Cross-platform clipboard support
//! - [`error`]: Error types

pub mod api;
pub mod bus;
pub mod capture;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod model;
pub mod store;
