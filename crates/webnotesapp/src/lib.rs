//! # Webnotes Architecture
//!
//! Webnotes keeps notes and annotated bookmarks in plain-text `.wn` files that
//! read well in any editor and diff well in version control. This crate is the
//! library; the `webnotes` binary is one client of it.
//!
//! ## The File Grammar
//!
//! ```text
//! # note://shopping_list          <- a note, identified by its note-string
//! title: Shopping
//! tags: errands,home
//!
//! - milk                          <- body, free text (Markdown)
//!
//! # https://docs.rs/regex         <- a bookmark, identified by its url
//! title: regex
//! author: BurntSushi
//! ```
//!
//! A file is a sequence of sections. Each section has a header line, then
//! `name: value` field lines, then a blank line and the body. See
//! [`parser`] and [`serializer`] for the exact rules.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (webnotes binary)                                      │
//! │  - Parses flags into selections and values, prints results  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - One method per verb, returns CmdResult                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Select, mutate and save sections                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Document Layer                                             │
//! │  - model, parser, serializer, matcher, index                │
//! │  - DocumentStore over a StorageBackend (fs or memory)       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing from `api.rs` inward writes to stdout or stderr or exits the
//! process. Diagnostics go through `tracing`; the binary decides where they
//! end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per verb
//! - [`model`]: `Field`, `Section`, `Document`
//! - [`parser`] / [`serializer`]: Text to documents and back
//! - [`matcher`]: Section selection predicates
//! - [`index`]: The rebuildable secondary index
//! - [`enrich`]: Fetching and extracting page content for bookmarks
//! - [`markdown`]: Body rendering for the `html` verb
//! - [`store`]: Storage abstraction and implementations
//! - [`config`] / [`init`]: Configuration and wiring
//! - [`tags`]: Tag validation
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod enrich;
pub mod error;
pub mod index;
pub mod init;
pub mod markdown;
pub mod matcher;
pub mod model;
pub mod parser;
pub mod serializer;
pub mod store;
pub mod tags;
