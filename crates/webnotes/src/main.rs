//! # Webnotes CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, and this file
//! only invokes `cli::run()` and turns a failure into `Error: ...` on stderr
//! with exit status 1.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/webnotes/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Logging, context wiring and dispatch (commands.rs)       │
//! │  - Terminal output (render.rs)                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  webnotesapp (crates/webnotesapp/)                          │
//! │  - API facade, commands, document model                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything user-facing happens here: flags become `Selection` and
//! `SectionValues`, results become colored messages, canonical section text
//! or an HTML page.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
