//! # CLI Behavior
//!
//! One UI client for webnotes. Every verb works on the collection under
//! `--root` (default: the current directory).
//!
//! ## Selecting Sections
//!
//! Verbs that operate on existing sections share one set of selection flags:
//!
//! - `--dir DIR` / `--file FILE`: which files (default: all `*.wn` files)
//! - `--notes` / `--bookmarks`: which kind of section
//! - `--eq DIM=VALUE`: equality on `title`, `author`, any field, `body`,
//!   `host`, `note` or `url`
//! - `--match DIM=REGEX`: the same dimensions, as a regular expression
//! - `--any-tag a,b` / `--all-tags a,b`
//!
//! All given criteria must hold. No criteria selects every section.
//!
//! ## Output
//!
//! `matches` prints sections in canonical form (or JSON with `--json`),
//! `html` prints a page or writes it with `--out`. Everything else prints
//! colored status messages. Logs go to stderr: `-v` for debug, or
//! `WEBNOTES_LOG` with an `EnvFilter` directive.
//!
//! ## Module Structure
//!
//! - `commands`: Logging setup, context wiring and dispatch
//! - `render`: Output formatting
//! - `setup`: Argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
