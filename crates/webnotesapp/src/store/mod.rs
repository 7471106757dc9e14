//! # Storage Layer
//!
//! Webnotes are plain text files; there is no database and no cache. The
//! storage layer has two levels:
//!
//! - [`backend::StorageBackend`]: raw text I/O on paths relative to the
//!   collection root. [`fs_backend::FsBackend`] is the production
//!   implementation, [`mem_backend::MemBackend`] keeps everything in memory
//!   for tests.
//! - [`DocumentStore`]: a backend plus the parser and the serializer.
//!   Documents are always read and written whole.
//!
//! ## Storage Layout
//!
//! ```text
//! <root>/
//! ├── *.wn, **/*.wn        # Documents, anywhere in the tree
//! └── wn_index/            # Rebuilt by `webnotes index`, never scanned
//!     ├── authors/<md5>.wn
//!     ├── hosts/<md5>.wn
//!     ├── tags/<md5>.wn
//!     └── <category>/index
//! ```
//!
//! Writes on disk go to a temporary file that is then renamed over the target,
//! so a crash never leaves a half-written document behind.

pub mod backend;
pub mod document_store;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::StorageBackend;
pub use document_store::DocumentStore;
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;
