//! Resume revision storage.
//!
//! Profiles are stored as append-only rows of JSON documents. The
//! [`ResumeStore`] trait abstracts over the row backend: a PostgREST
//! gateway in production, an in-memory vector in tests.

#![warn(missing_docs)]

mod memory;
mod rest;
mod trait_;

pub use memory::MemoryResumeStore;
pub use rest::RestResumeStore;
pub use trait_::{Result, ResumeRow, ResumeStore, StoreError};
