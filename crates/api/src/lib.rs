//! HTTP binding to the career backend.
//!
//! All heavy lifting (resume parsing, AI suggestion and generation,
//! persistence of roadmaps) lives server-side; this crate only speaks the
//! backend's JSON contract and normalizes its failures into [`ApiError`].

#![warn(missing_docs)]

mod client;
mod error;

pub use client::{BackendClient, GeneratedRoadmaps, ParsedResume, DEFAULT_TIMEOUT};
pub use error::{ApiError, Result};
