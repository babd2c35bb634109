//! Forward-header building blocks.
//!
//! - Candidate classification of header file names
//! - Export-declaration recognition
//! - Install manifests

pub mod classify;
pub mod manifest;
pub mod recognizer;

pub use classify::{fallback_name, is_candidate_header};
pub use manifest::Manifest;
pub use recognizer::{suggested_header_names, MatchKind, Recognized, Recognizer};
