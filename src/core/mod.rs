//! Core data structures.
//!
//! - Products and dispatch
//! - Configure-script templates
//! - Error types

pub mod errors;
pub mod product;
pub mod template;

pub use errors::{AutogenError, NO_HANDLER_EXIT_CODE};
pub use product::{builtin_products, merge_products, Product};
pub use template::{LineEnding, Placeholders, Template};
