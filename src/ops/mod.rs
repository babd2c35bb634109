//! High-level operations.
//!
//! This module contains the implementation of autogen commands.

pub mod autogen;
pub mod configure_script;
pub mod forward_headers;

pub use autogen::{autogen, AutogenOptions, AutogenReport, ProductSelector};
pub use configure_script::{generate_configure_scripts, GeneratedScripts, ScriptTemplates};
pub use forward_headers::{create_project, ForwardHeaderOptions, ForwardHeaderReport};
