//! Autogen - configure-script stamper and forward-header generator
//!
//! Stamps license-gated `configure.sh`/`configure.bat` scripts for a
//! qmake-based C++ product and regenerates its `include/` tree of
//! forward headers and install manifests.

pub mod core;
pub mod headers;
pub mod ops;
pub mod util;

pub use crate::core::{AutogenError, Product, Template, NO_HANDLER_EXIT_CODE};
pub use ops::{autogen, create_project, generate_configure_scripts};
pub use util::config::Config;
