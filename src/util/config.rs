//! Configuration file support.
//!
//! An optional `autogen.toml` in the product checkout can relocate the
//! source and include trees, point at replacement script templates, and
//! add or override products:
//!
//! ```toml
//! [paths]
//! include = "include"
//! src = "src"
//! templates = "buildsystem"
//!
//! [[products]]
//! name = "KDFoo"
//! version = "1.0.0"
//! marker = "products/kdfoo"
//! subprojects = ["KDFoo"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::product::{builtin_products, merge_products, Product};

/// Name of the configuration file looked up in the source directory.
pub const CONFIG_FILE: &str = "autogen.toml";

/// Autogen configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory layout
    pub paths: PathsConfig,

    /// Extra or overriding product definitions
    pub products: Vec<Product>,
}

/// Directory layout relative to the source directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Include tree to regenerate
    pub include: PathBuf,

    /// Sources to scan
    pub src: PathBuf,

    /// Directory holding `configure.sh.in` and `configure.bat.in`
    pub templates: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            include: PathBuf::from("include"),
            src: PathBuf::from("src"),
            templates: None,
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load `autogen.toml` from `dir`, or defaults if there is none.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            tracing::debug!("loading config from {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Built-in products with the configured ones merged in, in priority order.
    pub fn products(&self) -> Vec<Product> {
        merge_products(builtin_products(), self.products.clone())
    }

    /// Template directory resolved against `base`.
    pub fn templates_dir(&self, base: &Path) -> Option<PathBuf> {
        self.paths.templates.as_ref().map(|dir| base.join(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_from_dir(tmp.path()).unwrap();

        assert_eq!(config.paths, PathsConfig::default());
        assert_eq!(config.products().len(), 3);
        assert!(config.templates_dir(tmp.path()).is_none());
    }

    #[test]
    fn test_parse_paths_and_products() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[paths]
src = "source"
templates = "buildsystem"

[[products]]
name = "KDFoo"
version = "0.9.0"
marker = "products/kdfoo"
subprojects = ["KDFooCore"]
static_build = false
"#,
        )
        .unwrap();

        let config = Config::load_from_dir(tmp.path()).unwrap();

        assert_eq!(config.paths.src, PathBuf::from("source"));
        assert_eq!(config.paths.include, PathBuf::from("include"));
        assert_eq!(
            config.templates_dir(tmp.path()),
            Some(tmp.path().join("buildsystem"))
        );

        let products = config.products();
        assert_eq!(products.len(), 4);
        let foo = Product::by_name("KDFoo", &products).unwrap();
        assert!(!foo.static_build);
        assert_eq!(foo.subprojects, vec!["KDFooCore"]);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "[[products]]\nname = 3\n").unwrap();

        let err = Config::load_from_dir(tmp.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to parse config"));
    }
}
