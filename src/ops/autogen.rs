//! Product dispatch: pick a product, then stamp scripts and generate headers.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::{AutogenError, Product};
use crate::ops::configure_script::{generate_configure_scripts, GeneratedScripts, ScriptTemplates};
use crate::ops::forward_headers::{create_project, ForwardHeaderOptions, ForwardHeaderReport};
use crate::util::config::Config;
use crate::util::process::repository_identity;

/// How the product is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductSelector {
    /// Explicit product name
    Name(String),
    /// Repository identity text to search for product markers
    Identity(String),
    /// Run `svn info` in the source directory and use its output
    Repository,
}

impl ProductSelector {
    /// An explicit name wins over an identity string.
    pub fn from_args(product: Option<String>, repo_id: Option<String>) -> Self {
        match (product, repo_id) {
            (Some(name), _) => ProductSelector::Name(name),
            (None, Some(identity)) => ProductSelector::Identity(identity),
            (None, None) => ProductSelector::Repository,
        }
    }

    /// Resolve to one of `products`.
    pub fn resolve(&self, products: &[Product], source_dir: &Path) -> Result<Product> {
        match self {
            ProductSelector::Name(name) => Product::by_name(name, products)
                .cloned()
                .ok_or_else(|| {
                    AutogenError::UnknownProduct {
                        name: name.clone(),
                        known: products.iter().map(|p| p.name.clone()).collect(),
                    }
                    .into()
                }),
            ProductSelector::Identity(identity) => select_by_identity(identity, products),
            ProductSelector::Repository => {
                let identity = repository_identity(source_dir)?;
                select_by_identity(&identity, products)
            }
        }
    }
}

fn select_by_identity(identity: &str, products: &[Product]) -> Result<Product> {
    Product::select(identity, products).cloned().ok_or_else(|| {
        AutogenError::NoHandler {
            identity: identity.to_string(),
        }
        .into()
    })
}

/// Which generators to run and where.
#[derive(Debug, Clone)]
pub struct AutogenOptions {
    /// Product checkout holding `src/` and receiving `include/`
    pub source_dir: PathBuf,

    /// Where the configure scripts are written
    pub build_dir: PathBuf,

    pub scripts: bool,
    pub headers: bool,
}

impl AutogenOptions {
    pub fn new(source_dir: impl Into<PathBuf>, build_dir: impl Into<PathBuf>) -> Self {
        AutogenOptions {
            source_dir: source_dir.into(),
            build_dir: build_dir.into(),
            scripts: true,
            headers: true,
        }
    }

    pub fn scripts_only(mut self) -> Self {
        self.headers = false;
        self
    }

    pub fn headers_only(mut self) -> Self {
        self.scripts = false;
        self
    }
}

/// Outcome of [`autogen`].
#[derive(Debug, Clone)]
pub struct AutogenReport {
    pub product: Product,
    pub scripts: Option<GeneratedScripts>,
    pub headers: Option<ForwardHeaderReport>,
}

/// Stamp the configure scripts, then regenerate the forward headers.
///
/// Header preconditions are checked before any file is written.
pub fn autogen(product: &Product, config: &Config, opts: &AutogenOptions) -> Result<AutogenReport> {
    let header_opts = ForwardHeaderOptions::for_product(product, &opts.source_dir, &config.paths);
    if opts.headers {
        header_opts.check()?;
    }

    let scripts = if opts.scripts {
        let templates_dir = config.templates_dir(&opts.source_dir);
        let templates = ScriptTemplates::from_dir_or_builtin(templates_dir.as_deref())?;
        Some(generate_configure_scripts(
            &opts.build_dir,
            &product.placeholders(),
            &templates,
        )?)
    } else {
        None
    };

    let headers = if opts.headers {
        Some(create_project(&header_opts)?)
    } else {
        None
    };

    Ok(AutogenReport {
        product: product.clone(),
        scripts,
        headers,
    })
}
