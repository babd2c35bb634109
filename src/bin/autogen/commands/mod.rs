//! Command implementations

pub mod completions;
pub mod configure;
pub mod headers;
pub mod products;
pub mod run;

use std::path::Path;

use anyhow::Result;

use autogen::ops::{AutogenOptions, AutogenReport, ProductSelector};
use autogen::util::{Config, Shell, Status};
use autogen::Product;

use crate::cli::GlobalArgs;

/// Everything a generating command needs.
pub struct Session {
    pub shell: Shell,
    pub config: Config,
    pub products: Vec<Product>,
    pub options: AutogenOptions,
}

impl Session {
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let shell = Shell::from_flags(args.quiet, args.verbose, args.color);
        let config = Config::load_from_dir(&args.source_dir)?;
        let products = config.products();

        Ok(Session {
            shell,
            config,
            products,
            options: AutogenOptions::new(&args.source_dir, &args.build_dir),
        })
    }

    /// Resolve the product from `--product`, `--repo-id` or `svn info`.
    pub fn select(&self, args: &GlobalArgs) -> Result<Product> {
        let selector = ProductSelector::from_args(args.product.clone(), args.repo_id.clone());
        let product = selector.resolve(&self.products, &self.options.source_dir)?;
        self.shell.status(
            Status::Selected,
            format!("{} v{} ({})", product.name, product.version, product.marker),
        );
        Ok(product)
    }

    /// Select the product and run the generators enabled in `options`.
    pub fn generate(self, args: &GlobalArgs, options: AutogenOptions) -> Result<()> {
        let product = self.select(args)?;
        let report = autogen::ops::autogen(&product, &self.config, &options)?;
        print_report(&self.shell, &report, &self.config.paths.include);
        self.shell
            .status(Status::Finished, format!("{} v{}", product.name, product.version));
        Ok(())
    }
}

fn print_report(shell: &Shell, report: &AutogenReport, include_dir: &Path) {
    if let Some(scripts) = &report.scripts {
        shell.status(Status::Created, scripts.unix.display());
        shell.status(Status::Created, scripts.windows.display());
    }

    if let Some(headers) = &report.headers {
        shell.status(
            Status::Generating,
            format!(
                "{} forward headers from {} headers ({} without exported classes)",
                headers.forward_headers, headers.headers_scanned, headers.fallbacks
            ),
        );
        if headers.headers_scanned == 0 {
            shell.warn("no candidate headers found");
        }
        for manifest in &headers.manifests {
            shell.note(format!(
                "{} installs {} files to {}",
                include_dir.join(manifest.relative_path()).display(),
                manifest.files().len(),
                manifest.install_path()
            ));
        }
    }
}
