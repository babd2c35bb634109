//! `autogen products` command
//!
//! Prints one product per line in dispatch priority order.

use anyhow::Result;

use autogen::util::Config;
use autogen::Product;

use crate::cli::GlobalArgs;

pub fn format_product(product: &Product) -> String {
    let subprojects = if product.subprojects.is_empty() {
        "-".to_string()
    } else {
        product.subprojects.join(",")
    };
    format!(
        "{}\t{}\t{}\t{}",
        product.name, product.version, product.marker, subprojects
    )
}

pub fn execute(args: &GlobalArgs) -> Result<()> {
    let config = Config::load_from_dir(&args.source_dir)?;
    for product in config.products() {
        println!("{}", format_product(&product));
    }
    Ok(())
}
