//! Product definitions and repository-based dispatch.

use serde::{Deserialize, Serialize};

use crate::core::template::Placeholders;

/// A library product this tool knows how to configure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Mixed-case product name, e.g. `KDChart`
    pub name: String,

    /// Version stamped into the configure scripts
    pub version: String,

    /// Substring of the repository identity that selects this product
    pub marker: String,

    /// Subprojects, each with its own `src/<name>` and `include/<name>`
    #[serde(default)]
    pub subprojects: Vec<String>,

    /// Install prefix pattern; defaults to `$$INSTALL_PREFIX/<name>`
    #[serde(default)]
    pub prefix: Option<String>,

    #[serde(default = "default_true")]
    pub installable: bool,

    #[serde(default = "default_true")]
    pub static_build: bool,

    /// Prepend the project name to `\file` names and copy headers flat
    #[serde(default = "default_true")]
    pub prefixed: bool,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Create a product with the default flags (everything on).
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        marker: impl Into<String>,
        subprojects: &[&str],
    ) -> Self {
        Product {
            name: name.into(),
            version: version.into(),
            marker: marker.into(),
            subprojects: subprojects.iter().map(|s| s.to_string()).collect(),
            prefix: None,
            installable: true,
            static_build: true,
            prefixed: true,
        }
    }

    /// Resolved install prefix.
    pub fn install_prefix(&self) -> String {
        self.prefix
            .clone()
            .unwrap_or_else(|| format!("$$INSTALL_PREFIX/{}", self.name))
    }

    /// Placeholder values for the configure-script templates.
    pub fn placeholders(&self) -> Placeholders {
        Placeholders::new(&self.name, &self.version)
            .with_installation(self.installable)
            .with_static_build(self.static_build)
    }

    /// Pick the first product, in priority order, whose marker occurs in
    /// `identity`.
    pub fn select<'a>(identity: &str, products: &'a [Product]) -> Option<&'a Product> {
        products
            .iter()
            .find(|p| !p.marker.is_empty() && identity.contains(&p.marker))
    }

    /// Look a product up by name, ignoring case.
    pub fn by_name<'a>(name: &str, products: &'a [Product]) -> Option<&'a Product> {
        products.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// The built-in products in dispatch priority order.
pub fn builtin_products() -> Vec<Product> {
    vec![
        Product::new(
            "KDSoap",
            "1.1.0",
            "products/kdsoap",
            &["KDSoapClient", "KDSoapServer"],
        ),
        Product::new("KDChart", "2.4.0", "products/kdchart", &["KDChart", "KDGantt"]),
        Product::new("KDReports", "1.3.0", "products/kdreports", &["KDReports"]),
    ]
}

/// Overlay configured products on a base list.
///
/// A product whose name matches an existing one replaces it in place so it
/// keeps that priority slot; others are appended.
pub fn merge_products(mut base: Vec<Product>, extra: Vec<Product>) -> Vec<Product> {
    for product in extra {
        match base
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(&product.name))
        {
            Some(slot) => *slot = product,
            None => base.push(product),
        }
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_by_marker() {
        let products = builtin_products();
        let identity = "URL: svn+ssh://svn.example.com/home/SVN-kdab/products/kdchart/trunk";

        let product = Product::select(identity, &products).unwrap();
        assert_eq!(product.name, "KDChart");
        assert_eq!(product.subprojects, vec!["KDChart", "KDGantt"]);
    }

    #[test]
    fn test_select_prefers_earlier_priority() {
        let products = builtin_products();
        let identity = "products/kdreports/branches/products/kdsoap-import";

        let product = Product::select(identity, &products).unwrap();
        assert_eq!(product.name, "KDSoap");
    }

    #[test]
    fn test_select_no_match() {
        assert!(Product::select("URL: https://example.com/other", &builtin_products()).is_none());
        assert!(Product::select("", &builtin_products()).is_none());
    }

    #[test]
    fn test_by_name_ignores_case() {
        let products = builtin_products();
        assert_eq!(Product::by_name("kdreports", &products).unwrap().version, "1.3.0");
        assert!(Product::by_name("KDFoo", &products).is_none());
    }

    #[test]
    fn test_install_prefix_default() {
        let products = builtin_products();
        assert_eq!(products[0].install_prefix(), "$$INSTALL_PREFIX/KDSoap");

        let mut custom = products[0].clone();
        custom.prefix = Some("/opt/kdsoap".to_string());
        assert_eq!(custom.install_prefix(), "/opt/kdsoap");
    }

    #[test]
    fn test_merge_products_replaces_in_place() {
        let mut chart = Product::new("kdchart", "3.0.0", "products/kdchart", &["KDChart"]);
        chart.prefixed = false;
        let extra = Product::new("KDFoo", "0.1.0", "products/kdfoo", &[]);

        let merged = merge_products(builtin_products(), vec![chart, extra]);

        assert_eq!(merged.len(), 4);
        assert_eq!(merged[1].version, "3.0.0");
        assert!(!merged[1].prefixed);
        assert_eq!(merged[3].name, "KDFoo");
    }

    #[test]
    fn test_deserialize_defaults() {
        let product: Product = toml::from_str(
            r#"
name = "KDFoo"
version = "1.0.0"
marker = "products/kdfoo"
"#,
        )
        .unwrap();

        assert!(product.subprojects.is_empty());
        assert!(product.installable);
        assert!(product.static_build);
        assert!(product.prefixed);
        assert_eq!(product.install_prefix(), "$$INSTALL_PREFIX/KDFoo");
    }
}
