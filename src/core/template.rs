//! Configure-script templates and placeholder substitution.
//!
//! A template is a list of lines containing `@TOKEN@` placeholders. Stamping
//! replaces every known token on every line and leaves anything else alone,
//! so an unknown `@FOO@` passes through verbatim.

use std::path::Path;

use anyhow::{Context, Result};

/// Built-in Unix shell template.
pub const CONFIGURE_SH_IN: &str = include_str!("../templates/configure.sh.in");

/// Built-in Windows batch template.
pub const CONFIGURE_BAT_IN: &str = include_str!("../templates/configure.bat.in");

/// Line terminator used when rendering a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Values substituted into a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    /// Product name as written, e.g. `KDReports`.
    pub product: String,
    pub version: String,
    pub installation_supported: bool,
    pub static_build_supported: bool,
}

impl Placeholders {
    pub fn new(product: impl Into<String>, version: impl Into<String>) -> Self {
        Placeholders {
            product: product.into(),
            version: version.into(),
            installation_supported: true,
            static_build_supported: true,
        }
    }

    pub fn with_installation(mut self, supported: bool) -> Self {
        self.installation_supported = supported;
        self
    }

    pub fn with_static_build(mut self, supported: bool) -> Self {
        self.static_build_supported = supported;
        self
    }

    /// The product name with a space after every `KD`, e.g. `KD Reports`.
    pub fn spaced_name(&self) -> String {
        self.product.replace("KD", "KD ")
    }

    /// `(token, value)` pairs in substitution order.
    pub fn substitutions(&self) -> Vec<(&'static str, String)> {
        vec![
            ("@VERSION@", self.version.clone()),
            ("@PRODUCT_UPPERCASE@", self.product.to_uppercase()),
            ("@PRODUCT_LOWERCASE@", self.product.to_lowercase()),
            ("@PRODUCT_MIXEDCASE@", self.product.clone()),
            ("@PRODUCT_MIXEDCASE_SPACED@", self.spaced_name()),
            (
                "@INSTALLATION_SUPPORTED@",
                bool_token(self.installation_supported).to_string(),
            ),
            (
                "@STATIC_BUILD_SUPPORTED@",
                bool_token(self.static_build_supported).to_string(),
            ),
        ]
    }

    /// Substitute every known token in a single line.
    pub fn apply(&self, line: &str) -> String {
        let mut value = line.to_string();
        for (token, replacement) in self.substitutions() {
            value = value.replace(token, &replacement);
        }
        value
    }
}

fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// An ordered sequence of template lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    lines: Vec<String>,
}

impl Template {
    /// Split text into lines, dropping trailing whitespace from each.
    pub fn parse(text: &str) -> Self {
        Template {
            lines: text.lines().map(|l| l.trim_end().to_string()).collect(),
        }
    }

    /// Load a template from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read template: {}", path.display()))?;
        Ok(Self::parse(&text))
    }

    /// The embedded `configure.sh.in`.
    pub fn unix() -> Self {
        Self::parse(CONFIGURE_SH_IN)
    }

    /// The embedded `configure.bat.in`.
    pub fn windows() -> Self {
        Self::parse(CONFIGURE_BAT_IN)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Stamp every line and terminate each with `ending`.
    pub fn render(&self, values: &Placeholders, ending: LineEnding) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&values.apply(line));
            out.push_str(ending.as_str());
        }
        out
    }
}
