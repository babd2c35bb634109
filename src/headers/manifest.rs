//! qmake project-file fragments describing header installation.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::util::fs::write_string;

/// An install manifest for one (sub)project.
///
/// Filled while scanning and rendered once at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    name: String,
    /// `Some` for the top-level manifest, which lists subprojects
    subdirs: Option<Vec<String>>,
    files: Vec<String>,
    install_path: String,
}

impl Manifest {
    /// The top-level manifest of a product.
    pub fn top_level(
        name: impl Into<String>,
        subdirs: &[String],
        install_path: impl Into<String>,
    ) -> Self {
        Manifest {
            name: name.into(),
            subdirs: Some(subdirs.to_vec()),
            files: Vec::new(),
            install_path: install_path.into(),
        }
    }

    /// The manifest of one subproject.
    pub fn subproject(name: impl Into<String>, install_path: impl Into<String>) -> Self {
        Manifest {
            name: name.into(),
            subdirs: None,
            files: Vec::new(),
            install_path: install_path.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn install_path(&self) -> &str {
        &self.install_path
    }

    /// Installed file names, in insertion order.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// File name of the manifest, e.g. `KDChart.pro`.
    pub fn file_name(&self) -> String {
        format!("{}.pro", self.name)
    }

    /// Location of the manifest inside the include tree: `<name>.pro` for
    /// the top level, `<name>/<name>.pro` for a subproject.
    pub fn relative_path(&self) -> PathBuf {
        if self.subdirs.is_some() {
            PathBuf::from(self.file_name())
        } else {
            Path::new(&self.name).join(self.file_name())
        }
    }

    pub fn push(&mut self, file: impl Into<String>) {
        self.files.push(file.into());
    }

    /// Record a header together with the forward header generated for it.
    pub fn push_forward(&mut self, header: &str, symbol: &str) {
        self.push(header);
        self.push(symbol);
    }

    /// Render the `.pro` text.
    pub fn render(&self) -> String {
        let mut out = String::from("TEMPLATE = subdirs\n");

        if let Some(subdirs) = &self.subdirs {
            out.push_str("SUBDIRS = ");
            for (i, subdir) in subdirs.iter().enumerate() {
                out.push_str(subdir);
                if i + 1 < subdirs.len() {
                    out.push_str(" \\");
                }
                out.push('\n');
            }
            out.push('\n');
        }

        out.push_str("INSTALL_HEADERS.files = ");
        for file in &self.files {
            out.push_str(file);
            out.push_str(" \\\n");
        }

        out.push('\n');
        out.push_str("message( $$INSTALL_HEADERS.path )\n");
        out.push_str(&format!("INSTALL_HEADERS.path = {}\n", self.install_path));
        out.push_str("message( $$INSTALL_HEADERS.path )\n");
        out.push_str("INSTALLS += INSTALL_HEADERS\n");
        out
    }

    /// Write the rendered manifest into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        write_string(&dir.join(self.file_name()), &self.render())
    }
}
