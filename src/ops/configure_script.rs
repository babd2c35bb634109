//! Configure-script stamping.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::{LineEnding, Placeholders, Template};
use crate::util::fs::{set_executable, write_string};

pub const UNIX_SCRIPT: &str = "configure.sh";
pub const WINDOWS_SCRIPT: &str = "configure.bat";

pub const UNIX_TEMPLATE: &str = "configure.sh.in";
pub const WINDOWS_TEMPLATE: &str = "configure.bat.in";

/// The pair of templates to stamp.
#[derive(Debug, Clone)]
pub struct ScriptTemplates {
    pub unix: Template,
    pub windows: Template,
}

impl ScriptTemplates {
    /// The templates embedded in the binary.
    pub fn builtin() -> Self {
        ScriptTemplates {
            unix: Template::unix(),
            windows: Template::windows(),
        }
    }

    /// Load `configure.sh.in` and `configure.bat.in` from `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(ScriptTemplates {
            unix: Template::load(&dir.join(UNIX_TEMPLATE))?,
            windows: Template::load(&dir.join(WINDOWS_TEMPLATE))?,
        })
    }

    /// Load from `dir` if given, otherwise use the built-ins.
    pub fn from_dir_or_builtin(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Self::load(dir),
            None => Ok(Self::builtin()),
        }
    }
}

/// Paths of the generated scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedScripts {
    pub unix: PathBuf,
    pub windows: PathBuf,
}

/// Write `configure.sh` and `configure.bat` into `dir`.
pub fn generate_configure_scripts(
    dir: &Path,
    values: &Placeholders,
    templates: &ScriptTemplates,
) -> Result<GeneratedScripts> {
    let unix = dir.join(UNIX_SCRIPT);
    write_string(&unix, &templates.unix.render(values, LineEnding::Lf))?;
    set_executable(&unix)?;
    tracing::debug!("wrote {}", unix.display());

    let windows = dir.join(WINDOWS_SCRIPT);
    write_string(&windows, &templates.windows.render(values, LineEnding::CrLf))?;
    tracing::debug!("wrote {}", windows.display());

    Ok(GeneratedScripts { unix, windows })
}
