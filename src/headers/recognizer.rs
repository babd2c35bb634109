//! Export-declaration recognizer.
//!
//! Maps one trimmed header line to the symbol it exports, if any. Matchers
//! are tried in order and the first hit wins:
//!
//! 1. `class <PROJECT>[_0-9A-Z]*_EXPORT Name` for the scanned (sub)project
//!    or the product
//! 2. `class MAKEINCLUDES_EXPORT Name`
//! 3. a `\file Name` documentation tag anywhere on the line
//!
//! Only `\file` names take the project prefix in prefixed mode.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

use crate::util::fs::read_lossy;

const IDENT: &str = r"([a-zA-Z_][A-Za-z0-9_]*)";

/// A symbol found on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognized {
    pub name: String,
    /// Whether the project prefix is applied in prefixed mode
    pub prefix_applies: bool,
}

/// Which declaration form a matcher recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    ProjectExport,
    GenericExport,
    FileTag,
}

#[derive(Debug)]
struct Matcher {
    kind: MatchKind,
    regex: Regex,
    prefix_applies: bool,
}

impl Matcher {
    fn new(kind: MatchKind, pattern: &str, prefix_applies: bool) -> Result<Self> {
        let regex = Regex::new(pattern)
            .with_context(|| format!("invalid {:?} pattern: {}", kind, pattern))?;
        Ok(Matcher {
            kind,
            regex,
            prefix_applies,
        })
    }

    fn match_line(&self, line: &str) -> Option<Recognized> {
        let caps = self.regex.captures(line)?;
        Some(Recognized {
            name: caps.get(1)?.as_str().to_string(),
            prefix_applies: self.prefix_applies,
        })
    }
}

/// Ordered list of line matchers for one (sub)project.
#[derive(Debug)]
pub struct Recognizer {
    matchers: Vec<Matcher>,
}

impl Recognizer {
    /// Build the matchers for headers of `project`, which belongs to `product`.
    pub fn new(project: &str, product: &str) -> Result<Self> {
        let project_export = format!(
            r"^class\s+(?:{}|{})[_0-9A-Z]*_EXPORT\s+{}",
            regex::escape(&project.to_uppercase()),
            regex::escape(&product.to_uppercase()),
            IDENT
        );
        let generic_export = format!(r"^class\s+MAKEINCLUDES_EXPORT\s+{}", IDENT);
        let file_tag = format!(r"\\file\s+{}", IDENT);

        Ok(Recognizer {
            matchers: vec![
                Matcher::new(MatchKind::ProjectExport, &project_export, false)?,
                Matcher::new(MatchKind::GenericExport, &generic_export, false)?,
                Matcher::new(MatchKind::FileTag, &file_tag, true)?,
            ],
        })
    }

    /// The declaration forms in the order they are tried.
    pub fn kinds(&self) -> Vec<MatchKind> {
        self.matchers.iter().map(|m| m.kind).collect()
    }

    /// Recognize a line. Surrounding whitespace is ignored.
    pub fn recognize(&self, line: &str) -> Option<Recognized> {
        let line = line.trim();
        self.matchers.iter().find_map(|m| m.match_line(line))
    }

    /// Collect the forward-header names a header's content suggests.
    ///
    /// With `prefix` set, names whose matcher allows it get the prefix
    /// prepended.
    pub fn suggested_names(&self, content: &str, prefix: Option<&str>) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for line in content.lines() {
            let Some(found) = self.recognize(line) else {
                continue;
            };
            let name = match prefix {
                Some(prefix) if found.prefix_applies => format!("{}{}", prefix, found.name),
                _ => found.name,
            };
            names.insert(name);
        }
        names
    }
}

/// Read a header and return its suggested forward-header names.
pub fn suggested_header_names(
    recognizer: &Recognizer,
    header: &Path,
    prefix: Option<&str>,
) -> Result<BTreeSet<String>> {
    let content = read_lossy(header)?;
    Ok(recognizer.suggested_names(&content, prefix))
}
