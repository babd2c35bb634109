//! Forward-header generation.
//!
//! Scans `src/` and each `src/<subproject>/` for public headers, and writes
//! into a freshly recreated `include/` tree:
//!
//! - one redirect header per exported class, named after the class
//! - a fallback redirect for headers that export nothing
//! - one qmake `.pro` manifest per subproject plus a top-level one
//!
//! Runs are not safe to overlap on the same checkout: the include tree is
//! removed up front.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::{AutogenError, Product};
use crate::headers::{
    fallback_name, is_candidate_header, suggested_header_names, Manifest, Recognizer,
};
use crate::util::config::PathsConfig;
use crate::util::fs::{
    copy_file, create_dir, list_dir_sorted, resolve_path, write_string, RecreatedDir,
};

/// Options for [`create_project`].
#[derive(Debug, Clone)]
pub struct ForwardHeaderOptions {
    /// Product checkout; must exist
    pub source_root: PathBuf,

    /// Include tree to regenerate
    pub include_dir: PathBuf,

    /// Directory holding the sources and one directory per subproject
    pub src_dir: PathBuf,

    /// Product name
    pub project: String,

    pub subprojects: Vec<String>,

    /// Install prefix; headers go to `<prefix>/include[/<subproject>]`
    pub prefix: String,

    /// Prefix `\file` names with the project and copy headers flat
    pub prefixed: bool,
}

impl ForwardHeaderOptions {
    /// Options for a product checked out at `source_root`.
    pub fn for_product(product: &Product, source_root: &Path, paths: &PathsConfig) -> Self {
        ForwardHeaderOptions {
            source_root: source_root.to_path_buf(),
            include_dir: source_root.join(&paths.include),
            src_dir: source_root.join(&paths.src),
            project: product.name.clone(),
            subprojects: product.subprojects.clone(),
            prefix: product.install_prefix(),
            prefixed: product.prefixed,
        }
    }

    /// Fail unless the source root exists and regenerating the include
    /// tree cannot remove any part of it.
    pub fn check(&self) -> Result<()> {
        if !self.source_root.exists() {
            return Err(AutogenError::MissingSourceRoot {
                path: self.source_root.clone(),
            }
            .into());
        }

        let include = resolve_path(&self.include_dir)?;
        let protected = [self.source_root.clone(), self.src_dir.clone()]
            .into_iter()
            .chain(self.subprojects.iter().map(|sub| self.src_dir.join(sub)));
        for path in protected {
            if resolve_path(&path)?.starts_with(&include) {
                return Err(AutogenError::UnsafeIncludeDir {
                    include: self.include_dir.clone(),
                    protected: path,
                }
                .into());
            }
        }
        Ok(())
    }
}

/// What a run produced.
#[derive(Debug, Clone, Default)]
pub struct ForwardHeaderReport {
    /// Subproject manifests in order, then the top-level manifest
    pub manifests: Vec<Manifest>,
    pub headers_scanned: usize,
    /// Forward headers written for discovered symbols
    pub forward_headers: usize,
    /// Headers that exported nothing and got a fallback
    pub fallbacks: usize,
}

impl ForwardHeaderReport {
    /// The top-level manifest.
    pub fn top_level(&self) -> Option<&Manifest> {
        self.manifests.last()
    }

    pub fn manifest(&self, name: &str) -> Option<&Manifest> {
        self.manifests.iter().find(|m| m.name() == name)
    }
}

/// Regenerate the include tree.
pub fn create_project(opts: &ForwardHeaderOptions) -> Result<ForwardHeaderReport> {
    opts.check()?;

    let include = RecreatedDir::acquire(&opts.include_dir)?;
    let mut generator = Generator::new(opts);

    for subproject in &opts.subprojects {
        generator.create_subproject(subproject)?;
    }

    generator.scan(&opts.src_dir, &opts.include_dir, &opts.project, true, None)?;
    generator.top.write_to(&opts.include_dir)?;

    include.commit();
    Ok(generator.finish())
}

struct Generator<'a> {
    opts: &'a ForwardHeaderOptions,
    top: Manifest,
    report: ForwardHeaderReport,
}

impl<'a> Generator<'a> {
    fn new(opts: &'a ForwardHeaderOptions) -> Self {
        Generator {
            opts,
            top: Manifest::top_level(
                &opts.project,
                &opts.subprojects,
                format!("{}/include", opts.prefix),
            ),
            report: ForwardHeaderReport::default(),
        }
    }

    fn finish(mut self) -> ForwardHeaderReport {
        self.report.manifests.push(self.top);
        self.report
    }

    fn create_subproject(&mut self, subproject: &str) -> Result<()> {
        let include_dir = self.opts.include_dir.join(subproject);
        let src_dir = self.opts.src_dir.join(subproject);
        create_dir(&include_dir)?;

        let mut manifest = Manifest::subproject(
            subproject,
            format!("{}/include/{}", self.opts.prefix, subproject),
        );
        self.scan(&src_dir, &include_dir, subproject, false, Some(&mut manifest))?;
        manifest.write_to(&include_dir)?;

        self.report.manifests.push(manifest);
        Ok(())
    }

    /// Process the candidate headers directly inside `src_dir`.
    ///
    /// `current` is the manifest being filled; `None` means the top-level one.
    fn scan(
        &mut self,
        src_dir: &Path,
        dest_dir: &Path,
        project: &str,
        is_root: bool,
        mut current: Option<&mut Manifest>,
    ) -> Result<()> {
        let recognizer = Recognizer::new(project, &self.opts.project)?;

        for entry in list_dir_sorted(src_dir)? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_root && self.opts.subprojects.contains(&name) {
                continue;
            }
            if entry.path().is_dir() || !is_candidate_header(&name) {
                continue;
            }

            // Forward headers include the copy, never the source file.
            let header = dest_dir.join(&name);
            copy_file(entry.path(), &header)?;

            self.create_forward_header(&header, dest_dir, project, &recognizer, &mut current)?;
        }

        Ok(())
    }

    fn record(&mut self, current: &mut Option<&mut Manifest>, file: &str) {
        match current {
            Some(manifest) => manifest.push(file),
            None => self.top.push(file),
        }
    }

    fn create_forward_header(
        &mut self,
        header: &Path,
        dest_dir: &Path,
        project: &str,
        recognizer: &Recognizer,
        current: &mut Option<&mut Manifest>,
    ) -> Result<()> {
        let opts = self.opts;
        let basename = header
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let prefix = opts.prefixed.then_some(project);
        let symbols = suggested_header_names(recognizer, header, prefix)?;

        tracing::info!("Parsing file: {} (Project: {})", header.display(), project);
        self.report.headers_scanned += 1;

        // Subproject scans also feed the flat top-level include directory.
        let nested = dest_dir != opts.include_dir.as_path();
        let flat = opts.prefixed && nested;
        let redirect = format!("#include \"{}\"\n", basename);

        for symbol in &symbols {
            if opts.prefixed {
                copy_file(header, &opts.include_dir.join(&basename))?;
            }
            if flat {
                self.top.push_forward(&basename, symbol);
                write_string(&opts.include_dir.join(symbol), &redirect)?;
            }

            write_string(&dest_dir.join(symbol), &redirect)?;
            self.record(current, &basename);
            self.record(current, symbol);
            self.report.forward_headers += 1;

            tracing::info!("  Forward header generated for {}", symbol);
        }

        if symbols.is_empty() {
            tracing::info!("  No input classes found. No forward header generated.");

            if opts.prefixed {
                copy_file(header, &opts.include_dir.join(&basename))?;
                self.top.push(&basename);
            }

            let fallback = fallback_name(&basename).to_string();
            write_string(&opts.include_dir.join(&fallback), &redirect)?;
            if nested {
                write_string(
                    &dest_dir.join(&fallback),
                    &format!("#include \"../{}\"\n", basename),
                )?;
            }

            self.record(current, &fallback);
            if flat {
                self.top.push(&fallback);
            }
            self.report.fallbacks += 1;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;
    use walkdir::WalkDir;

    fn options(root: &Path, subprojects: &[&str], prefixed: bool) -> ForwardHeaderOptions {
        ForwardHeaderOptions {
            source_root: root.to_path_buf(),
            include_dir: root.join("include"),
            src_dir: root.join("src"),
            project: "KDChart".to_string(),
            subprojects: subprojects.iter().map(|s| s.to_string()).collect(),
            prefix: "$$INSTALL_PREFIX/KDChart".to_string(),
            prefixed,
        }
    }

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn read(root: &Path, rel: &str) -> String {
        fs::read_to_string(root.join(rel)).unwrap()
    }

    fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
        WalkDir::new(dir)
            .into_iter()
            .map(|e| e.unwrap())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let rel = e.path().strip_prefix(dir).unwrap().to_path_buf();
                (rel, fs::read(e.path()).unwrap())
            })
            .collect()
    }

    fn chart_tree(root: &Path) {
        write(
            root,
            "src/KDGantt/kdganttview.h",
            "#include \"kdgantt_export.h\"\nclass KDGANTT_EXPORT View : public QWidget\n{\n};\n",
        );
        write(
            root,
            "src/KDGantt/kdganttglobal.h",
            "#ifndef KDGANTTGLOBAL_H\n#define KDGANTTGLOBAL_H\n#endif\n",
        );
        write(root, "src/KDGantt/kdganttview_p.h", "class KDGANTT_EXPORT Hidden;\n");
        write(root, "src/KDGantt/moc_kdganttview.h", "class KDGANTT_EXPORT Moc;\n");
        write(root, "src/KDGantt/nested/deep.h", "class KDGANTT_EXPORT Deep;\n");
        write(root, "src/KDChart/KDChartWidget.h", "class KDCHART_EXPORT Widget {};\n");
        write(root, "src/toplevel.h", "/** \\file Toplevel */\n");
        write(root, "src/toplevel.cpp", "int x;\n");
    }

    #[test]
    fn test_missing_source_root_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let opts = options(&tmp.path().join("missing"), &[], true);

        let err = create_project(&opts).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AutogenError>(),
            Some(AutogenError::MissingSourceRoot { .. })
        ));
        assert!(!tmp.path().join("missing").exists());
    }

    #[test]
    fn test_include_dir_covering_sources_is_refused() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        chart_tree(root);

        let unsafe_dirs = [
            root.join("src"),
            root.join("."),
            root.join("src/KDGantt"),
            root.join("include/../src"),
            root.parent().unwrap().to_path_buf(),
        ];
        for include in unsafe_dirs {
            let mut opts = options(root, &["KDChart", "KDGantt"], true);
            opts.include_dir = include;

            let err = create_project(&opts).unwrap_err();
            assert!(
                matches!(
                    err.downcast_ref::<AutogenError>(),
                    Some(AutogenError::UnsafeIncludeDir { .. })
                ),
                "include dir {:?} was accepted",
                opts.include_dir
            );
        }

        assert!(root.join("src/KDGantt/kdganttview.h").exists());
        assert!(root.join("src/toplevel.h").exists());
        assert!(!root.join("include").exists());
    }

    #[test]
    fn test_include_dir_beside_sources_is_accepted() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        chart_tree(root);
        let mut opts = options(root, &["KDChart", "KDGantt"], true);
        opts.include_dir = root.join("build/include");
        fs::create_dir_all(root.join("build")).unwrap();

        opts.check().unwrap();
        create_project(&opts).unwrap();

        assert!(root.join("build/include/KDGantt/View").exists());
    }

    #[test]
    fn test_subproject_forward_headers_resolve_in_tree() {
        for prefixed in [true, false] {
            let tmp = TempDir::new().unwrap();
            let root = tmp.path();
            chart_tree(root);

            create_project(&options(root, &["KDChart", "KDGantt"], prefixed)).unwrap();

            let gantt = root.join("include/KDGantt");
            assert_eq!(read(&gantt, "View"), "#include \"kdganttview.h\"\n");
            assert!(gantt.join("kdganttview.h").exists());
            assert!(gantt.join("kdganttglobal.h").exists());
            assert!(!root.join("src/KDGantt/kdganttglobal").exists());
            if prefixed {
                // The sibling fallback reaches the flat copy.
                assert!(gantt.join("../kdganttglobal.h").exists());
            }
        }
    }

    #[test]
    fn test_subproject_symbols_get_forward_headers() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        chart_tree(root);

        let report = create_project(&options(root, &["KDChart", "KDGantt"], true)).unwrap();

        assert_eq!(read(root, "include/KDGantt/View"), "#include \"kdganttview.h\"\n");
        assert_eq!(read(root, "include/View"), "#include \"kdganttview.h\"\n");
        assert_eq!(
            read(root, "include/KDGantt/kdganttview.h"),
            read(root, "src/KDGantt/kdganttview.h")
        );
        assert_eq!(
            read(root, "include/kdganttview.h"),
            read(root, "src/KDGantt/kdganttview.h")
        );
        assert_eq!(read(root, "include/KDChart/Widget"), "#include \"KDChartWidget.h\"\n");

        let gantt = report.manifest("KDGantt").unwrap();
        assert_eq!(
            gantt.install_path(),
            "$$INSTALL_PREFIX/KDChart/include/KDGantt"
        );
        assert!(gantt.files().contains(&"View".to_string()));
        assert!(root.join("include/KDGantt/KDGantt.pro").exists());
        assert!(root.join("include/KDChart/KDChart.pro").exists());
        assert!(root.join("include/KDChart.pro").exists());
    }

    #[test]
    fn test_excluded_and_nested_files_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        chart_tree(root);

        create_project(&options(root, &["KDChart", "KDGantt"], true)).unwrap();

        assert!(!root.join("include/KDGantt/kdganttview_p.h").exists());
        assert!(!root.join("include/KDGantt/moc_kdganttview.h").exists());
        assert!(!root.join("include/Hidden").exists());
        assert!(!root.join("include/Moc").exists());
        assert!(!root.join("include/Deep").exists());
        assert!(!root.join("include/KDGantt/nested").exists());
        assert!(!root.join("include/toplevel.cpp").exists());
    }

    #[test]
    fn test_header_without_symbols_gets_fallbacks() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        chart_tree(root);

        let report = create_project(&options(root, &["KDChart", "KDGantt"], true)).unwrap();

        assert_eq!(read(root, "include/kdganttglobal"), "#include \"kdganttglobal.h\"\n");
        assert_eq!(
            read(root, "include/KDGantt/kdganttglobal"),
            "#include \"../kdganttglobal.h\"\n"
        );
        assert_eq!(report.fallbacks, 1);

        let gantt = report.manifest("KDGantt").unwrap();
        assert!(gantt.files().contains(&"kdganttglobal".to_string()));
        let top = report.top_level().unwrap();
        assert!(top.files().contains(&"kdganttglobal.h".to_string()));
        assert!(top.files().contains(&"kdganttglobal".to_string()));
    }

    #[test]
    fn test_root_file_tag_is_prefixed() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        chart_tree(root);

        let report = create_project(&options(root, &["KDChart", "KDGantt"], true)).unwrap();

        assert_eq!(read(root, "include/KDChartToplevel"), "#include \"toplevel.h\"\n");
        let top = report.top_level().unwrap();
        assert_eq!(top.name(), "KDChart");
        assert_eq!(top.install_path(), "$$INSTALL_PREFIX/KDChart/include");
        // Subproject entries come first, root entries last.
        assert_eq!(
            &top.files()[top.files().len() - 2..],
            &["toplevel.h".to_string(), "KDChartToplevel".to_string()]
        );
    }

    #[test]
    fn test_unprefixed_mode_keeps_headers_in_subprojects() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        chart_tree(root);

        let report = create_project(&options(root, &["KDChart", "KDGantt"], false)).unwrap();

        assert!(root.join("include/KDGantt/View").exists());
        assert!(!root.join("include/View").exists());
        assert!(!root.join("include/kdganttview.h").exists());
        assert!(root.join("include/Toplevel").exists());

        // The fallback still lands in the flat include directory.
        assert!(root.join("include/kdganttglobal").exists());
        let top = report.top_level().unwrap();
        assert!(!top.files().contains(&"kdganttglobal".to_string()));
    }

    #[test]
    fn test_stale_output_is_removed() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        chart_tree(root);
        write(root, "include/Stale", "#include \"gone.h\"\n");

        create_project(&options(root, &["KDChart", "KDGantt"], true)).unwrap();

        assert!(!root.join("include/Stale").exists());
    }

    #[test]
    fn test_missing_subproject_dir_aborts_and_cleans_up() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        chart_tree(root);

        let result = create_project(&options(root, &["KDChart", "KDMissing"], true));

        assert!(result.is_err());
        assert!(!root.join("include").exists());
    }

    #[test]
    fn test_regeneration_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        chart_tree(root);
        let opts = options(root, &["KDChart", "KDGantt"], true);

        create_project(&opts).unwrap();
        let first = snapshot(&root.join("include"));
        create_project(&opts).unwrap();
        let second = snapshot(&root.join("include"));

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }
}
