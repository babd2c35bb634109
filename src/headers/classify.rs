//! Header file classification.

/// Prefixes of files generated by moc, uic and rcc.
const GENERATED_PREFIXES: &[&str] = &["moc_", "ui_", "qrc_"];

const HEADER_SUFFIX: &str = ".h";
const PRIVATE_SUFFIX: &str = "_p.h";

/// Whether `filename` is a public header that should get forward headers.
pub fn is_candidate_header(filename: &str) -> bool {
    filename.ends_with(HEADER_SUFFIX)
        && !GENERATED_PREFIXES.iter().any(|p| filename.starts_with(p))
        && !filename.ends_with(PRIVATE_SUFFIX)
}

/// The name used for a header with no exported symbols: the file name
/// without its `.h` suffix.
pub fn fallback_name(filename: &str) -> &str {
    match filename.rfind(HEADER_SUFFIX) {
        Some(idx) => &filename[..idx],
        None => filename,
    }
}
