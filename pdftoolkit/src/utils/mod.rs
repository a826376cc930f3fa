//! Utilities for path expansion, naming and display.

use std::path::{Path, PathBuf};

use crate::Result;

/// Characters that make an input argument a glob pattern.
const GLOB_CHARS: [char; 3] = ['*', '?', '['];

/// Expand input arguments into filesystem paths.
///
/// Arguments containing `*`, `?` or `[` are expanded with `glob` (matches in
/// lexical order); anything else is kept as written so that a missing file
/// is reported by validation rather than silently dropped.
///
/// Errors:
/// - Propagates `glob` parse errors.
/// - Propagates filesystem errors from the glob iterator.
pub fn expand_input_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        if pattern.contains(GLOB_CHARS) {
            for entry in glob::glob(pattern)? {
                resolved_paths.push(entry?);
            }
        } else {
            resolved_paths.push(PathBuf::from(pattern));
        }
    }

    Ok(resolved_paths)
}

/// Whether `path` carries a `.pdf` extension, in any case.
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Filename without its extension, used for `{base}` and default bookmark
/// titles.
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

/// Format a byte count as a human-readable size, e.g. `1.5 MB`.
pub fn format_file_size(size: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut value = size as f64;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{value:.1} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.1} TB")
}
