//! Input discovery for batch runs
//!
//! A batch input is a single file, a directory scanned recursively for files
//! with the configured extension, or a glob pattern. Results are sorted so
//! batch output is stable across runs.

use crate::error::{MrzError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Resolve a batch input specification to the list of files to parse
pub fn discover_inputs(input: &str, extension: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(input);

    let mut files = if path.is_file() {
        vec![path.to_path_buf()]
    } else if path.is_dir() {
        discover_directory(path, extension)?
    } else if is_glob_pattern(input) {
        discover_glob(input)?
    } else {
        return Err(MrzError::file_not_found(path));
    };

    files.sort();
    debug!("Discovered {} input file(s) from '{}'", files.len(), input);
    Ok(files)
}

/// Every file under `root` whose extension equals `extension`
pub fn discover_directory(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    debug!("Searching for .{} files in: {}", extension, root.display());

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| {
            MrzError::directory_traversal(format!("Failed to scan {}", root.display()), e)
        })?;
        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Every regular file matching a glob pattern
pub fn discover_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|source| MrzError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            MrzError::io(format!("Failed to read {}", path.display()), e.into_error())
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

/// Check whether a path has the given extension (case sensitive)
fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_tree(temp_dir: &TempDir) -> PathBuf {
        let root = temp_dir.path().join("scans");
        let nested = root.join("2024").join("march");
        fs::create_dir_all(&nested).unwrap();

        fs::write(root.join("b.mrz"), "x").unwrap();
        fs::write(root.join("a.mrz"), "x").unwrap();
        fs::write(nested.join("c.mrz"), "x").unwrap();
        fs::write(nested.join("notes.txt"), "x").unwrap();
        fs::write(root.join("upper.MRZ"), "x").unwrap();
        root
    }

    #[test]
    fn test_directory_discovery_is_recursive_and_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_tree(&temp_dir);

        let files = discover_inputs(root.to_str().unwrap(), "mrz").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["c.mrz", "a.mrz", "b.mrz"]);
    }

    #[test]
    fn test_custom_extension() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_tree(&temp_dir);

        let files = discover_inputs(root.to_str().unwrap(), "txt").unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("notes.txt"));
    }

    #[test]
    fn test_single_file_ignores_extension() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_tree(&temp_dir);
        let file = root.join("2024").join("march").join("notes.txt");

        let files = discover_inputs(file.to_str().unwrap(), "mrz").unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_glob_pattern() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_tree(&temp_dir);
        let pattern = format!("{}/*.mrz", root.display());

        let files = discover_inputs(&pattern, "ignored").unwrap();
        assert_eq!(files, vec![root.join("a.mrz"), root.join("b.mrz")]);
    }

    #[test]
    fn test_invalid_glob_pattern() {
        let result = discover_inputs("scans/[*.mrz", "mrz");
        assert!(matches!(result, Err(MrzError::Pattern { .. })));
    }

    #[test]
    fn test_missing_path() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nowhere");
        let result = discover_inputs(missing.to_str().unwrap(), "mrz");
        match result {
            Err(MrzError::FileNotFound { path }) => assert_eq!(path, missing),
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("scan.mrz"), "mrz"));
        assert!(has_extension(Path::new("/path/to/scan.mrz"), "mrz"));
        assert!(!has_extension(Path::new("scan.txt"), "mrz"));
        assert!(!has_extension(Path::new("scan"), "mrz"));
        assert!(!has_extension(Path::new("scan.MRZ"), "mrz"));
    }
}
