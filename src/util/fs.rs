//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;
use walkdir::WalkDir;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Read the first line of a UTF-8 text file, without the line terminator.
///
/// An empty file yields an empty string.
pub fn read_first_line(path: &Path) -> Result<String> {
    let contents = read_to_string(path)?;
    let line = contents.lines().next().unwrap_or("");
    Ok(line.trim_start_matches('\u{feff}').to_string())
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

/// Regular files directly inside `dir`, sorted by name.
///
/// A missing directory has no files.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry =
            entry.with_context(|| format!("failed to read directory: {}", dir.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Expand directory patterns relative to `base`.
///
/// Entries without glob metacharacters are kept even if they do not exist
/// yet; patterns only contribute existing directories. The result keeps the
/// first occurrence of every path.
pub fn expand_dirs(base: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut results: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let full_pattern = base.join(pattern);

        if !pattern.contains(['*', '?', '[']) {
            if !results.contains(&full_pattern) {
                results.push(full_pattern);
            }
            continue;
        }

        let pattern_str = full_pattern.to_string_lossy();
        let mut matched = Vec::new();
        for entry in
            glob(&pattern_str).with_context(|| format!("invalid glob pattern: {}", pattern))?
        {
            match entry {
                Ok(path) if path.is_dir() => matched.push(path),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("glob error: {}", e);
                }
            }
        }
        matched.sort();
        for path in matched {
            if !results.contains(&path) {
                results.push(path);
            }
        }
    }

    Ok(results)
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_first_line() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("hudson.Plugin");
        fs::write(&file, "org.example.HelloPlugin\r\nignored\n").unwrap();
        assert_eq!(read_first_line(&file).unwrap(), "org.example.HelloPlugin");

        fs::write(&file, "").unwrap();
        assert_eq!(read_first_line(&file).unwrap(), "");

        assert!(read_first_line(&tmp.path().join("missing")).is_err());
    }

    #[test]
    fn test_list_files_skips_directories() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("b.index"), "").unwrap();
        fs::write(tmp.path().join("a.index"), "").unwrap();
        fs::write(tmp.path().join("nested/c.index"), "").unwrap();

        let names: Vec<_> = list_files(tmp.path())
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.index", "b.index"]);

        assert!(list_files(&tmp.path().join("missing")).unwrap().is_empty());
    }

    #[test]
    fn test_expand_dirs() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("classes/java/main")).unwrap();
        fs::create_dir_all(tmp.path().join("classes/groovy/main")).unwrap();
        fs::write(tmp.path().join("classes/notes.txt"), "").unwrap();

        let dirs = expand_dirs(
            tmp.path(),
            &[
                "resources/main".to_string(),
                "classes/*/main".to_string(),
                "classes/java/main".to_string(),
            ],
        )
        .unwrap();

        assert_eq!(
            dirs,
            vec![
                tmp.path().join("resources/main"),
                tmp.path().join("classes/groovy/main"),
                tmp.path().join("classes/java/main"),
            ]
        );
    }

    #[test]
    fn test_relative_path() {
        let rel = relative_path(Path::new("/work/build"), Path::new("/work/build/classes/main"));
        assert_eq!(rel, PathBuf::from("classes/main"));
    }
}
