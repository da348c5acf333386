//! Reports directory service implementation
//!
//! [`ReportStore`] saves and reads plain-text reports inside a single directory. All names that
//! reach the filesystem pass through [`sanitize_report_name`] or [`sanitize_download_name`],
//! which keep only the final path component of whatever the caller sent.
//!
//! # Concurrency
//!
//! There is no locking. Two saves to the same name race and the last write wins; a reader may
//! observe a partially written file while a save is in progress.

use crate::{ReportStoreError, DEFAULT_REPORT_FILENAME, REPORT_EXTENSION};
use std::fs;
use std::path::{Path, PathBuf};

/// Keeps only the last path component, splitting on both `/` and `\`.
///
/// Names are echoed back in a quoted `Content-Disposition` header, so `"` and control
/// characters are refused.
fn base_name(raw: &str) -> Result<&str, ReportStoreError> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or("").trim();

    if name.is_empty()
        || name == "."
        || name == ".."
        || name.chars().any(|c| c == '"' || c.is_control())
    {
        return Err(ReportStoreError::InvalidFilename(raw.to_string()));
    }

    Ok(name)
}

/// Resolves the filename for a save request.
///
/// `None` selects the default name. Directory components are stripped and `.txt` is appended
/// unless the name already ends in it (case-insensitively).
///
/// # Errors
///
/// Returns `ReportStoreError::InvalidFilename` if nothing usable remains after stripping.
pub fn sanitize_report_name(requested: Option<&str>) -> Result<String, ReportStoreError> {
    let name = base_name(requested.unwrap_or(DEFAULT_REPORT_FILENAME))?;

    if name.to_lowercase().ends_with(REPORT_EXTENSION) {
        Ok(name.to_string())
    } else {
        Ok(format!("{}{}", name, REPORT_EXTENSION))
    }
}

/// Resolves the filename for a download request. No extension is added.
pub fn sanitize_download_name(requested: &str) -> Result<String, ReportStoreError> {
    base_name(requested).map(str::to_string)
}

/// Service for the flat reports directory
///
/// The directory does not need to exist up front; it is created on the first save.
#[derive(Debug, Clone)]
pub struct ReportStore {
    root_directory: PathBuf,
}

impl ReportStore {
    pub fn new(root_directory: &Path) -> Self {
        Self {
            root_directory: root_directory.to_path_buf(),
        }
    }

    pub fn root_directory(&self) -> &Path {
        &self.root_directory
    }

    /// Writes `contents` as a report and returns the path written.
    ///
    /// The reports directory is created if missing and an existing file of the same name is
    /// truncated and overwritten.
    ///
    /// # Errors
    ///
    /// Returns `ReportStoreError` if:
    /// - the filename is unusable (`InvalidFilename`)
    /// - the directory cannot be created or the file cannot be written (`Io`), for example
    ///   permission denied
    pub fn save(&self, filename: Option<&str>, contents: &str) -> Result<PathBuf, ReportStoreError> {
        let name = sanitize_report_name(filename)?;

        fs::create_dir_all(&self.root_directory).map_err(|e| {
            ReportStoreError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create reports directory {}: {}",
                    self.root_directory.display(),
                    e
                ),
            ))
        })?;

        let path = self.root_directory.join(&name);
        fs::write(&path, contents).map_err(|e| {
            ReportStoreError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write report to {}: {}", path.display(), e),
            ))
        })?;

        tracing::info!("report saved to {}", path.display());

        Ok(path)
    }

    /// Path a download request for `filename` resolves to, if such a report exists.
    ///
    /// # Errors
    ///
    /// `InvalidFilename` for unusable names, `NotFound` if no regular file exists there.
    pub fn locate(&self, filename: &str) -> Result<PathBuf, ReportStoreError> {
        let name = sanitize_download_name(filename)?;
        let path = self.root_directory.join(&name);

        if !path.is_file() {
            return Err(ReportStoreError::NotFound(name));
        }

        Ok(path)
    }

    /// Reads a saved report's bytes.
    pub fn read(&self, filename: &str) -> Result<Vec<u8>, ReportStoreError> {
        let path = self.locate(filename)?;
        fs::read(&path).map_err(|e| {
            ReportStoreError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read report from {}: {}", path.display(), e),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_name_is_used_when_none_given() {
        assert_eq!(
            sanitize_report_name(None).unwrap(),
            "number_analysis_report.txt"
        );
    }

    #[test]
    fn txt_suffix_is_enforced_case_insensitively() {
        assert_eq!(sanitize_report_name(Some("batch")).unwrap(), "batch.txt");
        assert_eq!(sanitize_report_name(Some("batch.TXT")).unwrap(), "batch.TXT");
        assert_eq!(sanitize_report_name(Some("batch.csv")).unwrap(), "batch.csv.txt");
    }

    #[test]
    fn directory_components_are_stripped() {
        assert_eq!(
            sanitize_report_name(Some("../../etc/passwd")).unwrap(),
            "passwd.txt"
        );
        assert_eq!(
            sanitize_report_name(Some("..\\..\\windows\\win.ini")).unwrap(),
            "win.ini.txt"
        );
        assert_eq!(sanitize_download_name("/abs/path/a.txt").unwrap(), "a.txt");
    }

    #[test]
    fn quotes_and_control_characters_are_rejected() {
        for bad in ["a\"b.txt", "report\".txt", "line\nbreak.txt", "tab\there"] {
            assert!(
                matches!(
                    sanitize_download_name(bad),
                    Err(ReportStoreError::InvalidFilename(_))
                ),
                "expected {bad:?} to be rejected"
            );
            assert!(sanitize_report_name(Some(bad)).is_err());
        }
    }

    #[test]
    fn unusable_names_are_rejected() {
        for bad in ["", "   ", ".", "..", "reports/", "../.."] {
            assert!(
                matches!(
                    sanitize_report_name(Some(bad)),
                    Err(ReportStoreError::InvalidFilename(_))
                ),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn save_creates_directory_and_writes_inside_it() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("reports");
        let store = ReportStore::new(&root);

        let path = store.save(Some("../../etc/passwd"), "hello\n").unwrap();

        assert_eq!(path, root.join("passwd.txt"));
        assert_eq!(path.parent(), Some(root.as_path()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
        assert!(!temp.path().join("etc").exists());
    }

    #[test]
    fn save_overwrites_existing_report() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::new(temp.path());

        store.save(Some("same"), "a much longer first report\n").unwrap();
        store.save(Some("same"), "short\n").unwrap();

        assert_eq!(store.read("same.txt").unwrap(), b"short\n");
    }

    #[test]
    fn read_missing_report_is_not_found() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::new(temp.path());

        assert!(matches!(
            store.read("missing.txt"),
            Err(ReportStoreError::NotFound(name)) if name == "missing.txt"
        ));
    }

    #[test]
    fn read_cannot_escape_reports_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("secret.txt"), "top secret").unwrap();
        let root = temp.path().join("reports");
        let store = ReportStore::new(&root);
        store.save(Some("visible"), "ok\n").unwrap();

        assert!(matches!(
            store.read("../secret.txt"),
            Err(ReportStoreError::NotFound(_))
        ));
        assert_eq!(store.read("../reports/visible.txt").unwrap(), b"ok\n");
    }

    #[test]
    fn locate_ignores_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("nested.txt")).unwrap();
        let store = ReportStore::new(temp.path());

        assert!(matches!(
            store.locate("nested.txt"),
            Err(ReportStoreError::NotFound(_))
        ));
    }

    #[test]
    fn save_into_unwritable_location_reports_io_error() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("not-a-dir");
        fs::write(&blocker, "file").unwrap();
        let store = ReportStore::new(&blocker);

        assert!(matches!(
            store.save(Some("r"), "x"),
            Err(ReportStoreError::Io(_))
        ));
    }
}
