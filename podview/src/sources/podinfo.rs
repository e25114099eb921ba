//! Reader for the downward API volume.
//!
//! Kubernetes projects each requested field into its own file. The files are
//! symlinks into a hidden, atomically swapped `..data` directory, so hidden
//! entries are skipped and links are followed.

use std::{fs, path::Path};

use crate::sections::SectionData;

pub const DEFAULT_PODINFO_PATH: &str = "/etc/podinfo";

/// Reads every non-hidden file of `path` into `{file name: content}`.
///
/// A directory that cannot be listed yields an empty section. A file that
/// cannot be read is kept, with the error as its value.
pub fn read_podinfo_dir(path: &Path) -> SectionData {
    let path = if path.as_os_str().is_empty() {
        Path::new(DEFAULT_PODINFO_PATH)
    } else {
        path
    };

    let mut podinfo = SectionData::new();

    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!("Cannot list pod info directory {:?}: {}", path, err);
            return podinfo;
        }
    };

    for entry in entries.flatten() {
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.starts_with('.') {
            continue;
        }

        let file_path = entry.path();
        if fs::metadata(&file_path).map_or(false, |m| m.is_dir()) {
            continue;
        }

        let value = match fs::read(&file_path) {
            Ok(content) => String::from_utf8_lossy(&content).into_owned(),
            Err(err) => err.to_string(),
        };
        podinfo.insert(file_name, value);
    }

    podinfo
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    /// A scratch directory removed on drop.
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new(name: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "podview-{}-{}",
                name,
                std::process::id()
            ));
            let _ = fs::remove_dir_all(&path);
            fs::create_dir_all(&path).unwrap();
            Self(path)
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_hidden_files_are_skipped() {
        let dir = ScratchDir::new("hidden");
        fs::write(dir.0.join("a"), "alpha").unwrap();
        fs::write(dir.0.join(".hidden"), "secret").unwrap();
        fs::write(dir.0.join("b"), "beta\n").unwrap();

        let podinfo = read_podinfo_dir(&dir.0);

        let expected = SectionData::from([
            ("a".to_string(), "alpha".to_string()),
            ("b".to_string(), "beta\n".to_string()),
        ]);
        assert_eq!(podinfo, expected);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let podinfo = read_podinfo_dir(Path::new("/nonexistent/podview/podinfo"));
        assert!(podinfo.is_empty());
    }

    #[test]
    fn test_subdirectories_are_skipped() {
        let dir = ScratchDir::new("subdirs");
        fs::create_dir(dir.0.join("..2024_01_01")).unwrap();
        fs::create_dir(dir.0.join("nested")).unwrap();
        fs::write(dir.0.join("labels"), "app=\"web\"").unwrap();

        let podinfo = read_podinfo_dir(&dir.0);

        assert_eq!(podinfo.len(), 1);
        assert_eq!(podinfo["labels"], "app=\"web\"");
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_entry_records_error() {
        let dir = ScratchDir::new("dangling");
        fs::write(dir.0.join("name"), "web-0").unwrap();
        std::os::unix::fs::symlink(dir.0.join("missing-target"), dir.0.join("broken")).unwrap();

        let podinfo = read_podinfo_dir(&dir.0);

        assert_eq!(podinfo["name"], "web-0");
        assert!(!podinfo["broken"].is_empty());
    }

    #[test]
    fn test_repeated_reads_are_identical() {
        let dir = ScratchDir::new("repeat");
        fs::write(dir.0.join("namespace"), "default").unwrap();
        assert_eq!(read_podinfo_dir(&dir.0), read_podinfo_dir(&dir.0));
    }
}
