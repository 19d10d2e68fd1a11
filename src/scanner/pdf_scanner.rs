use crate::config::InputConfig;
use crate::error::{ExtractorError, Result};
use crate::scanner::file_filter::FileFilter;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A document queued for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    /// Base name, used as the result key
    pub file_name: String,
    pub size: u64,
}

impl InputFile {
    pub fn new(path: PathBuf, size: u64) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Self {
            path,
            file_name,
            size,
        }
    }
}

pub struct PdfScanner {
    filter: FileFilter,
}

impl PdfScanner {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            filter: FileFilter::new(config),
        }
    }

    /// List the matching files directly inside `root`, sorted by file name.
    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<Vec<InputFile>> {
        let root_path = root.as_ref();

        if !root_path.is_dir() {
            return Err(ExtractorError::InputDirectoryMissing {
                path: root_path.display().to_string(),
            });
        }

        let mut files = Vec::new();
        let mut scan_errors = Vec::new();

        let walker = WalkDir::new(root_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("Skipping unreadable entry: {}", err);
                    scan_errors.push(err.to_string());
                    continue;
                }
            };

            let path = entry.path();
            if !self.filter.is_input_file(path) {
                continue;
            }

            // Follows symlinks, unlike the walker's own file type.
            if !path.is_file() {
                log::debug!("Ignoring non-file entry {}", path.display());
                continue;
            }

            let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            files.push(InputFile::new(path.to_path_buf(), size));
        }

        if files.is_empty() {
            if !scan_errors.is_empty() {
                return Err(ExtractorError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    format!("Failed to scan {}: {}", root_path.display(), scan_errors.join(", ")),
                )));
            }

            return Err(ExtractorError::NoInputFiles {
                path: root_path.display().to_string(),
            });
        }

        log::info!("Found {} input files in {}", files.len(), root_path.display());
        Ok(files)
    }

    pub fn get_statistics(&self, files: &[InputFile]) -> ScanStatistics {
        let largest = files.iter().max_by_key(|f| f.size);

        ScanStatistics {
            total_files: files.len(),
            total_size: files.iter().map(|f| f.size).sum(),
            largest_file_size: largest.map(|f| f.size).unwrap_or(0),
            largest_file_name: largest.map(|f| f.file_name.clone()).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanStatistics {
    pub total_files: usize,
    pub total_size: u64,
    pub largest_file_size: u64,
    pub largest_file_name: String,
}

impl ScanStatistics {
    pub fn display_summary(&self) -> String {
        let mut summary = format!(
            "Scan Results:\n  Total files: {}\n  Total size: {}\n",
            self.total_files,
            format_bytes(self.total_size)
        );

        if self.largest_file_size > 0 {
            summary.push_str(&format!(
                "  Largest file: {} ({})\n",
                self.largest_file_name,
                format_bytes(self.largest_file_size)
            ));
        }

        summary
    }
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scanner() -> PdfScanner {
        PdfScanner::new(&InputConfig::default())
    }

    #[test]
    fn test_scan_finds_pdfs_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("b.pdf"), "b").unwrap();
        fs::write(root.join("A.PDF"), "a").unwrap();
        fs::write(root.join("c.pdf"), "c").unwrap();
        fs::write(root.join("notes.txt"), "ignored").unwrap();

        let files = scanner().scan_directory(root).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["A.PDF", "b.pdf", "c.pdf"]);
    }

    #[test]
    fn test_scan_is_not_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir(root.join("nested")).unwrap();
        fs::write(root.join("nested").join("deep.pdf"), "x").unwrap();
        fs::create_dir(root.join("folder.pdf")).unwrap();
        fs::write(root.join("top.pdf"), "x").unwrap();

        let files = scanner().scan_directory(root).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name, "top.pdf");
    }

    #[test]
    fn test_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = scanner().scan_directory(temp_dir.path().join("input"));
        assert!(matches!(result, Err(ExtractorError::InputDirectoryMissing { .. })));
    }

    #[test]
    fn test_directory_without_pdfs() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("readme.txt"), "x").unwrap();

        let result = scanner().scan_directory(temp_dir.path());
        assert!(matches!(result, Err(ExtractorError::NoInputFiles { .. })));
    }

    #[test]
    fn test_scan_statistics() {
        let files = vec![
            InputFile::new(PathBuf::from("input/a.pdf"), 100),
            InputFile::new(PathBuf::from("input/b.pdf"), 2048),
        ];

        let stats = scanner().get_statistics(&files);
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.total_size, 2148);
        assert_eq!(stats.largest_file_name, "b.pdf");
        assert!(stats.display_summary().contains("2.0 KB"));
    }
}
