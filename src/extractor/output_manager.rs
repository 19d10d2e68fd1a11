use crate::error::{ExtractorError, Result};
use crate::workflow::ResultMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Persists the result map as the run's single JSON artifact.
pub struct OutputManager {
    output_file: PathBuf,
}

impl OutputManager {
    pub fn new<P: Into<PathBuf>>(output_file: P) -> Self {
        Self {
            output_file: output_file.into(),
        }
    }

    pub fn get_output_file(&self) -> &Path {
        &self.output_file
    }

    fn output_directory(&self) -> &Path {
        match self.output_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Create the output directory when it is missing.
    pub fn initialize(&self) -> Result<()> {
        let directory = self.output_directory();
        if !directory.exists() {
            fs::create_dir_all(directory).map_err(ExtractorError::Io)?;
            log::debug!("Created output directory {}", directory.display());
        }
        Ok(())
    }

    /// Replace the output file with `results`.
    ///
    /// The JSON is written next to the target and renamed over it, so readers never
    /// observe a half-written file.
    pub fn write_results(&self, results: &ResultMap) -> Result<&Path> {
        self.initialize()?;

        let json_content = results.to_json_pretty()?;

        let mut staging = NamedTempFile::new_in(self.output_directory())?;
        staging.write_all(json_content.as_bytes())?;
        staging.flush()?;
        fs::set_permissions(staging.path(), self.output_permissions()?)?;
        staging
            .persist(&self.output_file)
            .map_err(|e| ExtractorError::Io(e.error))?;

        log::info!(
            "Wrote {} results to {}",
            results.len(),
            self.output_file.display()
        );
        Ok(&self.output_file)
    }

    /// Keep the mode of an existing output file. New files are world-readable like
    /// any file created with `fs::write` under the usual umask.
    fn output_permissions(&self) -> Result<fs::Permissions> {
        if let Ok(metadata) = fs::metadata(&self.output_file) {
            return Ok(metadata.permissions());
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            Ok(fs::Permissions::from_mode(0o644))
        }

        #[cfg(not(unix))]
        {
            Ok(fs::metadata(self.output_directory())?.permissions())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::ExtractionOutcome;
    use tempfile::TempDir;

    fn sample_results() -> ResultMap {
        let mut results = ResultMap::new();
        results.insert("a.pdf", ExtractionOutcome::Found("42".to_string()));
        results.insert("b.pdf", ExtractionOutcome::NotFound);
        results
    }

    #[test]
    fn test_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let output_file = temp_dir.path().join("output").join("output.json");
        let manager = OutputManager::new(&output_file);

        let written = manager.write_results(&sample_results()).unwrap();

        assert_eq!(written, output_file.as_path());
        let content = fs::read_to_string(&output_file).unwrap();
        assert_eq!(
            content,
            "{\n  \"a.pdf\": \"42\",\n  \"b.pdf\": \"Value not found\"\n}"
        );
    }

    #[test]
    fn test_overwrites_previous_output() {
        let temp_dir = TempDir::new().unwrap();
        let output_file = temp_dir.path().join("output.json");
        fs::write(&output_file, "stale content that is much longer than the new one").unwrap();

        let mut results = ResultMap::new();
        results.insert("x.pdf", ExtractionOutcome::Found("1".to_string()));
        OutputManager::new(&output_file).write_results(&results).unwrap();

        let content = fs::read_to_string(&output_file).unwrap();
        assert_eq!(content, "{\n  \"x.pdf\": \"1\"\n}");
    }

    #[test]
    fn test_identical_results_identical_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let output_file = temp_dir.path().join("output.json");
        let manager = OutputManager::new(&output_file);

        manager.write_results(&sample_results()).unwrap();
        let first = fs::read(&output_file).unwrap();
        manager.write_results(&sample_results()).unwrap();
        let second = fs::read(&output_file).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_no_staging_files_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let output_file = temp_dir.path().join("output.json");
        OutputManager::new(&output_file)
            .write_results(&sample_results())
            .unwrap();

        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_new_output_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let manager = OutputManager::new(temp_dir.path().join("output.json"));
        let path = manager.write_results(&sample_results()).unwrap();

        let mode = fs::metadata(path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_output_mode_is_kept() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let output_file = temp_dir.path().join("output.json");
        fs::write(&output_file, "{}").unwrap();
        fs::set_permissions(&output_file, fs::Permissions::from_mode(0o640)).unwrap();

        let manager = OutputManager::new(&output_file);
        manager.write_results(&sample_results()).unwrap();

        let mode = fs::metadata(&output_file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }
}
