use crate::config::InputConfig;
use std::path::Path;

/// Matches input documents by file-name suffix, ignoring case.
pub struct FileFilter {
    suffix: String,
}

impl FileFilter {
    pub fn new(config: &InputConfig) -> Self {
        Self::for_extension(&config.extension)
    }

    pub fn for_extension(extension: &str) -> Self {
        let extension = extension.trim().trim_start_matches('.').to_lowercase();
        Self {
            suffix: format!(".{}", extension),
        }
    }

    pub fn is_input_file(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .is_some_and(|name| name.ends_with(&self.suffix))
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::new(&InputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_detection() {
        let filter = FileFilter::default();

        assert!(filter.is_input_file(Path::new("invoice.pdf")));
        assert!(filter.is_input_file(Path::new("scans/2024-01.pdf")));
        assert!(filter.is_input_file(Path::new(".pdf")));

        assert!(!filter.is_input_file(Path::new("invoice.pdf.txt")));
        assert!(!filter.is_input_file(Path::new("notes.md")));
        assert!(!filter.is_input_file(Path::new("pdf")));
    }

    #[test]
    fn test_case_insensitive_suffix() {
        let filter = FileFilter::default();

        assert!(filter.is_input_file(Path::new("REPORT.PDF")));
        assert!(filter.is_input_file(Path::new("Report.Pdf")));
    }

    #[test]
    fn test_custom_extension() {
        let filter = FileFilter::for_extension(".TXT");
        assert_eq!(filter.suffix(), ".txt");
        assert!(filter.is_input_file(Path::new("dump.txt")));
        assert!(!filter.is_input_file(Path::new("dump.pdf")));
    }
}
