pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod matcher;
pub mod prompt;
pub mod scanner;
pub mod ui;
pub mod workflow;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, InputConfig, OutputConfig, PromptDefaults};
pub use error::{ExtractorError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{OutputManager, PdfTextExtractor, TextExtractor};
pub use matcher::{CharacterClass, CompiledMatcher, ExtractionParameters, PatternBuilder};
pub use prompt::{DialoguerPrompter, PagePreview, Prompter, Questionnaire};
pub use scanner::{FileFilter, InputFile, PdfScanner};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};
pub use workflow::{BatchOutput, ExtractionOutcome, ExtractionProgress, ExtractionWorkflow, ResultMap};

use extractor::text_extractor::extract_text_blocking;
use std::path::Path;
use std::sync::Arc;

/// Main library interface: scan, ask, extract, write.
pub struct EzExtractor {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    text_extractor: Arc<dyn TextExtractor>,
}

impl EzExtractor {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
            text_extractor: Arc::new(PdfTextExtractor::new()),
        }
    }

    /// Create an instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        Ok(Self::new(
            config,
            cli_args.output_mode(),
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Replace the PDF backend.
    pub fn with_text_extractor(mut self, text_extractor: Arc<dyn TextExtractor>) -> Self {
        self.text_extractor = text_extractor;
        self
    }

    /// Full run: enumerate inputs, collect parameters, extract, persist.
    pub async fn run(&self, cli: &Cli, prompter: &mut dyn Prompter) -> Result<BatchOutput> {
        self.output_formatter.print_banner();

        let files = self.scan_inputs()?;
        let params = self.gather_parameters(cli, &files, prompter).await?;

        self.extract_with_parameters(&files, &params).await
    }

    /// List the input PDFs. Fails when the directory is missing or holds none.
    pub fn scan_inputs(&self) -> Result<Vec<InputFile>> {
        let scanner = PdfScanner::new(&self.config.input);
        let files = scanner.scan_directory(&self.config.input.directory)?;

        let stats = scanner.get_statistics(&files);
        self.output_formatter.print_scan_statistics(&stats);
        self.output_formatter
            .info(&format!("Found {} PDF files", files.len()));

        Ok(files)
    }

    /// Parameters from the command line, or from the preview and questionnaire.
    pub async fn gather_parameters(
        &self,
        cli: &Cli,
        files: &[InputFile],
        prompter: &mut dyn Prompter,
    ) -> Result<ExtractionParameters> {
        if let Some(params) = cli.extraction_parameters(&self.config.defaults) {
            return params;
        }

        if self.config.preview.enabled {
            if let Some(first) = files.first() {
                let mut preview = self.load_preview(first).await;
                preview.browse(&self.output_formatter, prompter)?;
            }
        }

        Questionnaire::new(&self.config.defaults).gather_parameters(prompter)
    }

    /// Text of `file` split into pages. A file that cannot be read previews as one
    /// empty page.
    pub async fn load_preview(&self, file: &InputFile) -> PagePreview {
        let spinner = self
            .progress_manager
            .create_spinner(&format!("Reading {}", file.file_name));
        let text = extract_text_blocking(self.text_extractor.clone(), file.path.clone()).await;
        spinner.finish_and_clear();

        match text {
            Ok(text) => PagePreview::new(file.file_name.clone(), &text),
            Err(e) => {
                log::warn!("Preview extraction failed for {}: {}", file.file_name, e);
                self.output_formatter.warning(&format!(
                    "Could not extract text from {} for preview: {}",
                    file.file_name, e
                ));
                PagePreview::empty(file.file_name.clone())
            }
        }
    }

    /// Build the matcher, process every file and write the results file.
    pub async fn extract_with_parameters(
        &self,
        files: &[InputFile],
        params: &ExtractionParameters,
    ) -> Result<BatchOutput> {
        let workflow = ExtractionWorkflow::from_parameters(self.text_extractor.clone(), params);
        self.output_formatter.print_extraction_summary(
            &params.anchor_pattern,
            params.max_value_length,
            workflow.matcher(),
        );

        self.output_formatter.start_operation("Extracting values");
        let file_progress = self.progress_manager.create_file_progress(files.len() as u64);
        let progress_callback = {
            let pb = file_progress.clone();
            move |progress: &ExtractionProgress| {
                ui::progress::update_file_progress(&pb, progress);
            }
        };

        let output = workflow.run(files, Some(&progress_callback)).await;

        ui::progress::finish_progress_with_summary(
            &file_progress,
            &format!("Processed {} files", output.progress.files_processed),
            output.progress.elapsed(),
        );

        let output_manager = OutputManager::new(self.config.output.file.clone());
        let output_file = output_manager.write_results(&output.results)?;

        self.output_formatter.print_results(output_file, &output.results);
        self.output_formatter.print_run_statistics(&output.progress);

        Ok(output)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn progress_manager(&self) -> &ProgressManager {
        &self.progress_manager
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &ExtractorError) {
        self.progress_manager.clear();
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Get build information
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
        build_date: option_env!("BUILD_DATE").unwrap_or("unknown"),
        target: std::env::consts::ARCH.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_date: &'static str,
    pub target: String,
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EzExtractor {} ({}) built on {} for {}",
            self.version, self.git_hash, self.build_date, self.target
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::prompter::testing::{Reply, ScriptedPrompter};
    use clap::Parser;
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Canned text per file name; anything else fails like a corrupt PDF.
    struct FakeExtractor {
        texts: HashMap<String, String>,
    }

    impl TextExtractor for FakeExtractor {
        fn extract_text(&self, path: &Path) -> Result<String> {
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            self.texts
                .get(&name)
                .cloned()
                .ok_or_else(|| ExtractorError::PdfExtraction {
                    path: path.display().to_string(),
                    message: "no objects found".to_string(),
                })
        }
    }

    struct Fixture {
        _temp_dir: TempDir,
        output_file: PathBuf,
        extractor: EzExtractor,
    }

    fn fixture(pdfs: &[&str], texts: &[(&str, &str)], preview: bool) -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let input_dir = temp_dir.path().join("input");
        fs::create_dir(&input_dir).unwrap();
        for name in pdfs {
            fs::write(input_dir.join(name), b"%PDF-1.4").unwrap();
        }

        let mut config = Config::default();
        config.input.directory = input_dir;
        config.output.file = temp_dir.path().join("output").join("output.json");
        config.preview.enabled = preview;
        let output_file = config.output.file.clone();

        let fake = FakeExtractor {
            texts: texts
                .iter()
                .map(|(name, text)| (name.to_string(), text.to_string()))
                .collect(),
        };
        let extractor = EzExtractor::new(config, OutputMode::Plain, 0, true)
            .with_text_extractor(Arc::new(fake));

        Fixture {
            _temp_dir: temp_dir,
            output_file,
            extractor,
        }
    }

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["ezextractor"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[tokio::test]
    async fn test_non_interactive_run_writes_results() {
        let fixture = fixture(
            &["a.pdf", "b.pdf", "c.pdf"],
            &[("a.pdf", "Total: 1500 EUR"), ("b.pdf", "Total:\n98765\n")],
            true,
        );
        let mut prompter = ScriptedPrompter::new(vec![]);

        let output = fixture
            .extractor
            .run(&cli(&["--anchor", "Total:", "-m", "4", "--characters", "digits"]), &mut prompter)
            .await
            .unwrap();

        assert!(prompter.asked.is_empty());
        assert_eq!(output.results.len(), 3);

        let content = fs::read_to_string(&fixture.output_file).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["a.pdf"], "1500");
        assert_eq!(json["b.pdf"], "9876");
        assert!(json["c.pdf"].as_str().unwrap().starts_with("Error:"));
    }

    #[tokio::test]
    async fn test_interactive_run_with_preview() {
        let fixture = fixture(
            &["a.pdf"],
            &[("a.pdf", "Cover page\u{c}Invoice\nAmount Due: 320.00")],
            true,
        );
        let mut prompter = ScriptedPrompter::new(vec![
            Reply::Select(0), // next page
            Reply::Select(1), // choose page 2
            Reply::Text("Amount Due:".to_string()),
            Reply::Number(3),
            Reply::Toggle(true),
            Reply::Toggle(false),
            Reply::Select(1),
        ]);

        let output = fixture.extractor.run(&cli(&[]), &mut prompter).await.unwrap();

        assert_eq!(
            output.results.get("a.pdf"),
            Some(&ExtractionOutcome::Found("320".to_string()))
        );
        assert_eq!(prompter.asked.len(), 7);
    }

    #[tokio::test]
    async fn test_preview_disabled_goes_straight_to_questions() {
        let fixture = fixture(&["a.pdf"], &[("a.pdf", "Name: Alice")], false);
        let mut prompter = ScriptedPrompter::new(vec![
            Reply::Text("Name:".to_string()),
            Reply::Number(5),
            Reply::Toggle(true),
            Reply::Toggle(false),
            Reply::Select(0),
        ]);

        let output = fixture.extractor.run(&cli(&[]), &mut prompter).await.unwrap();
        assert_eq!(
            output.results.get("a.pdf"),
            Some(&ExtractionOutcome::Found("Alice".to_string()))
        );
    }

    #[tokio::test]
    async fn test_unreadable_preview_is_not_fatal() {
        let fixture = fixture(&["broken.pdf"], &[], true);

        let preview = fixture
            .extractor
            .load_preview(&fixture.extractor.scan_inputs().unwrap()[0])
            .await;
        assert_eq!(preview.page_count(), 1);
        assert_eq!(preview.current_page(), "");
    }

    #[tokio::test]
    async fn test_missing_input_directory_fails_before_prompting() {
        let fixture = fixture(&[], &[], true);
        fs::remove_dir(fixture.extractor.config().input.directory.clone()).unwrap();
        let mut prompter = ScriptedPrompter::new(vec![]);

        let result = fixture.extractor.run(&cli(&[]), &mut prompter).await;

        assert!(matches!(result, Err(ExtractorError::InputDirectoryMissing { .. })));
        assert!(prompter.asked.is_empty());
        assert!(!fixture.output_file.exists());
    }

    #[tokio::test]
    async fn test_abort_writes_nothing() {
        let fixture = fixture(&["a.pdf"], &[("a.pdf", "x")], false);
        let mut prompter = ScriptedPrompter::new(vec![Reply::Abort]);

        let result = fixture.extractor.run(&cli(&[]), &mut prompter).await;

        assert!(matches!(result, Err(ExtractorError::Aborted)));
        assert!(!fixture.output_file.exists());
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        EzExtractor::generate_sample_config(&config_path).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[input]"));
        assert!(content.contains("[output]"));
        assert!(content.contains("[defaults]"));
        assert!(content.contains("[preview]"));
    }

    #[test]
    fn test_build_info_display() {
        assert!(!version_info().is_empty());
        let build_info = build_info();
        let display_string = build_info.to_string();
        assert!(display_string.contains("EzExtractor"));
        assert!(display_string.contains(build_info.version));
    }
}
