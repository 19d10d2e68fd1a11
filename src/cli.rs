use crate::config::{CliOverrides, Config, PromptDefaults};
use crate::error::Result;
use crate::matcher::{CharacterClass, ExtractionParameters};
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ezextractor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract one value from every PDF in a directory")]
#[command(
    long_about = "EzExtractor reads every PDF in the input directory, finds the text that \
                  follows an anchor you choose, and writes one value per file to a JSON file."
)]
#[command(before_help = "📄 EzExtractor - PDF Pattern Extractor")]
#[command(after_help = "EXAMPLES:\n  \
    ezextractor\n  \
    ezextractor --input invoices --output results/totals.json\n  \
    ezextractor --anchor \"Total:\" --max-length 8 --characters digits\n  \
    ezextractor --anchor \"Ref\" --characters custom --custom-regex \"Ref-(\\w+)\"\n  \
    ezextractor --config my-config.toml")]
pub struct Cli {
    /// Directory scanned for PDF files
    #[arg(short, long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// JSON file the results are written to
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Console output format (the results file is always JSON)
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Skip the page preview of the first PDF
    #[arg(long)]
    pub no_preview: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,

    /// Anchor text preceding the value; skips all prompts
    #[arg(short, long, value_name = "TEXT")]
    pub anchor: Option<String>,

    /// Maximum length of the extracted value
    #[arg(short, long, value_name = "N", requires = "anchor")]
    pub max_length: Option<usize>,

    /// Characters the value may contain
    #[arg(long, value_enum, value_name = "CLASS", requires = "anchor")]
    pub characters: Option<CharacterClass>,

    /// Regular expression with one capturing group (with --characters custom)
    #[arg(long, value_name = "RE", requires = "anchor")]
    pub custom_regex: Option<String>,

    /// Match the anchor case-sensitively
    ///
    /// Only switches case sensitivity on. When `case_sensitive = true` is set under
    /// `[defaults]` in the config file, edit the file to match case-insensitively again.
    #[arg(long, requires = "anchor")]
    pub case_sensitive: bool,

    /// Require whitespace in the anchor to match exactly
    ///
    /// Only switches whitespace tolerance off. When `ignore_spaces = false` is set under
    /// `[defaults]` in the config file, edit the file to tolerate whitespace again.
    #[arg(long, requires = "anchor")]
    pub keep_spaces: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl From<&OutputFormat> for OutputMode {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_input_dir(self.input.clone())
            .with_output_file(self.output.clone())
            .with_preview(self.no_preview.then_some(false))
    }

    pub fn is_interactive(&self) -> bool {
        self.anchor.is_none()
    }

    /// Parameters given on the command line, or `None` when they must be prompted for.
    pub fn extraction_parameters(
        &self,
        defaults: &PromptDefaults,
    ) -> Option<Result<ExtractionParameters>> {
        let anchor = self.anchor.as_ref()?;

        let character_class = match (self.characters, &self.custom_regex) {
            (Some(class), _) => class,
            (None, Some(_)) => CharacterClass::Custom,
            (None, None) => defaults.character_class,
        };

        Some(ExtractionParameters::new(
            anchor.clone(),
            self.max_length.unwrap_or(defaults.max_length),
            !self.keep_spaces && defaults.ignore_spaces,
            self.case_sensitive || defaults.case_sensitive,
            character_class,
            self.custom_regex.clone(),
        ))
    }

    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from(&self.output_format)
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose > 0 && !self.quiet
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
