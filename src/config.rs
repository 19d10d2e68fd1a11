use crate::error::{ExtractorError, Result};
use crate::matcher::{CharacterClass, MAX_VALUE_LENGTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "ezextractor.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub defaults: PromptDefaults,
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    pub directory: PathBuf,
    pub extension: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub file: PathBuf,
}

/// Values pre-filled in the prompts and used for unset command-line flags.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PromptDefaults {
    pub max_length: usize,
    pub ignore_spaces: bool,
    pub case_sensitive: bool,
    pub character_class: CharacterClass,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub enabled: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("input"),
            extension: "pdf".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("output").join("output.json"),
        }
    }
}

impl Default for PromptDefaults {
    fn default() -> Self {
        Self {
            max_length: 6,
            ignore_spaces: true,
            case_sensitive: false,
            character_class: CharacterClass::All,
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ExtractorError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ExtractorError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ExtractorError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = [DEFAULT_CONFIG_FILE, ".ezextractor.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref input_dir) = cli_args.input_dir {
            self.input.directory = input_dir.clone();
        }

        if let Some(ref output_file) = cli_args.output_file {
            self.output.file = output_file.clone();
        }

        if let Some(preview) = cli_args.preview {
            self.preview.enabled = preview;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ExtractorError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| ExtractorError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.extension.trim().is_empty() {
            return Err(ExtractorError::Config {
                message: "The input file extension cannot be empty".to_string(),
            });
        }

        if self.defaults.max_length == 0 {
            return Err(ExtractorError::Config {
                message: "Default maximum value length must be greater than 0".to_string(),
            });
        }

        if self.defaults.max_length > MAX_VALUE_LENGTH {
            return Err(ExtractorError::Config {
                message: format!(
                    "Default maximum value length cannot exceed {}",
                    MAX_VALUE_LENGTH
                ),
            });
        }

        if self.defaults.character_class == CharacterClass::Custom {
            return Err(ExtractorError::Config {
                message: "The custom character class cannot be used as a default".to_string(),
            });
        }

        if self.output.file.file_name().is_none() {
            return Err(ExtractorError::Config {
                message: format!("Output path is not a file: {}", self.output.file.display()),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub input_dir: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub preview: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_dir(mut self, input_dir: Option<PathBuf>) -> Self {
        self.input_dir = input_dir;
        self
    }

    pub fn with_output_file(mut self, output_file: Option<PathBuf>) -> Self {
        self.output_file = output_file;
        self
    }

    pub fn with_preview(mut self, preview: Option<bool>) -> Self {
        self.preview = preview;
        self
    }
}
