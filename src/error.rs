use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input directory does not exist: {path}")]
    InputDirectoryMissing { path: String },

    #[error("No PDF files found in input directory: {path}")]
    NoInputFiles { path: String },

    #[error("Invalid extraction parameters: {message}")]
    InvalidParameters { message: String },

    #[error("Aborted by user")]
    Aborted,

    #[error("Prompt failed: {message}")]
    Prompt { message: String },

    #[error("Invalid regular expression '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to extract text from {path}: {message}")]
    PdfExtraction { path: String, message: String },

    #[error("Extraction task failed: {message}")]
    Task { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Serialization failed: {message}")]
    Serialization { message: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ExtractorError {
    fn user_message(&self) -> String {
        match self {
            ExtractorError::InputDirectoryMissing { path } => {
                format!("The input directory '{}' does not exist", path)
            }
            ExtractorError::NoInputFiles { path } => {
                format!("No PDF files found in the input directory '{}'", path)
            }
            ExtractorError::InvalidParameters { message } => {
                format!("Invalid extraction parameters: {}", message)
            }
            ExtractorError::Aborted => "Aborted.".to_string(),
            ExtractorError::InvalidPattern { pattern, source } => {
                format!("The regular expression '{}' is invalid: {}", pattern, source)
            }
            ExtractorError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ExtractorError::InputDirectoryMissing { .. } => Some(
                "Create the directory and add your PDF files, or point to another one with --input.".to_string()
            ),
            ExtractorError::NoInputFiles { .. } => Some(
                "Copy the PDF documents to process into the input directory (files must end in .pdf).".to_string()
            ),
            ExtractorError::InvalidParameters { .. } => Some(
                "The anchor must be non-empty, the maximum length between 1 and 1000, and --custom-regex is required exactly when --characters custom is used.".to_string()
            ),
            ExtractorError::InvalidPattern { .. } => Some(
                "Check the custom regular expression syntax; it must contain one capturing group around the value.".to_string()
            ),
            ExtractorError::Config { .. } => Some(
                "Check your configuration file syntax or regenerate one with --generate-config.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<dialoguer::Error> for ExtractorError {
    fn from(error: dialoguer::Error) -> Self {
        ExtractorError::Prompt {
            message: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for ExtractorError {
    fn from(error: toml::de::Error) -> Self {
        ExtractorError::Config {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for ExtractorError {
    fn from(error: serde_json::Error) -> Self {
        ExtractorError::Serialization {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractorError>;
