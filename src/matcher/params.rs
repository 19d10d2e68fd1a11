use crate::error::{ExtractorError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest value a built-in class may capture. Unicode classes repeated much further
/// than this compile into very large automata.
pub const MAX_VALUE_LENGTH: usize = 1000;

/// Which characters the captured value may consist of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    /// Latin letters, including accented French characters
    Letters,
    /// ASCII digits
    Digits,
    /// Word characters, digits and spaces
    #[default]
    All,
    /// A user-supplied regular expression
    Custom,
}

impl CharacterClass {
    pub const ALL: &'static [CharacterClass] = &[
        CharacterClass::Letters,
        CharacterClass::Digits,
        CharacterClass::All,
        CharacterClass::Custom,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            CharacterClass::Letters => "Letters only",
            CharacterClass::Digits => "Digits only",
            CharacterClass::All => "All characters",
            CharacterClass::Custom => "Custom regex",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0)
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CharacterClass::Letters => "letters",
            CharacterClass::Digits => "digits",
            CharacterClass::All => "all",
            CharacterClass::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// Everything needed to locate a value in a document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionParameters {
    pub anchor_pattern: String,
    pub max_value_length: usize,
    pub ignore_spaces: bool,
    pub case_sensitive: bool,
    pub character_class: CharacterClass,
    pub custom_pattern: Option<String>,
}

impl ExtractionParameters {
    /// Build a validated parameter set.
    pub fn new(
        anchor_pattern: impl Into<String>,
        max_value_length: usize,
        ignore_spaces: bool,
        case_sensitive: bool,
        character_class: CharacterClass,
        custom_pattern: Option<String>,
    ) -> Result<Self> {
        let params = Self {
            anchor_pattern: anchor_pattern.into(),
            max_value_length,
            ignore_spaces,
            case_sensitive,
            character_class,
            custom_pattern,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.anchor_pattern.is_empty() {
            return Err(invalid("the anchor pattern cannot be empty"));
        }

        if self.max_value_length == 0 {
            return Err(invalid("the maximum value length must be positive"));
        }

        if self.max_value_length > MAX_VALUE_LENGTH {
            return Err(ExtractorError::InvalidParameters {
                message: format!(
                    "the maximum value length cannot exceed {}",
                    MAX_VALUE_LENGTH
                ),
            });
        }

        match (self.character_class, self.custom_pattern.as_deref()) {
            (CharacterClass::Custom, None) => {
                Err(invalid("a custom pattern is required for the custom character class"))
            }
            (CharacterClass::Custom, Some("")) => Err(invalid("the custom pattern cannot be empty")),
            (CharacterClass::Custom, Some(_)) => Ok(()),
            (_, Some(_)) => Err(invalid(
                "a custom pattern is only allowed with the custom character class",
            )),
            (_, None) => Ok(()),
        }
    }
}

fn invalid(message: &str) -> ExtractorError {
    ExtractorError::InvalidParameters {
        message: message.to_string(),
    }
}
