//! Terminal input primitives.
//!
//! Everything interactive goes through [`Prompter`], so the question flow and the
//! page preview can be driven by a script in tests.

use crate::error::{ExtractorError, Result};
use crate::matcher::MAX_VALUE_LENGTH;
use dialoguer::{Confirm, Input, Select};

/// Checks a raw answer, returning the message to show when it is rejected.
pub type Validator = fn(&str) -> std::result::Result<(), String>;

pub trait Prompter {
    /// Free text, re-asked until `validate` accepts it.
    fn text(&mut self, prompt: &str, validate: Validator) -> Result<String>;

    /// A value length between 1 and [`MAX_VALUE_LENGTH`].
    fn number(&mut self, prompt: &str, default: usize) -> Result<usize>;

    fn toggle(&mut self, prompt: &str, default: bool) -> Result<bool>;

    /// Index into `items`. Returns [`ExtractorError::Aborted`] when the user escapes.
    fn select(&mut self, prompt: &str, items: &[&str], default: usize) -> Result<usize>;
}

#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn text(&mut self, prompt: &str, validate: Validator) -> Result<String> {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .validate_with(|input: &String| validate(input))
            .interact_text()?;
        Ok(answer)
    }

    fn number(&mut self, prompt: &str, default: usize) -> Result<usize> {
        let answer: usize = Input::new()
            .with_prompt(prompt)
            .default(default)
            .validate_with(|input: &usize| validate_value_length(*input))
            .interact_text()?;
        Ok(answer)
    }

    fn toggle(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact_opt()?
            .ok_or(ExtractorError::Aborted)
    }

    fn select(&mut self, prompt: &str, items: &[&str], default: usize) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact_opt()?
            .ok_or(ExtractorError::Aborted)
    }
}

pub fn validate_non_empty(input: &str) -> std::result::Result<(), String> {
    if input.is_empty() {
        Err("A value is required.".to_string())
    } else {
        Ok(())
    }
}

pub fn validate_value_length(input: usize) -> std::result::Result<(), String> {
    if input == 0 {
        Err("The length must be positive.".to_string())
    } else if input > MAX_VALUE_LENGTH {
        Err(format!("The length cannot exceed {}.", MAX_VALUE_LENGTH))
    } else {
        Ok(())
    }
}
