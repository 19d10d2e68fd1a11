use crate::error::{ExtractorError, Result};
use crate::matcher::params::{CharacterClass, ExtractionParameters};
use regex::{Regex, RegexBuilder};
use std::fmt;

const FRENCH_LETTERS: &str = "a-zA-ZéèàùâêîôûçëïüœæÉÈÀÙÂÊÎÔÛÇËÏÜŒÆ";

/// Whitespace allowed between the anchor and the captured value.
const ANCHOR_GAP: &str = r"\s*";

/// Compiled size budget. `[\w\d ]{1,1000}` with case folding needs well over the
/// regex crate's 10 MiB default.
const REGEX_SIZE_LIMIT: usize = 128 * (1 << 20);
const DFA_SIZE_LIMIT: usize = 32 * (1 << 20);

/// A compiled pattern whose first capturing group holds the value.
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    regex: Regex,
    case_sensitive: bool,
}

impl CompiledMatcher {
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Number of capturing groups, not counting the implicit whole-match group.
    pub fn group_count(&self) -> usize {
        self.regex.captures_len().saturating_sub(1)
    }
}

impl fmt::Display for CompiledMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = if self.case_sensitive { "" } else { "i" };
        write!(f, "/{}/{}", self.regex.as_str(), flags)
    }
}

pub struct PatternBuilder;

impl PatternBuilder {
    /// Build the matcher described by `params`.
    ///
    /// For [`CharacterClass::Custom`] the user's expression is compiled as-is and is
    /// expected to carry exactly one capturing group around the value.
    pub fn build(params: &ExtractionParameters) -> Result<CompiledMatcher> {
        let pattern = match (params.character_class, params.custom_pattern.as_deref()) {
            (CharacterClass::Custom, Some(custom)) => custom.to_string(),
            (class, _) => {
                let anchor = Self::anchor_pattern(&params.anchor_pattern, params.ignore_spaces);
                let value = Self::value_pattern(class, params.max_value_length);
                format!("{}{}({})", anchor, ANCHOR_GAP, value)
            }
        };

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(!params.case_sensitive)
            .size_limit(REGEX_SIZE_LIMIT)
            .dfa_size_limit(DFA_SIZE_LIMIT)
            .build()
            .map_err(|source| ExtractorError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;

        Ok(CompiledMatcher {
            regex,
            case_sensitive: params.case_sensitive,
        })
    }

    /// Escape the anchor literally, optionally tolerating any amount of whitespace
    /// wherever the anchor itself contains whitespace.
    pub fn anchor_pattern(anchor: &str, ignore_spaces: bool) -> String {
        let escaped = regex::escape(anchor);
        if !ignore_spaces {
            return escaped;
        }

        let mut tolerant = String::with_capacity(escaped.len());
        let mut in_whitespace = false;
        for ch in escaped.chars() {
            if ch.is_whitespace() {
                if !in_whitespace {
                    tolerant.push_str(r"\s*");
                }
                in_whitespace = true;
            } else {
                tolerant.push(ch);
                in_whitespace = false;
            }
        }
        tolerant
    }

    pub fn value_pattern(class: CharacterClass, max_length: usize) -> String {
        match class {
            CharacterClass::Letters => format!("[{}]{{1,{}}}", FRENCH_LETTERS, max_length),
            CharacterClass::Digits => format!("[0-9]{{1,{}}}", max_length),
            CharacterClass::All | CharacterClass::Custom => {
                format!(r"[\w\d ]{{1,{}}}", max_length)
            }
        }
    }
}
