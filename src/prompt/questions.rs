//! The parameter questionnaire.
//!
//! Questions are asked in list order. Each one carries a predicate over the answers
//! collected so far; a question whose predicate is false is skipped.

use crate::config::PromptDefaults;
use crate::error::{ExtractorError, Result};
use crate::matcher::{CharacterClass, ExtractionParameters};
use crate::prompt::prompter::{validate_non_empty, Prompter, Validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSlot {
    AnchorPattern,
    MaxLength,
    IgnoreSpaces,
    CaseSensitive,
    CharacterClass,
    CustomPattern,
}

#[derive(Clone, Copy)]
pub enum QuestionKind {
    Text(Validator),
    Number,
    Toggle,
    CharacterClass,
}

#[derive(Clone, Copy)]
pub struct Question {
    pub slot: AnswerSlot,
    pub message: &'static str,
    pub kind: QuestionKind,
    pub asked_when: fn(&Answers) -> bool,
}

/// Answers collected so far. Unasked questions stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    pub anchor_pattern: Option<String>,
    pub max_length: Option<usize>,
    pub ignore_spaces: Option<bool>,
    pub case_sensitive: Option<bool>,
    pub character_class: Option<CharacterClass>,
    pub custom_pattern: Option<String>,
}

fn always(_: &Answers) -> bool {
    true
}

fn custom_class_chosen(answers: &Answers) -> bool {
    answers.character_class == Some(CharacterClass::Custom)
}

pub const QUESTIONS: &[Question] = &[
    Question {
        slot: AnswerSlot::AnchorPattern,
        message: "Enter the anchor text (copied from above) that precedes the value",
        kind: QuestionKind::Text(validate_non_empty),
        asked_when: always,
    },
    Question {
        slot: AnswerSlot::MaxLength,
        message: "Maximum length of the value to extract",
        kind: QuestionKind::Number,
        asked_when: always,
    },
    Question {
        slot: AnswerSlot::IgnoreSpaces,
        message: "Ignore spaces in the anchor?",
        kind: QuestionKind::Toggle,
        asked_when: always,
    },
    Question {
        slot: AnswerSlot::CaseSensitive,
        message: "Case-sensitive search?",
        kind: QuestionKind::Toggle,
        asked_when: always,
    },
    Question {
        slot: AnswerSlot::CharacterClass,
        message: "Which characters should the value contain?",
        kind: QuestionKind::CharacterClass,
        asked_when: always,
    },
    Question {
        slot: AnswerSlot::CustomPattern,
        message: "Enter your custom regex (one capturing group for the value)",
        kind: QuestionKind::Text(validate_non_empty),
        asked_when: custom_class_chosen,
    },
];

impl Answers {
    /// Turn the answers into parameters, falling back to `defaults` for anything
    /// that was not asked. An empty anchor or a zero length aborts the run.
    pub fn into_parameters(self, defaults: &PromptDefaults) -> Result<ExtractionParameters> {
        let anchor_pattern = self.anchor_pattern.unwrap_or_default();
        let max_length = self.max_length.unwrap_or(0);
        if anchor_pattern.is_empty() || max_length == 0 {
            return Err(ExtractorError::Aborted);
        }

        let character_class = self.character_class.unwrap_or(defaults.character_class);
        let custom_pattern = match character_class {
            CharacterClass::Custom => self.custom_pattern,
            _ => None,
        };

        ExtractionParameters::new(
            anchor_pattern,
            max_length,
            self.ignore_spaces.unwrap_or(defaults.ignore_spaces),
            self.case_sensitive.unwrap_or(defaults.case_sensitive),
            character_class,
            custom_pattern,
        )
    }
}

pub struct Questionnaire<'a> {
    questions: &'a [Question],
    defaults: &'a PromptDefaults,
}

impl<'a> Questionnaire<'a> {
    pub fn new(defaults: &'a PromptDefaults) -> Self {
        Self {
            questions: QUESTIONS,
            defaults,
        }
    }

    /// Walk the question list and collect the answers.
    pub fn ask_all(&self, prompter: &mut dyn Prompter) -> Result<Answers> {
        let mut answers = Answers::default();

        for question in self.questions {
            if !(question.asked_when)(&answers) {
                log::debug!("Skipping question {:?}", question.slot);
                continue;
            }
            self.ask(question, prompter, &mut answers)?;
        }

        Ok(answers)
    }

    pub fn gather_parameters(&self, prompter: &mut dyn Prompter) -> Result<ExtractionParameters> {
        self.ask_all(prompter)?.into_parameters(self.defaults)
    }

    fn ask(&self, question: &Question, prompter: &mut dyn Prompter, answers: &mut Answers) -> Result<()> {
        match question.kind {
            QuestionKind::Text(validate) => {
                let value = prompter.text(question.message, validate)?;
                match question.slot {
                    AnswerSlot::CustomPattern => answers.custom_pattern = Some(value),
                    _ => answers.anchor_pattern = Some(value),
                }
            }
            QuestionKind::Number => {
                answers.max_length = Some(prompter.number(question.message, self.defaults.max_length)?);
            }
            QuestionKind::Toggle => {
                let default = match question.slot {
                    AnswerSlot::CaseSensitive => self.defaults.case_sensitive,
                    _ => self.defaults.ignore_spaces,
                };
                let value = prompter.toggle(question.message, default)?;
                match question.slot {
                    AnswerSlot::CaseSensitive => answers.case_sensitive = Some(value),
                    _ => answers.ignore_spaces = Some(value),
                }
            }
            QuestionKind::CharacterClass => {
                let labels: Vec<&str> = CharacterClass::ALL.iter().map(CharacterClass::label).collect();
                let index = prompter.select(
                    question.message,
                    &labels,
                    self.defaults.character_class.index(),
                )?;
                let class = CharacterClass::ALL
                    .get(index)
                    .copied()
                    .ok_or(ExtractorError::Aborted)?;
                answers.character_class = Some(class);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::prompter::testing::{Reply, ScriptedPrompter};

    fn defaults() -> PromptDefaults {
        PromptDefaults::default()
    }

    #[test]
    fn test_custom_question_skipped_for_builtin_class() {
        let mut prompter = ScriptedPrompter::new(vec![
            Reply::Text("Total:".to_string()),
            Reply::Number(4),
            Reply::Toggle(true),
            Reply::Toggle(false),
            Reply::Select(1),
        ]);

        let defaults = defaults();
        let params = Questionnaire::new(&defaults)
            .gather_parameters(&mut prompter)
            .unwrap();

        assert_eq!(prompter.asked.len(), 5);
        assert_eq!(params.anchor_pattern, "Total:");
        assert_eq!(params.max_value_length, 4);
        assert!(params.ignore_spaces);
        assert!(!params.case_sensitive);
        assert_eq!(params.character_class, CharacterClass::Digits);
        assert_eq!(params.custom_pattern, None);
    }

    #[test]
    fn test_custom_question_asked_for_custom_class() {
        let mut prompter = ScriptedPrompter::new(vec![
            Reply::Text("Ref".to_string()),
            Reply::Number(8),
            Reply::Toggle(false),
            Reply::Toggle(true),
            Reply::Select(3),
            Reply::Text("Ref-(\\w+)".to_string()),
        ]);

        let defaults = defaults();
        let params = Questionnaire::new(&defaults)
            .gather_parameters(&mut prompter)
            .unwrap();

        assert_eq!(prompter.asked.len(), 6);
        assert_eq!(params.character_class, CharacterClass::Custom);
        assert_eq!(params.custom_pattern.as_deref(), Some("Ref-(\\w+)"));
        assert!(params.case_sensitive);
    }

    #[test]
    fn test_class_labels_offered_in_order() {
        let mut prompter = ScriptedPrompter::new(vec![
            Reply::Text("x".to_string()),
            Reply::Number(1),
            Reply::Toggle(true),
            Reply::Toggle(false),
            Reply::Select(2),
        ]);
        let defaults = defaults();
        Questionnaire::new(&defaults).ask_all(&mut prompter).unwrap();

        assert_eq!(
            prompter.offered[0],
            vec!["Letters only", "Digits only", "All characters", "Custom regex"]
        );
    }

    #[test]
    fn test_abort_mid_sequence() {
        let mut prompter = ScriptedPrompter::new(vec![
            Reply::Text("Total".to_string()),
            Reply::Abort,
        ]);
        let defaults = defaults();
        let result = Questionnaire::new(&defaults).gather_parameters(&mut prompter);
        assert!(matches!(result, Err(ExtractorError::Aborted)));
    }

    #[test]
    fn test_empty_anchor_aborts() {
        let answers = Answers {
            anchor_pattern: Some(String::new()),
            max_length: Some(6),
            ..Answers::default()
        };
        assert!(matches!(
            answers.into_parameters(&defaults()),
            Err(ExtractorError::Aborted)
        ));
    }

    #[test]
    fn test_missing_length_aborts() {
        let answers = Answers {
            anchor_pattern: Some("Total".to_string()),
            ..Answers::default()
        };
        assert!(matches!(
            answers.into_parameters(&defaults()),
            Err(ExtractorError::Aborted)
        ));
    }

    #[test]
    fn test_unasked_toggles_use_defaults() {
        let answers = Answers {
            anchor_pattern: Some("Total".to_string()),
            max_length: Some(3),
            ..Answers::default()
        };
        let params = answers.into_parameters(&defaults()).unwrap();
        assert!(params.ignore_spaces);
        assert!(!params.case_sensitive);
        assert_eq!(params.character_class, CharacterClass::All);
    }
}
