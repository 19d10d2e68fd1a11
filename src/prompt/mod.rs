pub mod preview;
pub mod prompter;
pub mod questions;

pub use preview::{NavAction, PagePreview};
pub use prompter::{DialoguerPrompter, Prompter};
pub use questions::{Answers, Questionnaire};
