use crate::error::Result;
use crate::extractor::text_extractor::split_pages;
use crate::prompt::prompter::Prompter;
use crate::ui::OutputFormatter;

const NAVIGATION_PROMPT: &str = "Navigate the PDF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Previous,
    Next,
    Choose,
}

impl NavAction {
    pub const fn label(&self) -> &'static str {
        match self {
            NavAction::Previous => "Previous page",
            NavAction::Next => "Next page",
            NavAction::Choose => "Use this page for the pattern",
        }
    }
}

/// Page-by-page view over one document's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePreview {
    file_name: String,
    pages: Vec<String>,
    current: usize,
}

impl PagePreview {
    pub fn new(file_name: impl Into<String>, text: &str) -> Self {
        Self {
            file_name: file_name.into(),
            pages: split_pages(text).into_iter().map(str::to_string).collect(),
            current: 0,
        }
    }

    /// Preview used when the document could not be read.
    pub fn empty(file_name: impl Into<String>) -> Self {
        Self::new(file_name, "")
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_page(&self) -> &str {
        self.pages.get(self.current).map(String::as_str).unwrap_or("")
    }

    /// Actions valid on the current page, in menu order.
    pub fn available_actions(&self) -> Vec<NavAction> {
        let mut actions = Vec::with_capacity(3);
        if self.current > 0 {
            actions.push(NavAction::Previous);
        }
        if self.current + 1 < self.pages.len() {
            actions.push(NavAction::Next);
        }
        actions.push(NavAction::Choose);
        actions
    }

    /// Apply `action`; returns true once a page has been chosen.
    pub fn apply(&mut self, action: NavAction) -> bool {
        match action {
            NavAction::Previous => {
                self.current = self.current.saturating_sub(1);
                false
            }
            NavAction::Next => {
                if self.current + 1 < self.pages.len() {
                    self.current += 1;
                }
                false
            }
            NavAction::Choose => true,
        }
    }

    /// Show pages until the user chooses one. Returns the chosen page index.
    pub fn browse(&mut self, formatter: &OutputFormatter, prompter: &mut dyn Prompter) -> Result<usize> {
        loop {
            formatter.print_page_preview(
                &self.file_name,
                self.current_page(),
                self.current,
                self.page_count(),
            );

            let actions = self.available_actions();
            let labels: Vec<&str> = actions.iter().map(NavAction::label).collect();
            let default = actions
                .iter()
                .position(|a| *a == NavAction::Next)
                .unwrap_or(actions.len() - 1);

            let choice = prompter.select(NAVIGATION_PROMPT, &labels, default)?;
            let Some(action) = actions.get(choice).copied() else {
                continue;
            };

            if self.apply(action) {
                log::debug!("Page {} of {} chosen", self.current + 1, self.page_count());
                formatter.print_copy_hint();
                return Ok(self.current);
            }
        }
    }
}
