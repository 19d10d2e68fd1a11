use crate::error::{ExtractorError, UserFriendlyError};
use crate::matcher::CompiledMatcher;
use crate::scanner::ScanStatistics;
use crate::workflow::{ExtractionProgress, ResultMap};
use console::{style, Emoji, Term};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

impl OutputMode {
    pub fn from_string(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputMode::Json,
            "plain" => OutputMode::Plain,
            _ => OutputMode::Human,
        }
    }
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");

const BANNER: &str = r"
  ███████ ███████     ███████ ██   ██ ████████ ██████   █████   ██████ ████████  ██████  ██████
  ██         ███      ██       ██ ██     ██    ██   ██ ██   ██ ██         ██    ██    ██ ██   ██
  █████     ███       █████     ███      ██    ██████  ███████ ██         ██    ██    ██ ██████
  ██       ███        ██       ██ ██     ██    ██   ██ ██   ██ ██         ██    ██    ██ ██   ██
  ███████ ███████     ███████ ██   ██    ██    ██   ██ ██   ██  ██████    ██     ██████  ██   ██
";
const TAGLINE: &str = "PDF Pattern Extractor - Interactive CLI";

pub struct OutputFormatter {
    #[allow(dead_code)]
    term: Term,
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let term = Term::stdout();
        let use_colors = match mode {
            OutputMode::Human => term.features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            term,
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    // Core messaging methods
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => println!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &ExtractorError) {
        let user_message = error.user_message();
        self.error(&user_message);

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    eprintln!();
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    pub fn print_banner(&self) {
        if self.quiet || self.mode == OutputMode::Json {
            return;
        }

        if self.use_colors {
            println!("{}", style(BANNER).cyan().bright());
            println!("{}\n", style(format!("{:^96}", TAGLINE)).magenta().bright().bold());
        } else if self.mode == OutputMode::Human {
            println!("{}", BANNER);
            println!("{:^96}\n", TAGLINE);
        } else {
            println!("=== {} ===", TAGLINE);
        }
    }

    /// Render one page of the document being previewed. `page_index` is zero-based.
    pub fn print_page_preview(&self, file_name: &str, text: &str, page_index: usize, total_pages: usize) {
        match self.mode {
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "page",
                    "file": file_name,
                    "page": page_index + 1,
                    "total_pages": total_pages,
                    "text": text
                }));
            }
            _ => {
                let title = page_frame_title(file_name, page_index, total_pages);
                let footer = "-".repeat(29);
                if self.use_colors {
                    println!("\n{}", style(title).blue().bright());
                    println!("{}", text);
                    println!("{}\n", style(footer).blue().bright());
                } else {
                    println!("\n{}", title);
                    println!("{}", text);
                    println!("{}\n", footer);
                }
            }
        }
    }

    pub fn print_copy_hint(&self) {
        let hint = "Copy a fragment of the text above to use as the extraction anchor.";
        match self.mode {
            OutputMode::Human if self.use_colors => println!("{}", style(hint).yellow().bright()),
            OutputMode::Json => self.print_json_message("hint", hint),
            _ => println!("{}", hint),
        }
    }

    /// Anchor, length limit and the matcher that will be applied to every file.
    pub fn print_extraction_summary(
        &self,
        anchor_pattern: &str,
        max_value_length: usize,
        matcher: std::result::Result<&CompiledMatcher, &str>,
    ) {
        if self.quiet {
            return;
        }

        let matcher_text = match matcher {
            Ok(matcher) => matcher.to_string(),
            Err(message) => format!("<invalid: {}>", message),
        };

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!(
                        "\n{}",
                        style(format!("Extraction pattern: {}", style(anchor_pattern).bold()))
                            .yellow()
                            .bright()
                    );
                    println!(
                        "{}",
                        style(format!("Max value length: {}", style(max_value_length).bold()))
                            .yellow()
                            .bright()
                    );
                    println!(
                        "{}\n",
                        style(format!("Regex used: {}", style(&matcher_text).bold()))
                            .yellow()
                            .bright()
                    );
                } else {
                    println!("\nExtraction pattern: {}", anchor_pattern);
                    println!("Max value length: {}", max_value_length);
                    println!("Regex used: {}\n", matcher_text);
                }
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "extraction_summary",
                    "anchor": anchor_pattern,
                    "max_length": max_value_length,
                    "matcher": matcher_text
                }));
            }
            OutputMode::Plain => {
                println!("PATTERN: {}", anchor_pattern);
                println!("MAX LENGTH: {}", max_value_length);
                println!("REGEX: {}", matcher_text);
            }
        }
    }

    pub fn print_scan_statistics(&self, stats: &ScanStatistics) {
        for line in stats.display_summary().lines() {
            self.debug(line);
        }
    }

    pub fn print_results(&self, output_file: &Path, results: &ResultMap) {
        if self.quiet {
            return;
        }

        let pretty = results
            .to_json_pretty()
            .unwrap_or_else(|_| "{}".to_string());

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!(
                        "\n{}{}\n",
                        CHECKMARK,
                        style(format!("Results written to {}", output_file.display()))
                            .green()
                            .bright()
                    );
                    println!("{}", style(pretty).cyan().bright());
                } else {
                    println!("\nResults written to {}\n", output_file.display());
                    println!("{}", pretty);
                }
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "results",
                    "output_file": output_file.display().to_string(),
                    "results": results
                }));
            }
            OutputMode::Plain => {
                println!("RESULTS: {}", output_file.display());
                println!("{}", pretty);
            }
        }
    }

    pub fn print_run_statistics(&self, progress: &ExtractionProgress) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => self.print_human_statistics(progress),
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "summary",
                    "files_processed": progress.files_processed,
                    "found": progress.found,
                    "not_found": progress.not_found,
                    "errors": progress.errors.len(),
                    "duration_ms": progress.elapsed().as_millis(),
                    "timestamp": chrono::Utc::now().to_rfc3339()
                }));
            }
            OutputMode::Plain => {
                println!("COMPLETED: Extraction");
                println!("Files processed: {}", progress.files_processed);
                println!("Found: {}", progress.found);
                println!("Not found: {}", progress.not_found);
                println!("Errors: {}", progress.errors.len());
                println!("Duration: {}", format_duration(progress.elapsed()));
            }
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("─".repeat(60)).dim());
                } else {
                    println!("{}", "-".repeat(60));
                }
            }
            OutputMode::Plain => {
                println!("{}", "-".repeat(60));
            }
            OutputMode::Json => {}
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow().bold())),
                MessageType::Info => (INFO, Box::new(|msg| style(msg).cyan())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, color_fn(message)),
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_human_statistics(&self, progress: &ExtractionProgress) {
        let highlight = |value: String| {
            if self.use_colors {
                style(value).cyan().bold().to_string()
            } else {
                value
            }
        };

        println!();
        self.print_separator();
        if self.use_colors {
            println!("{} {}", style("Extraction completed!").green().bold(), CHECKMARK);
        } else {
            println!("✓ Extraction completed!");
        }
        println!();
        println!("  Files processed: {}", highlight(progress.files_processed.to_string()));
        println!("  Values found:    {}", highlight(progress.found.to_string()));
        println!("  Not found:       {}", highlight(progress.not_found.to_string()));
        if !progress.errors.is_empty() {
            println!("  Errors:          {}", highlight(progress.errors.len().to_string()));
            for error in &progress.errors {
                println!("    - {}", error);
            }
        }
        println!("  Time taken:      {}", highlight(format_duration(progress.elapsed())));
        self.print_separator();
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Error,
    Warning,
    Info,
}

fn page_frame_title(file_name: &str, page_index: usize, total_pages: usize) -> String {
    format!("--- PDF: {} (page {}/{}) ---", file_name, page_index + 1, total_pages)
}

pub(crate) fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}
