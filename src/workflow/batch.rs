use crate::error::Result;
use crate::extractor::text_extractor::{extract_text_blocking, TextExtractor};
use crate::matcher::value_extractor::{extract_with_strategy, MatchStrategy};
use crate::matcher::{CompiledMatcher, ExtractionParameters, PatternBuilder};
use crate::scanner::InputFile;
use crate::workflow::results::{ExtractionOutcome, ResultMap};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub files_processed: usize,
    pub total_files: usize,
    pub current_file: Option<String>,
    pub start_time: Instant,
    pub found: usize,
    pub not_found: usize,
    pub errors: Vec<String>,
}

impl ExtractionProgress {
    pub fn new(total_files: usize) -> Self {
        Self {
            files_processed: 0,
            total_files,
            current_file: None,
            start_time: Instant::now(),
            found: 0,
            not_found: 0,
            errors: Vec::new(),
        }
    }

    pub fn begin_file(&mut self, file_name: &str) {
        self.current_file = Some(file_name.to_string());
    }

    pub fn record(&mut self, file_name: &str, outcome: &ExtractionOutcome) {
        self.files_processed += 1;
        match outcome {
            ExtractionOutcome::Found(_) => self.found += 1,
            ExtractionOutcome::NotFound => self.not_found += 1,
            ExtractionOutcome::Failed(message) => {
                self.errors.push(format!("{}: {}", file_name, message));
            }
        }
    }

    pub fn finish(&mut self) {
        self.current_file = None;
    }

    pub fn percentage(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.files_processed as f64 / self.total_files as f64) * 100.0
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn estimated_remaining(&self) -> Duration {
        if self.files_processed == 0 {
            return Duration::from_secs(0);
        }

        let elapsed = self.elapsed();
        let rate = self.files_processed as f64 / elapsed.as_secs_f64();
        let remaining_files = self.total_files.saturating_sub(self.files_processed);

        if rate > 0.0 && rate.is_finite() {
            Duration::from_secs_f64(remaining_files as f64 / rate)
        } else {
            Duration::from_secs(0)
        }
    }
}

/// Result map plus the progress counters of a finished batch.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub results: ResultMap,
    pub progress: ExtractionProgress,
}

/// Runs text extraction and value matching over a set of files, one at a time.
pub struct ExtractionWorkflow {
    extractor: Arc<dyn TextExtractor>,
    matcher: std::result::Result<CompiledMatcher, String>,
    anchor_pattern: String,
    max_value_length: usize,
}

impl ExtractionWorkflow {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        matcher: CompiledMatcher,
        anchor_pattern: impl Into<String>,
        max_value_length: usize,
    ) -> Self {
        Self {
            extractor,
            matcher: Ok(matcher),
            anchor_pattern: anchor_pattern.into(),
            max_value_length,
        }
    }

    /// Build the matcher from `params`. A pattern that fails to compile is not
    /// fatal: every file then records the compilation error.
    pub fn from_parameters(extractor: Arc<dyn TextExtractor>, params: &ExtractionParameters) -> Self {
        let matcher = PatternBuilder::build(params).map_err(|e| {
            log::warn!("{}", e);
            e.to_string()
        });

        Self {
            extractor,
            matcher,
            anchor_pattern: params.anchor_pattern.clone(),
            max_value_length: params.max_value_length,
        }
    }

    pub fn matcher(&self) -> std::result::Result<&CompiledMatcher, &str> {
        self.matcher.as_ref().map_err(String::as_str)
    }

    pub async fn run(
        &self,
        files: &[InputFile],
        progress_callback: Option<&dyn Fn(&ExtractionProgress)>,
    ) -> BatchOutput {
        let mut results = ResultMap::new();
        let mut progress = ExtractionProgress::new(files.len());

        for file in files {
            progress.begin_file(&file.file_name);
            if let Some(callback) = progress_callback {
                callback(&progress);
            }

            let outcome = match &self.matcher {
                Err(message) => ExtractionOutcome::Failed(message.clone()),
                Ok(matcher) => match self.process_file(file, matcher).await {
                    Ok(value) => ExtractionOutcome::from(value),
                    Err(e) => {
                        log::warn!("Extraction failed for {}: {}", file.file_name, e);
                        ExtractionOutcome::Failed(e.to_string())
                    }
                },
            };

            progress.record(&file.file_name, &outcome);
            results.insert(file.file_name.clone(), outcome);
        }

        progress.finish();
        if let Some(callback) = progress_callback {
            callback(&progress);
        }

        log::info!(
            "Processed {} files: {} found, {} not found, {} errors",
            progress.files_processed,
            progress.found,
            progress.not_found,
            progress.errors.len()
        );

        BatchOutput { results, progress }
    }

    async fn process_file(
        &self,
        file: &InputFile,
        matcher: &CompiledMatcher,
    ) -> Result<Option<String>> {
        let text = extract_text_blocking(self.extractor.clone(), file.path.clone()).await?;

        let found = extract_with_strategy(&text, matcher, &self.anchor_pattern, self.max_value_length);
        match &found {
            Some((_, MatchStrategy::Pattern)) => {
                log::debug!("{}: matched by pattern", file.file_name)
            }
            Some((_, MatchStrategy::NextLine)) => {
                log::debug!("{}: matched on the line after the anchor", file.file_name)
            }
            None => log::debug!("{}: no value found", file.file_name),
        }

        Ok(found.map(|(value, _)| value))
    }
}
