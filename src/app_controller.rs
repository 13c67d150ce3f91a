use log::{debug, info, warn};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::{Document, FileManager};
use crate::language_utils;
use crate::providers::{LanguageCode, SupportedLanguage, TranslationPort};
use crate::translation::chunking::leading_sample;
use crate::translation::{chunk_text, ChunkTranslator, JobOutcome, JobScheduler, RetryPolicy, TranslationJob};

// @module: Run orchestration for fanning one document out to every language

/// Characters of the document sent for source detection
pub const DETECT_SAMPLE_CHARS: usize = 5000;

/// Final tally of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Detected source language
    pub source_language: LanguageCode,
    /// Languages listed by the service
    pub supported_count: usize,
    /// Languages attempted
    pub total: usize,
    /// Languages translated and written
    pub succeeded: usize,
    /// Failed languages and their errors, sorted by code
    pub failures: Vec<(LanguageCode, String)>,
    /// Files written, sorted by language code
    pub outputs: Vec<PathBuf>,
}

impl RunSummary {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary block
    pub fn render(&self) -> String {
        let mut lines = vec![
            "Done.".to_string(),
            format!("Source language: {}", self.source_language),
            format!(
                "Supported languages: {}; targets attempted: {}",
                self.supported_count, self.total
            ),
            format!("Succeeded: {}/{}", self.succeeded, self.total),
        ];

        if self.total == 0 {
            lines.push("No target languages to translate.".to_string());
        } else if self.failures.is_empty() {
            lines.push("All languages translated successfully.".to_string());
        } else {
            lines.push("Some languages failed:".to_string());
            for (code, error) in &self.failures {
                lines.push(format!("  - {}: {}", code, error));
            }
        }

        lines.join("\n")
    }
}

/// Progress line for one finished language
pub fn format_progress_line(
    completed: usize,
    total: usize,
    language: &str,
    display_name: Option<&str>,
    outcome: &JobOutcome,
) -> String {
    match outcome {
        JobOutcome::Success(_) => match display_name {
            Some(name) => format!("[{}/{}] ✅ {} ({})", completed, total, language, name),
            None => format!("[{}/{}] ✅ {}", completed, total, language),
        },
        JobOutcome::Failure(error) => format!("[{}/{}] ❌ {} — {}", completed, total, language, error),
    }
}

/// Target languages for a run: every listed language except the source and
/// the excluded codes, in listing order and without duplicates
pub fn build_worklist(
    supported: &[SupportedLanguage],
    source_language: &str,
    exclude: &HashSet<String>,
) -> Vec<SupportedLanguage> {
    let mut seen = HashSet::new();
    supported
        .iter()
        .filter(|lang| lang.code != source_language)
        .filter(|lang| !exclude.contains(&lang.code))
        .filter(|lang| seen.insert(lang.code.clone()))
        .cloned()
        .collect()
}

/// Stdout printer that keeps the progress bar, also drawn on stdout, intact
struct Console {
    progress_bar: ProgressBar,
}

impl Console {
    fn new(total: u64) -> Self {
        let progress_bar = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stdout());
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} languages ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        Self { progress_bar }
    }

    fn line(&self, message: &str) {
        if self.progress_bar.is_hidden() {
            println!("{}", message);
        } else {
            self.progress_bar.println(message);
        }
    }
}

/// Main application controller: runs one document through every language
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translate `input_file` into every supported language.
    ///
    /// Loading the document, listing languages, detecting the source and
    /// creating the output directory abort the run on failure. Failures of
    /// single languages are collected in the returned summary.
    pub async fn run(&self, input_file: &Path, port: Arc<dyn TranslationPort>) -> Result<RunSummary, AppError> {
        let start_time = Instant::now();

        let document = Document::load(input_file).map_err(|e| AppError::InputLoad(format!("{:#}", e)))?;
        debug!("Loaded {:?} ({} chars)", document.path, document.text.chars().count());

        let supported = port.supported_languages().await.map_err(AppError::LanguageListing)?;

        let sample = leading_sample(&document.text, DETECT_SAMPLE_CHARS);
        let source_language = port.detect_language(sample).await.map_err(AppError::SourceDetection)?;

        let exclude: HashSet<String> = self.config.run.exclude.iter().cloned().collect();
        let worklist = build_worklist(&supported, &source_language, &exclude);

        let console = Console::new(worklist.len() as u64);
        console.line(&format!("Detected source language: {}", source_language));
        console.line(&format!(
            "Found {} supported languages; translating into {} targets.",
            supported.len(),
            worklist.len()
        ));

        let output_dir = self.config.run.outdir.clone();
        FileManager::ensure_dir(&output_dir).map_err(|e| AppError::File(format!("{:#}", e)))?;

        let jobs = self.build_jobs(&document, &worklist);
        let translator = ChunkTranslator::new(port)
            .with_source_language(Some(source_language.clone()))
            .with_mime_type(self.config.service.mime_type.clone())
            .with_retry(RetryPolicy::new(self.config.run.retry_count, self.config.run.retry_backoff_ms));
        let scheduler = JobScheduler::new(translator, self.config.run.workers);

        info!(
            "Translating {:?} into {} languages with {} workers",
            document.path,
            jobs.len(),
            scheduler.max_workers()
        );
        console.progress_bar.set_message("Translating");

        let mut write_failures: HashMap<LanguageCode, String> = HashMap::new();
        let mut outputs: BTreeMap<LanguageCode, PathBuf> = BTreeMap::new();

        let outcomes = scheduler
            .run_all(jobs, |progress| {
                let mut outcome = progress.outcome.clone();

                if let JobOutcome::Success(text) = progress.outcome {
                    let output_path = document.output_path(&output_dir, progress.language);
                    match FileManager::write_to_file(&output_path, text) {
                        Ok(()) => {
                            outputs.insert(progress.language.to_string(), output_path);
                        }
                        Err(e) => {
                            let error = format!("{:#}", e);
                            warn!("{}", error);
                            write_failures.insert(progress.language.to_string(), error.clone());
                            outcome = JobOutcome::Failure(error);
                        }
                    }
                }

                console.line(&format_progress_line(
                    progress.completed,
                    progress.total,
                    progress.language,
                    progress.display_name,
                    &outcome,
                ));
                console.progress_bar.inc(1);
            })
            .await;

        console.progress_bar.finish_and_clear();

        let mut succeeded = 0;
        let mut failures = Vec::new();
        for (code, outcome) in outcomes {
            match (outcome, write_failures.remove(&code)) {
                (_, Some(write_error)) => failures.push((code, write_error)),
                (JobOutcome::Success(_), None) => succeeded += 1,
                (JobOutcome::Failure(error), None) => failures.push((code, error)),
            }
        }

        info!(
            "Translation finished in {} ({} succeeded, {} failed).",
            Self::format_duration(start_time.elapsed()),
            succeeded,
            failures.len()
        );

        Ok(RunSummary {
            source_language,
            supported_count: supported.len(),
            total: succeeded + failures.len(),
            succeeded,
            failures,
            outputs: outputs.into_values().collect(),
        })
    }

    /// One job per worklist entry, each with its own copy of the chunks
    fn build_jobs(&self, document: &Document, worklist: &[SupportedLanguage]) -> Vec<TranslationJob> {
        let chunks = chunk_text(&document.text, self.config.run.max_chars_per_chunk);
        debug!("Document split into {} chunks", chunks.len());

        worklist
            .iter()
            .map(|lang| {
                let display_name = if self.config.run.include_language_names {
                    language_utils::resolve_display_name(&lang.code, lang.display_name.as_deref())
                } else {
                    None
                };
                TranslationJob::new(lang.code.clone(), chunks.clone()).with_display_name(display_name)
            })
            .collect()
    }

    // @formats: Duration as "1h 2m 3s", "2m 3s" or "3.042s"
    pub fn format_duration(duration: Duration) -> String {
        let total_secs = duration.as_secs();
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        let seconds = total_secs % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
