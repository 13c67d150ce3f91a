/*!
 * Bounded concurrent scheduling of per-language jobs.
 *
 * Every job runs on its own tokio task, gated by a semaphore so that no more
 * than `max_workers` jobs talk to the service at once. Results are drained in
 * completion order on the caller's task, which owns the outcome map and the
 * completed counter, and reports each one through the progress callback.
 */

use futures::FutureExt;
use log::{debug, error, warn};
use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::errors::TranslationError;
use crate::providers::LanguageCode;
use super::core::{ChunkTranslator, TranslationJob};

/// Result of one language job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// Full translated text
    Success(String),
    /// Error description of the failed job
    Failure(String),
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Translated text of a successful job
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success(text) => Some(text),
            Self::Failure(_) => None,
        }
    }

    /// Error description of a failed job
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }
}

/// Progress event emitted once per finished job
#[derive(Debug, Clone, Copy)]
pub struct JobProgress<'a> {
    /// Target language of the finished job
    pub language: &'a str,
    /// Display name carried by the job
    pub display_name: Option<&'a str>,
    /// How the job ended
    pub outcome: &'a JobOutcome,
    /// Jobs finished so far, this one included
    pub completed: usize,
    /// Number of jobs in the run
    pub total: usize,
}

/// Runs translation jobs over a bounded worker pool
#[derive(Debug, Clone)]
pub struct JobScheduler {
    /// Translator cloned into every job task
    translator: ChunkTranslator,
    /// Maximum number of jobs running at once, at least 1
    max_workers: usize,
}

impl JobScheduler {
    /// Create a scheduler; a worker count of 0 is raised to 1
    pub fn new(translator: ChunkTranslator, max_workers: usize) -> Self {
        Self {
            translator,
            max_workers: max_workers.max(1),
        }
    }

    /// Effective worker bound
    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Run every job and return one outcome per target language.
    ///
    /// `on_complete` is called exactly once per job, in completion order,
    /// with a `completed` count rising from 1 to the number of jobs. Job
    /// failures, including panics, are recorded as `JobOutcome::Failure`
    /// and never stop the other jobs.
    pub async fn run_all<F>(&self, jobs: Vec<TranslationJob>, mut on_complete: F) -> BTreeMap<LanguageCode, JobOutcome>
    where
        F: FnMut(JobProgress<'_>),
    {
        // Names of jobs still owed a report
        let mut pending: HashMap<LanguageCode, Option<String>> = HashMap::with_capacity(jobs.len());
        let semaphore = Arc::new(Semaphore::new(self.max_workers));
        let mut tasks = JoinSet::new();

        for job in jobs {
            if pending.contains_key(&job.target_language) {
                warn!("Skipping duplicate job for {}", job.target_language);
                continue;
            }
            pending.insert(job.target_language.clone(), job.display_name.clone());

            let translator = self.translator.clone();
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let outcome = match semaphore.acquire_owned().await {
                    Ok(permit) => {
                        let outcome = run_job(&translator, &job).await;
                        drop(permit);
                        outcome
                    }
                    Err(_) => JobOutcome::Failure(
                        TranslationError::Aborted("worker pool closed".to_string()).to_string(),
                    ),
                };
                (job.target_language, outcome)
            });
        }

        let total = pending.len();
        debug!("Scheduled {} jobs on {} workers", total, self.max_workers);

        let mut outcomes = BTreeMap::new();
        let mut completed = 0;

        while let Some(joined) = tasks.join_next().await {
            let (language, outcome) = match joined {
                Ok(result) => result,
                Err(e) => {
                    error!("Translation task ended without a result: {}", e);
                    continue;
                }
            };

            completed += 1;
            let display_name = pending.remove(&language).flatten();
            on_complete(JobProgress {
                language: &language,
                display_name: display_name.as_deref(),
                outcome: &outcome,
                completed,
                total,
            });
            outcomes.insert(language, outcome);
        }

        // Tasks that vanished without reporting still get an outcome
        let mut lost: Vec<(LanguageCode, Option<String>)> = pending.into_iter().collect();
        lost.sort();
        for (language, display_name) in lost {
            completed += 1;
            let outcome = JobOutcome::Failure(
                TranslationError::Aborted("task ended without a result".to_string()).to_string(),
            );
            on_complete(JobProgress {
                language: &language,
                display_name: display_name.as_deref(),
                outcome: &outcome,
                completed,
                total,
            });
            outcomes.insert(language, outcome);
        }

        outcomes
    }
}

/// Translate one job, turning errors and panics into a failure outcome
async fn run_job(translator: &ChunkTranslator, job: &TranslationJob) -> JobOutcome {
    match AssertUnwindSafe(translator.translate(job)).catch_unwind().await {
        Ok(Ok(text)) => JobOutcome::Success(text),
        Ok(Err(e)) => {
            debug!("Job for {} failed: {}", job.target_language, e);
            JobOutcome::Failure(e.to_string())
        }
        Err(panic) => {
            let message = panic_message(panic.as_ref());
            error!("Job for {} panicked: {}", job.target_language, message);
            JobOutcome::Failure(TranslationError::Aborted(message).to_string())
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "job panicked".to_string()
    }
}
