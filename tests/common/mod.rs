/*!
 * Common test utilities for the translate-all test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use translate_all::app_config::Config;
use translate_all::providers::mock::MockTranslator;
use translate_all::translation::{chunk_text, ChunkTranslator, TranslationJob};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Configuration writing into `outdir` with the given worker bound
pub fn test_config(outdir: &Path, workers: usize) -> Config {
    let mut config = Config::default();
    config.project_id = "test-project".to_string();
    config.run.outdir = outdir.to_path_buf();
    config.run.workers = workers;
    config.run.retry_backoff_ms = 1;
    config
}

/// One job per code over the chunks of `text`
pub fn jobs_for(codes: &[&str], text: &str, max_chars: usize) -> Vec<TranslationJob> {
    codes
        .iter()
        .map(|code| TranslationJob::new(*code, chunk_text(text, max_chars)))
        .collect()
}

/// Translator backed by a clone of `mock`, with `source` as the source hint
pub fn translator_for(mock: &MockTranslator, source: &str) -> ChunkTranslator {
    ChunkTranslator::new(Arc::new(mock.clone())).with_source_language(Some(source.to_string()))
}
