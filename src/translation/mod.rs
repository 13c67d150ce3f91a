/*!
 * Translation engine for fanning a document out to many languages.
 *
 * This module contains the orchestration core. It is split into several
 * submodules:
 *
 * - `chunking`: Line-preserving splitting of the document into request-sized chunks
 * - `core`: Sequential translation of one job's chunks into one language
 * - `scheduler`: Bounded concurrent execution of all jobs with progress events
 */

// Re-export main types for easier usage
pub use self::chunking::{chunk_text, Chunk, DEFAULT_MAX_CHARS};
pub use self::core::{ChunkTranslator, RetryPolicy, TranslationJob};
pub use self::scheduler::{JobOutcome, JobProgress, JobScheduler};

// Submodules
pub mod chunking;
pub mod core;
pub mod scheduler;
