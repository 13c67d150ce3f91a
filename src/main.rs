// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use translate_all::app_config::{self, CliOverrides, Config};
use translate_all::providers::google::GoogleTranslate;
use translate_all::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// translate-all - translate a document into every supported language
///
/// Lists the languages offered by Google Cloud Translation v3, detects the
/// document's language and writes one translation per target language.
#[derive(Parser, Debug)]
#[command(name = "translate-all")]
#[command(version)]
#[command(about = "Translate a document into every language supported by Google Cloud Translation v3")]
#[command(long_about = "Translate a document into every language supported by Google Cloud Translation v3.

EXAMPLES:
    translate-all --project my-project --input notes.txt
    translate-all --project my-project --input notes.txt --outdir out --exclude en,fr,ja
    translate-all --project my-project --input notes.txt --workers 16 --model general/nmt

AUTHENTICATION:
    Pass an OAuth access token with --access-token or GOOGLE_ACCESS_TOKEN.
    Without one, `gcloud auth application-default print-access-token` is used.")]
struct CommandLineOptions {
    /// Google Cloud project id
    #[arg(long)]
    project: String,

    /// Path to the UTF-8 text file to translate
    #[arg(long)]
    input: PathBuf,

    /// Directory to write outputs [default: translations_out]
    #[arg(long)]
    outdir: Option<PathBuf>,

    /// Comma-separated language codes to skip (e.g. 'en,fr,ja')
    #[arg(long)]
    exclude: Option<String>,

    /// Max concurrent translations; values below 1 mean 1 [default: 8]
    #[arg(long, allow_negative_numbers = true)]
    workers: Option<i64>,

    /// Optional JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Service location [default: global]
    #[arg(long)]
    location: Option<String>,

    /// Translation model, e.g. 'general/nmt'
    #[arg(long)]
    model: Option<String>,

    /// MIME type of the input [default: text/plain]
    #[arg(long)]
    mime_type: Option<String>,

    /// Language used for language display names (e.g. 'en')
    #[arg(long)]
    display_language: Option<String>,

    /// Maximum characters per translate request [default: 4500]
    #[arg(long)]
    max_chars: Option<usize>,

    /// Retries per failed chunk request [default: 0]
    #[arg(long)]
    retries: Option<u32>,

    /// OAuth access token for the translation API
    #[arg(long, env = "GOOGLE_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Show only language codes in progress lines
    #[arg(long)]
    no_language_names: bool,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI colour for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is lowered once config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        log::logger().flush();
        std::process::exit(1);
    }
    Ok(())
}

async fn run(options: CommandLineOptions) -> Result<()> {
    let mut config = match &options.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    config.apply_overrides(CliOverrides {
        project_id: Some(options.project),
        location: options.location,
        model: options.model,
        mime_type: options.mime_type,
        display_language: options.display_language,
        outdir: options.outdir,
        exclude: options.exclude,
        workers: options.workers,
        max_chars_per_chunk: options.max_chars,
        retry_count: options.retries,
        hide_language_names: options.no_language_names,
        log_level: options.log_level.map(Into::into),
    });

    config.validate()?;
    log::set_max_level(level_filter(&config.log_level));

    let port = GoogleTranslate::from_config(&config, options.access_token).await?;
    info!("Using {} ({:?})", port.location().parent(), config.service.model);

    let controller = Controller::with_config(config);
    let summary = controller.run(&options.input, Arc::new(port)).await?;

    println!();
    println!("{}", summary.render());

    Ok(())
}
