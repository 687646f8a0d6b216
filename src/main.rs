// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2markdown::{pipeline, AppError, CommandLineInput, NotionHttpClient, PipelineConfig};
use std::fs;

/// Sets up logging configuration.
///
/// Console output goes to stderr so the Markdown on stdout stays clean.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion2markdown.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Runs the command, bounded by the configured deadline if any.
async fn execute(config: &PipelineConfig) -> Result<String, AppError> {
    let client = NotionHttpClient::new(&config.api_key, &config.client)?;
    let work = pipeline::run(&client, config);

    match config.deadline {
        Some(deadline) => tokio::time::timeout(deadline, work)
            .await
            .map_err(|_| AppError::DeadlineExceeded {
                seconds: deadline.as_secs(),
            })?,
        None => work.await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose).context("failed to initialize logging")?;

    let config = PipelineConfig::resolve(cli).context("invalid configuration")?;
    log::debug!("Resolved command: {:?}", config.command);

    let markdown = execute(&config).await.context("conversion failed")?;

    match &config.output_file {
        Some(path) => {
            fs::write(path, &markdown)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("✓ Markdown saved to {}", path.display());
        }
        None => println!("{}", markdown),
    }

    Ok(())
}
