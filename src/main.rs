//! Kemono Downloader - CLI entry point.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use kemono_downloader::{
    api::parse_creator_url,
    cli::{Args, Prompter},
    config::{validate_config, Config},
    download::{api_for_creator, process_creator, RunOptions},
    error::{exit_codes, Error, Result},
    output::{
        create_multi_progress, print_banner, print_config_summary, print_creator_stats,
        print_error, print_info, print_success, print_warning, ProgressLogWriter,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::NoPosts(_) => {
                    print_error(
                        "Failed to fetch artist data. Please check the provided URL and try again.",
                    );
                    ExitCode::from(exit_codes::API_ERROR as u8)
                }
                Error::Aborted => ExitCode::from(exit_codes::ABORT as u8),
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::TomlParse(_)
                | Error::InvalidUrl(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Api(_) | Error::ApiStatus { .. } => {
                    ExitCode::from(exit_codes::API_ERROR as u8)
                }
                Error::Download(_) => ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8),
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging; log lines go to stderr around the progress bars
    let multi = create_multi_progress(true);
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let log_multi = multi.clone();
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(move || ProgressLogWriter::new(log_multi.clone(), io::stderr()))
        .init();

    // Print banner
    print_banner();

    // Load configuration
    let mut config = match Config::locate(args.config.as_deref()) {
        Some(path) => {
            tracing::debug!("Loading configuration from {}", path.display());
            Config::load(&path)?
        }
        None => {
            print_info("No configuration file found, using defaults");
            Config::default()
        }
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    // Validate configuration
    validate_config(&config)?;

    // Ask for whatever is still missing
    let mut prompter = Prompter::stdio();

    let creator = match config.targeted_creator.url.as_deref() {
        Some(url) => parse_creator_url(url)?,
        None => prompter.creator()?,
    };

    let mode = match config.options.download_mode {
        Some(mode) => mode,
        None => prompter.download_mode()?,
    };

    let download_directory = match config.options.download_directory.clone() {
        Some(dir) => dir,
        None => prompter.download_directory()?,
    };

    let options = RunOptions::from_config(&config, mode, download_directory);

    // Print configuration summary
    print_config_summary(
        &creator.to_string(),
        &mode.to_string(),
        &options.download_directory.display().to_string(),
        options.workers,
    );

    let api = api_for_creator(&config, &creator)?;

    let stats = process_creator(&api, &creator, &options, &multi).await?;

    print_creator_stats(&stats);

    if stats.failed_count > 0 {
        print_warning(&format!(
            "{} file(s) could not be downloaded, see the log above",
            stats.failed_count
        ));
    }
    print_success("Download completed!");

    Ok(())
}
