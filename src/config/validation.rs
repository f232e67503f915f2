//! Configuration validation logic.

use std::fs::{self, OpenOptions};
use std::path::Path;

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Upper bound on concurrent downloads.
const MAX_WORKERS: usize = 64;

/// Validate the entire configuration.
///
/// Values that are still unset (creator URL, directory, mode) are not errors
/// here; they get prompted for.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_workers(config.options.workers)?;
    validate_timeout("request_timeout_seconds", config.network.request_timeout_seconds)?;
    validate_timeout("read_timeout_seconds", config.network.read_timeout_seconds)?;

    if let Some(base_url) = &config.network.base_url {
        validate_base_url(base_url)?;
    }

    if let Some(dir) = &config.options.download_directory {
        validate_download_directory(dir)?;
    }

    Ok(())
}

/// Validate the worker pool size.
pub fn validate_workers(workers: usize) -> Result<()> {
    if workers == 0 || workers > MAX_WORKERS {
        return Err(Error::ConfigValidation {
            field: "workers".to_string(),
            message: format!(
                "Worker count must be between 1 and {} (got {})",
                MAX_WORKERS, workers
            ),
        });
    }

    Ok(())
}

fn validate_timeout(field: &str, seconds: u64) -> Result<()> {
    if seconds == 0 {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: "Timeout must be at least one second".to_string(),
        });
    }

    Ok(())
}

/// Validate an API origin override.
pub fn validate_base_url(base_url: &str) -> Result<()> {
    let parsed = url::Url::parse(base_url).map_err(|e| Error::ConfigValidation {
        field: "base_url".to_string(),
        message: format!("'{}' is not a valid URL: {}", base_url, e),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::ConfigValidation {
            field: "base_url".to_string(),
            message: format!("Unsupported scheme '{}'", parsed.scheme()),
        });
    }

    Ok(())
}

/// Check that a directory exists and that files can be created in it.
pub fn validate_download_directory(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        return Err(Error::ConfigValidation {
            field: "download_directory".to_string(),
            message: format!("'{}' is not a directory", dir.display()),
        });
    }

    let probe = dir.join(format!(".kemono-write-test-{}", std::process::id()));
    match OpenOptions::new().write(true).create_new(true).open(&probe) {
        Ok(_) => {
            let _ = fs::remove_file(&probe);
            Ok(())
        }
        Err(e) => Err(Error::ConfigValidation {
            field: "download_directory".to_string(),
            message: format!("No write permission for '{}': {}", dir.display(), e),
        }),
    }
}
