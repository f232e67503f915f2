//! Configuration structures and loading logic.

use crate::config::modes::DownloadMode;
use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the configuration file looked up by default.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub targeted_creator: CreatorConfig,

    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub network: NetworkConfig,
}

/// Creator targeting configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatorConfig {
    /// Creator page URL, e.g. `https://kemono.su/patreon/user/12345`.
    #[serde(default)]
    pub url: Option<String>,
}

/// Download options configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionsConfig {
    /// Directory the files are written into.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Download mode (media, all). Prompted for when unset.
    #[serde(default)]
    pub download_mode: Option<DownloadMode>,

    /// Number of concurrent downloads.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Walk the listing once up front to size the page progress bar.
    #[serde(default = "default_true")]
    pub count_pages: bool,

    /// Prefix file names with the creator's display name.
    #[serde(default = "default_true")]
    pub prefix_artist_name: bool,

    /// Whether to show per-file progress and download lines.
    #[serde(default = "default_true")]
    pub show_downloads: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_directory: None,
            download_mode: None,
            workers: default_workers(),
            count_pages: true,
            prefix_artist_name: true,
            show_downloads: true,
        }
    }
}

/// HTTP settings.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    /// API origin override. Defaults to the origin of the creator URL.
    #[serde(default)]
    pub base_url: Option<String>,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for a whole API request, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Maximum idle time while streaming a file, in seconds.
    #[serde(default = "default_read_timeout")]
    pub read_timeout_seconds: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            user_agent: default_user_agent(),
            request_timeout_seconds: default_request_timeout(),
            read_timeout_seconds: default_read_timeout(),
        }
    }
}

fn default_user_agent() -> String {
    concat!("kemono-downloader/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_true() -> bool {
    true
}

fn default_workers() -> usize {
    10
}

fn default_request_timeout() -> u64 {
    30
}

fn default_read_timeout() -> u64 {
    60
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve which config file to read.
    ///
    /// An explicit path wins; otherwise `config.toml` in the working directory,
    /// then the same name in the platform config directory.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return Some(local);
        }

        ProjectDirs::from("", "", "kemono-downloader")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    /// Timeout applied to listing and profile requests.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.network.request_timeout_seconds)
    }

    /// Idle timeout applied while streaming attachments.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.network.read_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.options.workers, 10);
        assert!(config.options.count_pages);
        assert!(config.options.prefix_artist_name);
        assert!(config.options.download_mode.is_none());
        assert!(config.network.base_url.is_none());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[targeted_creator]
url = "https://kemono.su/fanbox/user/42"

[options]
download_mode = "all"
workers = 4
count_pages = false
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.targeted_creator.url.as_deref(),
            Some("https://kemono.su/fanbox/user/42")
        );
        assert_eq!(config.options.download_mode, Some(DownloadMode::All));
        assert_eq!(config.options.workers, 4);
        assert!(!config.options.count_pages);
        assert!(config.options.show_downloads);
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(include_str!("../../config.example.toml")).unwrap();
        assert_eq!(config.options.workers, 10);
        assert!(config.targeted_creator.url.is_none());
        assert_eq!(config.read_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_locate_explicit() {
        let path = Path::new("/tmp/custom.toml");
        assert_eq!(Config::locate(Some(path)), Some(path.to_path_buf()));
    }
}
