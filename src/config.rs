use crate::constants::*;
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for a header fetch, with every value filled in.
///
/// The defaults describe the official Defold release page and the `dmsdk/`
/// directory beside this crate's manifest. A TOML file may override any
/// subset of the fields; unknown keys are rejected to catch typos.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// Scheme and host serving the releases, e.g. `https://github.com`
    pub release_host: String,
    /// Owner of the repository publishing the SDK
    pub owner: String,
    /// Repository publishing the SDK
    pub repo: String,
    /// Release asset holding the headers
    pub archive_name: String,
    /// Entries whose path starts with this prefix are extracted
    pub include_prefix: String,
    /// Longer prefix removed from matching entries when present
    pub strip_prefix: String,
    /// Directory wiped and repopulated by each run
    pub target_dir: PathBuf,
    /// When false, a missing `target_dir` aborts the run before any download.
    pub create_missing_target: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            release_host: RELEASE_HOST.to_string(),
            owner: RELEASE_OWNER.to_string(),
            repo: RELEASE_REPO.to_string(),
            archive_name: HEADERS_ARCHIVE_NAME.to_string(),
            include_prefix: INCLUDE_PREFIX.to_string(),
            strip_prefix: DMSDK_PREFIX.to_string(),
            target_dir: default_target_dir(),
            create_missing_target: false,
        }
    }
}

impl FetchConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// A relative `target_dir` is resolved against the directory holding the
    /// file, so a config checked in next to the headers keeps working from any
    /// working directory.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read, `ConfigError` if the TOML
    /// is malformed or has unknown keys, and `InvalidInput` if a value fails
    /// [`FetchConfig::validate`].
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::IoError(format!(
                "Failed to read config {}: {e}",
                path.display()
            ))
        })?;
        let mut config: FetchConfig = toml::from_str(&contents)
            .map_err(|e| AppError::ConfigError(format!("Failed to parse config: {e}")))?;

        if config.target_dir.is_relative() {
            if let Some(base) = path.parent() {
                config.target_dir = base.join(&config.target_dir);
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks the values that would otherwise produce a malformed URL or an
    /// extraction that writes nothing useful.
    pub fn validate(&self) -> AppResult<()> {
        let required = [
            ("release_host", &self.release_host),
            ("owner", &self.owner),
            ("repo", &self.repo),
            ("archive_name", &self.archive_name),
            ("include_prefix", &self.include_prefix),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::InvalidInput(format!("{name} must not be empty")));
            }
        }

        if !self.strip_prefix.starts_with(&self.include_prefix) {
            return Err(AppError::InvalidInput(format!(
                "strip_prefix '{}' must start with include_prefix '{}'",
                self.strip_prefix, self.include_prefix
            )));
        }

        if self.target_dir.as_os_str().is_empty() {
            return Err(AppError::InvalidInput("target_dir must not be empty".into()));
        }

        Ok(())
    }
}

/// `dmsdk/` next to the crate manifest, where the generated bindings expect
/// their headers.
pub fn default_target_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(HEADERS_DIR_NAME)
}
