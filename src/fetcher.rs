use crate::config::FetchConfig;
use crate::downloader::{fetch_archive, release_url};
use crate::errors::{AppError, AppResult};
use crate::extractor::extract_headers;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};
use url::Url;

/// Outcome of a successful [`fetch_headers`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    /// URL the archive was downloaded from
    pub url: Url,
    /// Directory that was wiped and repopulated
    pub target_dir: PathBuf,
    /// Written files, in archive order
    pub files: Vec<PathBuf>,
}

/// Replaces the local header tree with the headers of SDK release `version`.
///
/// Steps, in order, each aborting the run on failure:
/// 1. Validate the version and build the release URL.
/// 2. Remove `config.target_dir` recursively. A missing directory is an error
///    unless `config.create_missing_target` is set; either way nothing has
///    been downloaded or written to `out` yet.
/// 3. Write `Downloading <url>...` to `out` and GET the archive.
/// 4. Extract every entry under the include prefix, writing each output path
///    to `out` as soon as the file is closed.
///
/// The binary passes stdout as `out`. There is no rollback: a failure after
/// step 2 leaves the target directory deleted or partially populated, and the
/// fix is to rerun.
///
/// # Example
///
/// ```no_run
/// use dmsdk_headers::{config::FetchConfig, fetcher};
///
/// # async fn example() -> Result<(), dmsdk_headers::errors::AppError> {
/// let client = reqwest::Client::new();
/// let mut out = std::io::stdout();
/// let report =
///     fetcher::fetch_headers(&client, "1.9.6", &FetchConfig::default(), &mut out).await?;
/// println!("{} headers written", report.files.len());
/// # Ok(())
/// # }
/// ```
pub async fn fetch_headers<W: Write>(
    client: &reqwest::Client,
    version: &str,
    config: &FetchConfig,
    out: &mut W,
) -> AppResult<FetchReport> {
    let url = release_url(version, config)?;
    let target_dir = config.target_dir.clone();

    reset_target_dir(&target_dir, config.create_missing_target).await?;

    writeln!(out, "Downloading {url}...").map_err(progress_error)?;
    let archive = fetch_archive(client, &url).await?;

    let files = extract_headers(&archive, &target_dir, config, |path| {
        writeln!(out, "{}", path.display()).map_err(progress_error)
    })?;

    info!(
        version = version,
        files = files.len(),
        target_dir = %target_dir.display(),
        "Headers updated"
    );

    Ok(FetchReport {
        url,
        target_dir,
        files,
    })
}

fn progress_error(e: std::io::Error) -> AppError {
    AppError::IoError(format!("Failed to write progress output: {e}"))
}

/// Deletes `dir` and everything below it.
///
/// With `allow_missing` unset, a directory that does not exist is reported as
/// an `IoError`; the headers are expected to live in a checked-out tree.
async fn reset_target_dir(dir: &Path, allow_missing: bool) -> AppResult<()> {
    match fs::remove_dir_all(dir).await {
        Ok(()) => {
            debug!(target_dir = %dir.display(), "Removed previous headers");
            Ok(())
        }
        Err(e) if allow_missing && e.kind() == std::io::ErrorKind::NotFound => {
            debug!(target_dir = %dir.display(), "Target directory absent, nothing to remove");
            Ok(())
        }
        Err(e) => Err(AppError::IoError(format!(
            "Failed to remove target directory {}: {}",
            dir.display(),
            e
        ))),
    }
}
