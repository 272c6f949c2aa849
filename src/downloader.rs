//! Release URL construction and archive download.
//!
//! The whole archive is buffered in memory; it is a few megabytes of headers
//! and the extractor needs random access to the zip central directory anyway.

use crate::config::FetchConfig;
use crate::errors::{AppError, AppResult};
use tracing::{debug, info};
use url::Url;

/// Builds the download URL of the headers archive for `version`.
///
/// The version is inserted verbatim into the release tag segment:
/// `<host>/<owner>/<repo>/releases/download/<version>/<archive>`.
///
/// # Errors
///
/// Returns `InvalidInput` for an empty or whitespace-only version and
/// `UrlError` when the assembled string is not a valid absolute URL.
///
/// # Example
///
/// ```
/// use dmsdk_headers::{config::FetchConfig, downloader};
///
/// let url = downloader::release_url("1.9.6", &FetchConfig::default()).unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://github.com/defold/defold/releases/download/1.9.6/defoldsdk_headers.zip"
/// );
/// ```
pub fn release_url(version: &str, config: &FetchConfig) -> AppResult<Url> {
    if version.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Version must not be empty".to_string(),
        ));
    }

    let host = config.release_host.trim_end_matches('/');
    let raw = format!(
        "{host}/{}/{}/releases/download/{version}/{}",
        config.owner, config.repo, config.archive_name
    );
    let url = Url::parse(&raw)?;
    Ok(url)
}

/// Downloads `url` and returns the full response body.
///
/// Redirects are followed with the client's default policy, which release
/// asset links rely on. A non-success status is turned into a
/// `NetworkError` carrying the status code instead of handing an error page
/// to the zip reader.
pub async fn fetch_archive(client: &reqwest::Client, url: &Url) -> AppResult<Vec<u8>> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| AppError::NetworkError(format!("Failed to download {url}: {e}")))?;

    let status = response.status();
    debug!(url = %url, status = status.as_u16(), "Received response");

    let response = response.error_for_status().map_err(|e| {
        let status_code = status.as_u16();
        AppError::NetworkError(format!("HTTP {status_code}: Failed to download {url}: {e}"))
    })?;

    let body = response
        .bytes()
        .await
        .map_err(|e| AppError::NetworkError(format!("Failed to read body of {url}: {e}")))?;

    info!(url = %url, bytes = body.len(), "Archive downloaded");
    Ok(body.to_vec())
}
