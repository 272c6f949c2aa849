use crate::config::FetchConfig;
use crate::errors::{AppError, AppResult};
use std::fs::File;
use std::io::Cursor;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};
use zip::ZipArchive;

/// Maps an archive entry name to its path relative to the target directory.
///
/// Returns `Ok(None)` for entries outside `include_prefix` and for directory
/// entries. Matching entries lose `strip_prefix` when they start with it;
/// otherwise `include_prefix` and the separator after it are removed, so
/// `defoldsdk/sdk/include/readme.txt` maps to `readme.txt`. A name that only
/// shares the prefix text, like `defoldsdk/sdk/includes/x.h`, is kept whole.
///
/// # Errors
///
/// Returns `InvalidArchive` when the rewritten path is empty or would leave
/// the target directory (`..`, drive prefixes, root components).
///
/// # Example
///
/// ```
/// use dmsdk_headers::{config::FetchConfig, extractor};
/// use std::path::PathBuf;
///
/// let config = FetchConfig::default();
/// let path = extractor::entry_output_path("defoldsdk/sdk/include/dmsdk/sdk.h", &config).unwrap();
/// assert_eq!(path, Some(PathBuf::from("sdk.h")));
///
/// let skipped = extractor::entry_output_path("defoldsdk/lib/libdlib.a", &config).unwrap();
/// assert_eq!(skipped, None);
/// ```
pub fn entry_output_path(name: &str, config: &FetchConfig) -> AppResult<Option<PathBuf>> {
    if !name.starts_with(config.include_prefix.as_str()) || name.ends_with('/') {
        return Ok(None);
    }

    let rest = match name.strip_prefix(config.strip_prefix.as_str()) {
        Some(rest) => rest,
        None => {
            let remainder = &name[config.include_prefix.len()..];
            // Only a whole directory name is stripped; `include2/x.h` keeps its full path.
            if remainder.is_empty() || remainder.starts_with('/') {
                remainder.trim_start_matches('/')
            } else {
                name
            }
        }
    };

    let mut relative = PathBuf::new();
    for segment in rest.split('/').filter(|s| !s.is_empty() && *s != ".") {
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => relative.push(part),
            _ => {
                return Err(AppError::InvalidArchive(format!(
                    "Entry {name} would be written outside the target directory"
                )))
            }
        }
    }

    if relative.as_os_str().is_empty() {
        return Err(AppError::InvalidArchive(format!(
            "Entry {name} has no file name after removing its prefix"
        )));
    }

    Ok(Some(relative))
}

/// Writes every matching entry of an in-memory zip archive under `target_dir`.
///
/// Entries are visited in archive order. Parent directories are created as
/// needed and existing files are overwritten. Contents are copied byte for
/// byte. `on_written` is called with the full output path after each file is
/// closed and an error from it stops the extraction; the returned list holds
/// the same paths in the same order.
///
/// # Errors
///
/// Returns `InvalidArchive` if `archive` is not a readable zip or holds an
/// unsafe entry name, and `IoError` if a directory or file cannot be written.
/// Files written before the failure are left in place.
pub fn extract_headers<F>(
    archive: &[u8],
    target_dir: &Path,
    config: &FetchConfig,
    mut on_written: F,
) -> AppResult<Vec<PathBuf>>
where
    F: FnMut(&Path) -> AppResult<()>,
{
    let mut archive = ZipArchive::new(Cursor::new(archive))
        .map_err(|e| AppError::InvalidArchive(format!("Failed to read ZIP archive: {e}")))?;

    let mut written = Vec::new();
    let mut skipped = 0usize;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| {
            AppError::InvalidArchive(format!("Failed to read entry {i} from ZIP archive: {e}"))
        })?;

        let relative = match entry_output_path(entry.name(), config)? {
            Some(relative) => relative,
            None => {
                skipped += 1;
                continue;
            }
        };
        let out_path = target_dir.join(relative);

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::IoError(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        {
            let mut out_file = File::create(&out_path).map_err(|e| {
                AppError::IoError(format!(
                    "Failed to create file {}: {}",
                    out_path.display(),
                    e
                ))
            })?;

            std::io::copy(&mut entry, &mut out_file).map_err(|e| {
                AppError::IoError(format!(
                    "Failed to copy {} to {}: {}",
                    entry.name(),
                    out_path.display(),
                    e
                ))
            })?;
        }

        debug!(entry = entry.name(), path = %out_path.display(), "Extracted entry");
        on_written(&out_path)?;
        written.push(out_path);
    }

    info!(
        extracted = written.len(),
        skipped = skipped,
        target_dir = %target_dir.display(),
        "Extraction completed"
    );

    Ok(written)
}
