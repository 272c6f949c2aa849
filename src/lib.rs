//! dmsdk-headers library
//!
//! Downloads the `defoldsdk_headers.zip` asset of a Defold release and
//! replaces the local `dmsdk/` header tree with its `defoldsdk/sdk/include`
//! contents. The binary is a thin wrapper around [`fetcher::fetch_headers`].
//!
//! ## Overview
//!
//! - [`fetcher`] - The end-to-end pipeline: wipe, download, extract
//! - [`downloader`] - Release URL construction and the HTTP GET
//! - [`extractor`] - Prefix filtering, path rewriting and file writes
//! - [`config`] - Release coordinates, prefixes and target directory
//! - [`cli`] - Command-line parsing
//! - [`errors`] - Error types used throughout the crate
//!
//! ## Example Usage
//!
//! ```no_run
//! use dmsdk_headers::{config::FetchConfig, errors::AppResult, fetcher};
//!
//! # async fn example() -> AppResult<()> {
//! let client = reqwest::Client::new();
//! let mut progress: Vec<u8> = Vec::new();
//! let report =
//!     fetcher::fetch_headers(&client, "1.9.6", &FetchConfig::default(), &mut progress).await?;
//! println!("{} headers from {}", report.files.len(), report.url);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod downloader;
pub mod errors;
pub mod extractor;
pub mod fetcher;
pub mod logging;
