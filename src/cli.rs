use crate::config::FetchConfig;
use crate::errors::AppResult;
use crate::fetcher::fetch_headers;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Builds the command-line definition.
///
/// The only required input is the SDK release tag. `--config` optionally
/// points at a TOML file overriding release coordinates and the target
/// directory.
pub fn command() -> Command<'static> {
    Command::new("dmsdk-headers")
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .after_help("Example:\n  dmsdk-headers 1.9.6")
        .arg(
            Arg::new("sdk_version")
                .value_name("VERSION")
                .help("Defold release tag to fetch headers for (e.g. 1.9.6)")
                .required(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("TOML file overriding release host, prefixes or target directory")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
}

/// Parses process arguments and runs the header fetch.
pub async fn cli() -> AppResult<()> {
    let matches = command().get_matches();
    run(&matches).await
}

async fn run(matches: &ArgMatches) -> AppResult<()> {
    let version = matches
        .get_one::<String>("sdk_version")
        .expect("sdk_version is required")
        .as_str();
    let config = resolve_config(matches)?;

    info!(
        version = version,
        target_dir = %config.target_dir.display(),
        "Fetching SDK headers"
    );

    let client = reqwest::Client::new();
    let mut stdout = std::io::stdout();
    fetch_headers(&client, version, &config, &mut stdout).await?;
    Ok(())
}

fn resolve_config(matches: &ArgMatches) -> AppResult<FetchConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => FetchConfig::from_toml_file(path),
        None => Ok(FetchConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        command().debug_assert();
    }

    #[test]
    fn version_is_required() {
        let result = command().try_get_matches_from(vec!["dmsdk-headers"]);
        assert!(result.is_err());
    }

    #[test]
    fn version_is_taken_verbatim() {
        let matches = command()
            .try_get_matches_from(vec!["dmsdk-headers", "1.9.6-beta"])
            .unwrap();
        assert_eq!(
            matches.get_one::<String>("sdk_version").map(|s| s.as_str()),
            Some("1.9.6-beta")
        );
        assert_eq!(resolve_config(&matches).unwrap(), FetchConfig::default());
    }

    #[test]
    fn config_flag_loads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fetch.toml");
        std::fs::write(&path, "create_missing_target = true\n").unwrap();

        let matches = command()
            .try_get_matches_from(vec![
                "dmsdk-headers",
                "1.9.6",
                "--config",
                path.to_str().unwrap(),
            ])
            .unwrap();
        let config = resolve_config(&matches).unwrap();
        assert!(config.create_missing_target);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let matches = command()
            .try_get_matches_from(vec!["dmsdk-headers", "1.9.6", "-c", "nope/fetch.toml"])
            .unwrap();
        assert!(resolve_config(&matches).is_err());
    }
}
