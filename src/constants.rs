// Release coordinates
pub const RELEASE_HOST: &str = "https://github.com";
pub const RELEASE_OWNER: &str = "defold";
pub const RELEASE_REPO: &str = "defold";
pub const HEADERS_ARCHIVE_NAME: &str = "defoldsdk_headers.zip";

// Archive layout
pub const INCLUDE_PREFIX: &str = "defoldsdk/sdk/include";
pub const DMSDK_PREFIX: &str = "defoldsdk/sdk/include/dmsdk/";

// Local layout, relative to the crate root
pub const HEADERS_DIR_NAME: &str = "dmsdk";

// Logging
pub const DEFAULT_LOG_FILTER: &str = "warn";
