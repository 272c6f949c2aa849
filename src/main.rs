use dmsdk_headers::{cli, errors, logging};
use errors::AppResult;

fn main() -> AppResult<()> {
    logging::init_logging()?;

    let rt =
        tokio::runtime::Runtime::new().map_err(|e| errors::AppError::IoError(e.to_string()))?;

    rt.block_on(cli::cli())
}
