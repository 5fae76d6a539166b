mod cli;
mod infra;
mod routes;
mod server;

use macro_compass::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
