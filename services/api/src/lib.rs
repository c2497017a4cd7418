mod calc;
mod cli;
mod infra;
mod routes;
mod server;

use horeca_ops::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
