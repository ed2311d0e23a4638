use dotenv::dotenv;
use project_contact::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), AppError> {
    dotenv().ok();

    // Logs go to stderr, the session owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    run_app()
}
