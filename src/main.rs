use backend::app::App;
use backend::cli::Args;
use backend::config::Config;
use backend::logging::setup_logging;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            // Logging is not set up yet.
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(port) = args.port {
        config.port = port;
    }

    setup_logging(&config, args.tracing);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = if cfg!(debug_assertions) {
            "development"
        } else {
            "production"
        },
        "starting backend"
    );

    let app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            error!(error = ?e, "Failed to initialize application");
            return ExitCode::FAILURE;
        }
    };

    app.run().await
}
