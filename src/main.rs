//! PlayMate Volleyball
//!
//! Main application entry point

use std::io::Write;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use playmate::{
    config::Settings,
    handlers::{handle_line, Command},
    services::ServiceFactory,
    store::open_store,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", playmate::info());

    let store = open_store(&settings).await?;
    let services = ServiceFactory::new(store, &settings);

    if settings.store.seed_demo_event {
        services.events.seed_demo_event().await?;
    }

    info!(backend = services.backend(), "PlayMate is ready");
    if services.is_persistent() {
        println!("PlayMate Volleyball (cloud sync ON). Type 'help' for commands.");
    } else {
        println!("PlayMate Volleyball (demo mode). Type 'help' for commands.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        if matches!(Command::parse(&line), Ok(Some(Command::Quit))) {
            break;
        }

        if let Some(reply) = handle_line(&line, &services).await {
            println!("{}", reply);
        }
    }

    info!("PlayMate has been shut down.");
    Ok(())
}
