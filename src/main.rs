use std::sync::Arc;

use anyhow::{Context, Result};
use duckyci_watch::api::DuckyClient;
use duckyci_watch::core::logging::init_logging;
use duckyci_watch::core::Config;
use duckyci_watch::notify::TelegramNotifier;
use duckyci_watch::runtime::Poller;
use duckyci_watch::scanner::StoreChecker;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.logging);

    tracing::info!("🚀 DuckyCI watch starting...");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Upstream: {}", config.upstream.base_url);
    if config.upstream.authorization_token.is_none() {
        tracing::warn!("AUTHORIZATION_TOKEN not set, upstream requests will likely be rejected");
    }

    let notifier = TelegramNotifier::new(&config.telegram);
    if notifier.is_enabled() {
        tracing::info!("✅ Telegram notifications enabled");
    } else {
        tracing::warn!("Telegram notifications disabled (TG_BOT_TOKEN or TG_CHAT_ID missing)");
    }

    let client = DuckyClient::new(&config.upstream).context("Failed to build HTTP client")?;

    let poller = Poller::new(
        Arc::new(client),
        Arc::new(notifier),
        StoreChecker::default(),
        config.polling.interval,
    );

    poller.run().await;

    Ok(())
}
