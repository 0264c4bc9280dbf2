pub mod analysis;
pub mod config;
pub mod crawler;
pub mod declare;
pub mod logging;
pub mod search;
pub mod store;
pub mod util;
pub mod view;
pub mod web;

use std::{sync::Arc, time::Duration};

use crate::{config::SETTINGS, crawler::bist::Bist, store::SnapshotStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let store = Arc::new(SnapshotStore::new(
        Arc::new(Bist),
        Duration::from_secs(SETTINGS.feed.interval_secs),
    ));
    store.start();

    let listener = tokio::net::TcpListener::bind(&SETTINGS.web.bind).await?;
    logging::info_file_async(format!("stock_monitor 已啟動 {}", SETTINGS.web.bind));

    axum::serve(listener, web::router(Arc::clone(&store)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.stop();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(why) = tokio::signal::ctrl_c().await {
        logging::error_file_async(format!("Failed to listen for Ctrl+C because {:?}", why));
    }
}
