//! CLI for subtopic
//!
//! Subcommands:
//! - `demo`: run the sync layer end to end against the in-memory store
//!   (subscribe, create, list, delete, offline/online toggling) — useful
//!   as a smoke test

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};

use subtopic_config::load_config;
use subtopic_core::NewTopic;
use subtopic_service::TopicSyncService;
use subtopic_store::MemoryTopicStore;

#[derive(Parser)]
#[command(name = "subtopic")]
enum Command {
    /// Exercise the sync layer against the in-memory store
    Demo,
}

#[tokio::main]
async fn main() {
    subtopic_utils::logging::init("info");

    let cmd = Command::parse();

    match cmd {
        Command::Demo => {
            if let Err(e) = run_demo().await {
                error!("Demo failed: {}", e);
            }
        }
    }
}

async fn run_demo() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let store = Arc::new(MemoryTopicStore::new(&config.store.collection));
    let service = TopicSyncService::new(store.clone(), config.sync.freshness_window_ms());

    info!("watching collection '{}'", store.collection());
    let subscription = service.subscribe(|topics, from_cache| {
        info!("update: {} topic(s), from_cache={}", topics.len(), from_cache);
        for topic in &topics {
            info!("  {} (id={}, by={})", topic.name, topic.id, topic.created_by);
        }
    });

    let rust_id = service
        .add_topic(NewTopic {
            name: "rust".to_string(),
            created_by: "demo".to_string(),
        })
        .await?;
    service
        .add_topic(NewTopic {
            name: "sync-layers".to_string(),
            created_by: "demo".to_string(),
        })
        .await?;

    let topics = service.get_topics().await?;
    info!("listed {} topic(s) from cache", topics.len());

    // The toggle result is ignorable by contract; the demo checks anyway.
    service.enable_offline_mode().await?;
    if let Err(e) = service
        .add_topic(NewTopic {
            name: "unreachable".to_string(),
            created_by: "demo".to_string(),
        })
        .await
    {
        info!("offline write rejected: {e}");
    }
    service.enable_online_mode().await?;

    service.delete_topic(&rust_id).await?;

    // Let the last realtime events drain before detaching.
    tokio::time::sleep(Duration::from_millis(100)).await;
    subscription.unsubscribe();

    Ok(())
}
