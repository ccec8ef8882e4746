//! The fetch, transform, project and publish cycle.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::snapshot::SnapshotPublisher;
use crate::source::AclSource;
use crate::transform::{build_graph, build_graph_with_topics};
use crate::visjs::{Network, create_network};

#[derive(Debug, Clone)]
pub struct RefreshConfig {
    pub interval: Duration,
    /// Upper bound for each call to the source.
    pub timeout: Duration,
    /// Also draw topics that have no ACLs.
    pub show_all_topics: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(600),
            timeout: Duration::from_secs(60),
            show_all_topics: false,
        }
    }
}

async fn bounded<T>(
    timeout: Duration,
    call: impl std::future::Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(timeout, call)
        .await
        .map_err(|_| Error::Timeout { after: timeout })?
}

/// Fetches ACLs (and topics when configured) and renders them.
pub async fn load_network(source: &dyn AclSource, config: &RefreshConfig) -> Result<Network> {
    let acls = bounded(config.timeout, source.list_acls()).await?;
    let graph = if config.show_all_topics {
        let topics = bounded(config.timeout, source.list_topics()).await?;
        build_graph_with_topics(&acls, &topics)
    } else {
        build_graph(&acls)
    };
    Ok(create_network(&graph))
}

/// Runs one cycle. On failure nothing is published and the previous
/// snapshot stays visible.
pub async fn refresh_once(
    source: &dyn AclSource,
    config: &RefreshConfig,
    publisher: &mut SnapshotPublisher,
) -> Result<u64> {
    let start = Instant::now();
    let network = load_network(source, config).await?;
    let (nodes, edges) = (network.nodes.len(), network.edges.len());
    let generation = publisher.publish(network);
    info!(
        source = %source.name(),
        load_duration_ms = start.elapsed().as_millis() as u64,
        nodes,
        edges,
        generation,
        "fetched ACLs"
    );
    Ok(generation)
}

/// Refreshes on `config.interval` until `shutdown` flips to `true`.
pub async fn run(
    source: Arc<dyn AclSource>,
    config: RefreshConfig,
    mut publisher: SnapshotPublisher,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    info!("refresh loop stopping");
                    return;
                }
                continue;
            }
        }

        if let Err(e) = refresh_once(source.as_ref(), &config, &mut publisher).await {
            warn!(
                source = %source.name(),
                error = %e,
                "ACL refresh failed, keeping last snapshot"
            );
        }
    }
}
