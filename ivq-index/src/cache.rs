//! Snapshot cache
//!
//! Runs the aggregation build at most once per cache lifetime and coalesces
//! concurrent callers onto the in-flight build.
//!
//! # States
//! - **Empty**: no snapshot; the next caller starts a build
//! - **Building**: a shared build future exists; callers await a clone of it
//! - **Ready**: the published snapshot; callers get the same `Arc`
//!
//! A failed build fans the same error out to every waiter and returns the cache
//! to Empty, so a later call starts a fresh build. The build task settles the
//! state itself, so this holds even when every waiter has gone away. There is
//! no invalidation: a rebuild requires a new cache.

use crate::engine;
use crate::snapshot::Snapshot;
use crate::source::{fetch_source_data, QuestionSource};
use futures::future::{BoxFuture, FutureExt, Shared};
use ivq_common::{CatalogConfig, Error, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

type BuildOutcome = std::result::Result<Arc<Snapshot>, Arc<Error>>;
type BuildFuture = Shared<BoxFuture<'static, BuildOutcome>>;

enum CacheState {
    Empty,
    Building { generation: u64, future: BuildFuture },
    Ready(Arc<Snapshot>),
}

struct CacheInner {
    state: CacheState,
    next_generation: u64,
}

/// Memoizing owner of the catalog snapshot
///
/// Constructed by the application's composition root with its data source;
/// tests construct one per fixture.
pub struct SnapshotCache {
    source: Arc<dyn QuestionSource>,
    config: Arc<CatalogConfig>,
    inner: Arc<Mutex<CacheInner>>,
    builds_started: AtomicUsize,
}

impl SnapshotCache {
    pub fn new(source: Arc<dyn QuestionSource>, config: Arc<CatalogConfig>) -> Self {
        Self {
            source,
            config,
            inner: Arc::new(Mutex::new(CacheInner {
                state: CacheState::Empty,
                next_generation: 0,
            })),
            builds_started: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Get the snapshot, building it on first use
    ///
    /// Callers arriving during a build wait for that build. On failure every
    /// waiter receives `Error::BuildFailed` wrapping the same cause.
    pub async fn get_snapshot(&self) -> Result<Arc<Snapshot>> {
        let (generation, future) = {
            let mut guard = self.inner.lock().await;
            let inner = &mut *guard;
            match &inner.state {
                CacheState::Ready(snapshot) => return Ok(Arc::clone(snapshot)),
                CacheState::Building { generation, future } => {
                    debug!(generation, "Joining in-flight snapshot build");
                    (*generation, future.clone())
                }
                CacheState::Empty => {
                    let generation = inner.next_generation;
                    inner.next_generation += 1;
                    let future = self.start_build(generation);
                    inner.state = CacheState::Building {
                        generation,
                        future: future.clone(),
                    };
                    (generation, future)
                }
            }
        };

        let outcome = future.await;

        // Normally already settled by the build task; covers a task that panicked
        settle(&mut *self.inner.lock().await, generation, &outcome);

        outcome.map_err(Error::BuildFailed)
    }

    /// The published snapshot, if any, without triggering a build
    pub async fn peek(&self) -> Option<Arc<Snapshot>> {
        match &self.inner.lock().await.state {
            CacheState::Ready(snapshot) => Some(Arc::clone(snapshot)),
            _ => None,
        }
    }

    /// Number of builds started over the cache's lifetime
    pub fn build_count(&self) -> usize {
        self.builds_started.load(Ordering::SeqCst)
    }

    /// Spawn the build so it runs to completion even if every caller goes away
    fn start_build(&self, generation: u64) -> BuildFuture {
        self.builds_started.fetch_add(1, Ordering::SeqCst);
        info!(generation, "Starting snapshot build");

        let source = Arc::clone(&self.source);
        let config = Arc::clone(&self.config);
        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            let outcome: BuildOutcome = match run_build(source, config).await {
                Ok(snapshot) => Ok(Arc::new(snapshot)),
                Err(e) => {
                    warn!(generation, error = %e, "Snapshot build failed");
                    Err(Arc::new(e))
                }
            };
            settle(&mut *inner.lock().await, generation, &outcome);
            outcome
        });

        async move {
            match handle.await {
                Ok(outcome) => outcome,
                Err(join_error) => Err(Arc::new(Error::Internal(format!(
                    "Snapshot build task failed: {}",
                    join_error
                )))),
            }
        }
        .boxed()
        .shared()
    }
}

/// Publish or clear the outcome of build `generation` if it is still the current one
fn settle(inner: &mut CacheInner, generation: u64, outcome: &BuildOutcome) {
    let current = matches!(
        &inner.state,
        CacheState::Building { generation: g, .. } if *g == generation
    );
    if !current {
        return;
    }

    inner.state = match outcome {
        Ok(snapshot) => CacheState::Ready(Arc::clone(snapshot)),
        Err(_) => {
            debug!(generation, "Cache reset after failed build");
            CacheState::Empty
        }
    };
}

async fn run_build(source: Arc<dyn QuestionSource>, config: Arc<CatalogConfig>) -> Result<Snapshot> {
    let data = fetch_source_data(source.as_ref()).await?;

    // Aggregation is CPU-bound; keep it off the async workers
    tokio::task::spawn_blocking(move || engine::build(&data, &config))
        .await
        .map_err(|e| Error::Internal(format!("Aggregation task failed: {}", e)))?
}
