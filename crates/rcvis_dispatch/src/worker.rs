//! Workers consuming the movie queue.

use crate::{JobRateLimiter, JobReceiver, MovieJob, MovieMessage};
use async_trait::async_trait;
use rcvis_core::MovieGenerationStatus;
use rcvis_error::RcvisResult;
use rcvis_movie::MovieCreationOrchestrator;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

/// Executes one movie job.
#[async_trait]
pub trait MovieJobHandler: Send + Sync {
    /// Renders the movie for `job` and returns the record's final status.
    async fn handle(&self, job: &MovieJob) -> RcvisResult<MovieGenerationStatus>;
}

#[async_trait]
impl MovieJobHandler for MovieCreationOrchestrator {
    async fn handle(&self, job: &MovieJob) -> RcvisResult<MovieGenerationStatus> {
        self.create_movie(job.record_id, &job.base_url).await
    }
}

/// Worker that renders queued movies one at a time.
pub struct MovieWorker {
    id: usize,
    handler: Arc<dyn MovieJobHandler>,
    limiter: JobRateLimiter,
    rx: JobReceiver,
}

impl MovieWorker {
    /// Creates a worker.
    pub fn new(
        id: usize,
        handler: Arc<dyn MovieJobHandler>,
        limiter: JobRateLimiter,
        rx: JobReceiver,
    ) -> Self {
        Self {
            id,
            handler,
            limiter,
            rx,
        }
    }

    /// Runs the worker loop until shutdown or until the queue closes.
    #[instrument(skip(self), fields(worker = self.id))]
    pub async fn run(self) {
        info!("Movie worker started");

        loop {
            let message = self.rx.lock().await.recv().await;
            match message {
                Some(MovieMessage::CreateMovie(job)) => {
                    self.limiter.until_ready().await;
                    match self.handler.handle(&job).await {
                        Ok(status) => {
                            info!(record_id = job.record_id, %status, "Movie job finished")
                        }
                        Err(e) => error!(record_id = job.record_id, error = ?e, "Movie job failed"),
                    }
                }
                Some(MovieMessage::Shutdown) => {
                    info!("Movie worker shutting down");
                    break;
                }
                None => {
                    info!("Movie queue closed");
                    break;
                }
            }
        }
    }
}

/// Spawns `count` workers sharing one queue and one rate limiter.
pub fn spawn_workers(
    count: usize,
    handler: Arc<dyn MovieJobHandler>,
    limiter: JobRateLimiter,
    rx: JobReceiver,
) -> Vec<JoinHandle<()>> {
    (0..count)
        .map(|id| {
            let worker = MovieWorker::new(id, Arc::clone(&handler), limiter.clone(), Arc::clone(&rx));
            tokio::spawn(async move {
                worker.run().await;
            })
        })
        .collect()
}
