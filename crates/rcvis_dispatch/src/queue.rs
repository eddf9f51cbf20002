//! The named movie job queue.

use rcvis_error::{BackendError, RcvisResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, instrument};

/// Request to render both movies of one result record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieJob {
    /// Result record to render
    pub record_id: i64,
    /// Base URL remote visual assets are fetched from
    pub base_url: String,
}

/// Message types for movie workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieMessage {
    /// Render a movie
    CreateMovie(MovieJob),
    /// Stop the worker that receives this message
    Shutdown,
}

/// Receiving end of a queue, shared by every worker consuming it.
pub type JobReceiver = Arc<Mutex<mpsc::Receiver<MovieMessage>>>;

/// Sending end of a bounded, named job queue.
///
/// ```
/// use rcvis_dispatch::{MovieJob, MovieMessage, MovieQueue};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let (queue, jobs) = MovieQueue::channel("rcvis-queue", 8);
/// queue.enqueue(MovieJob { record_id: 1, base_url: "http://localhost".into() }).await?;
///
/// let msg = jobs.lock().await.recv().await;
/// assert!(matches!(msg, Some(MovieMessage::CreateMovie(job)) if job.record_id == 1));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MovieQueue {
    name: String,
    tx: mpsc::Sender<MovieMessage>,
}

impl MovieQueue {
    /// Creates a queue holding at most `capacity` pending messages.
    pub fn channel(name: impl Into<String>, capacity: usize) -> (Self, JobReceiver) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let queue = Self {
            name: name.into(),
            tx,
        };
        (queue, Arc::new(Mutex::new(rx)))
    }

    /// Queue name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pushes a job, waiting while the queue is full.
    ///
    /// # Errors
    ///
    /// Fails when every worker has stopped.
    #[instrument(skip(self), fields(queue = %self.name))]
    pub async fn enqueue(&self, job: MovieJob) -> RcvisResult<()> {
        self.send(MovieMessage::CreateMovie(job)).await?;
        debug!("Enqueued movie job");
        Ok(())
    }

    /// Asks one worker to stop.
    pub async fn shutdown(&self) -> RcvisResult<()> {
        self.send(MovieMessage::Shutdown).await
    }

    async fn send(&self, message: MovieMessage) -> RcvisResult<()> {
        self.tx.send(message).await.map_err(|_| {
            BackendError::new(format!("Movie queue {} is closed", self.name)).into()
        })
    }
}
