//! Movie job dispatch for RCVis.
//!
//! Rendering a movie takes minutes, so it never happens inside a request.
//! A privileged request marks the record as queued and pushes a job onto a
//! bounded [`MovieQueue`]; [`MovieWorker`]s take jobs off the queue one at a
//! time behind a shared [`JobRateLimiter`].
//!
//! # Example
//!
//! ```rust,ignore
//! use rcvis_dispatch::{Actor, Dispatcher, JobRateLimiter, MovieQueue, spawn_workers};
//!
//! let (queue, jobs) = MovieQueue::channel("rcvis-queue", 64);
//! let limiter = JobRateLimiter::per_second(1)?;
//! let workers = spawn_workers(2, handler, limiter, jobs);
//!
//! let dispatcher = Dispatcher::new(repository, queue, "https://rcvis.example.com");
//! let outcome = dispatcher.request_movie(&Actor::staff("admin"), "portland-mayor").await?;
//! assert_eq!(outcome.location(), "/visualizeMovie=portland-mayor");
//! ```

#![warn(missing_docs)]

mod dispatcher;
mod limiter;
mod queue;
mod status;
mod worker;

pub use dispatcher::{Actor, DispatchOutcome, Dispatcher, login_redirect, movie_redirect};
pub use limiter::JobRateLimiter;
pub use queue::{JobReceiver, MovieJob, MovieMessage, MovieQueue};
pub use status::MovieStatusView;
pub use worker::{MovieJobHandler, MovieWorker, spawn_workers};
