//! The privileged create-movie action.

use crate::{MovieJob, MovieQueue, MovieStatusView};
use rcvis_core::MovieGenerationStatus;
use rcvis_error::{BackendError, RcvisResult};
use rcvis_interface::ResultRepository;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Whoever triggered a request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Actor {
    /// Logged-in user, if any
    pub username: Option<String>,
    /// Whether the user may start renders
    pub is_staff: bool,
}

impl Actor {
    /// A visitor who is not logged in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A logged-in user without privileges.
    pub fn user(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            is_staff: false,
        }
    }

    /// A logged-in staff member.
    pub fn staff(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            is_staff: true,
        }
    }

    /// Whether the actor may start renders.
    pub fn may_create_movies(&self) -> bool {
        self.username.is_some() && self.is_staff
    }
}

/// What the caller should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Send the caller to `location`
    Redirect(String),
}

impl DispatchOutcome {
    /// Redirect target.
    pub fn location(&self) -> &str {
        match self {
            Self::Redirect(location) => location,
        }
    }
}

/// Login page that returns to the create-movie action for `slug`.
///
/// ```
/// assert_eq!(
///     rcvis_dispatch::login_redirect("mayor"),
///     "/admin/login/?next=/createMovie%253Dmayor"
/// );
/// ```
pub fn login_redirect(slug: &str) -> String {
    format!("/admin/login/?next=/createMovie%253D{}", slug)
}

/// Page polling the movie status of `slug`.
pub fn movie_redirect(slug: &str) -> String {
    format!("/visualizeMovie={}", slug)
}

/// Accepts create-movie requests and queues them.
#[derive(Clone)]
pub struct Dispatcher {
    repository: Arc<dyn ResultRepository>,
    queue: MovieQueue,
    base_url: String,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("queue", &self.queue.name())
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Creates a dispatcher that queues jobs rendering from `base_url`.
    pub fn new(
        repository: Arc<dyn ResultRepository>,
        queue: MovieQueue,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            queue,
            base_url: base_url.into(),
        }
    }

    /// Requests a movie for `slug` on behalf of `actor`.
    ///
    /// Non-staff actors are sent to the login page and nothing changes.
    /// Staff requests move the record to `NotStarted` and queue one job,
    /// unless a job is already queued or running.
    ///
    /// # Errors
    ///
    /// Fails when no record has `slug` or the queue is closed. A job that
    /// cannot be queued leaves the record `Failed`, so it can be requested
    /// again.
    #[instrument(skip(self), fields(queue = %self.queue.name()))]
    pub async fn request_movie(&self, actor: &Actor, slug: &str) -> RcvisResult<DispatchOutcome> {
        if !actor.may_create_movies() {
            warn!(slug, "Rejected movie request from unprivileged actor");
            return Ok(DispatchOutcome::Redirect(login_redirect(slug)));
        }

        let record = self
            .repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| BackendError::new(format!("No result with slug {}", slug)))?;

        if !self.repository.mark_requested(record.id).await? {
            info!(record_id = record.id, "Movie job already pending");
            return Ok(DispatchOutcome::Redirect(movie_redirect(slug)));
        }

        let job = MovieJob {
            record_id: record.id,
            base_url: self.base_url.clone(),
        };
        if let Err(e) = self.queue.enqueue(job).await {
            error!(record_id = record.id, error = %e, "Movie job could not be queued");
            self.repository
                .set_status(record.id, MovieGenerationStatus::Failed)
                .await?;
            return Err(e);
        }
        info!(record_id = record.id, slug, "Movie job dispatched");

        Ok(DispatchOutcome::Redirect(movie_redirect(slug)))
    }

    /// Current movie status of `slug`.
    ///
    /// # Errors
    ///
    /// Fails when no record has `slug`.
    pub async fn status(&self, slug: &str) -> RcvisResult<MovieStatusView> {
        let record = self
            .repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| BackendError::new(format!("No result with slug {}", slug)))?;
        Ok(MovieStatusView::from(&record))
    }
}
