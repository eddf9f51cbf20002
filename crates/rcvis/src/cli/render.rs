//! In-process movie rendering.

use super::load_summary;
use rcvis::{
    Actor, ArtifactStore, BackendError, Dispatcher, ElectionSummary, FaqNarrator, FfmpegComposer,
    FileSystemArtifactStore, HttpFrameSource, HttpSynthesisClient, JobRateLimiter,
    MovieCreationOrchestrator, MovieGenerationStatus, MovieQueue, RcvisConfig, RcvisResult,
    ResultRepository, SingleMovieRenderer, SpeechCache, TextToSpeechService, spawn_workers,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// Renders both variants of `summary` through the job queue and prints the
/// resulting status.
#[instrument(skip(config, summary_path, rounds))]
pub async fn render(
    config: &RcvisConfig,
    summary_path: &Path,
    slug: &str,
    base_url: &str,
    rounds: Option<usize>,
) -> RcvisResult<()> {
    let summary = load_summary(summary_path)?;
    let repository = result_repository(slug, summary).await?;
    let cache = speech_cache()?;

    let store: Arc<dyn ArtifactStore> = Arc::new(FileSystemArtifactStore::new(
        &config.storage.root,
        &config.storage.public_base_url,
    )?);
    let client = Arc::new(HttpSynthesisClient::new(
        &config.speech.endpoint,
        &config.speech.voice,
        &config.speech.output_format,
    ));
    let speech = TextToSpeechService::new(client, cache, store.clone(), config.synthesis_config());

    let mut renderer = SingleMovieRenderer::new(
        speech,
        Arc::new(HttpFrameSource::new(&config.movie.frame_url_template)),
        Arc::new(FfmpegComposer::new(&config.movie.ffmpeg_path)),
        store,
        config.renderer_config(),
    );
    if let Some(limit) = rounds {
        renderer = renderer.with_round_limit(limit);
    }
    let orchestrator = Arc::new(MovieCreationOrchestrator::new(
        repository.clone(),
        Arc::new(FaqNarrator::default()),
        renderer,
    ));

    let (queue, jobs) = MovieQueue::channel(&config.queue.name, config.queue.capacity);
    let limiter = JobRateLimiter::per_second(config.queue.jobs_per_second)?;
    let workers = spawn_workers(config.queue.workers, orchestrator, limiter, jobs);

    let dispatcher = Dispatcher::new(repository, queue.clone(), base_url);
    let outcome = dispatcher.request_movie(&Actor::staff("cli"), slug).await?;
    info!(location = outcome.location(), "Movie requested");

    for _ in 0..config.queue.workers {
        queue.shutdown().await?;
    }
    for worker in workers {
        worker
            .await
            .map_err(|e| BackendError::new(format!("Movie worker panicked: {}", e)))?;
    }

    let view = dispatcher.status(slug).await?;
    let json = serde_json::to_string_pretty(&view)
        .map_err(|e| BackendError::new(format!("Failed to serialize status: {}", e)))?;
    println!("{}", json);

    if view.status == MovieGenerationStatus::Failed {
        Err(BackendError::new(format!("Movie creation failed for {}", slug)))?
    }
    Ok(())
}

#[cfg(not(feature = "database"))]
async fn result_repository(
    slug: &str,
    summary: ElectionSummary,
) -> RcvisResult<Arc<dyn ResultRepository>> {
    use rcvis::{InMemoryResultRepository, ResultRecord};

    let repository = InMemoryResultRepository::new();
    let record = ResultRecord::builder()
        .id(1)
        .slug(slug)
        .summary(summary)
        .build()
        .map_err(|e| BackendError::new(e.to_string()))?;
    repository.insert(record).await;
    Ok(Arc::new(repository))
}

#[cfg(feature = "database")]
async fn result_repository(
    slug: &str,
    summary: ElectionSummary,
) -> RcvisResult<Arc<dyn ResultRepository>> {
    use rcvis::{PostgresResultRepository, establish_connection, run_migrations};

    let mut conn = establish_connection()?;
    run_migrations(&mut conn)?;
    let repository = PostgresResultRepository::new(conn);
    if repository.find_by_slug(slug).await?.is_none() {
        repository.insert_record(slug, &summary).await?;
    }
    Ok(Arc::new(repository))
}

#[cfg(not(feature = "database"))]
fn speech_cache() -> RcvisResult<Arc<dyn SpeechCache>> {
    Ok(Arc::new(rcvis::InMemorySpeechCache::new()))
}

#[cfg(feature = "database")]
fn speech_cache() -> RcvisResult<Arc<dyn SpeechCache>> {
    let conn = rcvis::establish_connection()?;
    Ok(Arc::new(rcvis::PostgresSpeechCache::new(conn)))
}
