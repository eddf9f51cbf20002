//! Rendering one movie variant.

use crate::RendererConfig;
use rcvis_core::{GENERATOR_VERSION, MovieArtifact, Resolution, ResultRecord, RoundNarration};
use rcvis_error::{RcvisResult, StorageError, StorageErrorKind};
use rcvis_interface::{ArtifactStore, FrameSource, Segment, VideoComposer};
use rcvis_speech::TextToSpeechService;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Renders one resolution variant of a result's movie.
///
/// Each round contributes a still frame held for the length of its
/// narration. Narration audio comes from the speech service and is
/// therefore cached across rounds, variants and results.
#[derive(Clone)]
pub struct SingleMovieRenderer {
    speech: TextToSpeechService,
    frames: Arc<dyn FrameSource>,
    composer: Arc<dyn VideoComposer>,
    store: Arc<dyn ArtifactStore>,
    config: RendererConfig,
    round_limit: Option<usize>,
}

impl std::fmt::Debug for SingleMovieRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleMovieRenderer")
            .field("config", &self.config)
            .field("round_limit", &self.round_limit)
            .finish_non_exhaustive()
    }
}

impl SingleMovieRenderer {
    /// Creates a renderer over the given collaborators.
    pub fn new(
        speech: TextToSpeechService,
        frames: Arc<dyn FrameSource>,
        composer: Arc<dyn VideoComposer>,
        store: Arc<dyn ArtifactStore>,
        config: RendererConfig,
    ) -> Self {
        Self {
            speech,
            frames,
            composer,
            store,
            config,
            round_limit: None,
        }
    }

    /// Renders at most `limit` rounds.
    pub fn with_round_limit(mut self, limit: usize) -> Self {
        self.round_limit = Some(limit);
        self
    }

    /// Renderer configuration.
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// How many of `narration`'s rounds will be rendered.
    pub fn num_rounds(&self, narration: &[RoundNarration]) -> usize {
        self.round_limit
            .map_or(narration.len(), |limit| limit.min(narration.len()))
    }

    /// Renders `narration` at `resolution` and uploads the result.
    #[instrument(skip(self, record, narration), fields(record_id = record.id, slug = %record.slug))]
    pub async fn render(
        &self,
        record: &ResultRecord,
        narration: &[RoundNarration],
        resolution: Resolution,
        base_url: &str,
    ) -> RcvisResult<MovieArtifact> {
        let workdir = tempfile::tempdir()
            .map_err(|e| StorageError::new(StorageErrorKind::DirectoryCreation(e.to_string())))?;
        let output = workdir.path().join("movie.mp4");

        self.render_to(record, narration, resolution, base_url, workdir.path(), &output)
            .await?;
        self.save_and_upload(resolution.width(), resolution.height(), &record.slug, &output)
            .await
    }

    /// Renders `narration` into `output`, using `workdir` for per-round files.
    pub async fn render_to(
        &self,
        record: &ResultRecord,
        narration: &[RoundNarration],
        resolution: Resolution,
        base_url: &str,
        workdir: &Path,
        output: &Path,
    ) -> RcvisResult<()> {
        let rounds = self.num_rounds(narration);
        let mut segments = Vec::with_capacity(rounds);

        for round in &narration[..rounds] {
            let frame = workdir.join(format!("round-{:03}.png", round.round));
            self.frames
                .render_frame(base_url, record, round.round, resolution, &frame)
                .await?;

            let audio = match round.speech_text() {
                Some(text) => {
                    let audio = workdir.join(format!(
                        "round-{:03}.{}",
                        round.round,
                        self.config.audio_extension()
                    ));
                    self.speech.download_speech(&text, &audio).await?;
                    Some(audio)
                }
                None => None,
            };
            debug!(round = round.round, narrated = audio.is_some(), "Prepared round");

            segments.push(Segment {
                frame,
                audio,
                fallback_duration: *self.config.seconds_without_audio(),
            });
        }

        self.composer.compose(&segments, resolution, output).await
    }

    /// Uploads a rendered movie under a name unique to this call.
    ///
    /// The store path always contains `slug` and never equals it, so two
    /// variants of the same result never overwrite each other.
    ///
    /// # Errors
    ///
    /// Rejects dimensions outside `[1, 1920]` before uploading.
    #[instrument(skip(self, local_file))]
    pub async fn save_and_upload(
        &self,
        width: u32,
        height: u32,
        slug: &str,
        local_file: &Path,
    ) -> RcvisResult<MovieArtifact> {
        let resolution = Resolution::new(width, height)?;
        let file_path = format!(
            "{}/{}-{}.mp4",
            self.config.movie_prefix().trim_end_matches('/'),
            slug,
            uuid::Uuid::new_v4().simple()
        );
        let url = self.store.put(local_file, &file_path).await?;
        info!(file_path = %file_path, %resolution, "Uploaded movie");

        Ok(MovieArtifact {
            generator_version: GENERATOR_VERSION.to_string(),
            file_path,
            url,
            resolution,
        })
    }
}
