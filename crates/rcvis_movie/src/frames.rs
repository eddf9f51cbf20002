//! Round frames fetched from the running visualization.

use async_trait::async_trait;
use rcvis_core::{Resolution, ResultRecord};
use rcvis_error::{MovieError, MovieErrorKind, RcvisResult, StorageError, StorageErrorKind};
use rcvis_interface::FrameSource;
use reqwest::{Client, Url};
use std::path::Path;
use tracing::{debug, instrument};

/// Default location of a round still under the visualization's base URL.
pub const DEFAULT_FRAME_URL_TEMPLATE: &str =
    "{base_url}/visualizeEmbedded={slug}/frame?round={round}&width={width}&height={height}";

/// Parses the base URL remote assets are fetched from.
///
/// Only absolute `http` and `https` URLs are accepted.
///
/// ```
/// use rcvis_movie::parse_base_url;
///
/// assert!(parse_base_url("http://localhost:8000").is_ok());
/// assert!(parse_base_url("/incorrect/url").is_err());
/// assert!(parse_base_url("ftp://example.com").is_err());
/// ```
#[track_caller]
pub fn parse_base_url(base_url: &str) -> Result<Url, MovieError> {
    match Url::parse(base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        Ok(url) => Err(MovieError::new(MovieErrorKind::UpstreamUnavailable(format!(
            "unsupported scheme {} in {}",
            url.scheme(),
            base_url
        )))),
        Err(e) => Err(MovieError::new(MovieErrorKind::UpstreamUnavailable(format!(
            "malformed base URL {}: {}",
            base_url, e
        )))),
    }
}

/// Downloads one PNG still per round over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFrameSource {
    client: Client,
    template: String,
}

impl HttpFrameSource {
    /// Creates a frame source for `template`.
    ///
    /// The template may use `{base_url}`, `{slug}`, `{round}`, `{width}`
    /// and `{height}`.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            template: template.into(),
        }
    }

    /// Frame URL for one round.
    pub fn frame_url(
        &self,
        base_url: &Url,
        record: &ResultRecord,
        round: usize,
        resolution: Resolution,
    ) -> String {
        self.template
            .replace("{base_url}", base_url.as_str().trim_end_matches('/'))
            .replace("{slug}", &record.slug)
            .replace("{round}", &round.to_string())
            .replace("{width}", &resolution.width().to_string())
            .replace("{height}", &resolution.height().to_string())
    }
}

impl Default for HttpFrameSource {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_URL_TEMPLATE)
    }
}

#[async_trait]
impl FrameSource for HttpFrameSource {
    #[instrument(skip(self, record, dest), fields(slug = %record.slug))]
    async fn render_frame(
        &self,
        base_url: &str,
        record: &ResultRecord,
        round: usize,
        resolution: Resolution,
        dest: &Path,
    ) -> RcvisResult<()> {
        let base = parse_base_url(base_url)?;
        let url = self.frame_url(&base, record, round, resolution);
        debug!(url = %url, "Fetching frame");

        let unavailable =
            |e: reqwest::Error| MovieError::new(MovieErrorKind::UpstreamUnavailable(e.to_string()));
        let response = self.client.get(&url).send().await.map_err(unavailable)?;
        if !response.status().is_success() {
            return Err(MovieError::new(MovieErrorKind::UpstreamUnavailable(format!(
                "frame {} returned {}",
                url,
                response.status()
            )))
            .into());
        }
        let bytes = response.bytes().await.map_err(unavailable)?;

        tokio::fs::write(dest, &bytes).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                dest.display(),
                e
            )))
        })?;
        Ok(())
    }
}
