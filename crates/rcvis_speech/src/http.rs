//! HTTP client for a task-based text-to-speech service.

use async_trait::async_trait;
use rcvis_error::{HttpError, RcvisResult, SpeechError, SpeechErrorKind};
use rcvis_interface::{SynthesisClient, SynthesisStatus};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

/// Speech synthesis over HTTP.
///
/// Tasks are created with `POST {endpoint}/synthesisTasks`, polled with
/// `GET {endpoint}/synthesisTasks/{id}`, and the finished audio is fetched
/// from the output URI the service reports.
#[derive(Debug, Clone)]
pub struct HttpSynthesisClient {
    client: Client,
    endpoint: String,
    voice: String,
    output_format: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct StartSynthesisRequest<'a> {
    text: &'a str,
    voice_id: &'a str,
    output_format: &'a str,
}

#[derive(Debug, Deserialize)]
struct SynthesisTaskEnvelope {
    #[serde(rename = "SynthesisTask")]
    synthesis_task: SynthesisTaskBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SynthesisTaskBody {
    #[serde(default)]
    task_id: Option<String>,
    #[serde(default)]
    task_status: Option<String>,
    #[serde(default)]
    output_uri: Option<String>,
}

impl HttpSynthesisClient {
    /// Creates a client for the service at `endpoint`.
    pub fn new(
        endpoint: impl Into<String>,
        voice: impl Into<String>,
        output_format: impl Into<String>,
    ) -> Self {
        Self::with_client(Client::new(), endpoint, voice, output_format)
    }

    /// Creates a client reusing an existing connection pool.
    pub fn with_client(
        client: Client,
        endpoint: impl Into<String>,
        voice: impl Into<String>,
        output_format: impl Into<String>,
    ) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        debug!(endpoint = %endpoint, "Creating speech synthesis client");
        Self {
            client,
            endpoint,
            voice: voice.into(),
            output_format: output_format.into(),
        }
    }

    async fn get_envelope(&self, response: reqwest::Response) -> RcvisResult<SynthesisTaskBody> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Speech service returned error");
            return Err(HttpError::rejected(
                status.as_u16(),
                format_args!("speech service request ({})", body),
            )
            .into());
        }
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::new(format!("unreadable speech service response: {}", e)))?;
        parse_envelope(&body)
    }
}

fn parse_envelope(body: &str) -> RcvisResult<SynthesisTaskBody> {
    let envelope: SynthesisTaskEnvelope = serde_json::from_str(body).map_err(|e| {
        SpeechError::new(SpeechErrorKind::MalformedResponse(format!(
            "Failed to parse synthesis task: {}",
            e
        )))
    })?;
    Ok(envelope.synthesis_task)
}

fn status_from_body(body: SynthesisTaskBody) -> RcvisResult<SynthesisStatus> {
    match body.task_status.as_deref() {
        Some("scheduled") | Some("inProgress") => Ok(SynthesisStatus::pending()),
        Some("failed") => Ok(SynthesisStatus::failed()),
        Some("completed") => match body.output_uri {
            Some(uri) => Ok(SynthesisStatus::completed(uri)),
            None => Err(SpeechError::new(SpeechErrorKind::MalformedResponse(
                "completed task has no OutputUri".to_string(),
            ))
            .into()),
        },
        other => Err(SpeechError::new(SpeechErrorKind::MalformedResponse(format!(
            "unknown TaskStatus {:?}",
            other
        )))
        .into()),
    }
}

#[async_trait]
impl SynthesisClient for HttpSynthesisClient {
    #[instrument(skip(self, text), fields(text_chars = text.chars().count()))]
    async fn spawn(&self, text: &str) -> RcvisResult<String> {
        let request = StartSynthesisRequest {
            text,
            voice_id: &self.voice,
            output_format: &self.output_format,
        };
        let response = self
            .client
            .post(format!("{}/synthesisTasks", self.endpoint))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to submit synthesis task");
                HttpError::new(format!("synthesis task submission failed: {}", e))
            })?;

        let body = self.get_envelope(response).await?;
        body.task_id.ok_or_else(|| {
            SpeechError::new(SpeechErrorKind::MalformedResponse(
                "synthesis task has no TaskId".to_string(),
            ))
            .into()
        })
    }

    #[instrument(skip(self))]
    async fn status(&self, task_id: &str) -> RcvisResult<SynthesisStatus> {
        let response = self
            .client
            .get(format!("{}/synthesisTasks/{}", self.endpoint, task_id))
            .send()
            .await
            .map_err(|e| HttpError::new(format!("synthesis status poll for {} failed: {}", task_id, e)))?;
        status_from_body(self.get_envelope(response).await?)
    }

    #[instrument(skip(self))]
    async fn fetch(&self, output_uri: &str) -> RcvisResult<Vec<u8>> {
        let response = self
            .client
            .get(output_uri)
            .send()
            .await
            .map_err(|e| HttpError::new(format!("audio download from {} failed: {}", output_uri, e)))?;
        if !response.status().is_success() {
            return Err(HttpError::rejected(response.status().as_u16(), "audio download").into());
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(format!("unreadable audio body: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcvis_interface::SynthesisState;

    #[test]
    fn test_spawn_request_uses_pascal_case() {
        let request = StartSynthesisRequest {
            text: "hi",
            voice_id: "Joanna",
            output_format: "mp3",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["Text"], "hi");
        assert_eq!(json["VoiceId"], "Joanna");
        assert_eq!(json["OutputFormat"], "mp3");
    }

    #[test]
    fn test_parse_spawn_response() {
        let body = parse_envelope(r#"{"SynthesisTask":{"TaskId":"abc-123"}}"#).unwrap();
        assert_eq!(body.task_id.as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_status_mapping() {
        for raw in ["scheduled", "inProgress"] {
            let body = parse_envelope(&format!(
                r#"{{"SynthesisTask":{{"TaskStatus":"{}"}}}}"#,
                raw
            ))
            .unwrap();
            assert_eq!(status_from_body(body).unwrap().state, SynthesisState::Pending);
        }

        let body = parse_envelope(
            r#"{"SynthesisTask":{"TaskStatus":"completed","OutputUri":"https://s3/x.mp3"}}"#,
        )
        .unwrap();
        assert_eq!(
            status_from_body(body).unwrap(),
            SynthesisStatus::completed("https://s3/x.mp3")
        );

        let body = parse_envelope(r#"{"SynthesisTask":{"TaskStatus":"failed"}}"#).unwrap();
        assert_eq!(status_from_body(body).unwrap().state, SynthesisState::Failed);
    }

    #[test]
    fn test_malformed_responses() {
        assert!(parse_envelope("not json").is_err());
        let body = parse_envelope(r#"{"SynthesisTask":{"TaskStatus":"completed"}}"#).unwrap();
        assert!(status_from_body(body).is_err());
        let body = parse_envelope(r#"{"SynthesisTask":{"TaskStatus":"exploded"}}"#).unwrap();
        assert!(status_from_body(body).is_err());
    }
}
