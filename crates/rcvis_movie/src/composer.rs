//! Movie assembly with ffmpeg.

use async_trait::async_trait;
use rcvis_core::Resolution;
use rcvis_error::{MovieError, MovieErrorKind, RcvisResult, StorageError, StorageErrorKind};
use rcvis_interface::{Segment, VideoComposer};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, instrument};

const FRAME_RATE: &str = "30";

/// Composes movies by shelling out to `ffmpeg`.
///
/// Each segment is encoded on its own (still frame plus narration, or
/// silence for the fallback duration) and the segments are then joined
/// with the concat demuxer.
#[derive(Debug, Clone)]
pub struct FfmpegComposer {
    ffmpeg_path: PathBuf,
}

impl FfmpegComposer {
    /// Uses the `ffmpeg` binary at `ffmpeg_path`.
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    fn segment_args(segment: &Segment, resolution: Resolution, output: &Path) -> Vec<OsString> {
        let (w, h) = (resolution.width(), resolution.height());
        let mut args: Vec<OsString> = vec!["-y".into(), "-loop".into(), "1".into(), "-i".into()];
        args.push(segment.frame.clone().into());
        match &segment.audio {
            Some(audio) => {
                let narrated: Vec<OsString> =
                    vec!["-i".into(), audio.clone().into(), "-shortest".into()];
                args.extend(narrated);
            }
            None => {
                let silent: Vec<OsString> = vec![
                    "-f".into(),
                    "lavfi".into(),
                    "-i".into(),
                    "anullsrc=r=44100:cl=stereo".into(),
                    "-t".into(),
                    format!("{:.3}", segment.fallback_duration.as_secs_f64()).into(),
                ];
                args.extend(silent);
            }
        }
        let encode: Vec<OsString> = vec![
            "-vf".into(),
            format!(
                "scale={w}:{h}:force_original_aspect_ratio=decrease,pad={w}:{h}:(ow-iw)/2:(oh-ih)/2"
            )
            .into(),
            "-r".into(),
            FRAME_RATE.into(),
            "-c:v".into(),
            "libx264".into(),
            "-tune".into(),
            "stillimage".into(),
            "-pix_fmt".into(),
            "yuv420p".into(),
            "-c:a".into(),
            "aac".into(),
            "-ar".into(),
            "44100".into(),
            "-ac".into(),
            "2".into(),
        ];
        args.extend(encode);
        args.push(output.into());
        args
    }

    async fn run(&self, args: Vec<OsString>) -> RcvisResult<()> {
        let output = Command::new(&self.ffmpeg_path)
            .args(&args)
            .output()
            .await
            .map_err(|e| {
                MovieError::new(MovieErrorKind::Render(format!(
                    "failed to run {}: {}",
                    self.ffmpeg_path.display(),
                    e
                )))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let tail: String = stderr.lines().rev().take(5).collect::<Vec<_>>().join(" | ");
            return Err(MovieError::new(MovieErrorKind::Render(format!(
                "ffmpeg exited with {}: {}",
                output.status, tail
            )))
            .into());
        }
        Ok(())
    }
}

impl Default for FfmpegComposer {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

#[async_trait]
impl VideoComposer for FfmpegComposer {
    #[instrument(skip(self, segments), fields(segment_count = segments.len()))]
    async fn compose(
        &self,
        segments: &[Segment],
        resolution: Resolution,
        output: &Path,
    ) -> RcvisResult<()> {
        if segments.is_empty() {
            return Err(MovieError::new(MovieErrorKind::Render(
                "no segments to compose".to_string(),
            ))
            .into());
        }

        let scratch = tempfile::tempdir().map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(e.to_string()))
        })?;
        let mut list = String::new();
        for (i, segment) in segments.iter().enumerate() {
            let part = scratch.path().join(format!("segment-{:04}.mp4", i));
            self.run(Self::segment_args(segment, resolution, &part)).await?;
            debug!(segment = i, "Encoded segment");
            list.push_str(&format!("file '{}'\n", part.display()));
        }

        let list_path = scratch.path().join("segments.txt");
        tokio::fs::write(&list_path, list).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                list_path.display(),
                e
            )))
        })?;

        let concat: Vec<OsString> = vec![
            "-y".into(),
            "-f".into(),
            "concat".into(),
            "-safe".into(),
            "0".into(),
            "-i".into(),
            list_path.into(),
            "-c".into(),
            "copy".into(),
            output.into(),
        ];
        self.run(concat).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn to_strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn test_narrated_segment_follows_audio() {
        let segment = Segment {
            frame: PathBuf::from("/w/round-0.png"),
            audio: Some(PathBuf::from("/w/round-0.mp3")),
            fallback_duration: Duration::from_secs(2),
        };
        let args = to_strings(&FfmpegComposer::segment_args(
            &segment,
            Resolution::HORIZONTAL,
            Path::new("/w/out.mp4"),
        ));
        assert!(args.contains(&"-shortest".to_string()));
        assert!(args.contains(&"/w/round-0.mp3".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("anullsrc")));
        assert_eq!(args.last().map(String::as_str), Some("/w/out.mp4"));
    }

    #[test]
    fn test_silent_segment_uses_fallback_duration() {
        let segment = Segment {
            frame: PathBuf::from("/w/round-1.png"),
            audio: None,
            fallback_duration: Duration::from_millis(2500),
        };
        let args = to_strings(&FfmpegComposer::segment_args(
            &segment,
            Resolution::VERTICAL,
            Path::new("/w/out.mp4"),
        ));
        assert!(args.contains(&"2.500".to_string()));
        assert!(args.iter().any(|a| a.contains("scale=1080:1920")));
    }
}
