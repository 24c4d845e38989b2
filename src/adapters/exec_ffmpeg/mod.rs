//! FFmpeg execution adapter
//!
//! Drives the `ffmpeg` and `ffprobe` executables. Trims are stream copies, so
//! cuts land on the nearest preceding keyframe.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::trim_progress_percent;
use crate::ports::*;
use crate::utils::path::{file_uri, local_path};

const TRIM_SERVICE: &str = "video trim";
const METADATA_SERVICE: &str = "metadata write";
const PROBE_SERVICE: &str = "video probe";

/// FFmpeg-based video processing adapter
pub struct FfmpegCliAdapter {
    ffmpeg_path: PathBuf,
    ffprobe_path: PathBuf,
}

impl FfmpegCliAdapter {
    /// Create new FFmpeg adapter using the given executables
    pub fn new(ffmpeg_path: impl Into<PathBuf>, ffprobe_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            ffprobe_path: ffprobe_path.into(),
        }
    }

    /// Arguments for a stream-copy trim
    pub fn trim_args(source: &str, range: &TrimRange, output: &str) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-ss".to_string(),
            range.start().to_string(),
            "-i".to_string(),
            source.to_string(),
            "-t".to_string(),
            range.duration().to_string(),
            "-c:v".to_string(),
            "copy".to_string(),
            "-c:a".to_string(),
            "copy".to_string(),
            "-progress".to_string(),
            "pipe:1".to_string(),
            "-nostats".to_string(),
            output.to_string(),
        ]
    }

    /// Arguments for a stream copy that attaches container metadata
    pub fn metadata_args(input: &str, output: &str, metadata: &ClipMetadata) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(),
            "-i".to_string(),
            input.to_string(),
            "-c:v".to_string(),
            "copy".to_string(),
            "-c:a".to_string(),
            "copy".to_string(),
        ];
        for (key, value) in metadata.entries() {
            args.push("-metadata".to_string());
            args.push(format!("{}={}", key, value));
        }
        args.push(output.to_string());
        args
    }

    async fn ensure_parent_dir(output: &Path, service: &str) -> Result<(), DomainError> {
        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::external(
                    service,
                    format!("cannot create {}: {}", parent.display(), e),
                )
            })?;
        }
        Ok(())
    }

    async fn run_to_completion(
        &self,
        args: &[String],
        service: &str,
    ) -> Result<(), DomainError> {
        debug!(program = %self.ffmpeg_path.display(), ?args, "Running ffmpeg");
        let output = Command::new(&self.ffmpeg_path)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| DomainError::external(service, format!("failed to start ffmpeg: {}", e)))?;

        if !output.status.success() {
            return Err(DomainError::external(
                service,
                format!(
                    "ffmpeg exited with {}: {}",
                    output.status,
                    last_line(&output.stderr)
                ),
            ));
        }
        Ok(())
    }
}

/// Microseconds of output written, from one `-progress` line
fn parse_progress_line(line: &str) -> Option<f64> {
    let (key, value) = line.trim().split_once('=')?;
    match key {
        // `out_time_ms` is reported in microseconds as well
        "out_time_us" | "out_time_ms" => value.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn last_line(stderr: &[u8]) -> String {
    String::from_utf8_lossy(stderr)
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("no diagnostic output")
        .trim()
        .to_string()
}

#[async_trait]
impl VideoProcessingPort for FfmpegCliAdapter {
    async fn probe_duration(&self, uri: &str) -> Result<f64, DomainError> {
        let path = local_path(uri);
        let output = Command::new(&self.ffprobe_path)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(&path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                DomainError::external(PROBE_SERVICE, format!("failed to start ffprobe: {}", e))
            })?;

        if !output.status.success() {
            return Err(DomainError::external(
                PROBE_SERVICE,
                format!("ffprobe exited with {}: {}", output.status, last_line(&output.stderr)),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|d| d.is_finite() && *d >= 0.0)
            .ok_or_else(|| {
                DomainError::external(PROBE_SERVICE, format!("unexpected duration {:?}", stdout.trim()))
            })
    }

    async fn trim(
        &self,
        source_uri: &str,
        range: &TrimRange,
        output_uri: &str,
        progress: Option<ProgressSender>,
    ) -> Result<String, DomainError> {
        let source = local_path(source_uri);
        let output = local_path(output_uri);
        Self::ensure_parent_dir(&output, TRIM_SERVICE).await?;

        let args = Self::trim_args(
            &source.to_string_lossy(),
            range,
            &output.to_string_lossy(),
        );
        info!(source = %source.display(), %range, "Trimming clip");

        let mut child = Command::new(&self.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| DomainError::external(TRIM_SERVICE, format!("failed to start ffmpeg: {}", e)))?;

        let mut stderr = child.stderr.take();
        let stderr_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            if let Some(stderr) = stderr.as_mut() {
                let _ = stderr.read_to_end(&mut buf).await;
            }
            buf
        });

        if let Some(stdout) = child.stdout.take() {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                let Some(elapsed_us) = parse_progress_line(&line) else {
                    continue;
                };
                if let Some(sender) = progress.as_ref() {
                    let percent = trim_progress_percent(elapsed_us / 1000.0, range.duration());
                    // A dropped receiver only means nobody is watching
                    let _ = sender.send(TrimProgress { percent });
                }
            }
        }

        let status = child
            .wait()
            .await
            .map_err(|e| DomainError::external(TRIM_SERVICE, e))?;
        let stderr = stderr_task.await.unwrap_or_default();

        if !status.success() {
            warn!(%status, "ffmpeg trim failed");
            return Err(DomainError::external(
                TRIM_SERVICE,
                format!("ffmpeg exited with {}: {}", status, last_line(&stderr)),
            ));
        }

        if let Some(sender) = progress.as_ref() {
            let _ = sender.send(TrimProgress { percent: 100.0 });
        }
        Ok(file_uri(&output))
    }

    async fn write_metadata(
        &self,
        input_uri: &str,
        output_uri: &str,
        metadata: &ClipMetadata,
    ) -> Result<String, DomainError> {
        let input = local_path(input_uri);
        let output = local_path(output_uri);
        Self::ensure_parent_dir(&output, METADATA_SERVICE).await?;

        let args = Self::metadata_args(
            &input.to_string_lossy(),
            &output.to_string_lossy(),
            metadata,
        );
        self.run_to_completion(&args, METADATA_SERVICE).await?;

        info!(output = %output.display(), "Wrote clip metadata");
        Ok(file_uri(&output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_args_use_stream_copy() {
        let range = TrimRange::new(25.0, 30.0).unwrap();
        let args = FfmpegCliAdapter::trim_args("/in.mp4", &range, "/out.mp4");

        assert_eq!(&args[1..5], &["-ss", "25", "-i", "/in.mp4"]);
        assert_eq!(&args[5..7], &["-t", "5"]);
        assert!(args.windows(2).any(|w| w == ["-c:v", "copy"]));
        assert!(args.windows(2).any(|w| w == ["-c:a", "copy"]));
        assert_eq!(args.last().map(String::as_str), Some("/out.mp4"));
    }

    #[test]
    fn test_metadata_args() {
        let metadata = ClipMetadata {
            title: "Trip".to_string(),
            description: "day out".to_string(),
        };
        let args = FfmpegCliAdapter::metadata_args("/a.mp4", "/b.mp4", &metadata);

        assert!(args.windows(2).any(|w| w == ["-metadata", "title=Trip"]));
        assert!(args.windows(2).any(|w| w == ["-metadata", "description=day out"]));
        assert_eq!(args.last().map(String::as_str), Some("/b.mp4"));
    }

    #[test]
    fn test_parse_progress_line() {
        assert_eq!(parse_progress_line("out_time_us=2500000"), Some(2_500_000.0));
        assert_eq!(parse_progress_line("out_time_ms=1000"), Some(1000.0));
        assert_eq!(parse_progress_line("frame=12"), None);
        assert_eq!(parse_progress_line("out_time_us=N/A"), None);
        assert_eq!(parse_progress_line("progress=end"), None);
    }

    #[test]
    fn test_last_line_skips_blank_lines() {
        assert_eq!(last_line(b"first\nInvalid data\n\n"), "Invalid data");
        assert_eq!(last_line(b""), "no diagnostic output");
    }

    #[tokio::test]
    async fn test_missing_executable_is_external_error() {
        let adapter = FfmpegCliAdapter::new(
            "/nonexistent/ffmpeg-binary",
            "/nonexistent/ffprobe-binary",
        );
        let err = adapter.probe_duration("file:///tmp/none.mp4").await.unwrap_err();
        assert!(matches!(err, DomainError::ExternalService { .. }));
    }
}
