// Video adapter — frame access over ffmpeg/ffprobe.
//
// Uploads arrive as in-memory payloads, but ffmpeg wants a seekable input,
// so an opened stream parks the bytes in a named temp file for its
// lifetime. The file is removed when the stream is dropped, on every path.
// Decoded frames themselves never touch disk; they come back over stdout.

use std::io::Write;
use std::process::Stdio;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::warn;

/// Frame-rate and frame-count metadata for an opened video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoInfo {
    pub frame_rate: u32,
    pub frame_count: u64,
}

/// Opens video payloads for frame-level access.
#[async_trait]
pub trait VideoDecoder: Send + Sync {
    async fn open(&self, video: &[u8]) -> Result<Box<dyn VideoStream>>;
}

/// An opened video: fixed metadata plus random access to decoded frames.
#[async_trait]
pub trait VideoStream: Send {
    fn frame_rate(&self) -> u32;

    fn frame_count(&self) -> u64;

    /// Decode the frame at `index` as an encoded image. `Ok(None)` means
    /// the index is past the end of the stream.
    async fn read_frame(&mut self, index: u64) -> Result<Option<Vec<u8>>>;
}

/// Decoder backed by the `ffmpeg` and `ffprobe` command-line tools.
pub struct FfmpegDecoder {
    ffmpeg: String,
    ffprobe: String,
}

impl FfmpegDecoder {
    pub fn new(ffmpeg: impl Into<String>, ffprobe: impl Into<String>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }
}

#[async_trait]
impl VideoDecoder for FfmpegDecoder {
    async fn open(&self, video: &[u8]) -> Result<Box<dyn VideoStream>> {
        let mut source = NamedTempFile::new().context("failed to create video temp file")?;
        source
            .write_all(video)
            .context("failed to write video temp file")?;
        source.flush().context("failed to flush video temp file")?;

        let output = Command::new(&self.ffprobe)
            .args(["-v", "error", "-show_streams", "-show_format", "-of", "json"])
            .arg(source.path())
            .output()
            .await
            .with_context(|| format!("failed to run {}", self.ffprobe))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("ffprobe exited with {}: {}", output.status, stderr.trim());
        }

        let metadata: serde_json::Value =
            serde_json::from_slice(&output.stdout).context("failed to parse ffprobe output")?;
        let info = parse_video_info(&metadata)?;

        Ok(Box::new(FfmpegStream {
            ffmpeg: self.ffmpeg.clone(),
            source,
            info,
        }))
    }
}

struct FfmpegStream {
    ffmpeg: String,
    source: NamedTempFile,
    info: VideoInfo,
}

#[async_trait]
impl VideoStream for FfmpegStream {
    fn frame_rate(&self) -> u32 {
        self.info.frame_rate
    }

    fn frame_count(&self) -> u64 {
        self.info.frame_count
    }

    async fn read_frame(&mut self, index: u64) -> Result<Option<Vec<u8>>> {
        let filter = format!("select=eq(n\\,{index})");
        let output = Command::new(&self.ffmpeg)
            .arg("-v")
            .arg("error")
            .arg("-i")
            .arg(self.source.path())
            .args(["-vf", &filter, "-vsync", "0", "-frames:v", "1"])
            .args(["-f", "image2pipe", "-vcodec", "png", "-"])
            .stdin(Stdio::null())
            .output()
            .await
            .with_context(|| format!("failed to run {}", self.ffmpeg))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("ffmpeg exited with {}: {}", output.status, stderr.trim());
        }
        if output.stdout.is_empty() {
            // select produced nothing: the index is past the last frame.
            return Ok(None);
        }
        Ok(Some(output.stdout))
    }
}

/// Pull frame rate and frame count out of ffprobe's JSON.
///
/// Containers are sloppy about metadata: `nb_frames` is often absent, and
/// variable-rate streams report `avg_frame_rate` as `0/0`. Missing values
/// degrade to zero, which the sampling loop already treats sensibly.
fn parse_video_info(metadata: &serde_json::Value) -> Result<VideoInfo> {
    let streams = metadata["streams"]
        .as_array()
        .context("ffprobe output has no streams")?;
    let stream = streams
        .iter()
        .find(|s| s["codec_type"] == "video")
        .context("no video stream found")?;

    let frame_rate = stream["avg_frame_rate"]
        .as_str()
        .and_then(parse_ratio)
        .or_else(|| stream["r_frame_rate"].as_str().and_then(parse_ratio))
        .unwrap_or(0.0);

    let frame_count = stream["nb_frames"]
        .as_str()
        .and_then(|n| n.parse::<u64>().ok())
        .or_else(|| {
            metadata["format"]["duration"]
                .as_str()
                .and_then(|d| d.parse::<f64>().ok())
                .map(|seconds| (seconds * frame_rate) as u64)
        })
        .unwrap_or_else(|| {
            warn!("video frame count unavailable; treating stream as empty");
            0
        });

    Ok(VideoInfo {
        frame_rate: frame_rate as u32,
        frame_count,
    })
}

/// Parse an ffprobe rational like `30000/1001` into a float.
fn parse_ratio(ratio: &str) -> Option<f64> {
    let (numerator, denominator) = ratio.split_once('/')?;
    let numerator: f64 = numerator.parse().ok()?;
    let denominator: f64 = denominator.parse().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}
