//! Transcript retrieval.
//!
//! [`TranscriptSource`] is the seam between the pipeline and the outside
//! world. The production implementation shells out to `yt-dlp` for video
//! metadata and a caption-track URL, fetches the track, and chunks the
//! flattened transcript into [`TextSegment`]s.
//!
//! Retrieval failure is swallowed by design: the source logs the error and
//! returns an empty segment list, and the request proceeds to an empty
//! concept list.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{error, info};

use crate::cost::billable_characters;
use crate::error::{AnalysisError, Result};
use crate::segment::{SegmentMetadata, TextSegment};
use crate::split::{DEFAULT_CHUNK_SIZE, split_text};

/// Provides ordered transcript segments for a video URL.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Retrieve and chunk the transcript for `video_url`.
    ///
    /// Returns an empty Vec on any retrieval failure; errors are logged,
    /// never propagated.
    async fn retrieve(&self, video_url: &str) -> Vec<TextSegment>;
}

// ─────────────────────────────────────────────────────────────────────────────
// yt-dlp Source
// ─────────────────────────────────────────────────────────────────────────────

/// Caption languages tried in order. English only; multi-language handling
/// is out of scope.
const CAPTION_LANGUAGES: [&str; 2] = ["en", "en-orig"];

/// Transcript source backed by `yt-dlp` and the YouTube caption API.
pub struct YtDlpSource {
    client: reqwest::Client,
    chunk_size: usize,
}

impl Default for YtDlpSource {
    fn default() -> Self {
        Self::new()
    }
}

impl YtDlpSource {
    /// Create a source with the default chunk size.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Set the chunk size used when splitting the transcript.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    async fn fetch(&self, video_url: &str) -> Result<Vec<TextSegment>> {
        let info = self.video_info(video_url).await?;

        let track_url = caption_track_url(&info).ok_or_else(|| {
            AnalysisError::Retrieval(format!("no English caption track for {}", video_url))
        })?;

        let transcript = self.fetch_track(&track_url).await?;

        let author = info.uploader.unwrap_or_default();
        let title = info.title.unwrap_or_default();
        let length_seconds = info.duration.unwrap_or(0.0) as u64;

        let segments: Vec<TextSegment> = split_text(&transcript, self.chunk_size)
            .into_iter()
            .enumerate()
            .map(|(position, content)| {
                TextSegment::new(
                    content,
                    SegmentMetadata {
                        author: author.clone(),
                        title: title.clone(),
                        length_seconds,
                        position,
                    },
                )
            })
            .collect();

        info!(
            author = %author,
            length = length_seconds,
            title = %title,
            total_size = segments.len(),
            total_billable_characters = billable_characters(&transcript),
            "Retrieved YouTube transcript"
        );

        Ok(segments)
    }

    /// Run `yt-dlp -J` and parse the metadata dump.
    async fn video_info(&self, video_url: &str) -> Result<VideoInfo> {
        let output = Command::new("yt-dlp")
            .arg("-J")
            .arg("--skip-download")
            .arg(video_url)
            .output()
            .await
            .map_err(|e| AnalysisError::Retrieval(format!("failed to run yt-dlp: {}", e)))?;

        if !output.status.success() {
            return Err(AnalysisError::Retrieval(format!(
                "yt-dlp failed for {}: {}",
                video_url,
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| AnalysisError::Retrieval(format!("unreadable yt-dlp output: {}", e)))
    }

    /// Fetch a json3 caption track and flatten it to plain text.
    async fn fetch_track(&self, track_url: &str) -> Result<String> {
        let response = self
            .client
            .get(track_url)
            .send()
            .await
            .map_err(|e| AnalysisError::Retrieval(format!("caption fetch failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AnalysisError::Retrieval(format!(
                "caption fetch returned HTTP {}",
                response.status()
            )));
        }

        let track: CaptionTrack = response
            .json()
            .await
            .map_err(|e| AnalysisError::Retrieval(format!("unreadable caption track: {}", e)))?;

        Ok(flatten_track(track))
    }
}

#[async_trait]
impl TranscriptSource for YtDlpSource {
    async fn retrieve(&self, video_url: &str) -> Vec<TextSegment> {
        match self.fetch(video_url).await {
            Ok(segments) => segments,
            Err(e) => {
                error!(url = %video_url, error = %e, "Failed to retrieve YouTube documents");
                Vec::new()
            }
        }
    }
}

/// Pick a json3 caption URL: manual subtitles first, then auto captions.
fn caption_track_url(info: &VideoInfo) -> Option<String> {
    for lang in CAPTION_LANGUAGES {
        for tracks in [&info.subtitles, &info.automatic_captions] {
            if let Some(formats) = tracks.get(lang) {
                if let Some(format) = formats.iter().find(|f| f.ext.as_deref() == Some("json3")) {
                    return format.url.clone();
                }
            }
        }
    }
    None
}

/// Join caption events into one transcript string.
fn flatten_track(track: CaptionTrack) -> String {
    let mut transcript = String::new();
    for event in track.events {
        for seg in event.segs {
            let text = seg.utf8;
            if text == "\n" {
                continue;
            }
            if !transcript.is_empty() && !transcript.ends_with(' ') && !text.starts_with(' ') {
                transcript.push(' ');
            }
            transcript.push_str(text.trim_end_matches('\n'));
        }
    }
    transcript
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct VideoInfo {
    title: Option<String>,
    uploader: Option<String>,
    duration: Option<f64>,
    #[serde(default)]
    subtitles: std::collections::HashMap<String, Vec<CaptionFormat>>,
    #[serde(default)]
    automatic_captions: std::collections::HashMap<String, Vec<CaptionFormat>>,
}

#[derive(Debug, Deserialize)]
struct CaptionFormat {
    ext: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CaptionTrack {
    #[serde(default)]
    events: Vec<CaptionEvent>,
}

#[derive(Debug, Deserialize)]
struct CaptionEvent {
    #[serde(default)]
    segs: Vec<CaptionSeg>,
}

#[derive(Debug, Deserialize)]
struct CaptionSeg {
    #[serde(default)]
    utf8: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Static Source
// ─────────────────────────────────────────────────────────────────────────────

/// A source that always returns the same segments. Used by tests and by
/// the server's integration harness.
#[derive(Debug, Default)]
pub struct StaticSource {
    segments: Vec<TextSegment>,
}

impl StaticSource {
    /// Create a source over fixed segments.
    pub fn new(segments: Vec<TextSegment>) -> Self {
        Self { segments }
    }

    /// A source that retrieves nothing, mimicking retrieval failure.
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TranscriptSource for StaticSource {
    async fn retrieve(&self, _video_url: &str) -> Vec<TextSegment> {
        self.segments.clone()
    }
}
