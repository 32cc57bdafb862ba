use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    foundation::core::SamplingConfig,
    foundation::error::{ReelError, ReelResult},
    timeline::Timeline,
    timeline::frame::{DialState, Frame, FrameKind, Payload, ScannerState, Track, TrackState},
};

/// Which producer a document came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Safe-dial rotation log.
    Dial,
    /// Receipt-scanner range log.
    Scanner,
    /// Generic labeled-track log.
    Tracks,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dial => "dial",
            Self::Scanner => "scanner",
            Self::Tracks => "tracks",
        }
    }

    fn accepts(self, kind: FrameKind) -> bool {
        use FrameKind::*;
        match self {
            Self::Dial => matches!(
                kind,
                Initial | RotationStart | PositionUpdate | ZeroPass | ZeroLand | RotationEnd | Final
            ),
            Self::Scanner => matches!(
                kind,
                RangeStart | ScanTick | PatternCheck | InvalidHit | RangeEnd | FinalSummary
            ),
            Self::Tracks => kind == Step,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// Title block of a generic log.
pub struct PuzzleInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundStyle {
    #[default]
    Dark,
    Light,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Mono,
    Serif,
    Sans,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Theme hints carried by generic logs.
pub struct ThemeHints {
    #[serde(default)]
    pub primary_mood: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_mood: Option<String>,
    #[serde(default)]
    pub background_style: BackgroundStyle,
    #[serde(default)]
    pub font_style: FontStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color_hint: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// One ID range processed by the scanner.
pub struct RangeInfo {
    pub index: u32,
    pub start: u64,
    pub end: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Producer-specific document fields that are not part of the frame stream.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentMeta {
    Dial {
        total_rotations: u32,
        final_password: u64,
    },
    Scanner {
        ranges: Vec<RangeInfo>,
        final_sum: u64,
        total_invalid: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        sampling_stride: Option<u32>,
    },
    Tracks {
        puzzle: PuzzleInfo,
        theme: ThemeHints,
    },
}

/// A parsed and shape-checked input document.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TraceDocument {
    pub meta: DocumentMeta,
    /// Sampling budget from the document (or defaults for dial/scanner logs).
    pub config: SamplingConfig,
    pub timeline: Timeline,
}

impl TraceDocument {
    /// Read and parse a document from disk.
    #[tracing::instrument]
    pub fn load(path: &Path) -> ReelResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read trace document '{}'", path.display()))?;
        let doc = Self::from_json_str(&text)?;
        tracing::info!(
            kind = doc.kind().as_str(),
            frames = doc.timeline.len(),
            "loaded trace document"
        );
        Ok(doc)
    }

    /// Parse a document from JSON text.
    pub fn from_json_str(text: &str) -> ReelResult<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| ReelError::malformed(format!("invalid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Shape-check and convert an untyped JSON value.
    pub fn from_value(value: Value) -> ReelResult<Self> {
        let Value::Object(obj) = &value else {
            return Err(ReelError::malformed("document must be a JSON object"));
        };
        let kind = detect_kind(obj)?;
        let config = read_config(obj, kind)?;

        match kind {
            DocumentKind::Dial => {
                let log: DialLog = typed(value, "dial log")?;
                let frames = log
                    .frames
                    .into_iter()
                    .enumerate()
                    .map(|(i, r)| r.into_frame(i as u64))
                    .collect::<ReelResult<Vec<_>>>()?;
                Ok(Self {
                    meta: DocumentMeta::Dial {
                        total_rotations: log.total_rotations,
                        final_password: log.final_password,
                    },
                    config,
                    timeline: Timeline::new(frames)?,
                })
            }
            DocumentKind::Scanner => {
                let log: ScannerLog = typed(value, "scanner log")?;
                let frames = log
                    .frames
                    .into_iter()
                    .enumerate()
                    .map(|(i, r)| r.into_frame(i as u64))
                    .collect::<ReelResult<Vec<_>>>()?;
                Ok(Self {
                    meta: DocumentMeta::Scanner {
                        ranges: log.ranges,
                        final_sum: log.final_sum,
                        total_invalid: log.total_invalid,
                        sampling_stride: log.sampling_stride,
                    },
                    config,
                    timeline: Timeline::new(frames)?,
                })
            }
            DocumentKind::Tracks => {
                let log: TrackLog = typed(value, "track log")?;
                let frames = log
                    .timeline
                    .into_iter()
                    .map(TrackFrameRecord::into_frame)
                    .collect::<Vec<_>>();
                Ok(Self {
                    meta: DocumentMeta::Tracks {
                        puzzle: log.puzzle,
                        theme: log.theme,
                    },
                    config,
                    timeline: Timeline::new(frames)?,
                })
            }
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self.meta {
            DocumentMeta::Dial { .. } => DocumentKind::Dial,
            DocumentMeta::Scanner { .. } => DocumentKind::Scanner,
            DocumentMeta::Tracks { .. } => DocumentKind::Tracks,
        }
    }

    pub fn title(&self) -> String {
        match &self.meta {
            DocumentMeta::Dial { .. } => "Day 1: Secret Entrance".to_owned(),
            DocumentMeta::Scanner { .. } => "Day 02 · Gift Shop Receipt Scanner".to_owned(),
            DocumentMeta::Tracks { puzzle, .. } if !puzzle.title.is_empty() => {
                puzzle.title.clone()
            }
            DocumentMeta::Tracks { .. } => "Trace".to_owned(),
        }
    }
}

fn detect_kind(obj: &Map<String, Value>) -> ReelResult<DocumentKind> {
    if obj.contains_key("puzzle_day") || obj.contains_key("ranges") {
        expect_number(obj, "puzzle_day", 2)?;
        expect_number(obj, "part", 2)?;
        expect_array(obj, "frames")?;
        expect_array(obj, "ranges")?;
        return Ok(DocumentKind::Scanner);
    }
    if obj.contains_key("timeline") {
        expect_array(obj, "timeline")?;
        if !obj.contains_key("config") && !obj.contains_key("configuration") {
            return Err(ReelError::malformed(
                "track log requires a `config` (or `configuration`) section",
            ));
        }
        return Ok(DocumentKind::Tracks);
    }
    if obj.contains_key("frames") {
        expect_array(obj, "frames")?;
        return Ok(DocumentKind::Dial);
    }
    Err(ReelError::malformed(
        "document has neither a `timeline` nor a `frames` array",
    ))
}

fn expect_array(obj: &Map<String, Value>, key: &str) -> ReelResult<()> {
    match obj.get(key) {
        Some(Value::Array(_)) => Ok(()),
        Some(_) => Err(ReelError::malformed(format!("`{key}` must be an array"))),
        None => Err(ReelError::malformed(format!("missing `{key}` array"))),
    }
}

fn expect_number(obj: &Map<String, Value>, key: &str, want: u64) -> ReelResult<()> {
    match obj.get(key).and_then(Value::as_u64) {
        Some(v) if v == want => Ok(()),
        Some(v) => Err(ReelError::malformed(format!(
            "`{key}` is {v}, expected {want}"
        ))),
        None => Err(ReelError::malformed(format!(
            "missing or non-integer `{key}` (expected {want})"
        ))),
    }
}

fn read_config(obj: &Map<String, Value>, kind: DocumentKind) -> ReelResult<SamplingConfig> {
    let Some(raw) = obj.get("configuration").or_else(|| obj.get("config")) else {
        // Only track logs require a config; detect_kind already enforced it.
        debug_assert!(kind != DocumentKind::Tracks);
        return Ok(SamplingConfig::default());
    };
    let rec: ConfigRecord = serde_json::from_value(raw.clone())
        .map_err(|e| ReelError::malformed(format!("configuration section: {e}")))?;
    SamplingConfig::from_document_values(rec.frames_per_second, rec.max_duration_seconds)
}

fn typed<T: serde::de::DeserializeOwned>(value: Value, what: &str) -> ReelResult<T> {
    serde_json::from_value(value).map_err(|e| ReelError::malformed(format!("{what}: {e}")))
}

fn check_kind(doc: DocumentKind, kind: FrameKind, position: u64) -> ReelResult<()> {
    if doc.accepts(kind) {
        Ok(())
    } else {
        Err(ReelError::malformed(format!(
            "frame {position}: `{}` is not a {} frame type",
            kind.as_str(),
            doc.as_str()
        )))
    }
}

#[derive(Deserialize)]
struct ConfigRecord {
    #[serde(rename = "framesPerSecond", alias = "fps")]
    frames_per_second: f64,
    #[serde(rename = "maxDurationSeconds", alias = "maxDurationSec")]
    max_duration_seconds: f64,
}

#[derive(Deserialize)]
struct DialLog {
    frames: Vec<DialFrameRecord>,
    #[serde(default)]
    total_rotations: u32,
    #[serde(default)]
    final_password: u64,
}

#[derive(Deserialize)]
struct DialFrameRecord {
    frame_type: FrameKind,
    #[serde(default)]
    important: bool,
    #[serde(default)]
    progress: Option<f64>,
    #[serde(flatten)]
    state: DialState,
}

impl DialFrameRecord {
    fn into_frame(self, index: u64) -> ReelResult<Frame> {
        check_kind(DocumentKind::Dial, self.frame_type, index)?;
        Ok(Frame {
            index,
            kind: self.frame_type,
            important: self.important,
            progress: self.progress,
            payload: Payload::Dial(self.state),
        })
    }
}

#[derive(Deserialize)]
struct ScannerLog {
    #[serde(default)]
    sampling_stride: Option<u32>,
    ranges: Vec<RangeInfo>,
    frames: Vec<ScannerFrameRecord>,
    #[serde(default)]
    final_sum: u64,
    #[serde(default)]
    total_invalid: u64,
}

#[derive(Deserialize)]
struct ScannerFrameRecord {
    frame_type: FrameKind,
    #[serde(default)]
    important: bool,
    range_progress: f64,
    #[serde(flatten)]
    state: ScannerState,
}

impl ScannerFrameRecord {
    fn into_frame(self, index: u64) -> ReelResult<Frame> {
        check_kind(DocumentKind::Scanner, self.frame_type, index)?;
        Ok(Frame {
            index,
            kind: self.frame_type,
            important: self.important,
            progress: Some(self.range_progress),
            payload: Payload::Scanner(self.state),
        })
    }
}

#[derive(Deserialize)]
struct TrackLog {
    #[serde(default)]
    puzzle: PuzzleInfo,
    #[serde(default)]
    theme: ThemeHints,
    timeline: Vec<TrackFrameRecord>,
}

#[derive(Deserialize)]
struct TrackFrameRecord {
    step: u64,
    #[serde(default)]
    phase: Option<String>,
    #[serde(default)]
    important: bool,
    #[serde(default)]
    progress: Option<f64>,
    tracks: Vec<Track>,
}

impl TrackFrameRecord {
    fn into_frame(self) -> Frame {
        Frame {
            index: self.step,
            kind: FrameKind::Step,
            important: self.important,
            progress: self.progress,
            payload: Payload::Tracks(TrackState {
                phase: self.phase,
                tracks: self.tracks,
            }),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/document.rs"]
mod tests;
