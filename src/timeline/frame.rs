use serde::{Deserialize, Serialize};

/// Semantic role of a frame within its timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameKind {
    /// Dial: state before the first rotation.
    Initial,
    /// Dial: a rotation instruction begins.
    RotationStart,
    /// Dial: intermediate position while rotating.
    PositionUpdate,
    /// Dial: the marker passed through position 0.
    ZeroPass,
    /// Dial: the marker came to rest on position 0.
    ZeroLand,
    /// Dial: a rotation instruction finished.
    RotationEnd,
    /// Dial: final password reached.
    Final,
    /// Scanner: a new ID range begins.
    RangeStart,
    /// Scanner: one ID inspected.
    ScanTick,
    /// Scanner: a repeat pattern is being checked.
    PatternCheck,
    /// Scanner: an invalid ID was found.
    InvalidHit,
    /// Scanner: the current range is exhausted.
    RangeEnd,
    /// Scanner: totals for the whole run.
    FinalSummary,
    /// Generic labeled-track step.
    Step,
}

impl FrameKind {
    /// Kinds that mark discrete notable events and must survive sampling.
    pub fn is_important(self) -> bool {
        matches!(
            self,
            Self::ZeroPass
                | Self::ZeroLand
                | Self::Final
                | Self::RangeStart
                | Self::InvalidHit
                | Self::RangeEnd
                | Self::FinalSummary
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::RotationStart => "rotation_start",
            Self::PositionUpdate => "position_update",
            Self::ZeroPass => "zero_pass",
            Self::ZeroLand => "zero_land",
            Self::RotationEnd => "rotation_end",
            Self::Final => "final",
            Self::RangeStart => "range_start",
            Self::ScanTick => "scan_tick",
            Self::PatternCheck => "pattern_check",
            Self::InvalidHit => "invalid_hit",
            Self::RangeEnd => "range_end",
            Self::FinalSummary => "final_summary",
            Self::Step => "step",
        }
    }
}

/// Rotation direction of a dial instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Safe-dial state for one frame.
pub struct DialState {
    /// 1-based rotation instruction counter.
    pub rotation_number: u32,
    /// Marker position on the dial, in `[0, 100)`.
    pub position: f64,
    /// Running password count (zero passes and landings so far).
    pub password: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passes_in_rotation: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lands_on_zero: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Receipt-scanner state for one frame.
pub struct ScannerState {
    pub range_index: u32,
    pub range_start: u64,
    pub range_end: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digits: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_chunk: Option<String>,
    #[serde(
        rename = "match",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub matched: Option<bool>,
    /// Sum of all invalid IDs found so far.
    pub global_sum: u64,
    /// Count of all invalid IDs found so far.
    pub global_invalids: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_invalids: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspected: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One cell of a labeled track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackValue {
    Number(f64),
    Text(String),
}

impl TrackValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

impl std::fmt::Display for TrackValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// A labeled lane of values.
pub struct Track {
    pub id: String,
    pub label: String,
    pub values: Vec<TrackValue>,
}

impl Track {
    /// Values joined the way lanes are captioned: `a | b | c`.
    pub fn joined_values(&self) -> String {
        self.values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// Generic labeled-track state for one frame.
pub struct TrackState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    pub tracks: Vec<Track>,
}

/// Kind-specific frame fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Payload {
    Dial(DialState),
    Scanner(ScannerState),
    Tracks(TrackState),
}

/// One discrete recorded instant of the process being visualized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Ordinal position in the original timeline.
    pub index: u64,
    pub kind: FrameKind,
    /// Explicit importance flag from the document, on top of [`FrameKind::is_important`].
    #[serde(default)]
    pub important: bool,
    /// Progress within the current sub-phase, in `[0, 1]`. Display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    pub payload: Payload,
}

impl Frame {
    pub fn is_important(&self) -> bool {
        self.important || self.kind.is_important()
    }

    /// Whether this frame's model assigns meaning to frame kinds.
    pub fn carries_importance_tags(&self) -> bool {
        self.important || !matches!(self.payload, Payload::Tracks(_))
    }

    /// Short human-readable caption used by inspectors and logs.
    pub fn caption(&self) -> String {
        match &self.payload {
            Payload::Dial(d) => {
                let mut s = format!(
                    "#{} {} rotation {} position {:.0} password {}",
                    self.index,
                    self.kind.as_str(),
                    d.rotation_number,
                    d.position,
                    d.password
                );
                if let Some(instr) = d.instruction.as_deref() {
                    s.push_str(&format!(" ({instr})"));
                }
                s
            }
            Payload::Scanner(sc) => {
                let mut s = format!(
                    "#{} {} range {} [{}..{}] sum {} invalid {}",
                    self.index,
                    self.kind.as_str(),
                    sc.range_index,
                    sc.range_start,
                    sc.range_end,
                    sc.global_sum,
                    sc.global_invalids
                );
                if let Some(n) = sc.number {
                    s.push_str(&format!(" id {n}"));
                }
                s
            }
            Payload::Tracks(t) => match t.phase.as_deref() {
                Some(phase) => format!("Step {} · {phase}", self.index),
                None => format!("Step {}", self.index),
            },
        }
    }
}
