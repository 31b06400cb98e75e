use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::PlaybackError;

/// Descriptive fields attached to a track.
///
/// Opaque to the orchestrator; surfaces display whatever keys they know.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMetadata(BTreeMap<String, String>);

impl TrackMetadata {
    /// Create empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert or replace a field
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a field
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether no fields are set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A playable audio resource as requested by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Resource location handed to the device
    pub url: String,

    /// Display title
    pub title: Option<String>,

    /// Additional descriptive fields
    #[serde(default)]
    pub metadata: TrackMetadata,
}

impl Track {
    /// Create a track with only a URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            metadata: TrackMetadata::default(),
        }
    }

    /// Set the display title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the metadata
    pub fn with_metadata(mut self, metadata: TrackMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Title for display, falling back to the URL
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.url)
    }
}

/// Output volume in the range `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Volume(f64);

impl Volume {
    /// Full volume
    pub const MAX: Volume = Volume(1.0);

    /// Create a volume, clamping into range. NaN becomes silence.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Volume as a percentage
    pub fn as_percentage(&self) -> f64 {
        self.0 * 100.0
    }

    /// Level actually sent to the device
    pub fn effective(&self, muted: bool) -> f64 {
        if muted { 0.0 } else { self.0 }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::MAX
    }
}

impl Deref for Volume {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<f64> for Volume {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Volume> for f64 {
    fn from(volume: Volume) -> Self {
        volume.0
    }
}

/// Playback rate, restricted to the rates the player offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum PlaybackSpeed {
    /// 0.75x
    Slow,
    /// 1x
    #[default]
    Normal,
    /// 1.25x
    Quick,
    /// 1.5x
    Fast,
    /// 2x
    Double,
}

impl PlaybackSpeed {
    /// All speeds in ascending order
    pub const ALL: [PlaybackSpeed; 5] = [
        PlaybackSpeed::Slow,
        PlaybackSpeed::Normal,
        PlaybackSpeed::Quick,
        PlaybackSpeed::Fast,
        PlaybackSpeed::Double,
    ];

    /// Rate multiplier
    pub fn rate(self) -> f64 {
        match self {
            Self::Slow => 0.75,
            Self::Normal => 1.0,
            Self::Quick => 1.25,
            Self::Fast => 1.5,
            Self::Double => 2.0,
        }
    }

    /// Next faster speed, wrapping back to the slowest
    pub fn next(self) -> Self {
        match self {
            Self::Slow => Self::Normal,
            Self::Normal => Self::Quick,
            Self::Quick => Self::Fast,
            Self::Fast => Self::Double,
            Self::Double => Self::Slow,
        }
    }
}

impl TryFrom<f64> for PlaybackSpeed {
    type Error = PlaybackError;

    fn try_from(rate: f64) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|speed| (speed.rate() - rate).abs() < f64::EPSILON)
            .ok_or(PlaybackError::InvalidSpeed(rate))
    }
}

impl From<PlaybackSpeed> for f64 {
    fn from(speed: PlaybackSpeed) -> Self {
        speed.rate()
    }
}

impl FromStr for PlaybackSpeed {
    type Err = PlaybackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed.strip_suffix(['x', 'X']).unwrap_or(trimmed);
        let rate = number
            .parse::<f64>()
            .map_err(|_| PlaybackError::UnparsableSpeed(s.to_string()))?;
        Self::try_from(rate)
    }
}

impl fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.rate())
    }
}

/// Which presentation surface is showing the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PlayerMode {
    /// Full player with every control
    #[default]
    Full,

    /// Bar with transport controls and time
    Compact,

    /// Small pill with play state only
    Minimized,

    /// Hidden; no session
    Closed,
}

impl PlayerMode {
    /// One step towards the full player. Closed stays closed.
    pub fn expanded(self) -> Self {
        match self {
            Self::Minimized => Self::Compact,
            Self::Compact | Self::Full => Self::Full,
            Self::Closed => Self::Closed,
        }
    }

    /// One step towards the minimized player. Closed stays closed.
    pub fn minimized(self) -> Self {
        match self {
            Self::Full => Self::Compact,
            Self::Compact | Self::Minimized => Self::Minimized,
            Self::Closed => Self::Closed,
        }
    }

    /// Whether the player is hidden
    pub fn is_closed(self) -> bool {
        self == Self::Closed
    }
}

impl fmt::Display for PlayerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Compact => write!(f, "compact"),
            Self::Minimized => write!(f, "minimized"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

impl FromStr for PlayerMode {
    type Err = PlaybackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "compact" => Ok(Self::Compact),
            "minimized" | "mini" => Ok(Self::Minimized),
            "closed" => Ok(Self::Closed),
            other => Err(PlaybackError::UnknownMode(other.to_string())),
        }
    }
}

/// What a play request did to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// A new session started with the requested track
    Started,

    /// The requested track was already loaded; playback resumed
    Resumed,

    /// A different track is active; the request awaits confirmation
    AwaitingConfirmation,
}
