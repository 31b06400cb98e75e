/// Errors surfaced by the playback service to its callers.
///
/// Device failures are not part of this enum: they are absorbed by the
/// device sync layer and show up as session state instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PlaybackError {
    /// Rate is not one of the offered playback speeds
    #[error("Unsupported playback speed {0}x (expected one of 0.75, 1, 1.25, 1.5, 2)")]
    InvalidSpeed(f64),

    /// Speed string could not be parsed as a number
    #[error("Cannot parse playback speed '{0}'")]
    UnparsableSpeed(String),

    /// Mode string did not name a known surface
    #[error("Unknown player mode '{0}'")]
    UnknownMode(String),
}
