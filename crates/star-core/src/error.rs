use thiserror::Error;

/// Input the builder refused. The `Display` text is what the name label
/// shows to the user.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("線の数が多すぎます！")]
    TooManyLines,
    #[error("星座の数が多すぎます！")]
    TooManyConstellations,
}

#[derive(Debug, Error)]
pub enum SpectrumError {
    #[error("spectral data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("spectral data contains no frames")]
    Empty,
    #[error("invalid note identifier `{0}`")]
    InvalidNote(String),
}
