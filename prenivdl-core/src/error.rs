use thiserror::Error;

/// Failures that leave the resolution/download pipeline.
///
/// Per-endpoint failures inside the resolver never surface on their own;
/// they are folded into [`PipelineError::ResolutionFailed`] once every
/// endpoint of a platform has been tried.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("unsupported platform: {0}")]
    NotRecognized(String),

    #[error("could not resolve media: {0}")]
    ResolutionFailed(String),

    #[error("provider payload is missing required data: {0}")]
    MalformedPayload(String),

    #[error("file size ({declared} bytes) exceeds the limit of {limit} bytes")]
    SizeLimitExceeded { declared: u64, limit: u64 },

    #[error("transfer failed: {0}")]
    Transport(String),

    #[error("could not write file: {0}")]
    Write(String),
}

impl PipelineError {
    /// Both variants mean "no usable descriptor came out of resolution".
    pub fn is_resolution_failure(&self) -> bool {
        matches!(self, Self::ResolutionFailed(_) | Self::MalformedPayload(_))
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        Self::Write(err.to_string())
    }
}
