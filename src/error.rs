use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The uploaded statement has no row matching the total-assets marker, so
    /// structure ratios cannot be anchored. Blocking for that file.
    #[error("no row matching '{pattern}' found: a total-assets line is required")]
    MissingTotalAssets { pattern: String },

    #[error("GEMINI_API_KEY is not set: configure it in the environment to enable AI analysis")]
    MissingApiKey,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "gemini")]
    #[error("Gemini rate limit exceeded: {0}")]
    RateLimited(String),

    #[cfg(feature = "gemini")]
    #[error("Gemini rejected the API key: {0}")]
    InvalidApiKey(String),

    #[cfg(feature = "gemini")]
    #[error("Gemini API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[cfg(feature = "gemini")]
    #[error("Malformed Gemini response: {0}")]
    MalformedResponse(String),

    #[cfg(feature = "gemini")]
    #[error("Transport error calling Gemini: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
