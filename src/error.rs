use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    ValidationError(String),

    #[error("Invalid Riot ID format. Use format: Name#TAG")]
    InvalidRiotId,

    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API authentication failed (HTTP {0}), check RIOT_API_KEY")]
    AuthenticationError(u16),

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("Riot API is currently unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("API request failed with status {status}")]
    UpstreamError { status: u16 },

    #[error("Player not found among the participants of match {match_id}")]
    ExtractionError { match_id: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),
}
