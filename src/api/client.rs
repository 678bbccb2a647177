use crate::clock::Clock;
use crate::error::AppError;
use crate::rate_limit::RateLimiter;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::endpoints;
use super::models::*;
use super::transport::{HttpResponse, Transport, TransportError};

const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);
const TRANSPORT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// What to do after one attempt.
#[derive(Debug)]
enum Attempt {
    Done(String),
    Fail(AppError),
    Retry { wait: Duration, exhausted: AppError },
}

/// Maps one attempt's outcome onto the retry policy. `attempt` is zero-based.
fn classify(attempt: u32, outcome: Result<HttpResponse, TransportError>, url: &str) -> Attempt {
    let response = match outcome {
        Ok(response) => response,
        Err(TransportError::Timeout(msg)) => {
            return Attempt::Retry {
                wait: TRANSPORT_RETRY_DELAY,
                exhausted: AppError::ServiceUnavailable(format!("request timed out: {}", msg)),
            }
        }
        Err(TransportError::Connect(msg)) => {
            return Attempt::Retry {
                wait: TRANSPORT_RETRY_DELAY,
                exhausted: AppError::ServiceUnavailable(format!("connection error: {}", msg)),
            }
        }
        Err(TransportError::Other(msg)) => return Attempt::Fail(AppError::HttpError(msg)),
    };

    match response.status {
        200..=299 => Attempt::Done(response.body),
        401 | 403 => Attempt::Fail(AppError::AuthenticationError(response.status)),
        404 => Attempt::Fail(AppError::NotFound(url.to_string())),
        429 => {
            let wait = response
                .retry_after
                .as_deref()
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_RETRY_AFTER);
            Attempt::Retry {
                wait,
                exhausted: AppError::RateLimited,
            }
        }
        500 | 502 | 503 | 504 => Attempt::Retry {
            wait: Duration::from_secs(1u64 << attempt.min(16)),
            exhausted: AppError::ServiceUnavailable(format!("HTTP {}", response.status)),
        },
        status => Attempt::Fail(AppError::UpstreamError { status }),
    }
}

pub struct RiotApiClient {
    api_key: String,
    max_retries: u32,
    rate_limiter: Arc<RateLimiter>,
    transport: Box<dyn Transport>,
    clock: Arc<dyn Clock>,
}

impl RiotApiClient {
    pub fn new(
        api_key: String,
        max_retries: u32,
        rate_limiter: Arc<RateLimiter>,
        transport: Box<dyn Transport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        RiotApiClient {
            api_key,
            max_retries: max_retries.max(1),
            rate_limiter,
            transport,
            clock,
        }
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Single request path for every endpoint: rate limit, send, classify,
    /// and retry transient failures up to `max_retries` attempts.
    fn execute_request<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let mut attempt = 0;

        loop {
            self.rate_limiter.acquire();
            debug!(url, attempt = attempt + 1, "sending request");

            let outcome = self.transport.get(url, query, &self.api_key);
            match classify(attempt, outcome, url) {
                Attempt::Done(body) => {
                    return serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()));
                }
                Attempt::Fail(err) => {
                    match &err {
                        AppError::NotFound(_) => warn!(url, "resource not found"),
                        _ => error!(url, error = %err, "request failed"),
                    }
                    return Err(err);
                }
                Attempt::Retry { wait, exhausted } if attempt + 1 < self.max_retries => {
                    warn!(
                        url,
                        attempt = attempt + 1,
                        max = self.max_retries,
                        wait_ms = wait.as_millis() as u64,
                        reason = %exhausted,
                        "transient failure, retrying"
                    );
                    self.clock.sleep(wait);
                    attempt += 1;
                }
                Attempt::Retry { exhausted, .. } => {
                    error!(url, attempts = self.max_retries, error = %exhausted, "retries exhausted");
                    return Err(exhausted);
                }
            }
        }
    }

    pub fn get_puuid(&self, game_name: &str, tag_line: &str, region: &str) -> Result<String, AppError> {
        let routing = endpoints::regional_routing(region)?;
        let url = endpoints::account_url(routing, game_name, tag_line);

        info!("Fetching PUUID for {}#{} in region {}", game_name, tag_line, region);
        let account: AccountDto = self.execute_request(&url, &[])?;
        Ok(account.puuid)
    }

    pub fn get_match_ids(&self, puuid: &str, region: &str, count: usize) -> Result<Vec<String>, AppError> {
        let routing = endpoints::regional_routing(region)?;
        let url = endpoints::match_ids_url(routing, puuid);
        let query = [("start", "0".to_string()), ("count", count.to_string())];

        info!("Fetching {} match IDs for PUUID {}...", count, short_id(puuid));
        self.execute_request(&url, &query)
    }

    pub fn get_match(&self, match_id: &str, region: &str) -> Result<MatchDto, AppError> {
        let routing = endpoints::regional_routing(region)?;
        let url = endpoints::match_url(routing, match_id);

        debug!("Fetching match details for {}", match_id);
        self.execute_request(&url, &[])
    }
}

pub fn short_id(puuid: &str) -> &str {
    puuid.get(..8).unwrap_or(puuid)
}
