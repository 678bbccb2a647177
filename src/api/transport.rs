use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("league_review/", env!("CARGO_PKG_VERSION"));

/// Raw outcome of one GET, whatever its status code.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub retry_after: Option<String>,
    pub body: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("{0}")]
    Other(String),
}

pub trait Transport: Send + Sync {
    fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        api_key: &str,
    ) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        api_key: &str,
    ) -> Result<HttpResponse, TransportError> {
        (**self).get(url, query, api_key)
    }
}

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();
        UreqTransport { agent }
    }

    fn read(response: ureq::Response) -> Result<HttpResponse, TransportError> {
        let status = response.status();
        let retry_after = response.header("Retry-After").map(str::to_string);
        let body = response
            .into_string()
            .map_err(|e| TransportError::Other(format!("failed to read body: {}", e)))?;

        Ok(HttpResponse {
            status,
            retry_after,
            body,
        })
    }
}

impl Transport for UreqTransport {
    fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        api_key: &str,
    ) -> Result<HttpResponse, TransportError> {
        let request = query.iter().fold(
            self.agent.get(url).set("X-Riot-Token", api_key),
            |request, (name, value)| request.query(name, value),
        );

        match request.call() {
            Ok(response) | Err(ureq::Error::Status(_, response)) => Self::read(response),
            Err(ureq::Error::Transport(transport)) => {
                let message = transport.to_string();
                Err(match transport.kind() {
                    ureq::ErrorKind::Io => TransportError::Timeout(message),
                    ureq::ErrorKind::Dns
                    | ureq::ErrorKind::ConnectionFailed
                    | ureq::ErrorKind::ProxyConnect => TransportError::Connect(message),
                    _ => TransportError::Other(message),
                })
            }
        }
    }
}

#[cfg(test)]
pub use scripted::ScriptedTransport;

#[cfg(test)]
mod scripted {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    /// Replays queued responses per URL and records every request made.
    #[derive(Default)]
    pub struct ScriptedTransport {
        script: Mutex<HashMap<String, VecDeque<Result<HttpResponse, TransportError>>>>,
        calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push(&self, url: &str, outcome: Result<HttpResponse, TransportError>) {
            self.script
                .lock()
                .unwrap()
                .entry(url.to_string())
                .or_default()
                .push_back(outcome);
        }

        pub fn push_status(&self, url: &str, status: u16, body: &str) {
            self.push(
                url,
                Ok(HttpResponse {
                    status,
                    retry_after: None,
                    body: body.to_string(),
                }),
            );
        }

        pub fn push_json(&self, url: &str, body: serde_json::Value) {
            self.push_status(url, 200, &body.to_string());
        }

        pub fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self, url: &str) -> usize {
            self.calls().iter().filter(|(u, _)| u == url).count()
        }
    }

    impl Transport for ScriptedTransport {
        fn get(
            &self,
            url: &str,
            query: &[(&str, String)],
            _api_key: &str,
        ) -> Result<HttpResponse, TransportError> {
            self.calls.lock().unwrap().push((
                url.to_string(),
                query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
            ));
            self.script
                .lock()
                .unwrap()
                .get_mut(url)
                .and_then(VecDeque::pop_front)
                .unwrap_or_else(|| {
                    Ok(HttpResponse {
                        status: 404,
                        retry_after: None,
                        body: String::new(),
                    })
                })
        }
    }
}
