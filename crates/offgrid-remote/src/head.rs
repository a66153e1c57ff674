use crate::LookupError;
use std::time::Duration;
use tracing::{debug, warn};
use ureq::Agent;

/// Retry/timeout policy for remote size lookups.
#[derive(Debug, Clone, Copy)]
pub struct LookupPolicy {
    /// Global per-request timeout.
    pub timeout: Duration,
    /// Total attempts for transient failures (first try included).
    pub attempts: u32,
    /// Fixed pause between attempts.
    pub backoff: Duration,
}

impl Default for LookupPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            attempts: 3,
            backoff: Duration::from_millis(500),
        }
    }
}

/// Metadata-only remote size lookup via HTTP HEAD.
pub struct SizeLookup {
    agent: Agent,
    policy: LookupPolicy,
}

impl SizeLookup {
    pub fn new(policy: LookupPolicy) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(policy.timeout))
            .build();
        Self {
            agent: Agent::new_with_config(config),
            policy,
        }
    }

    /// Content length of a remote URL, without downloading it.
    ///
    /// Transient failures (transport errors, HTTP 429/5xx) are retried up to
    /// the policy's attempt budget; permanent failures surface immediately.
    pub fn content_length(&self, url: &str) -> Result<u64, LookupError> {
        let mut last = None;
        for attempt in 1..=self.policy.attempts {
            match self.attempt(url) {
                Ok(size) => {
                    debug!("HEAD {url}: {size} bytes (attempt {attempt})");
                    return Ok(size);
                }
                Err(err @ LookupError::Transient { .. }) => {
                    warn!("HEAD {url} attempt {attempt}/{}: {err}", self.policy.attempts);
                    last = Some(err);
                    if attempt < self.policy.attempts {
                        std::thread::sleep(self.policy.backoff);
                    }
                }
                Err(err) => return Err(err),
            }
        }
        Err(last.unwrap_or(LookupError::MissingLength(url.to_owned())))
    }

    fn attempt(&self, url: &str) -> Result<u64, LookupError> {
        let resp = match self.agent.head(url).call() {
            Ok(resp) => resp,
            Err(ureq::Error::StatusCode(code)) if code == 429 || code >= 500 => {
                return Err(LookupError::Transient {
                    url: url.to_owned(),
                    reason: format!("HTTP {code}"),
                });
            }
            Err(ureq::Error::StatusCode(code)) => {
                return Err(LookupError::Http {
                    url: url.to_owned(),
                    status: code,
                });
            }
            Err(e) => {
                return Err(LookupError::Transient {
                    url: url.to_owned(),
                    reason: e.to_string(),
                });
            }
        };

        resp.headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .ok_or_else(|| LookupError::MissingLength(url.to_owned()))
    }
}

impl Default for SizeLookup {
    fn default() -> Self {
        Self::new(LookupPolicy::default())
    }
}
