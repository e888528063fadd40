//! # Usage Logging
//!
//! Best-effort notification of each completed capture to an external
//! log-event endpoint. Nothing here ever reaches the user: failures are
//! written to the diagnostic log and dropped, and nothing is retried.

use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    composition::{FrameColor, Layout},
    config::UsageConfig,
    error::UsageError,
    filters::FilterSetting,
};

/// JSON body of `POST /api/log-event`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEvent {
    pub layout: String,
    pub filter: String,
    pub frame: String,
    pub timestamp: String,
}

impl UsageEvent {
    /// Event stamped with the current UTC time
    pub fn new(layout: Layout, filter: FilterSetting, frame: FrameColor) -> Self {
        Self {
            layout: layout.to_string(),
            filter: filter.to_string(),
            frame: frame.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Destination for usage events
///
/// `record` must return immediately and must not fail.
pub trait UsageSink: Send + Sync {
    fn record(&self, event: UsageEvent);
}

/// Sink used when usage logging is switched off
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledUsageLogger;

impl UsageSink for DisabledUsageLogger {
    fn record(&self, event: UsageEvent) {
        debug!("Usage logging disabled, dropping {:?}", event);
    }
}

/// Posts events to an HTTP endpoint on a background worker
#[derive(Clone)]
pub struct HttpUsageLogger {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpUsageLogger {
    pub fn new<S: Into<String>>(endpoint: S, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    pub fn from_config(config: &UsageConfig) -> Self {
        Self::new(config.endpoint.clone(), Duration::from_millis(config.timeout_ms))
    }

    /// Send one event and wait for the answer
    pub fn post(&self, event: &UsageEvent) -> Result<(), UsageError> {
        match self.agent.post(&self.endpoint).send_json(event) {
            Ok(response) if (200..300).contains(&response.status()) => {
                debug!("Usage event accepted by {}", self.endpoint);
                Ok(())
            }
            Ok(response) => {
                let status = response.status();
                Err(UsageError::Rejected {
                    endpoint: self.endpoint.clone(),
                    status,
                    body: response.into_string().unwrap_or_default(),
                })
            }
            Err(ureq::Error::Status(status, response)) => Err(UsageError::Rejected {
                endpoint: self.endpoint.clone(),
                status,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(transport)) => Err(UsageError::Transport {
                endpoint: self.endpoint.clone(),
                reason: transport.to_string(),
            }),
        }
    }
}

impl UsageSink for HttpUsageLogger {
    fn record(&self, event: UsageEvent) {
        let logger = self.clone();
        let send = move || {
            if let Err(e) = logger.post(&event) {
                warn!("Failed to log usage event: {}", e);
            }
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(send);
            }
            Err(_) => {
                std::thread::spawn(send);
            }
        }
    }
}

/// Build the sink the configuration asks for
pub fn usage_sink(config: &UsageConfig) -> Box<dyn UsageSink> {
    if config.enabled {
        Box::new(HttpUsageLogger::from_config(config))
    } else {
        Box::new(DisabledUsageLogger)
    }
}
