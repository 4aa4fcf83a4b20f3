//! Application state module

use std::{fmt, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use clap::Parser;

use crate::domain::{communication::mailer::Mailer, sending::services::session::SessionStore};

/// Dispatch pacing configuration
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
pub struct SendConfig {
    /// Pause between two consecutive deliveries, in milliseconds
    #[arg(long, env = "SEND_DELAY_MS", default_value = "1000")]
    pub send_delay_ms: u64,

    /// Cadence of progress snapshots pushed to observers, in milliseconds
    #[arg(long, env = "PROGRESS_INTERVAL_MS", default_value = "500")]
    pub progress_interval_ms: u64,
}

impl SendConfig {
    /// The pause between two consecutive deliveries
    pub fn send_delay(&self) -> Duration {
        Duration::from_millis(self.send_delay_ms)
    }

    /// The cadence of progress pushes
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }
}

/// Global application state
pub struct AppState<M: Mailer> {
    /// The time the server started
    pub start_time: DateTime<Utc>,

    /// Dispatch pacing configuration
    pub config: SendConfig,

    /// The session store holding all per-owner send state
    pub sessions: Arc<SessionStore>,

    /// The mail transport
    pub mailer: Arc<M>,
}

impl<M: Mailer> AppState<M> {
    /// Create a new application state
    pub fn new(config: SendConfig, mailer: M) -> Self {
        Self {
            start_time: Utc::now(),
            config,
            sessions: Arc::new(SessionStore::new()),
            mailer: Arc::new(mailer),
        }
    }
}

impl<M: Mailer> Clone for AppState<M> {
    fn clone(&self) -> Self {
        Self {
            start_time: self.start_time,
            config: self.config.clone(),
            sessions: self.sessions.clone(),
            mailer: self.mailer.clone(),
        }
    }
}

impl<M: Mailer> fmt::Debug for AppState<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("start_time", &self.start_time)
            .field("config", &self.config)
            .field("sessions", &"SessionStore")
            .field("mailer", &"Mailer")
            .finish()
    }
}

#[cfg(test)]
use crate::domain::communication::mailer::MockMailer;

/// State for handler tests: a mock transport and no dispatch pacing
#[cfg(test)]
pub fn test_state(mailer: Option<MockMailer>) -> AppState<MockMailer> {
    AppState::new(
        SendConfig {
            send_delay_ms: 0,
            progress_interval_ms: 1,
        },
        mailer.unwrap_or_else(MockMailer::new),
    )
}
