//! Persisted per-client quota usage.

use serde::{Deserialize, Serialize};

/// Effective quota for one client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSettings {
    pub limit: u32,
    /// Window length in seconds
    pub interval: u64,
}

/// Per-account quota override; unset fields fall back to the global default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateOverride {
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub interval: Option<u64>,
}

impl RateOverride {
    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.interval.is_none()
    }

    pub fn resolve(&self, default: RateSettings) -> RateSettings {
        RateSettings {
            limit: self.limit.unwrap_or(default.limit),
            interval: self.interval.unwrap_or(default.interval),
        }
    }
}

/// Quota usage within one window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCounter {
    pub client_key: String,
    pub limit: u32,
    pub interval: u64,
    pub used: u32,
    /// Unix seconds the window opened
    pub window_start: i64,
}

impl RateCounter {
    pub fn new(client_key: impl Into<String>, settings: RateSettings, now: i64) -> Self {
        Self {
            client_key: client_key.into(),
            limit: settings.limit,
            interval: settings.interval,
            used: 0,
            window_start: now,
        }
    }

    /// Saturates instead of wrapping for intervals beyond `i64::MAX`
    pub fn window_end(&self) -> i64 {
        let interval = i64::try_from(self.interval).unwrap_or(i64::MAX);
        self.window_start.saturating_add(interval)
    }

    /// `now - window_start >= interval`
    pub fn has_elapsed(&self, now: i64) -> bool {
        now >= self.window_end()
    }

    /// Seconds until the window resets, never negative
    pub fn seconds_until_reset(&self, now: i64) -> u64 {
        (self.window_end() - now).max(0) as u64
    }

    /// Quota left before this request is counted; may go negative when the
    /// limit was lowered mid-window
    pub fn remaining(&self) -> i64 {
        i64::from(self.limit) - i64::from(self.used)
    }
}
