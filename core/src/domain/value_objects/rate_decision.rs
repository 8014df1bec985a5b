//! Outcome of metering one request.

use serde::{Deserialize, Serialize};

/// Quota state reported back to the client in headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaSnapshot {
    pub limit: u32,
    /// Quota left after this request, never negative
    pub remaining: u32,
    /// Seconds until the window resets
    pub reset: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// GET or free route; no counter touched, no headers
    Exempt,
    /// Already counted earlier while serving this request
    AlreadyMetered,
    Admitted(QuotaSnapshot),
    /// Quota exhausted; the rejected request did not consume quota
    Rejected(QuotaSnapshot),
}

impl RateDecision {
    pub fn snapshot(&self) -> Option<QuotaSnapshot> {
        match self {
            RateDecision::Admitted(s) | RateDecision::Rejected(s) => Some(*s),
            RateDecision::Exempt | RateDecision::AlreadyMetered => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, RateDecision::Rejected(_))
    }
}
