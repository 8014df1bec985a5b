use ag_core::RateOverride;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Body of `PUT /rate-limit/{id}`; omitted fields fall back to the defaults
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_not_empty"))]
pub struct RateOverrideRequest {
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u32>,

    /// Window length in seconds, at most one year
    #[validate(range(min = 1, max = 31_536_000))]
    #[serde(default)]
    pub interval: Option<u64>,
}

fn validate_not_empty(request: &RateOverrideRequest) -> Result<(), ValidationError> {
    if request.limit.is_none() && request.interval.is_none() {
        return Err(ValidationError::new("limit_or_interval_required"));
    }
    Ok(())
}

impl From<RateOverrideRequest> for RateOverride {
    fn from(request: RateOverrideRequest) -> Self {
        RateOverride {
            limit: request.limit,
            interval: request.interval,
        }
    }
}
