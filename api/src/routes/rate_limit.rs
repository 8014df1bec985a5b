//! Per-account quota administration

use actix_web::{web, HttpResponse};
use validator::Validate;

use ag_core::{AccountRepository, ExpiringStore};

use crate::app::AppState;
use crate::dto::RateOverrideRequest;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Handler for GET /{namespace}/rate-limit/{id}
///
/// Effective limit and interval plus the current window's counter. Readable
/// by the account itself or by a caller holding `ManageAccounts`.
pub async fn get_rate_limit<A, S>(
    state: web::Data<AppState<A, S>>,
    auth: Option<AuthContext>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    S: ExpiringStore + 'static,
{
    let caller = auth.map(|ctx| ctx.identity);
    let usage = state.limiter.usage(caller.as_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(usage))
}

/// Handler for PUT /{namespace}/rate-limit/{id}
///
/// Saves the override and restarts the account's window with `used = 0`.
///
/// # Request Body
///
/// ```json
/// { "limit": 5000, "interval": 3600 }
/// ```
/// Either field may be omitted, not both.
pub async fn update_rate_limit<A, S>(
    state: web::Data<AppState<A, S>>,
    auth: Option<AuthContext>,
    path: web::Path<i64>,
    body: web::Json<RateOverrideRequest>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    S: ExpiringStore + 'static,
{
    body.validate()?;

    let caller = auth.map(|ctx| ctx.identity);
    let usage = state
        .limiter
        .update_override(caller.as_ref(), path.into_inner(), body.into_inner().into())
        .await?;

    Ok(HttpResponse::Ok().json(usage))
}
