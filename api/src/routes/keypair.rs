//! Keypair administration routes; both require `ManageAccounts`

use actix_web::{web, HttpResponse};

use ag_core::{AccountRepository, DomainError, ExpiringStore};

use crate::app::AppState;
use crate::dto::KeypairResponse;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Handler for PUT /{namespace}/keypair/{id}
///
/// Generates a new pair for account `{id}`, invalidating the previous one.
pub async fn regenerate_keypair<A, S>(
    state: web::Data<AppState<A, S>>,
    auth: Option<AuthContext>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    S: ExpiringStore + 'static,
{
    let caller = auth.map(|ctx| ctx.identity);
    let keypair = state
        .keypairs
        .generate(caller.as_ref(), path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(KeypairResponse::from(keypair)))
}

/// Handler for GET /{namespace}/keypair/{id}
pub async fn get_keypair<A, S>(
    state: web::Data<AppState<A, S>>,
    auth: Option<AuthContext>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    S: ExpiringStore + 'static,
{
    let account_id = path.into_inner();
    let caller = auth.map(|ctx| ctx.identity);

    let keypair = state
        .keypairs
        .fetch(caller.as_ref(), account_id)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            resource: format!("keypair for account {}", account_id),
        })?;

    Ok(HttpResponse::Ok().json(KeypairResponse::from(keypair)))
}
