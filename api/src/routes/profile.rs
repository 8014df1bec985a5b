use actix_web::{web, HttpResponse};

use ag_core::{AccountRepository, AuthError, DomainError, ExpiringStore};

use crate::app::AppState;
use crate::dto::ProfileResponse;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Handler for GET /{namespace}/profile
///
/// Returns the caller's account and keypair, generating the keypair on
/// first view.
pub async fn get_profile<A, S>(
    state: web::Data<AppState<A, S>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    S: ExpiringStore + 'static,
{
    let account_id = auth.account_id().ok_or(AuthError::Forbidden)?;

    let account = state
        .accounts
        .find_by_id(account_id)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            resource: format!("account {}", account_id),
        })?;
    let keypair = state.keypairs.ensure(account_id).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        account: account.to_public(),
        api_key: keypair.key,
        api_secret: keypair.secret,
    }))
}
