use actix_web::{http::header::AUTHORIZATION, web, Either, HttpRequest, HttpResponse};

use ag_core::{AccountRepository, CredentialRequest, ExpiringStore};

use crate::app::AppState;
use crate::handlers::ApiError;

type CredentialBody = Either<web::Json<CredentialRequest>, web::Form<CredentialRequest>>;

/// Handler for POST /{namespace}/auth
///
/// Accepts a JSON or form body. A refresh token may instead be sent as
/// `Authorization: Bearer <refresh_token>` with no body.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "client": { "id": 7, "type": "account" },
///     "account": { "id": 7, "login": "auditor", "display_name": "Auditor", "email": "" }
/// }
/// ```
/// `refresh_token` is omitted when the request itself used a refresh token.
///
/// ## Errors
/// - 403 Forbidden: no scheme accepted the credentials, or no signing secret
/// - 500 Internal Server Error: storage failure
pub async fn generate_token<A, S>(
    state: web::Data<AppState<A, S>>,
    req: HttpRequest,
    body: Option<CredentialBody>,
) -> Result<HttpResponse, ApiError>
where
    A: AccountRepository + 'static,
    S: ExpiringStore + 'static,
{
    let mut credentials = match body {
        Some(Either::Left(json)) => json.into_inner(),
        Some(Either::Right(form)) => form.into_inner(),
        None => CredentialRequest::default(),
    };

    if let Some(header) = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    {
        credentials = credentials.with_authorization(header);
    }

    let grant = state.auth.generate_token(&credentials).await?;

    Ok(HttpResponse::Ok().json(grant))
}
