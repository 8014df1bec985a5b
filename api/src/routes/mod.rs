//! Route registration for the API namespace

pub mod auth;
pub mod keypair;
pub mod profile;
pub mod rate_limit;

use actix_web::web;

use ag_core::{AccountRepository, ExpiringStore};

/// Register every namespaced route; `auth_route` is the token issuance path
pub fn configure<A, S>(cfg: &mut web::ServiceConfig, auth_route: &str)
where
    A: AccountRepository + 'static,
    S: ExpiringStore + 'static,
{
    cfg.route(
        &format!("/{}", auth_route.trim_matches('/')),
        web::post().to(auth::generate_token::<A, S>),
    )
    .service(
        web::resource("/keypair/{id}")
            .route(web::put().to(keypair::regenerate_keypair::<A, S>))
            .route(web::get().to(keypair::get_keypair::<A, S>)),
    )
    .service(
        web::resource("/rate-limit/{id}")
            .route(web::put().to(rate_limit::update_rate_limit::<A, S>))
            .route(web::get().to(rate_limit::get_rate_limit::<A, S>)),
    )
    .route("/profile", web::get().to(profile::get_profile::<A, S>));
}
