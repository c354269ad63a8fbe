use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// Extracts the authenticated identity from request extensions.
///
/// This extractor is intended to be used on routes protected by `AuthMiddleware`,
/// which is responsible for validating the JWT and inserting the decoded `Claims`
/// into request extensions. The identity is threaded explicitly into each
/// handler's parameters rather than read from shared mutable state.
///
/// If no claims are found in the extensions (e.g. `AuthMiddleware` did not run),
/// this extractor returns an `AppError::Unauthenticated` error.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub username: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError; // AppError will be converted into ActixError via ResponseError
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>().cloned() {
            Some(claims) => ready(Ok(AuthenticatedUser {
                id: claims.sub,
                username: claims.username,
            })),
            None => {
                // Only reachable if the route was registered outside the guard;
                // responding with Unauthorized is the safe default.
                let err = AppError::Unauthenticated(
                    "No authenticated identity in request. Ensure AuthMiddleware is active."
                        .to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}
