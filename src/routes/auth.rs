use crate::{
    auth::{generate_token, hash_password, verify_password, LoginRequest, RegisterRequest, TokenResponse},
    config::Config,
    error::AppError,
    models::User,
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;

/// Register a new user
///
/// Hashes the password and inserts the `(username, password_hash)` pair. A
/// duplicate username is detected through the store's uniqueness-violation
/// signal and surfaces as 409; any other store failure is a 500.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let password_hash = hash_password(&register_data.password)?;

    User::insert(&**pool, &register_data.username, &password_hash).await?;

    Ok(HttpResponse::Created().finish())
}

/// Login user
///
/// Looks up the user by username and verifies the password against the stored
/// hash. An unknown username and a wrong password both answer 401 so callers
/// cannot probe which accounts exist. On success the signed session token is
/// the full credential; no session state is kept server-side.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let user = User::find_by_username(&**pool, &login_data.username).await?;

    match user {
        Some(user) => {
            if verify_password(&login_data.password, &user.password_hash)? {
                let token = generate_token(user.id, &user.username, &config.jwt_secret)?;
                Ok(HttpResponse::Ok().json(TokenResponse { token }))
            } else {
                Err(AppError::Unauthenticated("Invalid credentials".into()))
            }
        }
        None => Err(AppError::Unauthenticated("Invalid credentials".into())),
    }
}
