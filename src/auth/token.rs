use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: i32,
    /// Username of the authenticated user, carried alongside the id so handlers
    /// never need a second lookup.
    pub username: String,
    /// Issue timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
}

/// Generates a JWT for a given user id and username.
///
/// The token is set to expire 24 hours after issue. The signing secret is an
/// explicit parameter so issuance carries no ambient process state.
///
/// # Arguments
/// * `user_id` - The id of the user for whom the token is generated.
/// * `username` - The username embedded in the claim set.
/// * `secret` - The HS256 signing secret.
///
/// # Returns
/// A `Result` containing the JWT string if successful, or
/// `AppError::InternalServerError` if token encoding fails.
pub fn generate_token(user_id: i32, username: &str, secret: &str) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expiration = now
        .checked_add_signed(chrono::Duration::hours(TOKEN_LIFETIME_HOURS))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        iat: now.timestamp() as usize,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies a JWT string against the given secret and decodes its claims.
///
/// Default validation checks are applied (signature, expiration). Verification
/// is synchronous and deterministic; there is nothing to retry.
///
/// # Arguments
/// * `token` - The JWT string to verify.
/// * `secret` - The HS256 signing secret the token must have been signed with.
///
/// # Returns
/// A `Result` containing the decoded `Claims` if the token is valid.
/// Returns `AppError::Forbidden` if the token is malformed, its signature is
/// invalid, or it has expired.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Forbidden(format!("Invalid token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_generation_and_verification() {
        let token = generate_token(1, "alice", "test_secret_for_gen_verify").unwrap();
        let claims = verify_token(&token, "test_secret_for_gen_verify").unwrap();
        assert_eq!(claims.sub, 1);
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_expiration() {
        let secret = "test_secret_for_expiration";
        let now = chrono::Utc::now();
        let expired = Claims {
            sub: 2,
            username: "bob".to_string(),
            iat: now
                .checked_sub_signed(chrono::Duration::hours(4))
                .expect("valid timestamp")
                .timestamp() as usize,
            exp: now
                .checked_sub_signed(chrono::Duration::hours(2))
                .expect("valid timestamp")
                .timestamp() as usize,
        };
        let expired_token = encode(
            &Header::default(),
            &expired,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        match verify_token(&expired_token, secret) {
            Err(AppError::Forbidden(msg)) => {
                assert!(msg.contains("ExpiredSignature"), "unexpected message: {}", msg);
            }
            Ok(_) => panic!("Token should have been invalid due to expiration"),
            Err(e) => panic!("Unexpected error type for expired token: {:?}", e),
        }
    }

    #[test]
    fn test_invalid_token_signature() {
        let token = generate_token(3, "carol", "signing_secret").unwrap();

        match verify_token(&token, "a_completely_different_secret") {
            Err(AppError::Forbidden(msg)) => {
                assert!(
                    msg.contains("InvalidSignature") || msg.contains("InvalidToken"),
                    "unexpected message: {}",
                    msg
                );
            }
            Ok(_) => panic!("Token should have been invalid due to signature mismatch"),
            Err(e) => panic!("Unexpected error type for invalid signature: {:?}", e),
        }
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        match verify_token("not-a-jwt-at-all", "any_secret") {
            Err(AppError::Forbidden(_)) => {}
            other => panic!("Expected Forbidden, got {:?}", other),
        }
    }
}
