pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

/// Represents the payload for a user login request.
///
/// Both fields are required; beyond presence, no shape is enforced — a lookup
/// miss and a password mismatch are reported identically by the handler.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Desired username for the new account. Uniqueness is enforced by the
    /// store's constraint, not by the request layer.
    pub username: String,
    pub password: String,
}

/// Response structure after a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The JWT (JSON Web Token) for session authentication.
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_requires_both_fields() {
        let ok: Result<RegisterRequest, _> =
            serde_json::from_str(r#"{"username":"alice","password":"pw1"}"#);
        assert!(ok.is_ok());

        let missing_password: Result<RegisterRequest, _> =
            serde_json::from_str(r#"{"username":"alice"}"#);
        assert!(missing_password.is_err());

        let missing_username: Result<LoginRequest, _> =
            serde_json::from_str(r#"{"password":"pw1"}"#);
        assert!(missing_username.is_err());
    }

    #[test]
    fn test_token_response_serializes_token_field() {
        let response = TokenResponse {
            token: "abc.def.ghi".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["token"], "abc.def.ghi");
    }
}
