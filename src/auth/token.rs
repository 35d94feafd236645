// JWT token generation and validation service

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;
use crate::auth::models::Role;

/// Fixed session lifetime: 24 hours
pub const TOKEN_LIFETIME_SECONDS: i64 = 86_400;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account id the token is scoped to
    pub sub: i32,
    pub role: Role,
    /// Issued-at timestamp (seconds since epoch)
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,
}

/// Token service for signing and validating session tokens
///
/// The signing secret is process-wide static configuration; rotating it
/// invalidates every outstanding token.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
}

impl TokenService {
    /// Create a new TokenService with the signing secret
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// Issue a token for an account, valid for 24 hours from now
    pub fn issue_token(&self, account_id: i32, role: Role) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: account_id,
            role,
            iat: now,
            exp: now + TOKEN_LIFETIME_SECONDS,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Validate a token, returning its claims
    ///
    /// Fails with ExpiredToken once now >= exp (zero leeway), and with
    /// InvalidToken for a bad signature or malformed payload. Never fails
    /// open.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_token_service() -> TokenService {
        TokenService::new("test_secret_key_for_testing_purposes".to_string())
    }

    #[test]
    fn test_token_lifetime_is_24_hours() {
        let service = test_token_service();
        let token = service.issue_token(1, Role::Employee).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(
            claims.exp - claims.iat,
            86_400,
            "Session tokens should expire exactly 24 hours after issuance"
        );
    }

    #[test]
    fn test_token_claims_carry_identity_and_role() {
        let service = test_token_service();

        let token = service.issue_token(42, Role::Admin).unwrap();
        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = test_token_service();

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            role: Role::Employee,
            iat: now - 90_000,
            exp: now - 3_600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test_secret_key_for_testing_purposes".as_bytes()),
        )
        .unwrap();

        let result = service.validate_token(&token);
        assert!(matches!(result, Err(AuthError::ExpiredToken)));
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let service = test_token_service();

        assert!(service.validate_token("").is_err());
        assert!(service.validate_token("not.a.token").is_err());
        assert!(service.validate_token("garbage_without_dots").is_err());
        assert!(service
            .validate_token("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.invalid.signature")
            .is_err());
    }

    #[test]
    fn test_token_signature_verification() {
        let issuer = TokenService::new("secret1".to_string());
        let other = TokenService::new("secret2".to_string());

        let token = issuer.issue_token(1, Role::Employee).unwrap();

        assert!(issuer.validate_token(&token).is_ok());
        // A different secret must reject the token outright
        assert!(matches!(
            other.validate_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    proptest! {
        #[test]
        fn prop_issued_tokens_validate_to_their_account(
            account_id in 1i32..1_000_000,
        ) {
            let service = test_token_service();
            let token = service.issue_token(account_id, Role::Employee)?;
            let claims = service.validate_token(&token)?;
            prop_assert_eq!(claims.sub, account_id);
            prop_assert_eq!(claims.exp - claims.iat, 86_400);
        }

        #[test]
        fn prop_random_strings_are_rejected(
            garbage in "[a-zA-Z0-9]{10,60}"
        ) {
            let service = test_token_service();
            prop_assert!(service.validate_token(&garbage).is_err());
        }
    }
}
