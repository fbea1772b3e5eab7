/// JWT token generation and validation
///
/// Tokens are signed with HMAC-SHA256 and carry the authenticated user's
/// id in the `sub` claim. A single token type is issued; it expires after
/// the configured TTL (7 days by default) and there is no refresh flow.
///
/// # Example
///
/// ```
/// use taskshare_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let claims = Claims::new(user_id, chrono::Duration::days(7));
/// let token = create_token(&claims, "this-is-a-very-long-secret-key-123456")?;
///
/// let decoded = validate_token(&token, "this-is-a-very-long-secret-key-123456")?;
/// assert_eq!(decoded.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer written into and required from every token
pub const TOKEN_ISSUER: &str = "taskshare";

/// Default token lifetime in hours (7 days)
pub const DEFAULT_TTL_HOURS: i64 = 168;

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Token is invalid (malformed, bad signature, wrong issuer)
    #[error("Invalid token: {0}")]
    Invalid(String),

    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreationFailed(String),
}

/// Claims embedded in every TaskShare token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's id
    pub sub: Uuid,

    /// Issuer, always [`TOKEN_ISSUER`]
    pub iss: String,

    /// Issued-at time (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not-before time (Unix timestamp)
    pub nbf: i64,
}

impl Claims {
    /// Creates claims for a user, valid from now until now + `ttl`
    pub fn new(user_id: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            iss: TOKEN_ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            nbf: now.timestamp(),
        }
    }
}

/// Creates a signed JWT from the given claims
///
/// # Errors
///
/// Returns `JwtError::CreationFailed` if encoding fails.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::CreationFailed(e.to_string()))
}

/// Validates a token and returns its claims
///
/// Checks the signature, expiration, not-before time, and issuer.
///
/// # Errors
///
/// Returns `JwtError::Expired` for expired tokens and `JwtError::Invalid`
/// for any other validation failure. Callers should surface both as a
/// uniform 401 so token state is not leaked to clients.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::default();
    validation.set_issuer(&[TOKEN_ISSUER]);
    validation.validate_nbf = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::Invalid(e.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-that-is-long-enough-123456";

    #[test]
    fn test_create_and_validate_token() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, Duration::hours(DEFAULT_TTL_HOURS));

        let token = create_token(&claims, SECRET).expect("Token creation should succeed");
        let decoded = validate_token(&token, SECRET).expect("Validation should succeed");

        assert_eq!(decoded.sub, user_id);
        assert_eq!(decoded.iss, TOKEN_ISSUER);
        assert_eq!(decoded.exp, claims.exp);
    }

    #[test]
    fn test_validate_token_wrong_secret() {
        let claims = Claims::new(Uuid::new_v4(), Duration::hours(1));
        let token = create_token(&claims, SECRET).expect("Token creation should succeed");

        let result = validate_token(&token, "a-completely-different-secret-key-9876");
        assert!(matches!(result, Err(JwtError::Invalid(_))));
    }

    #[test]
    fn test_validate_expired_token() {
        let mut claims = Claims::new(Uuid::new_v4(), Duration::hours(1));
        claims.iat = (Utc::now() - Duration::hours(3)).timestamp();
        claims.nbf = claims.iat;
        claims.exp = (Utc::now() - Duration::hours(2)).timestamp();

        let token = create_token(&claims, SECRET).expect("Token creation should succeed");

        let result = validate_token(&token, SECRET);
        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_validate_token_wrong_issuer() {
        let mut claims = Claims::new(Uuid::new_v4(), Duration::hours(1));
        claims.iss = "someone-else".to_string();

        let token = create_token(&claims, SECRET).expect("Token creation should succeed");

        let result = validate_token(&token, SECRET);
        assert!(matches!(result, Err(JwtError::Invalid(_))));
    }

    #[test]
    fn test_validate_malformed_token() {
        let result = validate_token("not.a.token", SECRET);
        assert!(matches!(result, Err(JwtError::Invalid(_))));
    }

    #[test]
    fn test_claims_ttl() {
        let claims = Claims::new(Uuid::new_v4(), Duration::hours(DEFAULT_TTL_HOURS));
        assert_eq!(claims.exp - claims.iat, DEFAULT_TTL_HOURS * 3600);
        assert_eq!(claims.nbf, claims.iat);
    }
}
