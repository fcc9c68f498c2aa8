//! JWT generation and validation for the two token kinds the API accepts.
//!
//! Staff tokens are HS256-signed JWTs issued by `POST /auth/login` and
//! verified with `JWT_SECRET`. End-user session tokens are minted by the
//! external identity provider and verified locally with `SESSION_JWT_SECRET`;
//! the API never issues them.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use quickdesk_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in every staff token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StaffClaims {
    /// Subject -- the staff account's internal database id.
    pub sub: DbId,
    /// Account email, embedded so identity resolution needs no DB round trip.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role name (`"agent"` or `"admin"`).
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit trails.
    pub jti: String,
}

/// Claims carried by an external end-user session token.
///
/// Only `sub` and `exp` are guaranteed; name and email default to `None`
/// when the provider omits them.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Opaque subject id assigned by the identity provider.
    pub sub: String,
    /// Display name, when the provider includes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address, when the provider includes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Configuration for JWT generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret for staff tokens.
    pub secret: String,
    /// HMAC-SHA256 secret for external end-user session tokens.
    pub session_secret: String,
    /// Staff token lifetime in hours (default: 24).
    pub expiry_hours: i64,
}

/// Default staff token expiry in hours.
const DEFAULT_EXPIRY_HOURS: i64 = 24;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var              | Required | Default |
    /// |----------------------|----------|---------|
    /// | `JWT_SECRET`         | **yes**  | --      |
    /// | `SESSION_JWT_SECRET` | **yes**  | --      |
    /// | `JWT_EXPIRY_HOURS`   | no       | `24`    |
    ///
    /// # Panics
    ///
    /// Panics if either secret is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let session_secret = std::env::var("SESSION_JWT_SECRET")
            .expect("SESSION_JWT_SECRET must be set in the environment");
        assert!(
            !session_secret.is_empty(),
            "SESSION_JWT_SECRET must not be empty"
        );

        let expiry_hours: i64 = std::env::var("JWT_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_HOURS.to_string())
            .parse()
            .expect("JWT_EXPIRY_HOURS must be a valid i64");

        Self {
            secret,
            session_secret,
            expiry_hours,
        }
    }
}

/// Generate an HS256 staff token for the given account.
pub fn generate_staff_token(
    staff_id: DbId,
    email: &str,
    name: &str,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.expiry_hours * 3600;

    let claims = StaffClaims {
        sub: staff_id,
        email: email.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a staff token, returning the embedded [`StaffClaims`].
///
/// Validates the signature and expiration automatically.
pub fn validate_staff_token(
    token: &str,
    config: &JwtConfig,
) -> Result<StaffClaims, jsonwebtoken::errors::Error> {
    let token_data = decode::<StaffClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// Validate and decode an external session token, returning [`SessionClaims`].
pub fn validate_session_token(
    token: &str,
    config: &JwtConfig,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.session_secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a test config with known secrets.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "staff-secret-that-is-long-enough-for-hmac".to_string(),
            session_secret: "session-secret-that-is-long-enough-too".to_string(),
            expiry_hours: 24,
        }
    }

    #[test]
    fn test_generate_and_validate_staff_token() {
        let config = test_config();
        let token = generate_staff_token(42, "ada@example.com", "Ada Agent", "agent", &config)
            .expect("token generation should succeed");

        let claims = validate_staff_token(&token, &config).expect("validation should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.name, "Ada Agent");
        assert_eq!(claims.role, "agent");
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_expired_staff_token_fails() {
        let config = test_config();

        // Manually create an already-expired token.
        // Use a margin well beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = StaffClaims {
            sub: 1,
            email: "x@example.com".to_string(),
            name: "X".to_string(),
            role: "admin".to_string(),
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        let result = validate_staff_token(&token, &config);
        assert!(result.is_err(), "expired token must fail validation");
    }

    #[test]
    fn test_staff_token_rejected_as_session_token() {
        let config = test_config();
        let token = generate_staff_token(7, "a@example.com", "A", "admin", &config)
            .expect("token generation should succeed");

        // The two token kinds use different secrets; one must not satisfy the other.
        let result = validate_session_token(&token, &config);
        assert!(result.is_err(), "staff token must not pass session validation");
    }

    #[test]
    fn test_session_token_without_profile_claims() {
        let config = test_config();
        let claims = SessionClaims {
            sub: "ext_user_0001".to_string(),
            name: None,
            email: None,
            exp: chrono::Utc::now().timestamp() + 600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.session_secret.as_bytes()),
        )
        .expect("encoding should succeed");

        let decoded = validate_session_token(&token, &config).expect("validation should succeed");
        assert_eq!(decoded.sub, "ext_user_0001");
        assert_eq!(decoded.name, None);
        assert_eq!(decoded.email, None);
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = test_config();
        let config_b = JwtConfig {
            secret: "a-completely-different-staff-secret".to_string(),
            ..test_config()
        };

        let token = generate_staff_token(1, "a@example.com", "A", "agent", &config_a)
            .expect("token generation should succeed");

        let result = validate_staff_token(&token, &config_b);
        assert!(
            result.is_err(),
            "token signed with a different secret must fail"
        );
    }
}
