//! Access token issuance and verification.
//!
//! Tokens are HS256-signed JWTs whose claims are described by [`Claims`].
//! Verification checks the signature, the issuer and the expiry, and
//! classifies failures into a [`TokenError`] so callers (and logs) can tell
//! an expired session from a forged or garbled token.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use rolodex_config::JwtConfig;
use rolodex_core::AppError;

use crate::claims::Claims;

/// Why a token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,
    /// Signature, issuer or algorithm did not check out.
    #[error("Token is invalid")]
    Invalid,
    /// Not a decodable JWT at all.
    #[error("Token is malformed")]
    Malformed,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::ExpiredSignature => TokenError::Expired,
            JwtErrorKind::InvalidToken
            | JwtErrorKind::Base64(_)
            | JwtErrorKind::Json(_)
            | JwtErrorKind::Utf8(_) => TokenError::Malformed,
            _ => TokenError::Invalid,
        }
    }
}

/// Creates a signed access token for the given identity and role flags.
///
/// The token expires `jwt_config.access_token_expiry` seconds from now.
pub fn create_access_token(
    user_id: Uuid,
    is_admin: bool,
    is_active: bool,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry.max(0) as usize;

    let claims = Claims {
        sub: user_id,
        is_admin,
        is_active,
        iss: jwt_config.issuer.clone(),
        iat: now,
        exp,
    };

    encode_claims(&claims, jwt_config)
}

/// Signs an arbitrary claim set with the configured secret.
pub fn encode_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Decodes and validates a token, classifying any failure.
pub fn decode_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[jwt_config.issuer.as_str()]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(TokenError::from)
}

/// Verifies a token, mapping any failure to an unauthorized error.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode_token(token, jwt_config).map_err(|e| AppError::unauthorized(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
            issuer: "contact-app".to_string(),
        }
    }

    fn claims_with_exp(exp: i64, config: &JwtConfig) -> Claims {
        Claims {
            sub: Uuid::new_v4(),
            is_admin: false,
            is_active: true,
            iss: config.issuer.clone(),
            iat: (exp - 7200) as usize,
            exp: exp as usize,
        }
    }

    #[test]
    fn test_create_and_verify_round_trip() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let token = create_access_token(user_id, true, true, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id);
        assert!(claims.is_admin);
        assert!(claims.is_active);
        assert_eq!(claims.iss, "contact-app");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_token_is_classified() {
        let config = get_test_jwt_config();
        let past = Utc::now().timestamp() - 3600;
        let token = encode_claims(&claims_with_exp(past, &config), &config).unwrap();

        assert_eq!(decode_token(&token, &config), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let config = get_test_jwt_config();
        let token = create_access_token(Uuid::new_v4(), false, true, &config).unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            ..config.clone()
        };

        assert_eq!(decode_token(&token, &wrong_config), Err(TokenError::Invalid));
    }

    #[test]
    fn test_wrong_issuer_is_invalid() {
        let config = get_test_jwt_config();
        let other = JwtConfig {
            issuer: "someone-else".to_string(),
            ..config.clone()
        };
        let token = create_access_token(Uuid::new_v4(), false, true, &other).unwrap();

        assert_eq!(decode_token(&token, &config), Err(TokenError::Invalid));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let config = get_test_jwt_config();
        assert_eq!(
            decode_token("invalid-token", &config),
            Err(TokenError::Malformed)
        );
        assert_eq!(decode_token("", &config), Err(TokenError::Malformed));
    }

    #[test]
    fn test_escalated_payload_fails_signature_check() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();
        let genuine = create_access_token(user_id, false, true, &config).unwrap();

        // Same identity, admin flag flipped, signed by someone without the secret.
        let attacker = JwtConfig {
            secret: "attacker-controlled-secret-value-000000".to_string(),
            ..config.clone()
        };
        let forged = create_access_token(user_id, true, true, &attacker).unwrap();

        let genuine_sig = genuine.rsplit('.').next().unwrap();
        let forged_body = forged.rsplitn(2, '.').nth(1).unwrap();
        let spliced = format!("{}.{}", forged_body, genuine_sig);

        assert_eq!(decode_token(&spliced, &config), Err(TokenError::Invalid));
        assert_eq!(decode_token(&forged, &config), Err(TokenError::Invalid));
    }

    #[test]
    fn test_verify_token_maps_to_unauthorized_with_reason() {
        let config = get_test_jwt_config();
        let err = verify_token("not.a.jwt", &config).unwrap_err();

        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.error.to_string(), "Token is malformed");
    }
}
