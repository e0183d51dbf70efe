//! Access Token Codec
//!
//! Stateless JWT access tokens, HS256 only. Verification never touches a
//! store.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

/// Shortest HS256 key accepted, one SHA-256 block output
pub const MIN_SECRET_LEN: usize = 32;

/// Registered claims carried by every access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User id, decimal string
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies access tokens with the process-wide secret
#[derive(Clone)]
pub struct AccessTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: chrono::Duration,
}

impl AccessTokenCodec {
    pub fn new(config: &AuthConfig) -> AuthResult<Self> {
        if config.jwt_secret.len() < MIN_SECRET_LEN {
            return Err(AuthError::Internal(format!(
                "jwt secret must be at least {MIN_SECRET_LEN} bytes"
            )));
        }

        let ttl = chrono::Duration::from_std(config.access_token_ttl)
            .map_err(|e| AuthError::Internal(format!("access token ttl: {e}")))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(&config.jwt_secret),
            decoding: DecodingKey::from_secret(&config.jwt_secret),
            validation,
            ttl,
        })
    }

    /// Sign a token for `user_id` valid from `now` for the configured lifetime
    pub fn issue(&self, user_id: UserId, now: DateTime<Utc>) -> AuthResult<String> {
        let claims = AccessClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("access token encoding: {e}")))
    }

    /// Verify signature, algorithm and expiry, then read the user id from `sub`
    pub fn verify(&self, token: &str) -> AuthResult<UserId> {
        let data = decode::<AccessClaims>(token, &self.decoding, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Access token rejected");
            AuthError::InvalidToken
        })?;

        parse_subject(&data.claims.sub).ok_or(AuthError::InvalidToken)
    }
}

/// Only the form `issue` writes: positive decimal, no sign or leading zeros
fn parse_subject(sub: &str) -> Option<UserId> {
    let id = sub.parse::<i64>().ok()?;
    (id > 0 && id.to_string() == sub).then(|| UserId::from_i64(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn codec() -> AccessTokenCodec {
        AccessTokenCodec::new(&AuthConfig::with_random_secret()).unwrap()
    }

    fn sign_raw(claims: &serde_json::Value, alg: Algorithm, secret: &[u8]) -> String {
        encode(&Header::new(alg), claims, &EncodingKey::from_secret(secret)).unwrap()
    }

    #[test]
    fn test_issue_then_verify() {
        let codec = codec();
        let token = codec.issue(UserId::from_i64(42), Utc::now()).unwrap();
        assert_eq!(token.split('.').count(), 3);
        assert_eq!(codec.verify(&token).unwrap(), UserId::from_i64(42));
    }

    #[test]
    fn test_claims_shape() {
        let codec = codec();
        let now = Utc::now();
        let token = codec.issue(UserId::from_i64(5), now).unwrap();

        let mut insecure = Validation::new(Algorithm::HS256);
        insecure.insecure_disable_signature_validation();
        let data =
            decode::<AccessClaims>(&token, &DecodingKey::from_secret(b"ignored"), &insecure)
                .unwrap();
        assert_eq!(data.claims.sub, "5");
        assert_eq!(data.claims.iat, now.timestamp());
        assert_eq!(data.claims.exp - data.claims.iat, 24 * 3600);
    }

    #[test]
    fn test_flipped_signature_is_rejected() {
        let codec = codec();
        let token = codec.issue(UserId::from_i64(1), Utc::now()).unwrap();

        let (head, sig) = token.rsplit_once('.').unwrap();
        let mut sig = sig.to_string();
        let first = sig.remove(0);
        sig.insert(0, if first == 'A' { 'B' } else { 'A' });
        let tampered = format!("{head}.{sig}");

        assert!(matches!(codec.verify(&tampered), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_other_secret_is_rejected() {
        let token = codec().issue(UserId::from_i64(1), Utc::now()).unwrap();
        assert!(matches!(codec().verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let codec = codec();
        let token = codec
            .issue(UserId::from_i64(1), Utc::now() - Duration::hours(25))
            .unwrap();
        assert!(matches!(codec.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        let codec = codec();
        for token in ["", "abc", "a.b.c", "not.a.jwt.at.all"] {
            assert!(matches!(codec.verify(token), Err(AuthError::InvalidToken)));
        }
    }

    #[test]
    fn test_other_algorithm_is_rejected() {
        let config = AuthConfig::with_random_secret();
        let codec = AccessTokenCodec::new(&config).unwrap();
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let claims = serde_json::json!({ "sub": "1", "iat": 0, "exp": exp });
        let token = sign_raw(&claims, Algorithm::HS512, &config.jwt_secret);
        assert!(matches!(codec.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_bad_subject_is_rejected() {
        let config = AuthConfig::with_random_secret();
        let codec = AccessTokenCodec::new(&config).unwrap();
        let exp = (Utc::now() + Duration::hours(1)).timestamp();

        let numeric = serde_json::json!({ "sub": 1, "iat": 0, "exp": exp });
        let word = serde_json::json!({ "sub": "alice", "iat": 0, "exp": exp });
        let missing = serde_json::json!({ "iat": 0, "exp": exp });
        let mut cases = vec![numeric, word, missing];
        for sub in ["+7", "007", "0", "-3", " 7", ""] {
            cases.push(serde_json::json!({ "sub": sub, "iat": 0, "exp": exp }));
        }

        for claims in cases {
            let token = sign_raw(&claims, Algorithm::HS256, &config.jwt_secret);
            assert!(
                matches!(codec.verify(&token), Err(AuthError::InvalidToken)),
                "{claims}"
            );
        }
    }

    #[test]
    fn test_short_secret_is_refused() {
        for secret in [Vec::new(), b"short".to_vec(), vec![7u8; MIN_SECRET_LEN - 1]] {
            let config = AuthConfig::new(secret, b"pepper".to_vec());
            assert!(matches!(
                AccessTokenCodec::new(&config),
                Err(AuthError::Internal(_))
            ));
        }

        let config = AuthConfig::new(vec![7u8; MIN_SECRET_LEN], b"pepper".to_vec());
        assert!(AccessTokenCodec::new(&config).is_ok());
    }
}
