use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;

/// Upper bound on token lifetime (100 years).
const MAX_TTL_SECS: i64 = 100 * 365 * 24 * 3600;

/// Claims carried by every identity token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    SignatureInvalid,

    #[error("token has expired")]
    Expired,

    #[error("token principal is not a valid UUID")]
    UnparsablePrincipal,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Issues and verifies HMAC-signed, time-limited identity tokens.
///
/// Tokens are stateless: there is no revocation, a token stays valid until
/// its `exp` claim passes.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(i64::try_from(ttl_secs).unwrap_or(MAX_TTL_SECS).min(MAX_TTL_SECS)),
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(&security.jwt_secret, security.jwt_expiration_secs)
    }

    /// Token lifetime in seconds.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Sign a new token for `user_id` expiring `ttl` from now.
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Signing("expiration out of range".to_string()))?;

        let claims = Claims {
            user_id: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify signature and expiry, then extract the principal.
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Self::validation())
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::SignatureInvalid
                }
                _ => TokenError::Malformed,
            })?;

        Uuid::parse_str(&token_data.claims.user_id).map_err(|_| TokenError::UnparsablePrincipal)
    }

    /// HMAC family only; any other `alg` in the header is rejected.
    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);
        validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-token-tests";

    fn sign_raw(claims: &impl Serialize, algorithm: Algorithm, secret: &str) -> String {
        encode(
            &Header::new(algorithm),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn issue_then_verify_returns_principal() {
        let service = TokenService::new(TEST_SECRET, 3600);
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id).unwrap();
        assert!(!token.is_empty());
        assert_eq!(service.verify(&token).unwrap(), user_id);
    }

    #[test]
    fn expired_token_reports_expired() {
        let service = TokenService::new(TEST_SECRET, 3600);
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: Uuid::new_v4().to_string(),
            exp: now - 5,
            iat: now - 3605,
        };
        let token = sign_raw(&claims, Algorithm::HS256, TEST_SECRET);

        assert!(matches!(service.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn different_secret_reports_signature_invalid() {
        let issuer = TokenService::new("secret-one", 3600);
        let verifier = TokenService::new("secret-two", 3600);

        let token = issuer.issue(Uuid::new_v4()).unwrap();
        assert!(matches!(verifier.verify(&token), Err(TokenError::SignatureInvalid)));
    }

    #[test]
    fn expired_token_with_wrong_secret_is_a_signature_failure() {
        let verifier = TokenService::new(TEST_SECRET, 3600);
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: Uuid::new_v4().to_string(),
            exp: now - 5,
            iat: now - 10,
        };
        let token = sign_raw(&claims, Algorithm::HS256, "another-secret");

        assert!(matches!(verifier.verify(&token), Err(TokenError::SignatureInvalid)));
    }

    #[test]
    fn other_hmac_algorithms_are_accepted() {
        let service = TokenService::new(TEST_SECRET, 3600);
        let user_id = Uuid::new_v4();
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: user_id.to_string(),
            exp: now + 60,
            iat: now,
        };
        let token = sign_raw(&claims, Algorithm::HS512, TEST_SECRET);

        assert_eq!(service.verify(&token).unwrap(), user_id);
    }

    #[test]
    fn non_hmac_algorithms_are_rejected() {
        let service = TokenService::new(TEST_SECRET, 3600);
        let genuine = service.issue(Uuid::new_v4()).unwrap();
        let mut parts = genuine.split('.').skip(1);
        let (payload, signature) = (parts.next().unwrap(), parts.next().unwrap());

        // base64url of {"alg":"<ALG>","typ":"JWT"}
        for header in [
            "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9", // RS256
            "eyJhbGciOiJFUzI1NiIsInR5cCI6IkpXVCJ9", // ES256
            "eyJhbGciOiJQUzI1NiIsInR5cCI6IkpXVCJ9", // PS256
            "eyJhbGciOiJFZERTQSIsInR5cCI6IkpXVCJ9", // EdDSA
        ] {
            let forged = format!("{}.{}.{}", header, payload, signature);
            assert!(
                matches!(service.verify(&forged), Err(TokenError::SignatureInvalid)),
                "{}",
                header
            );
        }

        // {"alg":"none","typ":"JWT"}, with and without a signature
        let none = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0";
        for forged in [format!("{}.{}.", none, payload), format!("{}.{}.{}", none, payload, signature)] {
            assert!(matches!(service.verify(&forged), Err(TokenError::Malformed)));
        }
    }

    #[test]
    fn garbage_is_malformed() {
        let service = TokenService::new(TEST_SECRET, 3600);
        assert!(matches!(service.verify("invalid.token.here"), Err(TokenError::Malformed)));
        assert!(matches!(service.verify(""), Err(TokenError::Malformed)));
    }

    #[test]
    fn non_uuid_principal_is_unparsable() {
        let service = TokenService::new(TEST_SECRET, 3600);
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: "not-a-uuid".to_string(),
            exp: now + 60,
            iat: now,
        };
        let token = sign_raw(&claims, Algorithm::HS256, TEST_SECRET);

        assert!(matches!(service.verify(&token), Err(TokenError::UnparsablePrincipal)));
    }

    #[test]
    fn missing_exp_is_malformed() {
        #[derive(Serialize)]
        struct NoExp {
            #[serde(rename = "userID")]
            user_id: String,
        }

        let service = TokenService::new(TEST_SECRET, 3600);
        let token = sign_raw(
            &NoExp { user_id: Uuid::new_v4().to_string() },
            Algorithm::HS256,
            TEST_SECRET,
        );

        assert!(matches!(service.verify(&token), Err(TokenError::Malformed)));
    }

    #[test]
    fn expiry_follows_configured_ttl() {
        let service = TokenService::new(TEST_SECRET, 120);
        let token = service.issue(Uuid::new_v4()).unwrap();

        let data = decode::<Claims>(&token, &service.decoding_key, &TokenService::validation()).unwrap();
        assert_eq!(data.claims.exp - data.claims.iat, 120);
        assert_eq!(service.ttl_secs(), 120);
    }
}
