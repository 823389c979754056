//! Signed, time-bounded access tokens.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Access tokens are valid for a fixed window after issuance; expiry is the
/// only way a token stops working.
pub const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

/// Issues and verifies bearer tokens with the process-wide signing secret.
///
/// The keys are derived once at startup and never change for the lifetime of
/// the process.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::default();
        // Exact expiry: a token is valid strictly within [iat, iat + TTL).
        validation.leeway = 0;
        TokenIssuer {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign a token asserting `subject_id`, expiring in [`TOKEN_TTL_DAYS`].
    pub fn issue(&self, subject_id: i64) -> Result<String, AppError> {
        let now = chrono::Utc::now();
        let expiration = now + chrono::Duration::days(TOKEN_TTL_DAYS);
        let claims = Claims {
            sub: subject_id.to_string(),
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };
        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)?;
        Ok(token)
    }

    /// Check signature and expiry, returning the subject id.
    ///
    /// Expired, mis-signed and malformed tokens all fail with the same error
    /// kind; callers learn nothing beyond "invalid".
    pub fn verify(&self, token: &str) -> Result<i64, AppError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| AppError::InvalidToken)?;
        data.claims.sub.parse().map_err(|_| AppError::InvalidToken)
    }
}
