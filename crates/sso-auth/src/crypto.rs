use super::*;

/// Signs session tokens.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, claims: &Claims, secret: &str) -> Result<String, TokenError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("signing secret is empty")]
    EmptySecret,
    #[error("token lifetime out of range")]
    Lifetime,
    #[error("jwt: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// HS256 JSON Web Tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct Crypto;

impl Crypto {
    /// Checks signature and expiry, as a token consumer would.
    pub fn verify(&self, token: &str, secret: &str) -> Result<Claims, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }
        let validation = jsonwebtoken::Validation::new(jsonwebtoken::Algorithm::HS256);
        jsonwebtoken::decode::<Claims>(
            token,
            &jsonwebtoken::DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(TokenError::from)
    }
}

impl TokenIssuer for Crypto {
    fn issue(&self, claims: &Claims, secret: &str) -> Result<String, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }
        jsonwebtoken::encode(
            &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
            claims,
            &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(TokenError::from)
    }
}
