//! Token decoding.

use jsonwebtoken::dangerous::insecure_decode;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use tokenward_core::config::TokenConfig;
use tokenward_core::error::{AppError, ErrorKind};

use super::claims::Claims;

/// Parses token strings back into claims.
///
/// Expiry is never checked here. The signature is only checked when
/// `verify_signature` is configured; otherwise any structurally valid token
/// decodes, whatever key signed it.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
    verify_signature: bool,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("verify_signature", &self.verify_signature)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a decoder from token configuration.
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(config.secret_key.as_bytes()),
            validation,
            verify_signature: config.verify_signature,
        }
    }

    /// Whether signatures are checked.
    pub fn verifies_signature(&self) -> bool {
        self.verify_signature
    }

    /// Decode a token string. Every failure is a `MalformedToken`.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let decoded = if self.verify_signature {
            decode::<Claims>(token, &self.decoding_key, &self.validation)
        } else {
            insecure_decode::<Claims>(token)
        };

        decoded.map(|data| data.claims).map_err(malformed)
    }
}

fn malformed(e: JwtError) -> AppError {
    let message = match e.kind() {
        JwtErrorKind::InvalidSignature => "Invalid token signature",
        JwtErrorKind::InvalidAlgorithm => "Unsupported token algorithm",
        JwtErrorKind::Json(_) => "Token claims are malformed",
        _ => "Invalid token format",
    };
    AppError::with_source(ErrorKind::MalformedToken, message, e)
}
