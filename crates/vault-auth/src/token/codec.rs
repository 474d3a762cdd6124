//! HS256 signing and the base64 wire form.
//!
//! A wire token is the standard-alphabet base64 encoding of a compact JWT.
//! The wire string is what clients present and what the session cache
//! compares against, so it must be reproduced byte for byte.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use vault_core::error::AppError;

use super::claims::{Claims, RawClaims};
use crate::error::AuthFailure;

/// Signs and verifies tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a codec signing with the given HMAC secret.
    pub fn new(secret: &str) -> Self {
        // Claim checks live in ClaimValidator; the codec only verifies the
        // algorithm and signature.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign `claims` and return the wire form.
    pub fn encode(&self, claims: &Claims) -> Result<String, AppError> {
        let jwt = encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Token signing failed: {e}")))?;
        Ok(STANDARD.encode(jwt))
    }

    /// Verify a wire token and return its claims without judging them.
    pub fn decode(&self, wire: &str) -> Result<RawClaims, AuthFailure> {
        if wire.is_empty() {
            return Err(AuthFailure::Malformed("empty token".into()));
        }

        let raw = STANDARD
            .decode(wire)
            .map_err(|e| AuthFailure::Malformed(format!("base64: {e}")))?;
        let jwt = String::from_utf8(raw)
            .map_err(|_| AuthFailure::Malformed("token is not UTF-8".into()))?;

        decode::<RawClaims>(&jwt, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
                    AuthFailure::BadSignature
                }
                _ => AuthFailure::Malformed(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims() -> Claims {
        Claims::new("alice", 1000, 4600)
    }

    fn sign_raw(secret: &str, alg: Algorithm, payload: &serde_json::Value) -> String {
        let jwt = encode(
            &Header::new(alg),
            payload,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();
        STANDARD.encode(jwt)
    }

    #[test]
    fn test_decode_returns_signed_claims() {
        let codec = TokenCodec::new("secret1");
        let wire = codec.encode(&claims()).unwrap();
        let raw = codec.decode(&wire).unwrap();
        assert_eq!(raw.login.as_deref(), Some("alice"));
        assert_eq!(raw.iat, Some(1000));
        assert_eq!(raw.exp, Some(4600));
    }

    #[test]
    fn test_wire_form_is_standard_base64_of_jwt() {
        let codec = TokenCodec::new("secret1");
        let wire = codec.encode(&claims()).unwrap();
        let jwt = String::from_utf8(STANDARD.decode(&wire).unwrap()).unwrap();
        assert_eq!(jwt.split('.').count(), 3);
    }

    #[test]
    fn test_wrong_secret_is_bad_signature() {
        let wire = TokenCodec::new("secret1").encode(&claims()).unwrap();
        let err = TokenCodec::new("secret2").decode(&wire).unwrap_err();
        assert_eq!(err, AuthFailure::BadSignature);
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let payload = serde_json::json!({"login": "alice", "iat": 1000, "exp": 4600});
        let wire = sign_raw("secret1", Algorithm::HS512, &payload);
        let err = TokenCodec::new("secret1").decode(&wire).unwrap_err();
        assert_eq!(err, AuthFailure::BadSignature);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = TokenCodec::new("secret1");
        assert!(matches!(codec.decode(""), Err(AuthFailure::Malformed(_))));
        assert!(matches!(codec.decode("%%%"), Err(AuthFailure::Malformed(_))));
        let not_jwt = STANDARD.encode("hello.world");
        assert!(matches!(codec.decode(&not_jwt), Err(AuthFailure::Malformed(_))));
    }

    #[test]
    fn test_missing_claims_still_decode() {
        let payload = serde_json::json!({"login": "alice"});
        let wire = sign_raw("secret1", Algorithm::HS256, &payload);
        let raw = TokenCodec::new("secret1").decode(&wire).unwrap();
        assert_eq!(raw.login.as_deref(), Some("alice"));
        assert_eq!(raw.iat, None);
        assert_eq!(raw.exp, None);
    }
}
