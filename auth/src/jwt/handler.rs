use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// JWT encoder/decoder bound to a single signing secret.
///
/// Signs with HS256. Verification pins the algorithm: a token whose header
/// declares anything else (including `none`) is rejected regardless of its
/// signature.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new handler from the server-wide signing secret.
    ///
    /// The secret should be at least 32 bytes for HS256 and is held for the
    /// handler's lifetime; there is no runtime rotation.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Serialize and sign a claim set into its compact wire form.
    ///
    /// # Errors
    /// * `SigningFailed` - the signing primitive errored
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Parse, verify, and extract the claims from a token.
    ///
    /// Checks the signature, the declared algorithm, and the expiry with
    /// zero leeway. Every failure collapses into `InvalidToken`.
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| JwtError::InvalidToken)
    }
}
