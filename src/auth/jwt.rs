use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by the identity provider's access token.
///
/// The `sub` field is the account UUID; it doubles as the profile primary key
/// so a profile row can be created lazily on first request. Token issuance
/// lives outside this service; only validation happens here, against the
/// shared HS256 secret.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The account UUID.
    pub sub: String,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    /// Token issued-at (Unix timestamp).
    pub iat: Option<usize>,
    /// Issuer.
    pub iss: Option<String>,
    /// Account email.
    pub email: Option<String>,
    /// Display name, when the provider has one.
    pub name: Option<String>,
}

impl Claims {
    /// Extract the account UUID from the `sub` claim.
    pub fn user_id(&self) -> Result<Uuid, String> {
        Uuid::parse_str(&self.sub).map_err(|e| format!("Invalid UUID in sub claim: {e}"))
    }

    pub fn user_email(&self) -> Option<String> {
        self.email.clone()
    }

    pub fn display_name(&self) -> Option<String> {
        self.name.clone()
    }
}

/// Validate an HS256-signed JWT and return the decoded claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, String> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Token validation failed: {e:?}"))
}
