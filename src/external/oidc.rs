//! OIDC verification for Cloud Tasks → Cloud Run callbacks (spec §4.8, §6
//! "Background task contract"). Generalises the teacher's local-secret HS256
//! JWT check (`auth/tenant_auth.rs`) to RS256 verified against Google's
//! rotating public JWKS.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorCode};

const GOOGLE_JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskClaims {
    pub aud: String,
    pub email: String,
    pub email_verified: bool,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    n: String,
    e: String,
}

#[derive(Debug, Deserialize)]
struct JwksResponse {
    keys: Vec<Jwk>,
}

/// Process-wide cache of Google's signing keys, refreshed on a cache miss.
/// A `kid` not found after one refresh is treated as invalid rather than
/// looping, since Google rotates keys on the order of hours, not seconds.
pub struct JwksCache {
    keys: Vec<Jwk>,
}

impl JwksCache {
    pub fn empty() -> Self {
        Self { keys: Vec::new() }
    }

    async fn refresh(&mut self, http: &reqwest::Client) -> Result<(), AppError> {
        let resp: JwksResponse = http
            .get(GOOGLE_JWKS_URL)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("jwks fetch failed: {e}")))?
            .json()
            .await
            .map_err(|e| AppError::internal(format!("jwks decode failed: {e}")))?;
        self.keys = resp.keys;
        Ok(())
    }
}

/// Verifies an OIDC bearer token against `audience` (this service's base URL)
/// and `expected_email` (the configured Cloud Tasks invoker service account).
pub async fn verify(
    jwks: &tokio::sync::RwLock<JwksCache>,
    http: &reqwest::Client,
    token: &str,
    audience: &str,
    expected_email: &str,
) -> Result<TaskClaims, AppError> {
    let header = jsonwebtoken::decode_header(token)
        .map_err(|e| AppError::with_message(ErrorCode::InvalidRequest, format!("bad token header: {e}")))?;
    let kid = header
        .kid
        .ok_or_else(|| AppError::with_message(ErrorCode::InvalidRequest, "token missing kid"))?;

    let mut guard = jwks.write().await;
    if !guard.keys.iter().any(|k| k.kid == kid) {
        guard.refresh(http).await?;
    }
    let jwk = guard
        .keys
        .iter()
        .find(|k| k.kid == kid)
        .ok_or_else(|| AppError::with_message(ErrorCode::InvalidRequest, "unknown signing key"))?;

    let decoding_key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
        .map_err(|e| AppError::internal(format!("bad jwk: {e}")))?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[audience]);

    let data = jsonwebtoken::decode::<TaskClaims>(token, &decoding_key, &validation)
        .map_err(|e| AppError::with_message(ErrorCode::InvalidRequest, format!("token verification failed: {e}")))?;

    if data.claims.email != expected_email {
        return Err(AppError::with_message(
            ErrorCode::InvalidRequest,
            "token signer is not the configured invoker service account",
        ));
    }

    Ok(data.claims)
}
