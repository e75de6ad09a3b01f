use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{StatusCode, blocking::Client, header::AUTHORIZATION};

use crate::types::AccessTokenResponse;

#[derive(Debug)]
pub enum AuthError {
    HttpError(reqwest::Error),
    StatusError(StatusCode),
    MissingToken,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::HttpError(e) => write!(f, "Token request failed: {}", e),
            AuthError::StatusError(status) => write!(f, "Token fetch failed: {}", status.as_u16()),
            AuthError::MissingToken => write!(f, "Token response did not contain an access token"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::HttpError(err)
    }
}

/// Builds the value of the `Authorization` header for the token exchange.
///
/// The credential is `client_id:client_secret`, base64 encoded with the
/// standard alphabet and padding, prefixed with `Basic `.
pub fn basic_credentials(client_id: &str, client_secret: &str) -> String {
    let raw = format!("{}:{}", client_id, client_secret);
    format!("Basic {}", STANDARD.encode(raw))
}

/// Exchanges client credentials for a bearer token.
///
/// Issues a single blocking `POST` against `token_url` with the form body
/// `grant_type=client_credentials` and a Basic `Authorization` header built
/// from the client ID and secret.
///
/// # Arguments
///
/// * `token_url` - Spotify accounts token endpoint
/// * `client_id` - Application client ID
/// * `client_secret` - Application client secret
///
/// # Returns
///
/// - `Ok(String)` - The `access_token` field of the response body
/// - `Err(AuthError::StatusError)` - Any non-success status; nothing is retried
/// - `Err(AuthError::HttpError)` - Network failure or unparseable body
/// - `Err(AuthError::MissingToken)` - Success status with an empty token
///
/// # Blocking
///
/// Uses `reqwest::blocking`, so callers inside a tokio runtime must run it on a
/// blocking thread (`tokio::task::spawn_blocking`).
pub fn obtain_token(
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<String, AuthError> {
    let client = Client::new();
    let res = client
        .post(token_url)
        .header(AUTHORIZATION, basic_credentials(client_id, client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()?;

    if !res.status().is_success() {
        return Err(AuthError::StatusError(res.status()));
    }

    let json = res.json::<AccessTokenResponse>()?;
    if json.access_token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    Ok(json.access_token)
}
