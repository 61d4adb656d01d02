use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{info, warn};

use crate::config::{ApiConfig, Credentials};
use crate::error::ClientError;

/// The login page answers a bad password with a normal page containing this text.
const BAD_CREDENTIALS_MARKER: &str = "Incorrect email or password";

/// Cookie-carrying HTTP session. League match listings need a logged-in session.
pub struct FplSession {
    client: Client,
}

impl FplSession {
    pub fn new(api: &ApiConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(api.user_agent.clone())
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()
            .map_err(|source| ClientError::Request { url: api.api_base.clone(), source })?;
        Ok(Self { client })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Form login; on success the session cookies stay in the client's store.
    pub async fn login(&self, api: &ApiConfig, credentials: &Credentials) -> Result<(), ClientError> {
        info!("Logging in as {}", credentials.username);

        let form = [
            ("login", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
            ("app", api.app.as_str()),
            ("redirect_uri", api.redirect_uri.as_str()),
        ];

        let response = self
            .client
            .post(&api.login_url)
            .form(&form)
            .send()
            .await
            .map_err(|source| ClientError::Request { url: api.login_url.clone(), source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Decode { url: api.login_url.clone(), source })?;

        check_login_response(&api.login_url, status, &body)?;
        info!("Login accepted");
        Ok(())
    }
}

fn check_login_response(url: &str, status: StatusCode, body: &str) -> Result<(), ClientError> {
    if body.contains(BAD_CREDENTIALS_MARKER) {
        warn!("Login rejected by {url}");
        return Err(ClientError::BadCredentials);
    }
    if !status.is_success() {
        return Err(ClientError::Status { url: url.to_string(), status });
    }
    Ok(())
}
