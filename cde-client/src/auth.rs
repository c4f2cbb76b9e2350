//! Token gateway authentication

use cde_core::dto::auth::TokenResponse;
use reqwest::Url;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::job_runs::CdeSession;
use crate::retry::with_retry;
use crate::CdeClient;

const TOKEN_PATH: &str = "/gateway/authtkn/knoxtoken/api/v1/token";

/// Workload credentials used to obtain a bearer token
#[derive(Clone)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Derive the gateway token URL from a jobs API URL
///
/// The virtual cluster host `abc.cde-xyz.example.site` is served by the
/// gateway at `service.cde-xyz.example.site`.
///
/// # Example
/// ```
/// use cde_client::derive_token_url;
///
/// let url = derive_token_url("https://abc.cde-xyz.example.site/dex/api/v1").unwrap();
/// assert_eq!(
///     url,
///     "https://service.cde-xyz.example.site/gateway/authtkn/knoxtoken/api/v1/token"
/// );
/// ```
pub fn derive_token_url(api_url: &str) -> Result<String> {
    let mut url = Url::parse(api_url)
        .map_err(|e| ClientError::InvalidRequest(format!("Invalid API URL '{}': {}", api_url, e)))?;

    let host = url
        .host_str()
        .ok_or_else(|| ClientError::InvalidRequest(format!("API URL '{}' has no host", api_url)))?;

    let (_, rest) = host.split_once('.').ok_or_else(|| {
        ClientError::InvalidRequest(format!(
            "API URL host '{}' has no cluster prefix to derive the gateway from",
            host
        ))
    })?;

    let service_host = format!("service.{}", rest);
    url.set_host(Some(&service_host))
        .map_err(|e| ClientError::InvalidRequest(format!("Invalid gateway host: {}", e)))?;
    url.set_path(TOKEN_PATH);
    url.set_query(None);
    url.set_fragment(None);

    Ok(url.to_string())
}

impl CdeClient {
    /// Token endpoint this client authenticates against
    pub fn token_url(&self) -> Result<String> {
        match &self.token_url {
            Some(url) => Ok(url.clone()),
            None => derive_token_url(&self.api_url),
        }
    }

    /// Exchange credentials for a bearer token and open a session
    ///
    /// # Errors
    /// Returns an error if the token URL cannot be derived, the gateway
    /// rejects the credentials, or the response carries no token.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<CdeSession> {
        let token_url = self.token_url()?;
        debug!("Requesting access token from {}", token_url);

        let url = token_url.as_str();
        let token: TokenResponse = with_retry(&self.retry, "token request", move || async move {
            let response = self
                .client
                .get(url)
                .basic_auth(&credentials.user, Some(&credentials.password))
                .send()
                .await?;

            self.handle_response(response).await
        })
        .await?;

        if token.access_token.is_empty() {
            return Err(ClientError::ParseError(
                "Token response carried an empty access_token".to_string(),
            ));
        }

        Ok(CdeSession::new(self.clone(), token.access_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[test]
    fn test_derive_token_url_keeps_port() {
        let url = derive_token_url("https://vc1.cde-abc.env.site:8443/dex/api/v1?x=1").unwrap();
        assert_eq!(
            url,
            "https://service.cde-abc.env.site:8443/gateway/authtkn/knoxtoken/api/v1/token"
        );
    }

    #[test]
    fn test_derive_token_url_needs_cluster_prefix() {
        assert!(derive_token_url("http://localhost:8080/api").is_err());
        assert!(derive_token_url("nonsense").is_err());
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("alice", "hunter2");
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }

    #[tokio::test]
    async fn test_authenticate_returns_session() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", TOKEN_PATH)
            .match_header("authorization", Matcher::Regex("^Basic ".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "tok-123", "expires_in": 3600}"#)
            .create_async()
            .await;

        let client = CdeClient::new(format!("{}/dex/api/v1", server.url()))
            .with_token_url(format!("{}{}", server.url(), TOKEN_PATH));

        let session = client
            .authenticate(&Credentials::new("alice", "secret"))
            .await
            .unwrap();

        assert_eq!(session.token(), "tok-123");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_authenticate_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", TOKEN_PATH)
            .with_status(401)
            .with_body("bad credentials")
            .create_async()
            .await;

        let client = CdeClient::new(server.url())
            .with_token_url(format!("{}{}", server.url(), TOKEN_PATH));

        let err = client
            .authenticate(&Credentials::new("alice", "wrong"))
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
    }
}
