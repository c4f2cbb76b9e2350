//! Log fetcher configuration
//!
//! Collects the credentials, endpoints and fetch options a run needs.
//! Values come from the command line; `validate` catches what clap cannot.

use std::path::PathBuf;
use std::time::Duration;

use cde_client::{Credentials, RetryPolicy};
use cde_core::domain::artifact::DEFAULT_OUTPUT_ROOT;
use cde_core::domain::job_run::SPARK_JOB_TYPE;

use crate::fetcher::FetchOptions;
use crate::service::CdeConnector;

/// Upper bound for `retries`
pub const MAX_RETRIES: u32 = 20;

/// Log fetcher configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Workload credentials, shared by every cluster
    pub credentials: Credentials,

    /// Jobs API endpoints, processed in order
    pub api_urls: Vec<String>,

    /// Fetch only this log type (e.g. `driver/stdout`)
    pub log_type: Option<String>,

    /// Root of the output tree
    pub output_root: PathBuf,

    /// Extra attempts for transiently failing requests
    pub retries: u32,

    /// Per-request HTTP timeout
    pub request_timeout: Duration,
}

impl Config {
    /// Creates a configuration with defaults for everything but the inputs
    pub fn new(credentials: Credentials, api_urls: Vec<String>) -> Self {
        Self {
            credentials,
            api_urls,
            log_type: None,
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            retries: 0,
            request_timeout: Duration::from_secs(60),
        }
    }

    pub fn with_log_type(mut self, log_type: Option<String>) -> Self {
        self.log_type = log_type;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.credentials.user.is_empty() {
            anyhow::bail!("user cannot be empty");
        }

        if self.credentials.password.is_empty() {
            anyhow::bail!("password cannot be empty");
        }

        if self.api_urls.is_empty() {
            anyhow::bail!("at least one API URL is required");
        }

        if self.api_urls.iter().any(|u| u.trim().is_empty()) {
            anyhow::bail!("API URLs cannot be empty");
        }

        if self.log_type.as_deref().is_some_and(str::is_empty) {
            anyhow::bail!("log_type cannot be empty when given");
        }

        if self.retries > MAX_RETRIES {
            anyhow::bail!("retries cannot exceed {}", MAX_RETRIES);
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::with_retries(self.retries)
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            output_root: self.output_root.clone(),
            log_type: self.log_type.clone(),
            job_type: SPARK_JOB_TYPE.to_string(),
        }
    }

    /// Connector authenticating with these credentials and limits
    pub fn connector(&self) -> CdeConnector {
        CdeConnector::new(self.credentials.clone())
            .with_retry_policy(self.retry_policy())
            .with_timeout(self.request_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::new(
            Credentials::new("workload-user", "secret"),
            vec!["https://abc.cde-xyz.example.site/dex/api/v1".to_string()],
        )
    }

    #[test]
    fn test_default_config() {
        let config = config();
        assert_eq!(config.output_root, PathBuf::from("logs"));
        assert_eq!(config.retries, 0);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert!(config.log_type.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = config();

        config.credentials.user = String::new();
        assert!(config.validate().is_err());
        config.credentials.user = "workload-user".to_string();

        config.credentials.password = String::new();
        assert!(config.validate().is_err());
        config.credentials.password = "secret".to_string();

        config.api_urls.clear();
        assert!(config.validate().is_err());

        config.api_urls = vec!["  ".to_string()];
        assert!(config.validate().is_err());
        config.api_urls = vec!["https://a.example.com".to_string()];

        config.log_type = Some(String::new());
        assert!(config.validate().is_err());
        config.log_type = Some("driver/stdout".to_string());

        config.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
        config.request_timeout = Duration::from_secs(5);

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_retries_are_capped() {
        assert!(config().with_retries(MAX_RETRIES).validate().is_ok());
        assert!(config().with_retries(MAX_RETRIES + 1).validate().is_err());
        assert!(config().with_retries(u32::MAX).validate().is_err());
    }

    #[test]
    fn test_fetch_options_follow_config() {
        let config = config().with_log_type(Some("driver/stderr".to_string()));
        let options = config.fetch_options();

        assert_eq!(options.output_root, PathBuf::from("logs"));
        assert_eq!(options.log_type.as_deref(), Some("driver/stderr"));
        assert_eq!(options.job_type, "spark");
    }

    #[test]
    fn test_retry_policy_follows_retries() {
        assert_eq!(config().retry_policy(), RetryPolicy::none());
        assert_eq!(config().with_retries(3).retry_policy().max_retries, 3);
    }

    #[test]
    fn test_debug_hides_password() {
        let rendered = format!("{:?}", config());
        assert!(rendered.contains("workload-user"));
        assert!(!rendered.contains("secret"));
    }
}
