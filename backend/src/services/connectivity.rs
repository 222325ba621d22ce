//! Connectivity probe
//!
//! Pings a well-known external host before YouTube generation so that a
//! missing network is reported as NO_INTERNET / SLOW_CONNECTION instead of a
//! generic provider failure.

use std::time::Duration;

use reqwest::Client;

use crate::config::ConnectivityConfig;
use crate::utils::ApiError;

#[derive(Debug, Clone)]
pub struct ConnectivityProbe {
    http: Option<Client>,
    url: String,
    timeout: Duration,
}

impl ConnectivityProbe {
    pub fn new(config: &ConnectivityConfig) -> Result<Self, reqwest::Error> {
        if !config.enabled {
            return Ok(Self::disabled());
        }

        let timeout = Duration::from_secs(config.timeout_secs);
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http: Some(http), url: config.probe_url.clone(), timeout })
    }

    /// Probe that always succeeds
    pub fn disabled() -> Self {
        Self { http: None, url: String::new(), timeout: Duration::ZERO }
    }

    pub fn is_enabled(&self) -> bool {
        self.http.is_some()
    }

    /// Any HTTP response counts as connected; the status is irrelevant.
    pub async fn check(&self) -> Result<(), ApiError> {
        let Some(http) = &self.http else {
            return Ok(());
        };

        match tokio::time::timeout(self.timeout, http.get(&self.url).send()).await {
            Ok(Ok(response)) => {
                tracing::debug!("Connectivity probe {} -> {}", self.url, response.status());
                Ok(())
            },
            Ok(Err(e)) if e.is_timeout() => Err(self.too_slow()),
            Ok(Err(e)) => Err(ApiError::NoInternet(format!("probe {} failed: {}", self.url, e))),
            Err(_) => Err(self.too_slow()),
        }
    }

    fn too_slow(&self) -> ApiError {
        ApiError::SlowConnection(format!(
            "probe {} exceeded {}s",
            self.url,
            self.timeout.as_secs()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn probe_for(url: String) -> ConnectivityProbe {
        ConnectivityProbe::new(&ConnectivityConfig { enabled: true, probe_url: url, timeout_secs: 1 })
            .expect("probe should build")
    }

    #[tokio::test]
    async fn test_reachable_host_passes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert!(probe_for(server.uri()).check().await.is_ok());
    }

    #[tokio::test]
    async fn test_slow_host_is_slow_connection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let err = probe_for(server.uri()).check().await.unwrap_err();
        assert_eq!(err.error_code(), "SLOW_CONNECTION");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_no_internet() {
        // Nothing listens on port 1
        let err = probe_for("http://127.0.0.1:1/favicon.ico".to_string()).check().await.unwrap_err();
        assert_eq!(err.error_code(), "NO_INTERNET");
    }

    #[tokio::test]
    async fn test_disabled_probe_always_passes() {
        let probe = ConnectivityProbe::new(&ConnectivityConfig {
            enabled: false,
            probe_url: String::new(),
            timeout_secs: 0,
        })
        .unwrap();
        assert!(!probe.is_enabled());
        assert!(probe.check().await.is_ok());
    }
}
