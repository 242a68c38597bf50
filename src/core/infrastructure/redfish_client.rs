//! Internal HTTP transport shared by the Redfish client variants.

use crate::{
    BmcError, BmcResult, RateLimitConfig,
    core::domain::{
        error::ClientBuildError, model::bmc_credentials::BmcCredentials,
        value_object::BmcEndpointUrl,
    },
};
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::{Client, Method};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// Internal HTTP client bound to one BMC origin and one set of credentials.
///
/// Every request carries a basic-auth header. Non-success statuses are
/// turned into `BmcError::Connection`; nothing is retried.
#[derive(Debug)]
pub struct RedfishHttpClient {
    http_client: Client,
    endpoint: BmcEndpointUrl,
    credentials: BmcCredentials,
    rate_limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl RedfishHttpClient {
    /// Creates a new `RedfishHttpClient`. No request is sent.
    ///
    /// # Errors
    /// Returns `ClientBuildError` if the rate limit is zero or the HTTP client cannot be built.
    pub fn new(
        endpoint: BmcEndpointUrl,
        credentials: BmcCredentials,
        rate_limit: Option<RateLimitConfig>,
        request_timeout: Duration,
        accept_invalid_certs: bool,
    ) -> Result<Self, ClientBuildError> {
        let http_client = Client::builder()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .timeout(request_timeout)
            .build()?;

        let rate_limiter = rate_limit.map(build_rate_limiter).transpose()?;

        Ok(Self {
            http_client,
            endpoint,
            credentials,
            rate_limiter,
        })
    }

    /// Performs a GET request and parses the JSON body.
    pub async fn get<T>(&self, path: &str) -> BmcResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| BmcError::Connection(format!("Failed to parse response: {}", e)))
    }

    /// Performs a POST request with a JSON body, discarding the response body.
    pub async fn post<B>(&self, path: &str, body: &B) -> BmcResult<()>
    where
        B: serde::Serialize + ?Sized,
    {
        self.send(Method::POST, path, Some(body)).await?;
        Ok(())
    }

    /// Performs a PATCH request with a JSON body, discarding the response body.
    pub async fn patch<B>(&self, path: &str, body: &B) -> BmcResult<()>
    where
        B: serde::Serialize + ?Sized,
    {
        self.send(Method::PATCH, path, Some(body)).await?;
        Ok(())
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> BmcResult<reqwest::Response>
    where
        B: serde::Serialize + ?Sized,
    {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let url = self.endpoint.with_path(path);
        trace!("Sending {} {}", method, url);

        let mut req_builder = self.http_client.request(method, &url).basic_auth(
            self.credentials.username().as_str(),
            Some(self.credentials.password().as_str()),
        );

        if let Some(body) = body {
            req_builder = req_builder.json(body);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| BmcError::Connection(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(BmcError::Connection(format!(
                "Redfish error ({}) on {}: {}",
                status, url, error_text
            )));
        }

        Ok(response)
    }
}

fn build_rate_limiter(
    config: RateLimitConfig,
) -> Result<Arc<DefaultDirectRateLimiter>, ClientBuildError> {
    let per_second = NonZeroU32::new(config.requests_per_second).ok_or_else(|| {
        ClientBuildError::InvalidOptions("requests_per_second must be greater than 0".to_string())
    })?;
    let burst = NonZeroU32::new(config.burst_size).ok_or_else(|| {
        ClientBuildError::InvalidOptions("burst_size must be greater than 0".to_string())
    })?;
    let quota = Quota::per_second(per_second).allow_burst(burst);
    Ok(Arc::new(DefaultDirectRateLimiter::direct(quota)))
}
