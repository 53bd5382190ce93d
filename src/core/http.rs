//! HTTP utilities shared by the ESPN and Odds API clients

use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, RETRY_AFTER},
    Client, Response, StatusCode,
};

use crate::error::{DataSource, IntelError};
use crate::Result;

const USER_AGENT: &str = concat!("sports-intel/", env!("CARGO_PKG_VERSION"));

/// Build an HTTP client that sends JSON accept headers and enforces `timeout`
/// on every request.
pub fn build_client(timeout: Duration) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(timeout)
        .build()?)
}

/// Turn a non-success response into the matching error variant.
///
/// 429 is a rate limit, other 4xx mean the request was invalid, 5xx are
/// server failures.
pub async fn check_status(feed: DataSource, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(IntelError::RateLimited {
            feed,
            retry_after: parse_retry_after(response.headers()),
        });
    }

    let body = response.text().await.unwrap_or_default();
    let message = if body.is_empty() {
        status.canonical_reason().unwrap_or("no body").to_string()
    } else {
        body.chars().take(200).collect()
    };

    if status.is_client_error() {
        Err(IntelError::UpstreamValidation {
            feed,
            status: status.as_u16(),
            message,
        })
    } else {
        Err(IntelError::UpstreamServer {
            feed,
            status: Some(status.as_u16()),
            message,
        })
    }
}

/// Classify a transport-level reqwest failure.
pub fn transport_error(feed: DataSource, err: reqwest::Error) -> IntelError {
    if err.is_timeout() {
        IntelError::Timeout { feed }
    } else if err.is_decode() {
        IntelError::Http(err)
    } else {
        IntelError::UpstreamServer {
            feed,
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// `Retry-After` in its delta-seconds form; HTTP-date values are ignored.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// GET `url` with `query`, check the status and decode the JSON body.
pub async fn get_json<T>(
    client: &Client,
    feed: DataSource,
    url: &str,
    query: &[(&str, String)],
) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    tracing::debug!(%feed, url, "GET");

    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| transport_error(feed, e))?;
    let response = check_status(feed, response).await?;
    let text = response
        .text()
        .await
        .map_err(|e| transport_error(feed, e))?;

    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_retry_after_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("12"));
        assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(12)));
    }

    #[test]
    fn test_parse_retry_after_missing_or_date() {
        let headers = HeaderMap::new();
        assert_eq!(parse_retry_after(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
        );
        assert_eq!(parse_retry_after(&headers), None);
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(Duration::from_secs(5)).is_ok());
    }
}
