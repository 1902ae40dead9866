//! Response handling shared by the provider clients.

use serde::de::DeserializeOwned;
use tokio::sync::{Semaphore, SemaphorePermit};

use super::error::RoutingError;

/// Bodies quoted in JSON errors are cut to this many characters.
const MAX_ERROR_BODY: usize = 500;

/// Wait for a request slot.
pub(crate) async fn acquire(semaphore: &Semaphore) -> Result<SemaphorePermit<'_>, RoutingError> {
    semaphore.acquire().await.map_err(|_| RoutingError::Api {
        status: 0,
        message: "Semaphore closed".to_string(),
    })
}

/// Check the status of a provider response and parse its JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, RoutingError> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(RoutingError::Unauthorized);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(RoutingError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RoutingError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    let body = response.text().await?;
    parse_body(&body)
}

/// Parse a JSON body, quoting the start of it on failure.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, RoutingError> {
    serde_json::from_str(body).map_err(|e| RoutingError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(MAX_ERROR_BODY).collect()),
    })
}
