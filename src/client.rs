/// HTTP client for the analysis service

use std::future::Future;

use futures_util::future::{Either, select};
use futures_util::pin_mut;
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;

use crate::analysis::{
    AnalysisResult, SentimentCounts, ServiceErrorBody, SessionLookup, SessionRequest,
    SessionResponse,
};
use crate::config::{Endpoint, PopupConfig};
use crate::error::AnalysisError;
use crate::video::VideoId;

/// Requests the popup and dashboard make against the backend
#[allow(async_fn_in_trait)]
pub trait AnalysisClient {
    async fn fetch_analysis(&self, video_id: &VideoId) -> Result<AnalysisResult, AnalysisError>;

    /// Persist a result and return its session id
    async fn create_session(&self, result: &AnalysisResult) -> Result<String, AnalysisError>;

    async fn fetch_session(&self, session_id: &str) -> Result<AnalysisResult, AnalysisError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpAnalysisClient {
    config: PopupConfig,
}

impl HttpAnalysisClient {
    pub fn new(config: PopupConfig) -> Self {
        HttpAnalysisClient { config }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AnalysisError> {
        let request = async {
            let response = Request::get(url)
                .send()
                .await
                .map_err(|e| AnalysisError::ServiceUnavailable(e.to_string()))?;
            decode(response).await
        };

        with_timeout(self.config.request_timeout_ms, request).await
    }
}

impl AnalysisClient for HttpAnalysisClient {
    async fn fetch_analysis(&self, video_id: &VideoId) -> Result<AnalysisResult, AnalysisError> {
        let url = self.config.analysis_url(video_id.as_str());
        log::debug!("GET {}", url);

        match self.config.endpoint {
            Endpoint::Dashboard => self.get_json::<AnalysisResult>(&url).await,
            Endpoint::Analyze => self
                .get_json::<SentimentCounts>(&url)
                .await
                .map(AnalysisResult::from_counts),
        }
    }

    async fn create_session(&self, result: &AnalysisResult) -> Result<String, AnalysisError> {
        let url = self.config.session_url();
        log::debug!("POST {}", url);

        let request = async {
            let response = Request::post(&url)
                .json(&SessionRequest { payload: result })
                .map_err(|e| AnalysisError::SessionCreationFailed(e.to_string()))?
                .send()
                .await
                .map_err(|e| AnalysisError::SessionCreationFailed(e.to_string()))?;
            decode::<SessionResponse>(response).await
        };

        with_timeout(self.config.request_timeout_ms, request)
            .await
            .map(|body| body.session_id)
            .map_err(|e| match e {
                AnalysisError::SessionCreationFailed(_) => e,
                other => AnalysisError::SessionCreationFailed(other.to_string()),
            })
    }

    async fn fetch_session(&self, session_id: &str) -> Result<AnalysisResult, AnalysisError> {
        let url = self.config.session_lookup_url(session_id);
        log::debug!("GET {}", url);

        self.get_json::<SessionLookup>(&url)
            .await
            .map(|lookup| lookup.payload)
    }
}

/// Non-2xx is a failure; the backend's `{"error": ...}` message is kept when present
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AnalysisError> {
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(AnalysisError::ServiceUnavailable(describe_failure(
            response.status(),
            &body,
        )));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| AnalysisError::Decode(e.to_string()))
}

fn describe_failure(status: u16, body: &str) -> String {
    match serde_json::from_str::<ServiceErrorBody>(body) {
        Ok(parsed) if !parsed.error.trim().is_empty() => {
            format!("HTTP {}: {}", status, parsed.error.trim())
        }
        _ => format!("HTTP {}", status),
    }
}

/// Race a request against a timer; `0` waits forever
pub async fn with_timeout<T, F>(timeout_ms: u32, request: F) -> Result<T, AnalysisError>
where
    F: Future<Output = Result<T, AnalysisError>>,
{
    if timeout_ms == 0 {
        return request.await;
    }

    race_timeout(timeout_ms, request, TimeoutFuture::new(timeout_ms)).await
}

/// Whichever finishes first wins; the timer firing means `Timeout(timeout_ms)`
async fn race_timeout<T, F, D>(timeout_ms: u32, request: F, timer: D) -> Result<T, AnalysisError>
where
    F: Future<Output = Result<T, AnalysisError>>,
    D: Future<Output = ()>,
{
    pin_mut!(request);
    pin_mut!(timer);

    match select(request, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => Err(AnalysisError::Timeout(timeout_ms)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future;

    #[test]
    fn test_describe_failure_with_error_body() {
        assert_eq!(
            describe_failure(404, r#"{"error": "No comments found for this video."}"#),
            "HTTP 404: No comments found for this video."
        );
    }

    #[test]
    fn test_describe_failure_without_body() {
        assert_eq!(describe_failure(500, ""), "HTTP 500");
        assert_eq!(describe_failure(502, "<html>Bad Gateway</html>"), "HTTP 502");
        assert_eq!(describe_failure(500, r#"{"error": "  "}"#), "HTTP 500");
    }

    #[test]
    fn test_zero_timeout_passes_through() {
        let result = block_on(with_timeout(0, async { Ok::<u8, AnalysisError>(7) }));
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn test_timer_wins_over_stalled_request() {
        let stalled = future::pending::<Result<u8, AnalysisError>>();

        let result = block_on(race_timeout(250, stalled, future::ready(())));

        assert_eq!(result, Err(AnalysisError::Timeout(250)));
    }

    #[test]
    fn test_request_wins_over_pending_timer() {
        let result = block_on(race_timeout(250, async { Ok::<u8, AnalysisError>(7) }, future::pending()));
        assert_eq!(result, Ok(7));
    }

    #[cfg(target_arch = "wasm32")]
    #[wasm_bindgen_test::wasm_bindgen_test]
    async fn test_stalled_request_times_out_in_browser() {
        let stalled = future::pending::<Result<u8, AnalysisError>>();
        assert_eq!(with_timeout(20, stalled).await, Err(AnalysisError::Timeout(20)));
    }
}
