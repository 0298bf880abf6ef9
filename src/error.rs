/// Failure kinds for the analysis workflow
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("active tab is not a video page")]
    NotAVideoPage,

    #[error("no valid video id in URL")]
    InvalidVideoId,

    #[error("analysis service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("analysis request timed out after {0} ms")]
    Timeout(u32),

    #[error("session creation failed: {0}")]
    SessionCreationFailed(String),

    #[error("session storage failed: {0}")]
    Storage(String),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl AnalysisError {
    /// Short text written into the popup status area
    pub fn status_message(&self) -> String {
        match self {
            AnalysisError::NotAVideoPage => "Please open a YouTube video.".to_string(),
            AnalysisError::InvalidVideoId => "Invalid YouTube URL or missing video ID.".to_string(),
            AnalysisError::ServiceUnavailable(reason) => {
                format!("Failed to fetch analysis. {}", reason)
            }
            AnalysisError::Timeout(ms) if *ms < 1000 => {
                format!("Failed to fetch analysis. No response after {} ms.", ms)
            }
            AnalysisError::Timeout(ms) => {
                format!("Failed to fetch analysis. No response after {} s.", ms.div_ceil(1000))
            }
            AnalysisError::Decode(reason) => {
                format!("Failed to fetch analysis. Bad response: {}", reason)
            }
            AnalysisError::SessionCreationFailed(_) | AnalysisError::Storage(_) => String::new(),
        }
    }

    /// Absorbed failures never move the popup into the error state
    pub fn is_fatal_to_run(&self) -> bool {
        !matches!(
            self,
            AnalysisError::SessionCreationFailed(_) | AnalysisError::Storage(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        assert_eq!(AnalysisError::NotAVideoPage.status_message(), "Please open a YouTube video.");
        assert_eq!(
            AnalysisError::InvalidVideoId.status_message(),
            "Invalid YouTube URL or missing video ID."
        );
        assert_eq!(
            AnalysisError::ServiceUnavailable("HTTP 500".to_string()).status_message(),
            "Failed to fetch analysis. HTTP 500"
        );
        assert_eq!(
            AnalysisError::Timeout(30_000).status_message(),
            "Failed to fetch analysis. No response after 30 s."
        );
    }

    #[test]
    fn test_short_timeouts_are_not_zero_seconds() {
        assert_eq!(
            AnalysisError::Timeout(250).status_message(),
            "Failed to fetch analysis. No response after 250 ms."
        );
        assert_eq!(
            AnalysisError::Timeout(1500).status_message(),
            "Failed to fetch analysis. No response after 2 s."
        );
    }

    #[test]
    fn test_absorbed_failures() {
        assert!(!AnalysisError::SessionCreationFailed("x".to_string()).is_fatal_to_run());
        assert!(!AnalysisError::Storage("x".to_string()).is_fatal_to_run());
        assert!(AnalysisError::NotAVideoPage.is_fatal_to_run());
        assert!(AnalysisError::Timeout(1).is_fatal_to_run());
    }
}
