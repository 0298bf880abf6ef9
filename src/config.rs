/// Backend and dashboard settings for the popup
///
/// Defaults can be baked in at build time:
/// - `SENTILYTICS_BACKEND_URL`
/// - `SENTILYTICS_DASHBOARD_URL`
///
/// A page can also hand a partial config object to `start_popup_with_config`.
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_DASHBOARD_URL: &str = "https://sentilytics-ebon.vercel.app";

/// Which analysis route the backend deployment exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    /// `GET /dashboard/<id>`: counts plus charts, insights and top comments
    #[default]
    Dashboard,
    /// `GET /analyze/<id>`: flat sentiment counts only
    Analyze,
}

impl Endpoint {
    fn path(self) -> &'static str {
        match self {
            Endpoint::Dashboard => "dashboard",
            Endpoint::Analyze => "analyze",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    pub backend_url: String,
    pub dashboard_url: String,
    pub endpoint: Endpoint,
    /// 0 disables the timeout
    pub request_timeout_ms: u32,
}

impl Default for PopupConfig {
    fn default() -> Self {
        PopupConfig {
            backend_url: option_env!("SENTILYTICS_BACKEND_URL")
                .unwrap_or(DEFAULT_BACKEND_URL)
                .to_string(),
            dashboard_url: option_env!("SENTILYTICS_DASHBOARD_URL")
                .unwrap_or(DEFAULT_DASHBOARD_URL)
                .to_string(),
            endpoint: Endpoint::default(),
            request_timeout_ms: 30_000,
        }
    }
}

impl PopupConfig {
    fn backend_base(&self) -> &str {
        self.backend_url.trim_end_matches('/')
    }

    fn dashboard_base(&self) -> &str {
        self.dashboard_url.trim_end_matches('/')
    }

    pub fn analysis_url(&self, video_id: &str) -> String {
        format!("{}/{}/{}", self.backend_base(), self.endpoint.path(), video_id)
    }

    pub fn session_url(&self) -> String {
        format!("{}/session", self.backend_base())
    }

    pub fn session_lookup_url(&self, session_id: &str) -> String {
        format!("{}/session/{}", self.backend_base(), encode(session_id))
    }

    pub fn shareable_dashboard_url(&self, session_id: &str) -> String {
        format!("{}/dashboard?sid={}", self.dashboard_base(), encode(session_id))
    }

    /// Target of the details control when no session could be created
    pub fn fallback_dashboard_url(&self) -> String {
        format!("{}/dashboard", self.dashboard_base())
    }

    pub fn backend_home_url(&self) -> String {
        self.backend_base().to_string()
    }
}

fn encode(token: &str) -> String {
    form_urlencoded::byte_serialize(token.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> PopupConfig {
        PopupConfig {
            backend_url: "http://localhost:5000/".to_string(),
            dashboard_url: "https://dash.example.com".to_string(),
            ..PopupConfig::default()
        }
    }

    #[test]
    fn test_analysis_url_per_endpoint() {
        let mut config = test_config();
        assert_eq!(
            config.analysis_url("dQw4w9WgXcQ"),
            "http://localhost:5000/dashboard/dQw4w9WgXcQ"
        );

        config.endpoint = Endpoint::Analyze;
        assert_eq!(
            config.analysis_url("dQw4w9WgXcQ"),
            "http://localhost:5000/analyze/dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_dashboard_urls() {
        let config = test_config();
        assert_eq!(config.session_url(), "http://localhost:5000/session");
        assert_eq!(
            config.shareable_dashboard_url("abc123"),
            "https://dash.example.com/dashboard?sid=abc123"
        );
        assert_eq!(config.fallback_dashboard_url(), "https://dash.example.com/dashboard");
        assert_eq!(config.backend_home_url(), "http://localhost:5000");
    }

    #[test]
    fn test_session_id_is_encoded() {
        let config = test_config();
        assert_eq!(
            config.shareable_dashboard_url("a b&c"),
            "https://dash.example.com/dashboard?sid=a+b%26c"
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: PopupConfig =
            serde_json::from_str(r#"{"endpoint": "analyze", "request_timeout_ms": 0}"#).unwrap();

        assert_eq!(config.endpoint, Endpoint::Analyze);
        assert_eq!(config.request_timeout_ms, 0);
        assert_eq!(config.backend_url, PopupConfig::default().backend_url);
        assert_eq!(config.dashboard_url, PopupConfig::default().dashboard_url);
    }
}
