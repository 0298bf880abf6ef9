/// Session-scoped cache of the last analysis, read back by the dashboard page

use crate::analysis::AnalysisResult;
use crate::error::AnalysisError;
use crate::video::VideoId;

pub const ANALYSIS_KEY: &str = "analysisData";
pub const VIDEO_ID_KEY: &str = "videoId";

/// Last analysis handed from the popup to the details view
#[derive(Debug, Clone, PartialEq)]
pub struct CachedAnalysis {
    pub video_id: Option<VideoId>,
    pub data: AnalysisResult,
}

impl CachedAnalysis {
    /// Encode as (key, JSON) pairs in the layout the dashboard expects
    pub fn to_entries(&self) -> Result<Vec<(&'static str, String)>, AnalysisError> {
        let data = serde_json::to_string(&self.data)
            .map_err(|e| AnalysisError::Storage(format!("Failed to serialize analysis: {}", e)))?;
        let video_id = serde_json::to_string(&self.video_id)
            .map_err(|e| AnalysisError::Storage(format!("Failed to serialize video id: {}", e)))?;

        Ok(vec![(ANALYSIS_KEY, data), (VIDEO_ID_KEY, video_id)])
    }

    /// Decode from stored JSON strings; a missing analysis means nothing cached
    pub fn from_entries(
        data: Option<&str>,
        video_id: Option<&str>,
    ) -> Result<Option<CachedAnalysis>, AnalysisError> {
        let Some(data) = data else {
            return Ok(None);
        };

        let data: AnalysisResult = serde_json::from_str(data)
            .map_err(|e| AnalysisError::Storage(format!("Failed to parse cached analysis: {}", e)))?;

        // A malformed id is not worth failing the whole read for
        let video_id = video_id
            .and_then(|raw| serde_json::from_str::<Option<String>>(raw).ok())
            .flatten()
            .and_then(|raw| VideoId::parse(&raw));

        Ok(Some(CachedAnalysis { video_id, data }))
    }
}

/// Where the popup keeps its hand-off copy
pub trait AnalysisCache {
    fn store(&self, entry: &CachedAnalysis) -> Result<(), AnalysisError>;
    fn load(&self) -> Result<Option<CachedAnalysis>, AnalysisError>;
}

/// `window.sessionStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStorageCache;

impl SessionStorageCache {
    fn storage() -> Result<web_sys::Storage, AnalysisError> {
        web_sys::window()
            .ok_or_else(|| AnalysisError::Storage("No window".to_string()))?
            .session_storage()
            .map_err(|e| AnalysisError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| AnalysisError::Storage("Session storage unavailable".to_string()))
    }
}

impl AnalysisCache for SessionStorageCache {
    fn store(&self, entry: &CachedAnalysis) -> Result<(), AnalysisError> {
        let storage = Self::storage()?;

        for (key, value) in entry.to_entries()? {
            storage
                .set_item(key, &value)
                .map_err(|e| AnalysisError::Storage(format!("Failed to write {}: {:?}", key, e)))?;
        }

        Ok(())
    }

    fn load(&self) -> Result<Option<CachedAnalysis>, AnalysisError> {
        let storage = Self::storage()?;
        let read = |key: &str| {
            storage
                .get_item(key)
                .map_err(|e| AnalysisError::Storage(format!("Failed to read {}: {:?}", key, e)))
        };

        let data = read(ANALYSIS_KEY)?;
        let video_id = read(VIDEO_ID_KEY)?;

        CachedAnalysis::from_entries(data.as_deref(), video_id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SentimentCounts;

    fn create_test_entry() -> CachedAnalysis {
        CachedAnalysis {
            video_id: VideoId::parse("dQw4w9WgXcQ"),
            data: AnalysisResult::from_counts(SentimentCounts {
                positive: 3,
                neutral: 1,
                negative: 1,
            }),
        }
    }

    #[test]
    fn test_entries_layout() {
        let entries = create_test_entry().to_entries().unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, ANALYSIS_KEY);
        assert!(entries[0].1.contains("\"totalComments\":5"));
        assert_eq!(entries[1], (VIDEO_ID_KEY, "\"dQw4w9WgXcQ\"".to_string()));
    }

    #[test]
    fn test_entries_read_back() {
        let entry = create_test_entry();
        let entries = entry.to_entries().unwrap();

        let restored = CachedAnalysis::from_entries(Some(&entries[0].1), Some(&entries[1].1))
            .unwrap()
            .unwrap();

        assert_eq!(restored, entry);
    }

    #[test]
    fn test_nothing_cached() {
        assert_eq!(CachedAnalysis::from_entries(None, Some("\"dQw4w9WgXcQ\"")).unwrap(), None);
    }

    #[test]
    fn test_bad_video_id_is_dropped() {
        let restored = CachedAnalysis::from_entries(Some("{}"), Some("not json"))
            .unwrap()
            .unwrap();

        assert_eq!(restored.video_id, None);
        assert_eq!(restored.data.total_comments, 0);
    }

    #[test]
    fn test_corrupt_analysis_is_an_error() {
        let result = CachedAnalysis::from_entries(Some("{broken"), None);
        assert!(matches!(result, Err(AnalysisError::Storage(_))));
    }
}
