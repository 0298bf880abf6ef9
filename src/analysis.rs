/// Data returned by the analysis service
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One of the three sentiment categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn key(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    #[serde(default)]
    pub positive: u32,
    #[serde(default)]
    pub neutral: u32,
    #[serde(default)]
    pub negative: u32,
}

impl SentimentCounts {
    pub fn get(&self, sentiment: Sentiment) -> u32 {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    pub fn sum(&self) -> u32 {
        self.positive
            .saturating_add(self.neutral)
            .saturating_add(self.negative)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphUrls {
    pub pie_chart: Option<String>,
    pub word_cloud: Option<String>,
    pub bar_chart: Option<String>,
}

/// Insight text lists. The backend sends `Questions` when viewers asked any,
/// and a one-line `Engagement` summary otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "Questions", default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<String>>,
    #[serde(rename = "Engagement", default, skip_serializing_if = "Option::is_none")]
    pub engagement: Option<Vec<String>>,
    #[serde(rename = "Suggestions", default)]
    pub suggestions: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A top-liked comment as the backend reports it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub comment: String,
    #[serde(default)]
    pub likecount: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopLikedComments {
    #[serde(default)]
    pub positive: Vec<Comment>,
    #[serde(default)]
    pub neutral: Vec<Comment>,
    #[serde(default)]
    pub negative: Vec<Comment>,
}

impl TopLikedComments {
    pub fn top(&self, sentiment: Sentiment) -> Option<&Comment> {
        let comments = match sentiment {
            Sentiment::Positive => &self.positive,
            Sentiment::Neutral => &self.neutral,
            Sentiment::Negative => &self.negative,
        };
        comments.first()
    }
}

/// Full analysis payload. Fields the popup does not use are kept in the
/// `extra` maps here and on the nested types, so the payload can be posted
/// back unchanged for session creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "totalComments", default)]
    pub total_comments: u32,
    #[serde(rename = "sentimentCounts", default)]
    pub sentiment_counts: SentimentCounts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_urls: Option<GraphUrls>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insight: Option<Insight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_liked_comments: Option<TopLikedComments>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisResult {
    /// Result synthesized from the flat body of the `/analyze` route
    pub fn from_counts(counts: SentimentCounts) -> AnalysisResult {
        AnalysisResult {
            total_comments: counts.sum(),
            sentiment_counts: counts,
            ..AnalysisResult::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_comments == 0 && self.sentiment_counts.sum() == 0
    }

    pub fn percentages(&self) -> SentimentPercentages {
        SentimentPercentages::from_counts(&self.sentiment_counts, self.total_comments)
    }
}

/// Whole-number share of each category, as shown on the sentiment bars
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentPercentages {
    pub positive: u32,
    pub neutral: u32,
    pub negative: u32,
}

impl SentimentPercentages {
    /// `round(count / max(total, 1) * 100)` per category
    pub fn from_counts(counts: &SentimentCounts, total: u32) -> SentimentPercentages {
        SentimentPercentages {
            positive: percent_of(counts.positive, total),
            neutral: percent_of(counts.neutral, total),
            negative: percent_of(counts.negative, total),
        }
    }

    pub fn get(&self, sentiment: Sentiment) -> u32 {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }
}

fn percent_of(count: u32, total: u32) -> u32 {
    let denominator = f64::from(total.max(1));
    (f64::from(count) / denominator * 100.0).round() as u32
}

/// Body of `POST /session`
#[derive(Debug, Serialize)]
pub struct SessionRequest<'a> {
    pub payload: &'a AnalysisResult,
}

#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
}

/// Body of `GET /session/<sid>`
#[derive(Debug, Deserialize)]
pub struct SessionLookup {
    pub payload: AnalysisResult,
}

/// Error body the backend sends with non-2xx statuses
#[derive(Debug, Deserialize)]
pub struct ServiceErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(positive: u32, neutral: u32, negative: u32) -> SentimentCounts {
        SentimentCounts { positive, neutral, negative }
    }

    #[test]
    fn test_percentages_exact() {
        let pct = SentimentPercentages::from_counts(&counts(70, 22, 8), 100);

        assert_eq!(pct, SentimentPercentages { positive: 70, neutral: 22, negative: 8 });
        assert_eq!(pct.positive + pct.neutral + pct.negative, 100);
    }

    #[test]
    fn test_percentages_zero_total() {
        let pct = SentimentPercentages::from_counts(&counts(0, 0, 0), 0);
        assert_eq!(pct, SentimentPercentages::default());

        // Denominator floors to one
        let pct = SentimentPercentages::from_counts(&counts(1, 0, 0), 0);
        assert_eq!(pct.positive, 100);
    }

    #[test]
    fn test_percentages_rounding() {
        let pct = SentimentPercentages::from_counts(&counts(1, 1, 1), 3);
        assert_eq!(pct, SentimentPercentages { positive: 33, neutral: 33, negative: 33 });

        let pct = SentimentPercentages::from_counts(&counts(2, 1, 0), 3);
        assert_eq!(pct.positive, 67);
    }

    #[test]
    fn test_deserialize_dashboard_payload() {
        let json = r#"{
            "totalComments": 3,
            "sentimentCounts": {"positive": 2, "negative": 0, "neutral": 1},
            "graph_urls": {"pie_chart": "https://cdn/p.png", "word_cloud": "https://cdn/w.png", "bar_chart": null},
            "top_liked_comments": {
                "positive": [{"likecount": 12, "comment": "great video", "sentiment": "positive"}],
                "negative": [],
                "neutral": [{"likecount": 1, "comment": "ok", "sentiment": "neutral"}]
            },
            "insight": {"Questions": ["part 2?"], "Suggestions": []}
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.total_comments, 3);
        assert_eq!(result.sentiment_counts, counts(2, 1, 0));
        assert_eq!(result.graph_urls.as_ref().unwrap().bar_chart, None);
        assert_eq!(
            result.insight.as_ref().unwrap().questions,
            Some(vec!["part 2?".to_string()])
        );

        let top = result.top_liked_comments.as_ref().unwrap();
        assert_eq!(top.top(Sentiment::Positive).unwrap().likecount, 12);
        assert!(top.top(Sentiment::Negative).is_none());
    }

    #[test]
    fn test_unknown_fields_survive_reserialization() {
        let json = r#"{"totalComments": 1, "sentimentCounts": {"positive": 1}, "video_title": "demo"}"#;

        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        let body = serde_json::to_value(SessionRequest { payload: &result }).unwrap();

        assert_eq!(body["payload"]["video_title"], "demo");
        assert_eq!(body["payload"]["totalComments"], 1);
    }

    #[test]
    fn test_nested_fields_survive_reserialization() {
        let json = r#"{
            "totalComments": 1,
            "sentimentCounts": {"positive": 1},
            "insight": {"Engagement": ["Viewers love it"], "Suggestions": ["More demos"]},
            "top_liked_comments": {
                "positive": [{"comment": "hi", "likecount": 3, "sentiment": "positive"}]
            }
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        let body = serde_json::to_value(SessionRequest { payload: &result }).unwrap();
        let insight = &body["payload"]["insight"];

        assert_eq!(insight["Engagement"][0], "Viewers love it");
        assert_eq!(insight["Suggestions"][0], "More demos");
        assert!(insight.get("Questions").is_none());
        assert_eq!(body["payload"]["top_liked_comments"]["positive"][0]["sentiment"], "positive");
        assert_eq!(body["payload"]["top_liked_comments"]["positive"][0]["likecount"], 3);
    }

    #[test]
    fn test_from_flat_counts() {
        let flat: SentimentCounts =
            serde_json::from_str(r#"{"positive": 5, "negative": 3, "neutral": 2}"#).unwrap();
        let result = AnalysisResult::from_counts(flat);

        assert_eq!(result.total_comments, 10);
        assert_eq!(result.percentages(), SentimentPercentages { positive: 50, neutral: 20, negative: 30 });
        assert!(result.graph_urls.is_none());
    }

    #[test]
    fn test_sum_saturates() {
        assert_eq!(counts(u32::MAX, 5, 1).sum(), u32::MAX);
        assert_eq!(AnalysisResult::from_counts(counts(u32::MAX, u32::MAX, 0)).total_comments, u32::MAX);
    }

    #[test]
    fn test_is_empty() {
        assert!(AnalysisResult::default().is_empty());
        assert!(!AnalysisResult::from_counts(counts(0, 1, 0)).is_empty());
    }
}
