/// Dashboard page data: where the analysis comes from and what each panel shows
use url::form_urlencoded;

use crate::analysis::{AnalysisResult, Sentiment};
use crate::video::VideoId;

pub const NOT_AVAILABLE: &str = "Not available";

/// Where the dashboard gets its analysis, in order of preference
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardSource {
    Session(String),
    Video(VideoId),
    Cache,
}

impl DashboardSource {
    /// `?sid=` wins over `?v=`; with neither, read the popup's cached copy
    pub fn from_query(query: &str) -> DashboardSource {
        let mut session = None;
        let mut video = None;

        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "sid" if !value.trim().is_empty() => session = Some(value.trim().to_string()),
                "v" => video = VideoId::parse(&value),
                _ => {}
            }
        }

        match (session, video) {
            (Some(sid), _) => DashboardSource::Session(sid),
            (None, Some(video_id)) => DashboardSource::Video(video_id),
            (None, None) => DashboardSource::Cache,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub sentiment: Sentiment,
    pub count: String,
    pub percent: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPanel {
    pub title: &'static str,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopCommentPanel {
    pub sentiment: Sentiment,
    pub text: String,
    pub likes: Option<u64>,
}

/// Everything the dashboard renders; missing data becomes `NOT_AVAILABLE`
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub total_comments: String,
    pub summary: Vec<SummaryRow>,
    pub charts: Vec<ChartPanel>,
    pub top_comments: Vec<TopCommentPanel>,
    /// "Questions", or "Engagement" when viewers asked none
    pub highlights_title: &'static str,
    pub highlights: Vec<String>,
    pub suggestions: Vec<String>,
}

impl DashboardView {
    pub fn from_result(result: Option<&AnalysisResult>) -> DashboardView {
        let total_comments = result
            .map(|r| r.total_comments.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let summary = Sentiment::ALL
            .iter()
            .map(|&sentiment| match result {
                Some(r) => {
                    let count = r.sentiment_counts.get(sentiment);
                    SummaryRow {
                        sentiment,
                        count: count.to_string(),
                        percent: format_percent(count, r.total_comments),
                    }
                }
                None => SummaryRow {
                    sentiment,
                    count: NOT_AVAILABLE.to_string(),
                    percent: NOT_AVAILABLE.to_string(),
                },
            })
            .collect();

        let graphs = result.and_then(|r| r.graph_urls.as_ref());
        let non_empty = |url: Option<&String>| url.filter(|u| !u.trim().is_empty()).cloned();
        let charts = vec![
            ChartPanel {
                title: "Sentiment Distribution",
                url: non_empty(graphs.and_then(|g| g.pie_chart.as_ref())),
            },
            ChartPanel {
                title: "Word Cloud",
                url: non_empty(graphs.and_then(|g| g.word_cloud.as_ref())),
            },
            ChartPanel {
                title: "Sentiment Counts",
                url: non_empty(graphs.and_then(|g| g.bar_chart.as_ref())),
            },
        ];

        let top_liked = result.and_then(|r| r.top_liked_comments.as_ref());
        let top_comments = Sentiment::ALL
            .iter()
            .map(|&sentiment| match top_liked.and_then(|t| t.top(sentiment)) {
                Some(comment) => TopCommentPanel {
                    sentiment,
                    text: comment.comment.clone(),
                    likes: Some(comment.likecount),
                },
                None => TopCommentPanel {
                    sentiment,
                    text: NOT_AVAILABLE.to_string(),
                    likes: None,
                },
            })
            .collect();

        let insight = result.and_then(|r| r.insight.as_ref());
        let (highlights_title, highlights) =
            match insight.map(|i| (i.questions.as_ref(), i.engagement.as_ref())) {
                Some((None, Some(engagement))) => ("Engagement", engagement.clone()),
                Some((Some(questions), _)) => ("Questions", questions.clone()),
                _ => ("Questions", Vec::new()),
            };
        let suggestions = insight.map(|i| i.suggestions.clone()).unwrap_or_default();

        DashboardView {
            total_comments,
            summary,
            charts,
            top_comments,
            highlights_title,
            highlights,
            suggestions,
        }
    }
}

/// One decimal place; a zero total counts as one
fn format_percent(count: u32, total: u32) -> String {
    let share = f64::from(count) / f64::from(total.max(1)) * 100.0;
    format!("{:.1}%", share)
}
