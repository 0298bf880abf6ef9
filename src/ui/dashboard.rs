/// Dashboard page: full breakdown of one analysis

use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::analysis::AnalysisResult;
use crate::client::{AnalysisClient, HttpAnalysisClient};
use crate::config::PopupConfig;
use crate::dashboard::{DashboardSource, DashboardView};
use crate::error::AnalysisError;
use crate::storage::{AnalysisCache, SessionStorageCache};
use crate::ui::components::{ChartImage, TextList};

#[derive(Clone, PartialEq)]
enum ViewState {
    Loading,
    Ready(Option<AnalysisResult>),
    Error(String),
}

#[derive(Properties, PartialEq, Default)]
pub struct DashboardProps {
    #[prop_or_default]
    pub config: PopupConfig,
}

#[function_component(Dashboard)]
pub fn dashboard(props: &DashboardProps) -> Html {
    let state = use_state(|| ViewState::Loading);

    // Load analysis on mount
    {
        let state = state.clone();
        let config = props.config.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                let source = DashboardSource::from_query(&current_query());
                log::info!("Dashboard source: {:?}", source);

                match load_analysis(source, config).await {
                    Ok(result) => state.set(ViewState::Ready(result)),
                    Err(e) => {
                        log::warn!("Dashboard load failed: {}", e);
                        state.set(ViewState::Error(e.to_string()));
                    }
                }
            });
            || ()
        });
    }

    let view = match &*state {
        ViewState::Ready(result) => DashboardView::from_result(result.as_ref()),
        ViewState::Loading | ViewState::Error(_) => DashboardView::from_result(None),
    };

    html! {
        <div class="container">
            <div class="header">
                <h1 class="main-title">{"Comment Sentiment Dashboard"}</h1>
            </div>

            // Status display
            {match &*state {
                ViewState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Loading analysis..."}</p>
                    </div>
                },
                ViewState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                ViewState::Ready(None) => html! {
                    <Alert r#type={AlertType::Info} title={"No analysis yet"} inline={true}>
                        {"Run an analysis from the extension popup first."}
                    </Alert>
                },
                ViewState::Ready(Some(_)) => html! {}
            }}

            // Summary
            <div class="summary">
                <div class="stat-item">
                    <span class="stat-label">{"Total comments"}</span>
                    <span class="stat-count">{&view.total_comments}</span>
                </div>
                {for view.summary.iter().map(|row| html! {
                    <div class={classes!("stat-item", row.sentiment.key())}>
                        <span class="stat-label">{row.sentiment.label()}</span>
                        <span class="stat-count">{&row.count}</span>
                        <span class="stat-percent">{&row.percent}</span>
                    </div>
                })}
            </div>

            // Charts
            <div class="charts">
                {for view.charts.iter().map(|chart| html! {
                    <ChartImage key={chart.title} title={chart.title} url={chart.url.clone()} />
                })}
            </div>

            // Top liked comments
            <div class="comments">
                <h2 class="section-title">{"Top Liked Comments"}</h2>
                {for view.top_comments.iter().map(|top| html! {
                    <div class={classes!("comment", top.sentiment.key())}>
                        <strong>{top.sentiment.label().to_uppercase()}</strong>
                        <p class="comment-text">{&top.text}</p>
                        if let Some(likes) = top.likes {
                            <span class="comment-likes">{format!("Likes: {}", likes)}</span>
                        }
                    </div>
                })}
            </div>

            <div class="insights">
                <TextList title={view.highlights_title} items={view.highlights.clone()} />
                <TextList title="Suggestions" items={view.suggestions.clone()} />
            </div>
        </div>
    }
}

// Helper functions

fn current_query() -> String {
    web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default()
}

async fn load_analysis(
    source: DashboardSource,
    config: PopupConfig,
) -> Result<Option<AnalysisResult>, AnalysisError> {
    let client = HttpAnalysisClient::new(config);

    match source {
        DashboardSource::Session(session_id) => client.fetch_session(&session_id).await.map(Some),
        DashboardSource::Video(video_id) => client.fetch_analysis(&video_id).await.map(Some),
        DashboardSource::Cache => {
            let cached = SessionStorageCache.load()?;
            if let Some(entry) = &cached {
                log::info!("Using cached analysis for {:?}", entry.video_id);
            }
            Ok(cached.map(|entry| entry.data))
        }
    }
}
