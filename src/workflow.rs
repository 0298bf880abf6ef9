/// The popup's analysis run: tab URL -> video id -> analysis -> best-effort session

use std::cell::Cell;

use crate::analysis::AnalysisResult;
use crate::client::AnalysisClient;
use crate::config::PopupConfig;
use crate::error::AnalysisError;
use crate::host::TabLocator;
use crate::state::PopupAction;
use crate::storage::{AnalysisCache, CachedAnalysis};
use crate::video::{VideoId, extract_video_id, is_video_page};

/// How a call to `run_analysis` ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Another run was still loading
    Skipped,
    Failed(AnalysisError),
    Completed {
        video_id: VideoId,
        details_url: String,
        shareable: bool,
    },
}

/// Owns the injected capabilities and allows one loading run at a time
pub struct PopupController<T, C, S> {
    tabs: T,
    client: C,
    cache: S,
    config: PopupConfig,
    busy: Cell<bool>,
    runs: Cell<u32>,
}

/// Clears the busy flag however the loading phase ends
struct BusyGuard<'a>(&'a Cell<bool>);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<BusyGuard<'a>> {
        if flag.replace(true) {
            None
        } else {
            Some(BusyGuard(flag))
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<T, C, S> PopupController<T, C, S>
where
    T: TabLocator,
    C: AnalysisClient,
    S: AnalysisCache,
{
    pub fn new(tabs: T, client: C, cache: S, config: PopupConfig) -> Self {
        PopupController {
            tabs,
            client,
            cache,
            config,
            busy: Cell::new(false),
            runs: Cell::new(0),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Run one analysis, reporting every UI transition through `dispatch`
    pub async fn run_analysis<D>(&self, dispatch: D) -> RunOutcome
    where
        D: Fn(PopupAction),
    {
        let Some(busy) = BusyGuard::acquire(&self.busy) else {
            log::debug!("Analysis already running, ignoring trigger");
            return RunOutcome::Skipped;
        };

        let run = self.runs.get() + 1;
        self.runs.set(run);
        dispatch(PopupAction::Start { run });

        let (video_id, result) = match self.analyze().await {
            Ok(analysis) => analysis,
            Err(error) => {
                log::warn!("Analysis failed: {}", error);
                dispatch(PopupAction::Failed(error.clone()));
                return RunOutcome::Failed(error);
            }
        };

        log::info!(
            "Analysis for {} covers {} comments",
            video_id,
            result.total_comments
        );

        // Empty results are not cached; the dashboard keeps the last real one
        if !result.is_empty() {
            self.cache_result(&video_id, &result);
        }

        let fallback_url = if result.is_empty() {
            self.config.backend_home_url()
        } else {
            self.config.fallback_dashboard_url()
        };

        dispatch(PopupAction::Succeeded {
            run,
            percentages: result.percentages(),
            details_url: fallback_url.clone(),
        });
        drop(busy);

        if result.is_empty() {
            return RunOutcome::Completed {
                video_id,
                details_url: fallback_url,
                shareable: false,
            };
        }

        match self.client.create_session(&result).await {
            Ok(session_id) => {
                let url = self.config.shareable_dashboard_url(&session_id);
                log::info!("Session created, dashboard at {}", url);
                dispatch(PopupAction::DetailsResolved {
                    run,
                    url: url.clone(),
                });
                RunOutcome::Completed {
                    video_id,
                    details_url: url,
                    shareable: true,
                }
            }
            Err(e) => {
                log::warn!("{}; details link falls back to {}", e, fallback_url);
                RunOutcome::Completed {
                    video_id,
                    details_url: fallback_url,
                    shareable: false,
                }
            }
        }
    }

    async fn analyze(&self) -> Result<(VideoId, AnalysisResult), AnalysisError> {
        let url = self.tabs.active_tab_url().await;
        log::debug!("Active tab URL: {:?}", url);

        if !is_video_page(&url) {
            return Err(AnalysisError::NotAVideoPage);
        }

        let video_id = extract_video_id(&url).ok_or(AnalysisError::InvalidVideoId)?;
        let result = self.client.fetch_analysis(&video_id).await?;

        Ok((video_id, result))
    }

    fn cache_result(&self, video_id: &VideoId, result: &AnalysisResult) {
        let entry = CachedAnalysis {
            video_id: Some(video_id.clone()),
            data: result.clone(),
        };

        if let Err(e) = self.cache.store(&entry) {
            log::warn!("{}", e);
        }
    }
}
