/// Popup UI state machine
///
/// Initial -> Loading -> Results | Error, and Results | Error -> Loading on re-trigger.
/// The model is plain data so every transition can be checked without a document.
use std::rc::Rc;

use yew::prelude::*;

use crate::analysis::SentimentPercentages;
use crate::error::AnalysisError;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiState {
    #[default]
    Initial,
    Loading,
    Results,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PopupAction {
    /// A run started; bars go back to zero
    Start { run: u32 },
    Failed(AnalysisError),
    Succeeded {
        run: u32,
        percentages: SentimentPercentages,
        details_url: String,
    },
    /// Session created; only honoured while the run is still on screen
    DetailsResolved { run: u32, url: String },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PopupModel {
    pub state: UiState,
    pub bars: SentimentPercentages,
    pub details_url: Option<String>,
    /// The results panel stays up across re-runs once it has been shown
    pub results_visible: bool,
    pub run: u32,
}

impl PopupModel {
    pub fn trigger_enabled(&self) -> bool {
        self.state != UiState::Loading
    }

    pub fn status_text(&self) -> Option<String> {
        match &self.state {
            UiState::Loading => Some("Analyzing...".to_string()),
            UiState::Error(message) => Some(message.clone()),
            UiState::Initial | UiState::Results => None,
        }
    }

    pub fn apply(&self, action: PopupAction) -> PopupModel {
        let mut next = self.clone();

        match action {
            PopupAction::Start { run } => {
                if self.state == UiState::Loading {
                    return next;
                }
                next.state = UiState::Loading;
                next.bars = SentimentPercentages::default();
                next.details_url = None;
                next.run = run;
            }
            PopupAction::Failed(error) => {
                if self.state != UiState::Loading || !error.is_fatal_to_run() {
                    return next;
                }
                next.state = UiState::Error(error.status_message());
            }
            PopupAction::Succeeded {
                run,
                percentages,
                details_url,
            } => {
                if self.state != UiState::Loading || run != self.run {
                    return next;
                }
                next.state = UiState::Results;
                next.bars = percentages;
                next.details_url = Some(details_url);
                next.results_visible = true;
            }
            PopupAction::DetailsResolved { run, url } => {
                if self.state == UiState::Results && run == self.run {
                    next.details_url = Some(url);
                }
            }
            PopupAction::Reset => {
                next = PopupModel {
                    run: self.run,
                    ..PopupModel::default()
                };
            }
        }

        next
    }
}

impl Reducible for PopupModel {
    type Action = PopupAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}
