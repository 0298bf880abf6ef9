/// Popup UI: start an analysis of the active video and show the sentiment split

use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::analysis::Sentiment;
use crate::client::HttpAnalysisClient;
use crate::config::PopupConfig;
use crate::host::{ChromeTabs, open_in_new_tab};
use crate::state::{PopupAction, PopupModel, UiState};
use crate::storage::SessionStorageCache;
use crate::ui::components::SentimentBar;
use crate::workflow::{PopupController, RunOutcome};

#[derive(Properties, PartialEq, Default)]
pub struct PopupProps {
    #[prop_or_default]
    pub config: PopupConfig,
}

#[function_component(App)]
pub fn app(props: &PopupProps) -> Html {
    let model = use_reducer(PopupModel::default);
    let controller = use_memo(props.config.clone(), |config| {
        PopupController::new(
            ChromeTabs,
            HttpAnalysisClient::new(config.clone()),
            SessionStorageCache,
            config.clone(),
        )
    });

    // Always start from the initial view
    {
        let dispatcher = model.dispatcher();
        use_effect_with((), move |_| {
            dispatcher.dispatch(PopupAction::Reset);
            || ()
        });
    }

    let on_start = {
        let controller = controller.clone();
        let dispatcher = model.dispatcher();

        Callback::from(move |_: MouseEvent| {
            if controller.is_busy() {
                return;
            }

            let controller = controller.clone();
            let dispatcher = dispatcher.clone();

            spawn_local(async move {
                let outcome = controller
                    .run_analysis(move |action| dispatcher.dispatch(action))
                    .await;

                if let RunOutcome::Completed {
                    video_id,
                    details_url,
                    shareable,
                } = outcome
                {
                    log::info!(
                        "{} done, details at {} (shareable: {})",
                        video_id,
                        details_url,
                        shareable
                    );
                }
            });
        })
    };

    let on_details = {
        let details_url = model.details_url.clone();

        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if let Some(url) = details_url.clone() {
                spawn_local(async move {
                    open_in_new_tab(&url).await;
                });
            }
        })
    };

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Sentilytics"}</h1>

            // Status display
            {match &model.state {
                UiState::Loading => html! {
                    <div id="status" class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{model.status_text().unwrap_or_default()}</p>
                    </div>
                },
                UiState::Error(message) => html! {
                    <div id="status" class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {message.clone()}
                        </Alert>
                    </div>
                },
                UiState::Initial | UiState::Results => html! {}
            }}

            if model.results_visible {
                <div id="results-view" class="flex-column-gap">
                    {for Sentiment::ALL.iter().map(|&sentiment| html! {
                        <SentimentBar sentiment={sentiment} percent={model.bars.get(sentiment)} />
                    })}

                    if let Some(url) = model.details_url.clone() {
                        <a id="view-details-link" class="details-link" href={url} onclick={on_details}>
                            {"View Detailed Trends"}
                        </a>
                    }
                </div>
            } else {
                <div id="initial-view" class="flex-column-gap">
                    <p class="message-text">
                        {"Open a YouTube video and analyze the sentiment of its comments."}
                    </p>
                </div>
            }

            <Button
                onclick={on_start}
                disabled={!model.trigger_enabled()}
                variant={ButtonVariant::Primary}
                block={true}
            >
                {"Start Analysis"}
            </Button>

            <p class="footer-popup">
                {concat!("Sentilytics v", env!("CARGO_PKG_VERSION"))}
            </p>
        </div>
    }
}
