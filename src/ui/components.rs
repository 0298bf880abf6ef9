/// Reusable UI components

use yew::prelude::*;

use crate::analysis::Sentiment;
use crate::dashboard::NOT_AVAILABLE;

fn bar_color(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "#4caf50",
        Sentiment::Neutral => "#9e9e9e",
        Sentiment::Negative => "#f44336",
    }
}

#[derive(Properties, PartialEq)]
pub struct SentimentBarProps {
    pub sentiment: Sentiment,
    pub percent: u32,
}

/// One sentiment's share: bar width, numeric label and hover tooltip
#[function_component(SentimentBar)]
pub fn sentiment_bar(props: &SentimentBarProps) -> Html {
    let key = props.sentiment.key();
    let width = props.percent.min(100);
    let label = format!("{}%", props.percent);

    html! {
        <div class={classes!("sentiment-row", key)}>
            <span class="sentiment-label">{props.sentiment.label()}</span>
            <div class="bar-track" title={label.clone()}>
                <div
                    class={classes!("bar", key)}
                    style={format!("width: {}%; background-color: {}; height: 100%; transition: width 0.3s ease;", width, bar_color(props.sentiment))}
                ></div>
                <span class="hover-tooltip">{label.clone()}</span>
            </div>
            <span class={classes!("percentage-value", key)}>{label}</span>
        </div>
    }
}

#[derive(Clone, Copy, PartialEq)]
enum ImageStatus {
    Loading,
    Loaded,
    Failed,
}

#[derive(Properties, PartialEq)]
pub struct ChartImageProps {
    pub title: AttrValue,
    pub url: Option<String>,
}

/// Chart by URL, with fallback text while loading and on error
#[function_component(ChartImage)]
pub fn chart_image(props: &ChartImageProps) -> Html {
    let status = use_state(|| ImageStatus::Loading);

    let on_load = {
        let status = status.clone();
        Callback::from(move |_: Event| status.set(ImageStatus::Loaded))
    };

    let on_error = {
        let status = status.clone();
        Callback::from(move |_: Event| status.set(ImageStatus::Failed))
    };

    html! {
        <div class="chart-card">
            <h3 class="chart-title">{props.title.clone()}</h3>
            {match &props.url {
                None => html! { <p class="placeholder">{NOT_AVAILABLE}</p> },
                Some(url) => html! {
                    <>
                        if *status == ImageStatus::Loading {
                            <p class="placeholder">{"Loading chart..."}</p>
                        }
                        if *status == ImageStatus::Failed {
                            <p class="placeholder">{"Chart failed to load."}</p>
                        } else {
                            <img
                                class="chart-image"
                                src={url.clone()}
                                alt={props.title.clone()}
                                onload={on_load}
                                onerror={on_error}
                            />
                        }
                    </>
                },
            }}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TextListProps {
    pub title: AttrValue,
    pub items: Vec<String>,
}

/// Bulleted list, or a placeholder when there is nothing to show
#[function_component(TextList)]
pub fn text_list(props: &TextListProps) -> Html {
    html! {
        <div class="list-card">
            <h3 class="list-title">{props.title.clone()}</h3>
            if props.items.is_empty() {
                <p class="placeholder">{NOT_AVAILABLE}</p>
            } else {
                <ul>
                    {for props.items.iter().map(|item| html! { <li>{item}</li> })}
                </ul>
            }
        </div>
    }
}
