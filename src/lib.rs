/// Sentilytics - Chrome Extension for YouTube comment sentiment
/// Built with Rust + WASM + Yew

mod analysis;
mod client;
mod config;
mod dashboard;
mod error;
mod host;
mod state;
mod storage;
mod video;
mod workflow;
pub mod ui;

use wasm_bindgen::prelude::*;

use crate::config::PopupConfig;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export video id extraction for JavaScript access
#[wasm_bindgen]
pub fn extract_video_id(url: &str) -> Option<String> {
    video::extract_video_id(url).map(|id| id.to_string())
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Start the popup against a backend other than the built-in default
#[wasm_bindgen]
pub fn start_popup_with_config(config: JsValue) -> Result<(), JsValue> {
    let config = parse_config(config)?;
    yew::Renderer::<ui::popup::App>::with_props(ui::popup::PopupProps { config }).render();
    Ok(())
}

// Start the Yew app for the dashboard page
#[wasm_bindgen]
pub fn start_dashboard() {
    yew::Renderer::<ui::dashboard::Dashboard>::new().render();
}

#[wasm_bindgen]
pub fn start_dashboard_with_config(config: JsValue) -> Result<(), JsValue> {
    let config = parse_config(config)?;
    yew::Renderer::<ui::dashboard::Dashboard>::with_props(ui::dashboard::DashboardProps { config })
        .render();
    Ok(())
}

fn parse_config(config: JsValue) -> Result<PopupConfig, JsValue> {
    if config.is_null() || config.is_undefined() {
        return Ok(PopupConfig::default());
    }

    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))
}
