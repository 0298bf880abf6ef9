/// Browser host capabilities: active tab lookup and opening new tabs

use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getActiveTabUrl() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn openTab(url: &str) -> Result<(), JsValue>;
}

/// Resolves the URL of the tab the user is looking at
#[allow(async_fn_in_trait)]
pub trait TabLocator {
    /// Empty string when the host cannot tell
    async fn active_tab_url(&self) -> String;
}

/// `chrome.tabs` through the popup bridge
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChromeTabs;

impl TabLocator for ChromeTabs {
    async fn active_tab_url(&self) -> String {
        match getActiveTabUrl().await {
            Ok(url) => url.as_string().unwrap_or_default(),
            Err(e) => {
                log::warn!("Active tab query failed: {:?}", e);
                String::new()
            }
        }
    }
}

/// Open a URL in a new tab, or a new window outside the extension
pub async fn open_in_new_tab(url: &str) {
    if let Err(e) = openTab(url).await {
        log::error!("Failed to open {}: {:?}", url, e);
    }
}
