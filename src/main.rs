//! Kanban Board Frontend Entry Point

mod app;
mod board;
mod components;
mod config;
mod context;
mod ids;
mod models;
mod reorder;
mod store;

use app::App;
use config::BoardConfig;
use leptos::prelude::*;

/// Id of the optional `<script type="application/json">` holding config overrides
const CONFIG_ELEMENT_ID: &str = "board-config";

fn page_config_text() -> Option<String> {
    let document = web_sys::window()?.document()?;
    document.get_element_by_id(CONFIG_ELEMENT_ID)?.text_content()
}

fn main() {
    console_error_panic_hook::set_once();

    let parsed = BoardConfig::from_page(page_config_text().as_deref());
    let capacity = parsed.as_ref().map_or(rolling_logger::DEFAULT_CAPACITY, |c| c.log_capacity);
    let logger = match rolling_logger::RollingLogger::init(capacity, tracing::Level::DEBUG) {
        Ok(logger) => Some(logger),
        Err(e) => {
            web_sys::console::error_1(&format!("logger init failed: {}", e).into());
            None
        }
    };
    let config = parsed.unwrap_or_else(|e| {
        tracing::warn!("[BOARD] ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
        BoardConfig::default()
    });

    mount_to_body(move || view! { <App config=config.clone() logger=logger.clone() /> });
}
