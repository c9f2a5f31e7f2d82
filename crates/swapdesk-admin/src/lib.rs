//! SwapDesk Admin UI
//!
//! A Leptos-based web interface for moderating the skill-swapping platform.

pub mod api;
pub mod app;
pub mod components;
pub mod hooks;
pub mod pages;

use std::str::FromStr;
use wasm_bindgen::prelude::*;

/// Initialize and mount the Leptos application
#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    let config = api::load_config();

    let level = log::Level::from_str(&config.logging.level).unwrap_or(log::Level::Info);
    let _ = console_log::init_with_level(level);

    log::info!(
        "SwapDesk Admin UI {} starting ({} backend)",
        swapdesk_core::VERSION,
        config.api.data_source
    );

    leptos::mount_to_body(move || leptos::view! { <app::App config=config /> });
}
