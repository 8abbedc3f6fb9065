//! Corporate Tracker Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod files;
mod pages;
mod refresh;
mod session;
mod storage;
mod store;
mod time;

use app::App;
use config::AppConfig;
use leptos::prelude::*;
use storage::LocalStorage;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load(&LocalStorage);
    if let Err(e) = console_logger::init(config.level_filter(), config.log_buffer_lines) {
        web_sys::console::warn_1(&format!("[APP] Logger already installed: {}", e).into());
    }
    log::info!("[APP] Starting, API at {}", config.api_base_url);
    config::install(config);

    mount_to_body(App);
}
