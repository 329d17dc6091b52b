mod app;
mod browser;
mod config;
mod error;
mod frontmatter;
mod i18n;
mod logging;
mod model;
mod render;
mod repository;
mod store;
mod tag_complete;
mod theme;
mod view_state;

use app::*;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
    mount_to_body(App)
}
