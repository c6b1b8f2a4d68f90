#![allow(warnings)]
//! Sortbox Frontend Entry Point

mod app;
mod components;
mod context;
mod logger;
mod store;
mod timer;
mod validation;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logger::init(if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });
    mount_to_body(App);
}
