//! How I Ate: restaurant reviews and the leaderboards built from them.
//!
//! The leaderboard logic lives in [`ranking`] and [`rating`] and has no
//! dependency on the store or the web server. Everything behind the `ssr`
//! feature (SQLite store, actix routes) only feeds it snapshots.

pub mod api;
pub mod app;
pub mod auth;
pub mod components;
#[cfg(feature = "ssr")]
pub mod config;
pub mod db;
#[cfg(feature = "ssr")]
pub mod error;
pub mod models;
pub mod ranking;
pub mod rating;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;

    console_error_panic_hook::set_once();
    leptos::mount_to_body(App);
}
