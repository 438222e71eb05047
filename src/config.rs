use std::{env, fmt::Display, str::FromStr};

use leptos::logging::{log, warn};

pub const DEFAULT_DB_PATH: &str = "howiate.db";

/// Server settings read from the environment. The site address itself comes
/// from the leptos metadata in Cargo.toml.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            db_path: try_load("HOWIATE_DB_PATH", DEFAULT_DB_PATH),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        log!("[CONFIG] {key} not set, using default: {default}");
        default.to_string()
    });

    match raw.parse() {
        Ok(value) => value,
        Err(e) => {
            warn!("[CONFIG] Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
                .parse()
                .unwrap_or_else(|_| unreachable!("default for {key} must parse"))
        }
    }
}
