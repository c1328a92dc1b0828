use log::Level;

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Applications that take longer than this are reported as failed and can be
/// retried by hand.
pub const SUBMIT_TIMEOUT_MS: u32 = 15_000;

/// Base URL of the application backend, taken from `BACKEND_URL` at build time.
pub fn get_backend_url() -> &'static str {
    option_env!("BACKEND_URL")
        .filter(|url| !url.trim().is_empty())
        .unwrap_or(DEFAULT_BACKEND_URL)
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
