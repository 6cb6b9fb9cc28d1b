use log::Level;
use web_sys::window;

const KEY_PREDICT_URL: &str = "stockcast_predict_url";
const KEY_LOG_LEVEL: &str = "stockcast_log_level";
const KEY_REQUEST_TIMEOUT_MS: &str = "stockcast_request_timeout_ms";
const KEY_TOAST_DURATION_MS: &str = "stockcast_toast_duration_ms";

/// Global application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Absolute URL of the prediction endpoint
    pub predict_url: String,

    /// Default log level for the application
    pub log_level: Level,

    /// Request timeout in milliseconds, 0 disables it
    pub request_timeout_ms: u32,

    /// Enable debug mode
    pub debug_mode: bool,

    /// Toast notification duration in milliseconds
    pub toast_duration_ms: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            predict_url: common::DEFAULT_PREDICT_URL.to_string(),
            log_level: Level::Info,
            request_timeout_ms: 30000,
            debug_mode: false,
            toast_duration_ms: 5000,
        }
    }
}

fn parse_level(value: &str) -> Option<Level> {
    match value.to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

impl AppSettings {
    /// Create settings from environment/window location
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            }
        }

        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item(KEY_PREDICT_URL) {
                if !url.trim().is_empty() {
                    settings.predict_url = url;
                }
            }

            if let Ok(Some(level)) = storage.get_item(KEY_LOG_LEVEL) {
                settings.log_level = parse_level(&level).unwrap_or(settings.log_level);
            }

            if let Ok(Some(timeout)) = storage.get_item(KEY_REQUEST_TIMEOUT_MS) {
                if let Ok(timeout_val) = timeout.parse::<u32>() {
                    settings.request_timeout_ms = timeout_val;
                }
            }

            if let Ok(Some(duration)) = storage.get_item(KEY_TOAST_DURATION_MS) {
                if let Ok(duration_val) = duration.parse::<u32>() {
                    settings.toast_duration_ms = duration_val;
                }
            }
        }

        settings
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::from_environment());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
