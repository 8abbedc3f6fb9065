//! Runtime Configuration
//!
//! Compile-time defaults (`TRACKER_API_URL`) overridden by a JSON object stored under
//! `tracker.config` in local storage. Missing keys keep their defaults.

use std::cell::RefCell;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use tracker_domain::{KeyValueStorage, EXPIRY_WINDOW_DAYS, RENEWAL_WINDOW_DAYS};

pub const CONFIG_KEY: &str = "tracker.config";

const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Upper bound for both date windows (ten years)
const MAX_WINDOW_DAYS: i64 = 3650;
const MAX_LOG_BUFFER_LINES: usize = 5000;
const MAX_UPLOAD_MB: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// REST backend root, without trailing slash
    pub api_base_url: String,
    pub log_level: String,
    /// Lines kept in the in-memory log buffer
    pub log_buffer_lines: usize,
    pub renewal_window_days: i64,
    pub expiry_window_days: i64,
    /// Largest file accepted for a base64 upload
    pub max_upload_mb: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("TRACKER_API_URL").unwrap_or(DEFAULT_API_URL).to_string(),
            log_level: "info".to_string(),
            log_buffer_lines: 200,
            renewal_window_days: RENEWAL_WINDOW_DAYS,
            expiry_window_days: EXPIRY_WINDOW_DAYS,
            max_upload_mb: 5,
        }
    }
}

impl AppConfig {
    pub fn load(storage: &dyn KeyValueStorage) -> Self {
        match storage.get(CONFIG_KEY) {
            Ok(Some(raw)) => Self::from_overrides(&raw),
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("[CONFIG] Could not read overrides: {}", e);
                Self::default()
            }
        }
    }

    pub fn from_overrides(raw: &str) -> Self {
        match serde_json::from_str::<AppConfig>(raw) {
            Ok(mut config) => {
                config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
                config.clamped()
            }
            Err(e) => {
                log::warn!("[CONFIG] Ignoring malformed overrides: {}", e);
                Self::default()
            }
        }
    }

    /// Pull numeric overrides into ranges the date and buffer code can handle
    fn clamped(mut self) -> Self {
        let bounded = |name: &str, value: i64, max: i64| {
            let clamped = value.clamp(0, max);
            if clamped != value {
                log::warn!("[CONFIG] {} = {} out of range, using {}", name, value, clamped);
            }
            clamped
        };
        self.renewal_window_days = bounded("renewal_window_days", self.renewal_window_days, MAX_WINDOW_DAYS);
        self.expiry_window_days = bounded("expiry_window_days", self.expiry_window_days, MAX_WINDOW_DAYS);
        self.log_buffer_lines = self.log_buffer_lines.clamp(1, MAX_LOG_BUFFER_LINES);
        self.max_upload_mb = self.max_upload_mb.clamp(1, MAX_UPLOAD_MB);
        self
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), path)
    }
}

thread_local! {
    static CURRENT: RefCell<AppConfig> = RefCell::new(AppConfig::default());
}

/// Make `config` the one returned by [`current`]
pub fn install(config: AppConfig) {
    CURRENT.with(|c| *c.borrow_mut() = config);
}

pub fn current() -> AppConfig {
    CURRENT.with(|c| c.borrow().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_domain::MemoryStorage;

    #[test]
    fn test_partial_overrides_keep_defaults() {
        let config = AppConfig::from_overrides(r#"{"api_base_url":"https://tracker.example.com/api/","renewal_window_days":14}"#);
        assert_eq!(config.api_base_url, "https://tracker.example.com/api");
        assert_eq!(config.renewal_window_days, 14);
        assert_eq!(config.expiry_window_days, 30);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_out_of_range_overrides_are_clamped() {
        let config = AppConfig::from_overrides(
            r#"{"renewal_window_days":1000000000000,"expiry_window_days":-5,"log_buffer_lines":0,"max_upload_mb":100000}"#,
        );
        assert_eq!(config.renewal_window_days, MAX_WINDOW_DAYS);
        assert_eq!(config.expiry_window_days, 0);
        assert_eq!(config.log_buffer_lines, 1);
        assert_eq!(config.max_upload_mb, MAX_UPLOAD_MB);

        let today = chrono::NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let far = chrono::NaiveDate::from_ymd_opt(2035, 1, 1).unwrap();
        assert!(tracker_domain::due_for_renewal(far, today, config.renewal_window_days));
    }

    #[test]
    fn test_malformed_overrides_fall_back() {
        assert_eq!(AppConfig::from_overrides("[1,2"), AppConfig::default());
    }

    #[test]
    fn test_load_from_storage() {
        let storage = MemoryStorage::new();
        assert_eq!(AppConfig::load(&storage), AppConfig::default());
        storage.set(CONFIG_KEY, r#"{"log_level":"debug"}"#).unwrap();
        assert_eq!(AppConfig::load(&storage).level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_url_join() {
        let config = AppConfig { api_base_url: "https://x.test/api/".into(), ..Default::default() };
        assert_eq!(config.url("/documents"), "https://x.test/api/documents");
    }

    #[test]
    fn test_install_and_current() {
        let config = AppConfig { log_level: "warn".into(), ..Default::default() };
        install(config.clone());
        assert_eq!(current(), config);
    }
}
