// src/config.rs
//! Runtime configuration, read from the environment (and `.env`) at startup.

/// Every field has a default so the service starts with no environment set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind.
    pub bind_address: String,
    /// sqlx SQLite URL. `sqlite::memory:` runs against a throwaway database.
    pub database_url: String,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Emit newline-delimited JSON log records.
    pub log_json: bool,
    /// Connections in the read-only pool.
    pub db_readers: u32,
}

const DEFAULT_BIND: &str = "0.0.0.0:3000";
const DEFAULT_DATABASE_URL: &str = "sqlite://chat.db?mode=rwc";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_DB_READERS: u32 = 8;

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable keys keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(v) = lookup("CHAT_BIND") {
            cfg.bind_address = v;
        }
        if let Some(v) = lookup("DATABASE_URL") {
            cfg.database_url = v;
        }
        if let Some(v) = lookup("CHAT_LOG") {
            cfg.log_level = v;
        }
        if let Some(v) = lookup("CHAT_LOG_JSON") {
            cfg.log_json = v == "1" || v.eq_ignore_ascii_case("true");
        }
        if let Some(n) = lookup("CHAT_DB_READERS").and_then(|v| v.parse().ok()) {
            cfg.db_readers = n;
        }
        cfg
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_json: false,
            db_readers: DEFAULT_DB_READERS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_matches_defaults() {
        let cfg = Config::from_lookup(lookup(&[]));
        let defaults = Config::default();
        assert_eq!(cfg.bind_address, defaults.bind_address);
        assert_eq!(cfg.database_url, defaults.database_url);
        assert_eq!(cfg.log_level, defaults.log_level);
        assert_eq!(cfg.log_json, defaults.log_json);
        assert_eq!(cfg.db_readers, defaults.db_readers);
        assert_eq!(cfg.bind_address, "0.0.0.0:3000");
    }

    #[test]
    fn variables_override_defaults() {
        let cfg = Config::from_lookup(lookup(&[
            ("CHAT_BIND", "127.0.0.1:8080"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("CHAT_LOG", "debug"),
            ("CHAT_LOG_JSON", "TRUE"),
            ("CHAT_DB_READERS", "3"),
        ]));
        assert_eq!(cfg.bind_address, "127.0.0.1:8080");
        assert_eq!(cfg.database_url, "sqlite::memory:");
        assert_eq!(cfg.log_level, "debug");
        assert!(cfg.log_json);
        assert_eq!(cfg.db_readers, 3);
    }

    #[test]
    fn unparsable_reader_count_keeps_default() {
        let cfg = Config::from_lookup(lookup(&[("CHAT_DB_READERS", "many")]));
        assert_eq!(cfg.db_readers, DEFAULT_DB_READERS);
    }
}
