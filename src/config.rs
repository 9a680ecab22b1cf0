use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub node_env: String,
    pub index_html_path: String,

    // Upstream provider
    pub base_url: String,
    pub user_agent: String,

    // Rate limiting
    pub rate_limit: bool,
    pub rate_limit_window_secs: u64,
    pub rate_limit_max: u32,
    pub rate_limit_max_clients: usize,
    pub rate_limit_sweep_secs: u64,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            // Server
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            node_env: env::var("NODE_ENV").unwrap_or_else(|_| "production".to_string()),
            index_html_path: env::var("INDEX_HTML_PATH")
                .unwrap_or_else(|_| "index.html".to_string()),

            // Upstream provider
            base_url: env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:4000".to_string()),
            user_agent: env::var("USER_AGENT")
                .unwrap_or_else(|_| format!("StreamFlix/{}", env!("CARGO_PKG_VERSION"))),

            // Rate limiting (disabled unless explicitly turned on)
            rate_limit: env::var("RATE_LIMIT")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            rate_limit_window_secs: env::var("RATE_LIMIT_WINDOW_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .unwrap_or(300), // 5 minutes
            rate_limit_max: env::var("RATE_LIMIT_MAX")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            rate_limit_max_clients: env::var("RATE_LIMIT_MAX_CLIENTS")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .unwrap_or(10_000),
            rate_limit_sweep_secs: env::var("RATE_LIMIT_SWEEP_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap_or(60),
        }
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Accepts `true`/`1`/`yes`/`on` in any case
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" 1 "));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("enabled-ish"));
    }
}
