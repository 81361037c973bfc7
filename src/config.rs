use std::time::Duration;

// ============================================================================
// Client Configuration
// ============================================================================
//
// Endpoints and timing knobs for the storefront client. Everything has a
// production default and an environment override, so the demo binary runs
// against the live backend with no setup.
//
// ============================================================================

/// Configuration shared by the cart, order and geocoding clients.
///
/// Environment overrides:
/// - `AGROMARKET_API_URL`: base URL of the marketplace REST API
/// - `AGROMARKET_GEOCODER_URL`: base URL of the Nominatim-compatible geocoder
/// - `AGROMARKET_TIMEOUT_SECS`: per-request timeout in seconds (default: 60)
/// - `AGROMARKET_UNDO_SECS`: how long a removed line stays undoable (default: 10)
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// Base URL of the marketplace API, including the `/api` prefix.
    pub api_base_url: String,
    /// Base URL of the reverse/forward geocoding service.
    pub geocoder_base_url: String,
    /// Blanket timeout applied to every outgoing request.
    pub request_timeout: Duration,
    /// Window during which the last removed cart line can be restored.
    pub undo_window: Duration,
    /// User-Agent header; Nominatim's usage policy requires an identifying one.
    pub user_agent: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://agromarket-backend-dpj6.onrender.com/api".to_string(),
            geocoder_base_url: "https://nominatim.openstreetmap.org".to_string(),
            request_timeout: Duration::from_secs(60),
            undo_window: Duration::from_secs(10),
            user_agent: concat!("agromarket-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl MarketConfig {
    /// Build a config from environment variables, falling back to defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: env_or("AGROMARKET_API_URL", defaults.api_base_url),
            geocoder_base_url: env_or("AGROMARKET_GEOCODER_URL", defaults.geocoder_base_url),
            request_timeout: env_secs("AGROMARKET_TIMEOUT_SECS", defaults.request_timeout),
            undo_window: env_secs("AGROMARKET_UNDO_SECS", defaults.undo_window),
            user_agent: defaults.user_agent,
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_secs(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_production() {
        let config = MarketConfig::default();
        assert!(config.api_base_url.ends_with("/api"));
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.undo_window, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("agromarket-client/"));
    }

    #[test]
    fn unparsable_timeout_falls_back_to_default() {
        std::env::set_var("AGROMARKET_TIMEOUT_SECS", "not-a-number");
        let config = MarketConfig::from_env();
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        std::env::remove_var("AGROMARKET_TIMEOUT_SECS");
    }
}
