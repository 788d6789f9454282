use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Base URL of the users service, e.g. `http://localhost:5001`.
    pub users_service_url: String,

    /// SQLite URL of the database holding the refresh token.
    ///
    /// The default `sqlite://users-client.db` is relative to the working
    /// directory: running from elsewhere opens a different, empty store and
    /// the next `status` reports not authenticated. Point `TOKEN_STORE_URL`
    /// (or `--token-store`) at an absolute path, e.g.
    /// `sqlite:///home/me/.users-client.db`, to share one store across
    /// directories.
    ///
    /// The token outlives the process so a later run can refresh silently
    /// instead of asking for credentials again.
    pub token_store_url: String,

    /// Keep the refresh token in memory only. Nothing survives the process.
    pub ephemeral: bool,

    /// Per-request timeout for the users service.
    pub http_timeout: Duration,

    /// Emit JSON logs instead of the pretty format.
    pub json_logs: bool,
}

const DEFAULT_SERVICE_URL: &str = "http://localhost:5001";
const DEFAULT_TOKEN_STORE_URL: &str = "sqlite://users-client.db";
const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5_000;

fn is_production(app_env: Option<String>) -> bool {
    app_env.is_some_and(|env| env == "production")
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Log format choice alone, for installing the logger before the rest
    /// of the config is read.
    pub fn json_logs_from_env() -> bool {
        is_production(std::env::var("APP_ENV").ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let users_service_url =
            get("USERS_SERVICE_URL").unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());

        let token_store_url =
            get("TOKEN_STORE_URL").unwrap_or_else(|| DEFAULT_TOKEN_STORE_URL.to_string());

        let http_timeout_ms = match get("HTTP_TIMEOUT_MS") {
            None => DEFAULT_HTTP_TIMEOUT_MS,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    tracing::warn!(value = %raw, "invalid HTTP_TIMEOUT_MS; using default");
                    DEFAULT_HTTP_TIMEOUT_MS
                }
            },
        };

        let json_logs = is_production(get("APP_ENV"));

        Self {
            users_service_url,
            token_store_url,
            ephemeral: false,
            http_timeout: Duration::from_millis(http_timeout_ms),
            json_logs,
        }
    }
}
