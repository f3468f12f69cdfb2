use melboard_store::LatencyProfile;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Fixed artificial store latency in milliseconds (default: `150`).
    pub store_latency_ms: u64,
    /// Upper bound of random store latency jitter in milliseconds (default: `250`).
    pub store_jitter_ms: u64,
    /// Read notifications older than this many days are pruned (default: `30`).
    pub notification_retention_days: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                    |
    /// |-------------------------------|----------------------------|
    /// | `HOST`                        | `0.0.0.0`                  |
    /// | `PORT`                        | `3000`                     |
    /// | `CORS_ORIGINS`                | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                       |
    /// | `STORE_LATENCY_MS`            | `150`                      |
    /// | `STORE_JITTER_MS`             | `250`                      |
    /// | `NOTIFICATION_RETENTION_DAYS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let store_latency_ms: u64 = std::env::var("STORE_LATENCY_MS")
            .unwrap_or_else(|_| "150".into())
            .parse()
            .expect("STORE_LATENCY_MS must be a valid u64");

        let store_jitter_ms: u64 = std::env::var("STORE_JITTER_MS")
            .unwrap_or_else(|_| "250".into())
            .parse()
            .expect("STORE_JITTER_MS must be a valid u64");

        let notification_retention_days: i64 = std::env::var("NOTIFICATION_RETENTION_DAYS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("NOTIFICATION_RETENTION_DAYS must be a valid i64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store_latency_ms,
            store_jitter_ms,
            notification_retention_days,
        }
    }

    /// The store latency profile described by this configuration.
    pub fn latency_profile(&self) -> LatencyProfile {
        LatencyProfile::new(self.store_latency_ms, self.store_jitter_ms)
    }
}
