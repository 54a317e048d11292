use clothswap_n8n::DEFAULT_WEBHOOK_URL;

/// Which forwarding strategy the deployed relay uses.
///
/// Picked once at startup from `FORWARD_STRATEGY`; never per-request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardMode {
    /// Re-emit received file bytes as a new multipart body.
    Raw,
    /// Upload assets to object storage, send the worker URLs.
    Url,
}

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
    /// HTTP request timeout in seconds (default: `180`, the worker call
    /// can legitimately take minutes).
    pub request_timeout_secs: u64,
    /// Upstream transformation webhook URL.
    pub webhook_url: String,
    /// Deployed forwarding strategy.
    pub forward_mode: ForwardMode,
    /// Object-storage upload endpoint (required in URL mode).
    pub storage_upload_url: Option<String>,
    /// Object-storage bearer token, if the endpoint needs one.
    pub storage_api_key: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                        |
    /// |------------------------|--------------------------------|
    /// | `HOST`                 | `0.0.0.0`                      |
    /// | `PORT`                 | `3000`                         |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`        |
    /// | `REQUEST_TIMEOUT_SECS` | `180`                          |
    /// | `N8N_WEBHOOK_URL`      | the built-in webhook fallback  |
    /// | `FORWARD_STRATEGY`     | `raw` (`raw` or `url`)         |
    /// | `STORAGE_UPLOAD_URL`   | -- (required when `url`)       |
    /// | `STORAGE_API_KEY`      | -- (optional)                  |
    ///
    /// Panics on malformed values or a missing `STORAGE_UPLOAD_URL` in
    /// URL mode; misconfiguration should fail at startup, not later.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "180".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let webhook_url =
            std::env::var("N8N_WEBHOOK_URL").unwrap_or_else(|_| DEFAULT_WEBHOOK_URL.into());

        let forward_mode = match std::env::var("FORWARD_STRATEGY")
            .unwrap_or_else(|_| "raw".into())
            .to_lowercase()
            .as_str()
        {
            "raw" => ForwardMode::Raw,
            "url" => ForwardMode::Url,
            other => panic!("FORWARD_STRATEGY must be 'raw' or 'url', got '{other}'"),
        };

        let storage_upload_url = std::env::var("STORAGE_UPLOAD_URL").ok();
        let storage_api_key = std::env::var("STORAGE_API_KEY").ok();

        if forward_mode == ForwardMode::Url && storage_upload_url.is_none() {
            panic!("STORAGE_UPLOAD_URL must be set when FORWARD_STRATEGY=url");
        }

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            webhook_url,
            forward_mode,
            storage_upload_url,
            storage_api_key,
        }
    }
}
