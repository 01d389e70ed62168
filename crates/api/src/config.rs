use std::str::FromStr;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// `*` mirrors any request origin.
    pub cors_origins: Vec<String>,
    /// Whole-request timeout in seconds (default: `600`).
    pub request_timeout_secs: u64,
    /// Extraction engine timeout in seconds (default: `120`).
    pub extract_timeout_secs: u64,
    /// Relay upstream fetch timeout in seconds (default: `300`).
    pub fetch_timeout_secs: u64,
    /// Path or name of the yt-dlp binary (default: `yt-dlp`).
    pub ytdlp_path: String,
    /// Largest upstream body the relay will buffer. `None` means unbounded.
    pub max_download_bytes: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["*".to_string()],
            request_timeout_secs: 600,
            extract_timeout_secs: 120,
            fetch_timeout_secs: 300,
            ytdlp_path: vidgrab_extractor::ytdlp::DEFAULT_BINARY.to_string(),
            max_download_bytes: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default   |
    /// |------------------------|-----------|
    /// | `HOST`                 | `0.0.0.0` |
    /// | `PORT`                 | `8000`    |
    /// | `CORS_ORIGINS`         | `*`       |
    /// | `REQUEST_TIMEOUT_SECS` | `600`     |
    /// | `EXTRACT_TIMEOUT_SECS` | `120`     |
    /// | `FETCH_TIMEOUT_SECS`   | `300`     |
    /// | `YTDLP_PATH`           | `yt-dlp`  |
    /// | `MAX_DOWNLOAD_BYTES`   | unset     |
    ///
    /// Panics on unparseable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let cors_origins = match std::env::var("CORS_ORIGINS") {
            Ok(raw) => split_origins(&raw),
            Err(_) => defaults.cors_origins,
        };

        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: env_parse("PORT", defaults.port),
            cors_origins,
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
            extract_timeout_secs: env_parse("EXTRACT_TIMEOUT_SECS", defaults.extract_timeout_secs),
            fetch_timeout_secs: env_parse("FETCH_TIMEOUT_SECS", defaults.fetch_timeout_secs),
            ytdlp_path: std::env::var("YTDLP_PATH").unwrap_or(defaults.ytdlp_path),
            max_download_bytes: std::env::var("MAX_DOWNLOAD_BYTES")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| {
                    v.trim()
                        .parse()
                        .unwrap_or_else(|e| panic!("MAX_DOWNLOAD_BYTES must be a valid u64: {e}"))
                }),
        }
    }

    /// Whether CORS should accept any origin.
    pub fn cors_allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid {}: {e}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
