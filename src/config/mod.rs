use std::env;

/// Process configuration, loaded once in each binary's `main` and moved
/// into the app state. Everything is injected via environment variables;
/// the bind address and port can additionally be overridden on the
/// command line.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Full PostgreSQL connection URL. Required by the notes app only,
    /// so absence is surfaced at pool creation, not here.
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC secret for session tokens.
    pub secret: String,
    pub ttl_hours: i64,
}

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Upstream API key. Required by the weather app only.
    pub api_key: Option<String>,
    pub base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::defaults().with_env_overrides()
    }

    fn defaults() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 8080,
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                acquire_timeout_secs: 5,
            },
            session: SessionConfig {
                // Development fallback; any real deployment sets SESSION_SECRET.
                secret: "dev-secret-change-me".to_string(),
                ttl_hours: 24,
            },
            weather: WeatherConfig {
                api_key: None,
                base_url: "https://api.openweathermap.org/data/2.5/weather".to_string(),
            },
        }
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("BIND_ADDR") {
            self.bind_addr = v;
        }
        if let Ok(v) = env::var("PORT") {
            self.port = v.parse().unwrap_or(self.port);
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            self.database.acquire_timeout_secs =
                v.parse().unwrap_or(self.database.acquire_timeout_secs);
        }
        if let Ok(v) = env::var("SESSION_SECRET") {
            self.session.secret = v;
        }
        if let Ok(v) = env::var("SESSION_TTL_HOURS") {
            self.session.ttl_hours = v.parse().unwrap_or(self.session.ttl_hours);
        }
        if let Ok(v) = env::var("WEATHER_API_KEY") {
            self.weather.api_key = Some(v);
        }
        if let Ok(v) = env::var("WEATHER_BASE_URL") {
            self.weather.base_url = v;
        }
        self
    }
}
