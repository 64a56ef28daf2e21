// config.rs
use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    /// No URL means the in-memory store.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub port: u16,
    pub media_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: None,
            max_connections: 10,
            port: 8000,
            media_url: "/media/".to_string(),
        }
    }
}

impl Config {
    pub fn init() -> anyhow::Result<Config> {
        let defaults = Config::default();

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let port = match std::env::var("PORT") {
            Ok(port) => port
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {:?}", port))?,
            Err(_) => defaults.port,
        };

        let max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(max) => max
                .parse::<u32>()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS must be a number, got {:?}", max))?,
            Err(_) => defaults.max_connections,
        };

        let media_url = std::env::var("MEDIA_URL").unwrap_or(defaults.media_url);

        Ok(Config {
            database_url,
            max_connections,
            port,
            media_url,
        })
    }
}
