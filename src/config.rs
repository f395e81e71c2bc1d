use secrecy::Secret;
use serde::Deserialize;

/// Default AeroAPI endpoint; override for testing or a proxy.
const DEFAULT_AEROAPI_BASE_URL: &str = "https://aeroapi.flightaware.com/aeroapi";

const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,

    // FlightAware AeroAPI (flight schedule lookup). Without a key the
    // lookup endpoint reports itself unconfigured; everything else works.
    pub aeroapi_base_url: String,
    pub aeroapi_key: Option<Secret<String>>,
    pub lookup_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        // Load .env file if it exists (for local development)
        let _ = dotenvy::dotenv();

        let config = config::Config::builder()
            .add_source(config::Environment::default().separator("__"))
            .build()?;

        Ok(Self {
            host: config.get("host").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: config.get("port").unwrap_or(8080),

            aeroapi_base_url: config
                .get("aeroapi_base_url")
                .unwrap_or_else(|_| DEFAULT_AEROAPI_BASE_URL.to_string()),
            aeroapi_key: config.get::<String>("aeroapi_key").ok().map(Secret::new),
            lookup_timeout_secs: config
                .get("lookup_timeout_secs")
                .unwrap_or(DEFAULT_LOOKUP_TIMEOUT_SECS),
        })
    }
}
