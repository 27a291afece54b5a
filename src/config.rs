use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub mongo_uri: String,
    pub db_name: String,
    pub session_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let mongo_uri = env_required("MONGO_URI")?;
        let session_secret = env_required("SESSION_SECRET")?;
        let db_name = env_or("INVODASH_DB_NAME", "invodash");

        let host: IpAddr = env_or("INVODASH_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid INVODASH_HOST: {e}"))?;

        let port: u16 = env_or("INVODASH_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid INVODASH_PORT: {e}"))?;

        let log_level = env_or("INVODASH_LOG_LEVEL", "info");

        Ok(Config {
            mongo_uri,
            db_name,
            session_secret,
            host,
            port,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
