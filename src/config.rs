use anyhow::{anyhow, Context};
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub db_pool_size: u32,
    pub slot_interval_minutes: u32,
    pub session_ttl_secs: i64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or_else(|| anyhow!("DATABASE_URL not found"))?;
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "127.0.0.1:8080".to_string());
        let db_pool_size = parse_or(&lookup, "DB_POOL_SIZE", 10)?;
        let slot_interval_minutes = parse_or(&lookup, "SLOT_INTERVAL_MINUTES", 60)?;
        let session_ttl_secs = parse_or(&lookup, "SESSION_TTL_SECS", 3600)?;

        if slot_interval_minutes == 0 {
            return Err(anyhow!("SLOT_INTERVAL_MINUTES must be positive"));
        }
        if db_pool_size == 0 {
            return Err(anyhow!("DB_POOL_SIZE must be positive"));
        }

        Ok(Self {
            database_url,
            bind_addr,
            db_pool_size,
            slot_interval_minutes,
            session_ttl_secs,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {}: {:?}", key, raw)),
        None => Ok(default),
    }
}
