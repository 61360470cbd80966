use anyhow::Context;
use std::net::{IpAddr, SocketAddr};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

/// Runtime settings, read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServiceConfig {
    pub(crate) addr: SocketAddr,
    /// RocksDB directory. `None` keeps wishes in memory.
    pub(crate) db_path: Option<String>,
    /// Directory with the built page, served for every non-API path.
    pub(crate) static_dir: Option<String>,
}

impl ServiceConfig {
    pub(crate) fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = non_empty("WISH_SERVICE_ADDR").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let host: IpAddr = host
            .trim()
            .parse()
            .with_context(|| format!("invalid WISH_SERVICE_ADDR: {host}"))?;

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("invalid PORT: {raw}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            addr: SocketAddr::new(host, port),
            db_path: non_empty("WISH_DB_PATH"),
            static_dir: non_empty("WISH_STATIC_DIR"),
        })
    }
}
