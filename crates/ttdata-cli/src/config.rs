use std::path::PathBuf;

pub const ENDPOINT_ENV: &str = "TTDATA_ENDPOINT";
pub const DEVICE_ID_ENV: &str = "TTDATA_DEVICE_ID";
pub const LOG_DIR_ENV: &str = "TTDATA_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_endpoint: String,
    /// Use a fresh id per run; the server keeps data per device.
    pub device_id: String,
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_endpoint: String::from("http://ixinbuy.com:7061"),
            device_id: String::from("test-ttdata-20200610"),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl Config {
    /// Defaults overridden by `TTDATA_ENDPOINT`, `TTDATA_DEVICE_ID` and `TTDATA_LOG_DIR`.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |name: &str| lookup(name).filter(|value| !value.is_empty());

        if let Some(endpoint) = lookup(ENDPOINT_ENV) {
            self.api_endpoint = endpoint;
        }
        if let Some(device_id) = lookup(DEVICE_ID_ENV) {
            self.device_id = device_id;
        }
        if let Some(log_dir) = lookup(LOG_DIR_ENV) {
            self.log_dir = PathBuf::from(log_dir);
        }
        self
    }
}
