//! Shell configuration (environment variables on native builds).

use std::path::PathBuf;

use stockbook_infra::StorageKeys;
use stockbook_observability::{LogFormat, ObservabilityConfig};

pub const ENV_DATA_FILE: &str = "STOCKBOOK_DATA_FILE";
pub const ENV_INVENTORY_KEY: &str = "STOCKBOOK_INVENTORY_KEY";
pub const ENV_PROFIT_KEY: &str = "STOCKBOOK_PROFIT_KEY";
pub const ENV_LOG_FORMAT: &str = "STOCKBOOK_LOG_FORMAT";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellConfig {
    pub keys: StorageKeys,
    /// File backend location; `None` means the OS data directory default.
    pub data_file: Option<PathBuf>,
    pub observability: ObservabilityConfig,
}

impl ShellConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any variable lookup. Unset or blank values keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = var(ENV_DATA_FILE) {
            config.data_file = Some(PathBuf::from(path));
        }
        if let Some(key) = var(ENV_INVENTORY_KEY) {
            config.keys.inventory = key;
        }
        if let Some(key) = var(ENV_PROFIT_KEY) {
            config.keys.profit = key;
        }
        if let Some(format) = var(ENV_LOG_FORMAT).and_then(|v| LogFormat::parse(&v)) {
            config.observability.format = format;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_match_browser_layout() {
        let config = ShellConfig::from_lookup(lookup(&[]));
        assert_eq!(config.keys.inventory, "inventoryData");
        assert_eq!(config.keys.profit, "totalProfit");
        assert_eq!(config.data_file, None);
        assert_eq!(config.observability.format, LogFormat::Json);
    }

    #[test]
    fn env_overrides_apply() {
        let config = ShellConfig::from_lookup(lookup(&[
            (ENV_DATA_FILE, "/tmp/stockbook.json"),
            (ENV_INVENTORY_KEY, "shop.items"),
            (ENV_PROFIT_KEY, "shop.profit"),
            (ENV_LOG_FORMAT, "pretty"),
        ]));
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/stockbook.json")));
        assert_eq!(config.keys.inventory, "shop.items");
        assert_eq!(config.keys.profit, "shop.profit");
        assert_eq!(config.observability.format, LogFormat::Pretty);
    }

    #[test]
    fn blank_and_unknown_values_keep_defaults() {
        let config = ShellConfig::from_lookup(lookup(&[
            (ENV_INVENTORY_KEY, "  "),
            (ENV_LOG_FORMAT, "xml"),
        ]));
        assert_eq!(config.keys.inventory, "inventoryData");
        assert_eq!(config.observability.format, LogFormat::Json);
    }
}
