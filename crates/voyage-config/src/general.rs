//! General application configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// User ID acting as the caller when `--user` is not given. Empty means none.
    #[serde(default)]
    pub default_user: String,

    /// `tracing` filter directive. Empty means the CLI chooses from `--quiet`/`--verbose`.
    #[serde(default)]
    pub log_filter: String,
}

impl GeneralConfig {
    /// The configured default caller, if any.
    pub fn default_user(&self) -> Option<&str> {
        let user = self.default_user.trim();
        if user.is_empty() { None } else { Some(user) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert!(config.default_user().is_none());
        assert!(config.log_filter.is_empty());
    }

    #[test]
    fn blank_default_user_is_none() {
        let config = GeneralConfig {
            default_user: "   ".into(),
            ..Default::default()
        };
        assert!(config.default_user().is_none());
    }
}
