//! Runtime configuration

use std::env;
use std::path::{Path, PathBuf};

use crate::domain::session::Theme;

/// Settings the embedding application can override through the environment:
/// `SALONE_DATA_DIR` for the durable store location and
/// `SALONE_DEFAULT_THEME` for the theme used before a visitor picks one.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub default_theme: Theme,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            default_theme: Theme::Light,
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let data_dir = env::var("SALONE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));
        let default_theme = env::var("SALONE_DEFAULT_THEME")
            .map(|name| Theme::from_name(&name))
            .unwrap_or(Theme::Light);
        Self {
            data_dir,
            default_theme,
        }
    }

    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Path of the durable store file inside the data directory.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("market.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.store_path(), PathBuf::from("data/market.json"));
        assert_eq!(config.default_theme, Theme::Light);
    }

    #[test]
    fn test_env_overrides() {
        env::set_var("SALONE_DATA_DIR", "/tmp/salone-test");
        env::set_var("SALONE_DEFAULT_THEME", "dark");
        let config = StoreConfig::from_env();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/salone-test"));
        assert_eq!(config.default_theme, Theme::Dark);
        env::remove_var("SALONE_DATA_DIR");
        env::remove_var("SALONE_DEFAULT_THEME");
    }
}
