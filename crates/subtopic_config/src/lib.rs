pub mod settings;

use crate::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::Settings;

pub use settings::{StoreSettings, SyncSettings};

pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::default().separator("_"));

    let config = builder.build()?;
    let partial: PartialSettings = config.try_deserialize()?;
    let default = Settings::default();

    Ok(Settings {
        sync: SyncSettings {
            freshness_window_secs: partial
                .sync
                .as_ref()
                .and_then(|s| s.freshness_window_secs)
                .unwrap_or(default.sync.freshness_window_secs),
        },
        store: StoreSettings {
            collection: partial
                .store
                .as_ref()
                .and_then(|s| s.collection.clone())
                .unwrap_or(default.store.collection),
        },
    })
}

#[cfg(test)]
mod env_tests {
    use super::*;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_from_file_overrides_defaults() {
        // Create a temporary directory and set it as current dir so load_config
        // will pick up config/default.toml from there.
        let tmp = TempDir::new().expect("create tempdir");
        let orig = env::current_dir().expect("current_dir");
        env::set_current_dir(tmp.path()).expect("set current dir");

        // create config dir and default.toml
        fs::create_dir_all("config").expect("create config dir");
        let toml = r#"
            [sync]
            freshness_window_secs = 60

            [store]
            collection = "boards"
        "#;
        fs::write("config/default.toml", toml).expect("write config file");

        let cfg = load_config().expect("load_config failed");
        assert_eq!(cfg.sync.freshness_window_secs, 60);
        assert_eq!(cfg.sync.freshness_window_ms(), 60_000);
        assert_eq!(cfg.store.collection, "boards");

        // restore cwd
        env::set_current_dir(orig).expect("restore cwd");
    }

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.sync.freshness_window_secs, 300);
        assert_eq!(settings.sync.freshness_window_ms(), 5 * 60 * 1000);
        assert_eq!(settings.store.collection, "topics");
    }
}
