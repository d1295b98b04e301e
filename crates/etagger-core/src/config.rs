use anyhow::Result;
use config::Config;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub etag: EtagConfig,
}

/// Host-level defaults for tag generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct EtagConfig {
    /// Forces every generated tag weak (`true`) or strong (`false`).
    /// Unset keeps the per-entity default.
    pub weak: Option<bool>,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional
    /// `etagger.toml` into a `Settings`.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::load_with(config::File::with_name("etagger.toml").required(false))
    }

    /// Layers environment variables over `file`.
    fn load_with(file: impl config::Source + Send + Sync + 'static) -> Result<Self> {
        let settings = Config::builder()
            // TOML file
            .add_source(file)
            // Env
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        tracing::debug!(weak = ?settings.etag.weak, "Loaded etag settings");

        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use super::*;
    use config::FileFormat;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Holds the env lock with `ETAG_WEAK` set, clearing it on drop.
    struct WeakEnv {
        _guard: MutexGuard<'static, ()>,
    }

    impl WeakEnv {
        fn set(value: &str) -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
            // SAFETY: every test touching the environment holds `ENV_LOCK`.
            unsafe { std::env::set_var("ETAG_WEAK", value) };
            Self { _guard: guard }
        }
    }

    impl Drop for WeakEnv {
        fn drop(&mut self) {
            // SAFETY: the lock is still held until `_guard` drops after this.
            unsafe { std::env::remove_var("ETAG_WEAK") };
        }
    }

    fn toml_file(source: &'static str) -> impl config::Source + Send + Sync + 'static {
        config::File::from_str(source, FileFormat::Toml)
    }

    fn from_toml(source: &'static str) -> anyhow::Result<Settings> {
        Ok(Config::builder()
            .add_source(toml_file(source))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    #[test_log::test]
    fn weak_override_from_toml() -> anyhow::Result<()> {
        let settings = from_toml("[etag]\nweak = true\n")?;
        assert_eq!(settings.etag.weak, Some(true));

        let settings = from_toml("[etag]\nweak = false\n")?;
        assert_eq!(settings.etag.weak, Some(false));
        Ok(())
    }

    #[test]
    fn missing_section_keeps_defaults() -> anyhow::Result<()> {
        let settings = from_toml("")?;
        assert_eq!(settings.etag, EtagConfig::default());
        assert!(settings.etag.weak.is_none());
        Ok(())
    }

    #[test_log::test]
    fn load_reads_weak_from_env() -> anyhow::Result<()> {
        let env = WeakEnv::set("true");
        assert_eq!(Settings::load()?.etag.weak, Some(true));
        drop(env);

        let _env = WeakEnv::set("false");
        assert_eq!(Settings::load()?.etag.weak, Some(false));
        Ok(())
    }

    #[test]
    fn env_overrides_file() -> anyhow::Result<()> {
        let _env = WeakEnv::set("false");
        let settings = Settings::load_with(toml_file("[etag]\nweak = true\n"))?;
        assert_eq!(settings.etag.weak, Some(false));
        Ok(())
    }

    #[test]
    fn file_applies_without_env() -> anyhow::Result<()> {
        let _lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let settings = Settings::load_with(toml_file("[etag]\nweak = true\n"))?;
        assert_eq!(settings.etag.weak, Some(true));
        Ok(())
    }

    #[test]
    fn load_config_reads_env() -> anyhow::Result<()> {
        let _env = WeakEnv::set("true");
        assert_eq!(load_config()?.etag.weak, Some(true));
        Ok(())
    }

    #[test]
    fn rejects_non_boolean_weak() {
        assert!(from_toml("[etag]\nweak = \"sometimes\"\n").is_err());
    }
}
