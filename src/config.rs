use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::query::ParseMode;

pub static CONFIG: OnceCell<Config> = OnceCell::new();

const ENV_PREFIX: &str = "ASSETLIST_";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub assetlist: String,
    pub r2d2: String,
}

impl LoggingConfig {
    const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
    const ASSETLIST_LEVEL: &str = "info";
    const R2D2_LEVEL: &str = "error";

    fn default() -> Self {
        LoggingConfig {
            assetlist: Self::ASSETLIST_LEVEL.to_string(),
            r2d2: Self::R2D2_LEVEL.to_string(),
        }
    }

    /// `flexi_logger` spec string, e.g. `assetlist=info,r2d2=error`.
    pub fn log_spec(&self) -> String {
        format!("assetlist={},r2d2={}", self.assetlist, self.r2d2)
    }

    fn ensure_valid(&mut self) {
        Self::ensure_level(&mut self.assetlist, "assetlist", Self::ASSETLIST_LEVEL);
        Self::ensure_level(&mut self.r2d2, "r2d2", Self::R2D2_LEVEL);
    }

    fn ensure_level(level: &mut String, name: &str, default: &str) {
        let str_original = level.clone();
        *level = level.trim().to_ascii_lowercase();
        if !Self::LOG_LEVELS.contains(&level.as_str()) {
            eprintln!(
                "Config error: {name} log level of '{str_original}' is invalid - \
                 using default of '{default}'"
            );
            *level = default.to_owned();
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// Directory holding the database file. Defaults to the app's local
    /// data directory.
    pub dir: Option<String>,
    pub pool_size: u32,
}

impl DatabaseConfig {
    const POOL_SIZE: u32 = 4;

    fn default() -> Self {
        DatabaseConfig {
            dir: None,
            pool_size: Self::POOL_SIZE,
        }
    }

    pub fn dir_or(&self, fallback: &Path) -> PathBuf {
        match &self.dir {
            Some(dir) => PathBuf::from(dir),
            None => fallback.to_path_buf(),
        }
    }

    fn ensure_valid(&mut self) {
        if self.pool_size == 0 {
            eprintln!("Config error: database pool_size of 0 is invalid - using 1");
            self.pool_size = 1;
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FilterConfig {
    /// Reject clauses that contain no comparison instead of dropping them.
    pub strict: bool,
}

impl FilterConfig {
    fn default() -> Self {
        FilterConfig { strict: false }
    }

    pub fn parse_mode(&self) -> ParseMode {
        match self.strict {
            true => ParseMode::Strict,
            false => ParseMode::Lenient,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
    pub filter: FilterConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            logging: LoggingConfig::default(),
            database: DatabaseConfig::default(),
            filter: FilterConfig::default(),
        }
    }
}

impl Config {
    /// Loads `config.toml` from the app's local data directory.
    pub fn load_config(project_dirs: &ProjectDirs) -> Self {
        Self::load_from(&project_dirs.data_local_dir().join("config.toml"))
    }

    /// Defaults, then the TOML file, then `ASSETLIST_` environment variables
    /// (`ASSETLIST_DATABASE__POOL_SIZE=8`). Writes the defaults to
    /// `config_path` if no file exists. Falls back to defaults if the merged
    /// configuration fails to extract.
    pub fn load_from(config_path: &Path) -> Self {
        let default_config = Config::default();

        if !config_path.exists() {
            Self::write_default(config_path, &default_config);
        }

        let figment = Figment::from(Serialized::defaults(default_config.clone()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let mut config = figment.extract().unwrap_or_else(|err| {
            eprintln!(
                "Could not load config file {}: {}. Using default configuration.",
                config_path.display(),
                err
            );
            default_config
        });

        config.ensure_valid();

        config
    }

    fn write_default(config_path: &Path, default_config: &Config) {
        if let Some(parent) = config_path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!(
                    "Failed to create configuration directory {}: {}",
                    parent.display(),
                    e
                );
            }
        }
        match toml::to_string_pretty(default_config) {
            Ok(toml_string) => {
                if let Err(e) = fs::write(config_path, toml_string) {
                    eprintln!(
                        "Failed to write default config to {}: {}",
                        config_path.display(),
                        e
                    );
                }
            }
            Err(_) => eprintln!("Failed to serialize default config."),
        }
    }

    fn ensure_valid(&mut self) {
        self.logging.ensure_valid();
        self.database.ensure_valid();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_missing_file_uses_and_writes_defaults() {
        Jail::expect_with(|jail| {
            let path = jail.directory().join("nested").join("config.toml");
            let config = Config::load_from(&path);
            assert_eq!(config, Config::default());
            assert!(path.exists());

            // The written file loads back to the same values
            assert_eq!(Config::load_from(&path), Config::default());
            Ok(())
        });
    }

    #[test]
    #[serial]
    fn test_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [logging]
                assetlist = "debug"
                r2d2 = "warn"

                [database]
                dir = "/var/lib/assetlist"
                pool_size = 8

                [filter]
                strict = true
                "#,
            )?;
            let config = Config::load_from(Path::new("config.toml"));
            assert_eq!(config.logging.log_spec(), "assetlist=debug,r2d2=warn");
            assert_eq!(config.database.dir.as_deref(), Some("/var/lib/assetlist"));
            assert_eq!(config.database.pool_size, 8);
            assert_eq!(config.filter.parse_mode(), ParseMode::Strict);
            Ok(())
        });
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[database]\npool_size = 8\n")?;
            jail.set_env("ASSETLIST_DATABASE__POOL_SIZE", "2");
            jail.set_env("ASSETLIST_FILTER__STRICT", "true");
            let config = Config::load_from(Path::new("config.toml"));
            assert_eq!(config.database.pool_size, 2);
            assert!(config.filter.strict);
            Ok(())
        });
    }

    #[test]
    #[serial]
    fn test_invalid_values_fall_back() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                "[logging]\nassetlist = \" DEBUG \"\nr2d2 = \"loud\"\n\n\
                 [database]\npool_size = 0\n",
            )?;
            let config = Config::load_from(Path::new("config.toml"));
            assert_eq!(config.logging.assetlist, "debug");
            assert_eq!(config.logging.r2d2, "error");
            assert_eq!(config.database.pool_size, 1);
            Ok(())
        });
    }

    #[test]
    #[serial]
    fn test_unparseable_file_uses_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[database]\npool_size = \"many\"\n")?;
            let config = Config::load_from(Path::new("config.toml"));
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_dir_fallback() {
        let config = Config::default();
        assert_eq!(
            config.database.dir_or(Path::new("/data")),
            PathBuf::from("/data")
        );
    }
}
