use std::convert::{TryFrom, TryInto};
use std::time::Duration;

use config::{Config, ConfigError};
use serde::Deserialize;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    /// Base URL used to compose shareable invitation links.
    pub base_url: String,
    pub jwt_secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub path: String,
    pub create_if_missing: bool,
}

impl DatabaseSettings {
    ///
    /// Get [SqliteConnectOptions](sqlx::sqlite::SqliteConnectOptions) for the configured database file.
    ///
    pub fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(self.create_if_missing)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true)
    }
}

///
/// Available settings environments
///
#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
    Testing,
}

impl Environment {
    ///
    /// Get the string representation for an enum.
    /// This can be used to load the settings files.
    ///
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
            Environment::Testing => "testing",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            "testing" => Ok(Self::Testing),
            other => Err(format!("Unknown environment {:?}!", other)),
        }
    }
}

///
/// Get an instance of the settings.
///
/// This uses the current `APP_ENV` to dertermine the settings file to load.
///
pub fn get_settings() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir().expect("Error while getting current directory");
    let settings_directory = base_path.join("./settings");

    let environment: Environment = std::env::var("APP_ENV")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENV");

    let builder = Config::builder()
        .add_source(config::File::from(settings_directory.join("base")).required(true))
        .add_source(
            config::File::from(settings_directory.join(environment.as_str())).required(true),
        )
        .add_source(config::Environment::with_prefix("app").separator("__"));

    match builder.build() {
        Ok(config) => config.try_deserialize(),
        Err(error) => panic!("Error building config: {error:?}"),
    }
}
