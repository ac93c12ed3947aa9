use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub content: ContentSettings,
    pub notifications: NotificationSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub path: String,
    pub busy_timeout_ms: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentSettings {
    pub max_length: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationSettings {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .prefix("CRIER"),
            )
            .set_default("database.path", "crier.db")?
            .set_default("database.busy_timeout_ms", 5000)?
            .set_default("content.max_length", 65536)?
            .set_default("notifications.default_page_size", 25)?
            .set_default("notifications.max_page_size", 100)?
            .build()?;

        config.try_deserialize()
    }
}
