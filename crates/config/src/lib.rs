pub mod settings;

pub use settings::{ContentSettings, DatabaseSettings, NotificationSettings, Settings};
