//! Handles settings for the application. Configuration is read from
//! `config/settings.toml` (optional) and overridden by environment
//! variables prefixed with `MONEYBOT`, e.g. `MONEYBOT__TELEGRAM__TOKEN`.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use telegram_bot::CommandDefaults;

const DEFAULT_CONFIG_PATH: &str = "config/settings";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Default for Database {
    fn default() -> Self {
        Database::Sqlite("money_bot.db".to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub webhook_path: String,
    pub secret_token: Option<String>,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8000,
            webhook_path: "/telegram".to_string(),
            secret_token: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Telegram {
    pub token: String,
    pub admin_chat_id: Option<i64>,
    pub webhook_url: Option<String>,
    #[serde(default)]
    pub allowed_users: Vec<i64>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Commands {
    pub summary_days: u32,
    pub transactions_limit: u64,
}

impl Default for Commands {
    fn default() -> Self {
        let defaults = CommandDefaults::default();
        Self {
            summary_days: defaults.summary_days,
            transactions_limit: defaults.transactions_limit,
        }
    }
}

impl From<&Commands> for CommandDefaults {
    fn from(value: &Commands) -> Self {
        CommandDefaults {
            summary_days: value.summary_days,
            transactions_limit: value.transactions_limit,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub database: Database,
    #[serde(default)]
    pub server: Server,
    pub telegram: Telegram,
    #[serde(default)]
    pub commands: Commands,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder().add_source(File::with_name(DEFAULT_CONFIG_PATH).required(false)),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let settings = builder
            .add_source(
                Environment::with_prefix("MONEYBOT")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("telegram.allowed_users")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Result<Settings, ConfigError> {
        Settings::from_builder(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn minimal_file_gets_defaults() {
        let settings = parse("[telegram]\ntoken = \"123:abc\"\n").unwrap();

        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.database, Database::Sqlite("money_bot.db".to_string()));
        assert_eq!(settings.server.bind, "0.0.0.0");
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.server.webhook_path, "/telegram");
        assert_eq!(settings.server.secret_token, None);
        assert_eq!(settings.telegram.timezone, "UTC");
        assert!(settings.telegram.allowed_users.is_empty());
        assert_eq!(
            CommandDefaults::from(&settings.commands),
            CommandDefaults::default()
        );
    }

    #[test]
    fn full_file_is_honoured() {
        let settings = parse(
            r#"
            database = "memory"

            [server]
            port = 9000
            secret_token = "s3cret"

            [telegram]
            token = "123:abc"
            admin_chat_id = -100
            allowed_users = [1, 2]
            timezone = "Europe/Rome"

            [commands]
            summary_days = 7
            transactions_limit = 5
            "#,
        )
        .unwrap();

        assert_eq!(settings.database, Database::Memory);
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.secret_token.as_deref(), Some("s3cret"));
        assert_eq!(settings.telegram.admin_chat_id, Some(-100));
        assert_eq!(settings.telegram.allowed_users, vec![1, 2]);
        assert_eq!(settings.commands.summary_days, 7);
        assert_eq!(settings.commands.transactions_limit, 5);
    }

    #[test]
    fn sqlite_path_is_a_table() {
        let settings = parse(
            "[database]\nsqlite = \"/var/lib/moneybot.db\"\n[telegram]\ntoken = \"t\"\n",
        )
        .unwrap();
        assert_eq!(
            settings.database,
            Database::Sqlite("/var/lib/moneybot.db".to_string())
        );
    }

    #[test]
    fn token_is_required() {
        assert!(parse("[server]\nport = 8000\n").is_err());
    }
}
