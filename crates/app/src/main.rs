use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use settings::Database;
use telegram_bot::CommandDefaults;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "moneybot={level},telegram_bot={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    tracing::info!("Starting Money Management Bot...");

    if !settings.server.webhook_path.starts_with('/') {
        return Err(format!(
            "server.webhook_path must start with '/', got {:?}",
            settings.server.webhook_path
        )
        .into());
    }

    let db = parse_database(&settings.database).await?;
    let engine = engine::Engine::builder().database(db).build().await?;

    let telegram = &settings.telegram;
    let bot = telegram_bot::Bot::builder()
        .token(&telegram.token)
        .admin_chat(telegram.admin_chat_id)
        .allowed_users(telegram.allowed_users.clone())
        .defaults(CommandDefaults::from(&settings.commands))
        .timezone(&telegram.timezone)
        .engine(Arc::new(engine))
        .build()?;

    match &telegram.webhook_url {
        Some(url) => {
            if let Err(err) = bot
                .register_webhook(url, settings.server.secret_token.as_deref())
                .await
            {
                tracing::error!("failed to register webhook {url}: {err}");
            }
        }
        None => tracing::warn!("telegram.webhook_url not set, assuming the webhook is managed elsewhere"),
    }

    let state = server::ServerState {
        dispatcher: Arc::new(bot.dispatcher()),
        secret_token: settings.server.secret_token.clone(),
    };

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    bot.announce_startup().await;

    server::run_with_listener(state, &settings.server.webhook_path, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    tracing::info!("Database initialized");
    Ok(database)
}
