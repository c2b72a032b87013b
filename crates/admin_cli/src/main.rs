use std::error::Error;

use clap::{Args, Parser, Subcommand};
use telegram_bot::webhook;
use teloxide::{prelude::*, types::ChatId};

#[derive(Parser, Debug)]
#[command(name = "moneybot_admin")]
#[command(about = "Operator utilities for the money bot (webhook setup, token check)")]
struct Cli {
    /// Bot token from @BotFather (also read from `TELEGRAM_BOT_TOKEN`).
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    token: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Webhook(Webhook),
    /// Verify the token and send a test message to the operator chat.
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct Webhook {
    #[command(subcommand)]
    command: WebhookCommand,
}

#[derive(Subcommand, Debug)]
enum WebhookCommand {
    /// Point Telegram at `url`, e.g. https://your-app.example.com/telegram
    Set(WebhookSetArgs),
    /// Show the webhook Telegram currently delivers to.
    Info,
    /// Remove the webhook.
    Delete,
}

#[derive(Args, Debug)]
struct WebhookSetArgs {
    url: String,
    /// Echoed by Telegram in `X-Telegram-Bot-Api-Secret-Token`.
    #[arg(long, env = "MONEYBOT__SERVER__SECRET_TOKEN", hide_env_values = true)]
    secret_token: Option<String>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Chat that receives the test message (also read from `TELEGRAM_CHAT_ID`).
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    chat_id: Option<i64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();
    let bot = teloxide::Bot::new(&cli.token);

    match cli.command {
        Command::Webhook(Webhook {
            command: WebhookCommand::Set(args),
        }) => {
            println!("🔧 Setting webhook to: {}", args.url);
            webhook::set_webhook(&bot, &args.url, args.secret_token.as_deref()).await?;
            println!("✅ Webhook set successfully!");
            println!("📡 Webhook URL: {}", args.url);
        }
        Command::Webhook(Webhook {
            command: WebhookCommand::Info,
        }) => {
            let info = webhook::webhook_info(&bot).await?;
            let url = info
                .url
                .as_ref()
                .map_or_else(|| "Not set".to_string(), |url| url.to_string());
            println!("📡 Current webhook information:");
            println!("   URL: {url}");
            println!("   Has custom certificate: {}", info.has_custom_certificate);
            println!("   Pending update count: {}", info.pending_update_count);
            if let Some(date) = info.last_error_date {
                println!("   Last error date: {date}");
            }
            if let Some(message) = &info.last_error_message {
                println!("   Last error message: {message}");
            }
        }
        Command::Webhook(Webhook {
            command: WebhookCommand::Delete,
        }) => {
            webhook::delete_webhook(&bot).await?;
            println!("✅ Webhook deleted successfully!");
        }
        Command::Check(args) => {
            let me = webhook::whoami(&bot).await?;
            println!("✅ Bot connected successfully!");
            println!("🤖 Bot name: {}", me.user.first_name);
            println!("📝 Bot username: @{}", me.username());
            println!("🆔 Bot ID: {}", me.user.id);

            match args.chat_id {
                Some(chat_id) => {
                    bot.send_message(
                        ChatId(chat_id),
                        "🧪 Test message from your Money Management Bot!",
                    )
                    .await?;
                    println!("✅ Test message sent to chat {chat_id}");
                }
                None => println!("ℹ️ No chat id given, skipping the test message"),
            }
        }
    }

    Ok(())
}
