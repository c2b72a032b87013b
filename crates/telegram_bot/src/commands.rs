//! Slash commands and their argument validation.

use std::ops::RangeInclusive;

use crate::BotError;

/// Accepted lookback for `/summary`, in days.
pub const SUMMARY_DAYS: RangeInclusive<u32> = 1..=365;
/// Accepted number of rows for `/transactions`.
pub const TRANSACTIONS_LIMIT: RangeInclusive<u64> = 1..=50;

/// Values used when an optional command argument is omitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandDefaults {
    pub summary_days: u32,
    pub transactions_limit: u64,
}

impl Default for CommandDefaults {
    fn default() -> Self {
        Self {
            summary_days: 30,
            transactions_limit: 10,
        }
    }
}

impl CommandDefaults {
    /// Defaults must satisfy the same bounds as user supplied arguments.
    pub fn validate(&self) -> Result<(), BotError> {
        if !SUMMARY_DAYS.contains(&self.summary_days) {
            return Err(BotError::Config(format!(
                "summary_days must be between {} and {}, got {}",
                SUMMARY_DAYS.start(),
                SUMMARY_DAYS.end(),
                self.summary_days
            )));
        }
        if !TRANSACTIONS_LIMIT.contains(&self.transactions_limit) {
            return Err(BotError::Config(format!(
                "transactions_limit must be between {} and {}, got {}",
                TRANSACTIONS_LIMIT.start(),
                TRANSACTIONS_LIMIT.end(),
                self.transactions_limit
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Start,
    Help,
    Summary { days: u32 },
    Transactions { limit: u64 },
    Delete { id: i64 },
    Unknown(String),
}

/// Invalid command arguments. The messages are shown to the user as-is.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum CommandError {
    #[error("Please specify days between 1 and 365.")]
    DaysOutOfRange,
    #[error("Please provide a valid number of days.")]
    InvalidDays,
    #[error("Please specify limit between 1 and 50.")]
    LimitOutOfRange,
    #[error("Please provide a valid number.")]
    InvalidLimit,
    #[error("Please provide a transaction ID to delete.\nUsage: /delete <transaction_id>")]
    MissingId,
    #[error("Please provide a valid transaction ID.")]
    InvalidId,
    #[error("Please provide a single transaction ID.\nUsage: /delete <transaction_id>")]
    TooManyIds,
}

/// Splits a slash command into its name and arguments and validates them.
///
/// Returns `None` when `text` is not a command at all (it does not start with
/// `/`), so the caller can treat it as a transaction.
pub(crate) fn parse_command(
    text: &str,
    defaults: &CommandDefaults,
) -> Option<Result<Command, CommandError>> {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    let cmd = match name {
        "/start" => Ok(Command::Start),
        "/help" => Ok(Command::Help),
        "/summary" => parse_days(args.first().copied(), defaults.summary_days)
            .map(|days| Command::Summary { days }),
        "/transactions" => parse_limit(args.first().copied(), defaults.transactions_limit)
            .map(|limit| Command::Transactions { limit }),
        "/delete" => parse_id(&args).map(|id| Command::Delete { id }),
        other => Ok(Command::Unknown(other.to_string())),
    };
    Some(cmd)
}

fn parse_days(arg: Option<&str>, default: u32) -> Result<u32, CommandError> {
    let Some(arg) = arg else {
        return Ok(default);
    };
    let days: i64 = arg.parse().map_err(|_| CommandError::InvalidDays)?;
    u32::try_from(days)
        .ok()
        .filter(|days| SUMMARY_DAYS.contains(days))
        .ok_or(CommandError::DaysOutOfRange)
}

fn parse_limit(arg: Option<&str>, default: u64) -> Result<u64, CommandError> {
    let Some(arg) = arg else {
        return Ok(default);
    };
    let limit: i64 = arg.parse().map_err(|_| CommandError::InvalidLimit)?;
    u64::try_from(limit)
        .ok()
        .filter(|limit| TRANSACTIONS_LIMIT.contains(limit))
        .ok_or(CommandError::LimitOutOfRange)
}

fn parse_id(args: &[&str]) -> Result<i64, CommandError> {
    match args {
        [] => Err(CommandError::MissingId),
        [id] => id.parse().map_err(|_| CommandError::InvalidId),
        _ => Err(CommandError::TooManyIds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Option<Result<Command, CommandError>> {
        parse_command(text, &CommandDefaults::default())
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse("+100 salary"), None);
        assert_eq!(parse("hello /help"), None);
    }

    #[test]
    fn static_commands() {
        assert_eq!(parse("/start"), Some(Ok(Command::Start)));
        assert_eq!(parse("  /help  "), Some(Ok(Command::Help)));
    }

    #[test]
    fn command_names_are_case_sensitive() {
        assert_eq!(
            parse("/Summary"),
            Some(Ok(Command::Unknown("/Summary".to_string())))
        );
        assert_eq!(parse("/foo 1"), Some(Ok(Command::Unknown("/foo".to_string()))));
    }

    #[test]
    fn summary_days_default_and_bounds() {
        assert_eq!(parse("/summary"), Some(Ok(Command::Summary { days: 30 })));
        assert_eq!(parse("/summary 7"), Some(Ok(Command::Summary { days: 7 })));
        assert_eq!(parse("/summary 365"), Some(Ok(Command::Summary { days: 365 })));
        assert_eq!(parse("/summary 400"), Some(Err(CommandError::DaysOutOfRange)));
        assert_eq!(parse("/summary 0"), Some(Err(CommandError::DaysOutOfRange)));
        assert_eq!(parse("/summary -3"), Some(Err(CommandError::DaysOutOfRange)));
        assert_eq!(parse("/summary week"), Some(Err(CommandError::InvalidDays)));
    }

    #[test]
    fn summary_ignores_trailing_arguments() {
        assert_eq!(parse("/summary 7 please"), Some(Ok(Command::Summary { days: 7 })));
    }

    #[test]
    fn transactions_limit_default_and_bounds() {
        assert_eq!(
            parse("/transactions"),
            Some(Ok(Command::Transactions { limit: 10 }))
        );
        assert_eq!(
            parse("/transactions 50"),
            Some(Ok(Command::Transactions { limit: 50 }))
        );
        assert_eq!(
            parse("/transactions 51"),
            Some(Err(CommandError::LimitOutOfRange))
        );
        assert_eq!(parse("/transactions x"), Some(Err(CommandError::InvalidLimit)));
    }

    #[test]
    fn configured_defaults_are_used() {
        let defaults = CommandDefaults {
            summary_days: 7,
            transactions_limit: 3,
        };
        assert_eq!(
            parse_command("/summary", &defaults),
            Some(Ok(Command::Summary { days: 7 }))
        );
        assert_eq!(
            parse_command("/transactions", &defaults),
            Some(Ok(Command::Transactions { limit: 3 }))
        );
    }

    #[test]
    fn delete_requires_exactly_one_integer() {
        assert_eq!(parse("/delete 42"), Some(Ok(Command::Delete { id: 42 })));
        assert_eq!(parse("/delete"), Some(Err(CommandError::MissingId)));
        assert_eq!(parse("/delete abc"), Some(Err(CommandError::InvalidId)));
        assert_eq!(parse("/delete 1 2"), Some(Err(CommandError::TooManyIds)));
    }

    #[test]
    fn defaults_are_validated_against_bounds() {
        assert!(CommandDefaults::default().validate().is_ok());
        assert!(
            CommandDefaults {
                summary_days: 0,
                transactions_limit: 10
            }
            .validate()
            .is_err()
        );
        assert!(
            CommandDefaults {
                summary_days: 30,
                transactions_limit: 51
            }
            .validate()
            .is_err()
        );
    }
}
