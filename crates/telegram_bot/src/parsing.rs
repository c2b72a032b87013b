use std::sync::LazyLock;

use engine::{CATEGORY_MAX_LEN, DESCRIPTION_MAX_LEN, Money, TransactionKind};
use regex::Regex;

/// `<sign><amount> <category> [description...]`, anchored on both ends.
#[allow(clippy::expect_used)]
static TRANSACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-])([0-9]+(?:\.[0-9]{1,2})?)\s+(\w+)(?:\s+(.+))?$")
        .expect("transaction pattern is valid")
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ParsedTransaction {
    pub kind: TransactionKind,
    pub amount: Money,
    pub category: String,
    pub description: Option<String>,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ParseError {
    #[error("Invalid format")]
    InvalidFormat,
    #[error("Invalid amount")]
    InvalidAmount,
    #[error("Category is too long (max {} characters)", CATEGORY_MAX_LEN)]
    CategoryTooLong,
    #[error("Description is too long (max {} characters)", DESCRIPTION_MAX_LEN)]
    DescriptionTooLong,
}

/// Parses a free-text message into a transaction draft.
///
/// - `+100 salary` => Income
/// - `-50 food lunch` => Expense with description `lunch`
///
/// The whole (trimmed) message must match: anything else is rejected, the
/// parser never returns a partial result.
pub(crate) fn parse_transaction(input: &str) -> Result<ParsedTransaction, ParseError> {
    let text = input.trim();
    let caps = TRANSACTION_RE
        .captures(text)
        .ok_or(ParseError::InvalidFormat)?;

    let kind = match &caps[1] {
        "+" => TransactionKind::Income,
        _ => TransactionKind::Expense,
    };

    let amount: Money = caps[2].parse().map_err(|_| ParseError::InvalidAmount)?;
    if !amount.is_positive() {
        return Err(ParseError::InvalidAmount);
    }

    let category = caps[3].to_string();
    if category.chars().count() > CATEGORY_MAX_LEN {
        return Err(ParseError::CategoryTooLong);
    }

    let description = caps.get(4).map(|m| m.as_str().to_string());
    if description
        .as_deref()
        .is_some_and(|d| d.chars().count() > DESCRIPTION_MAX_LEN)
    {
        return Err(ParseError::DescriptionTooLong);
    }

    Ok(ParsedTransaction {
        kind,
        amount,
        category,
        description,
    })
}
