use chrono_tz::Tz;
use engine::{Summary, Transaction, TransactionKind};

use crate::parsing::ParseError;

/// Telegram rejects messages longer than this many UTF-16 code units.
pub(crate) const MAX_MESSAGE_LEN: usize = 4096;

pub(crate) const UNKNOWN_COMMAND: &str = "Unknown command. Use /help for available commands.";
pub(crate) const NO_TRANSACTIONS: &str = "No transactions found.";
pub(crate) const DELETE_REFUSED: &str =
    "❌ Transaction not found or you don't have permission to delete it.";
pub(crate) const INTERNAL_ERROR: &str = "❌ Something went wrong. Please try again.";
pub(crate) const STARTUP: &str =
    "🚀 Money Management Bot is now online and ready to track your finances!";

pub(crate) fn welcome_text() -> &'static str {
    "💰 Welcome to your Personal Money Management Bot!\n\
     \n\
     📝 Add transactions:\n\
     • +100 salary (add income)\n\
     • -50 food (add expense)\n\
     • +2000 bonus work bonus (add income with description)\n\
     \n\
     📊 View summaries:\n\
     • /summary - Last 30 days summary\n\
     • /summary 7 - Last 7 days summary\n\
     \n\
     📋 View recent transactions:\n\
     • /transactions - Last 10 transactions\n\
     • /transactions 5 - Last 5 transactions\n\
     \n\
     🗑️ Delete transaction:\n\
     • /delete <transaction_id>\n\
     \n\
     Start tracking your money now! 💸"
}

pub(crate) fn help_text() -> &'static str {
    "🤖 Money Management Bot Help\n\
     \n\
     📝 Adding Transactions:\n\
     • Use + for income: +100 salary\n\
     • Use - for expenses: -50 food\n\
     • Add description: +2000 bonus work bonus\n\
     \n\
     📊 Commands:\n\
     • /start - Welcome message\n\
     • /help - This help message\n\
     • /summary [days] - Financial summary (1-365 days)\n\
     • /transactions [count] - Recent transactions (1-50)\n\
     • /delete <id> - Delete transaction\n\
     \n\
     💡 Tips:\n\
     • Categories are a single word and help organize expenses\n\
     • Descriptions provide context\n\
     • Use /summary to track your progress"
}

pub(crate) fn render_parse_error(err: &ParseError) -> String {
    format!(
        "❌ {err}. Use:\n\
         • +100 salary (income)\n\
         • -50 food (expense)\n\
         • +2000 bonus work bonus (with description)"
    )
}

fn kind_emoji(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "💰",
        TransactionKind::Expense => "💸",
    }
}

fn kind_label(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "Income",
        TransactionKind::Expense => "Expense",
    }
}

pub(crate) fn render_created(tx: &Transaction) -> String {
    let mut text = format!(
        "{} Transaction added successfully!\n\nAmount: {}\nType: {}\n",
        kind_emoji(tx.kind),
        tx.amount,
        kind_label(tx.kind),
    );
    if let Some(category) = &tx.category {
        text.push_str(&format!("Category: {category}\n"));
    }
    if let Some(description) = &tx.description {
        text.push_str(&format!("Description: {description}\n"));
    }
    text.push_str(&format!("ID: {}", tx.id));
    text
}

pub(crate) fn render_summary(days: u32, summary: &Summary) -> String {
    let mut text = format!(
        "📊 Financial Summary (Last {days} days)\n\n\
         💰 Income: {}\n\
         💸 Expenses: {}\n\
         💵 Balance: {}\n\
         📈 Total Transactions: {}",
        summary.total_income, summary.total_expenses, summary.balance, summary.transaction_count,
    );

    let categories = summary.categories_by_amount();
    if !categories.is_empty() {
        text.push_str("\n\n📋 Expenses by Category:");
        for (category, amount) in categories {
            text.push_str(&format!("\n• {category}: {amount}"));
        }
    }
    text
}

pub(crate) fn render_transactions(limit: u64, txs: &[Transaction], tz: Tz) -> String {
    if txs.is_empty() {
        return NO_TRANSACTIONS.to_string();
    }

    let mut text = format!("📋 Recent Transactions (Last {limit}):");
    for tx in txs {
        text.push_str(&format!(
            "\n\n{} {} - {}",
            kind_emoji(tx.kind),
            tx.amount,
            tx.category.as_deref().unwrap_or("No category"),
        ));
        if let Some(description) = &tx.description {
            text.push_str(&format!("\n   📝 {description}"));
        }
        text.push_str(&format!(
            "\n   📅 {} (ID: {})",
            tx.created_at.with_timezone(&tz).format("%Y-%m-%d %H:%M"),
            tx.id
        ));
    }
    text
}

pub(crate) fn render_deleted(id: i64) -> String {
    format!("✅ Transaction {id} deleted successfully.")
}

/// Splits `text` into chunks Telegram accepts, preferring line boundaries.
pub(crate) fn split_message(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split('\n') {
        let line_len = line.encode_utf16().count();
        let separator = usize::from(!current.is_empty());
        if current_len + separator + line_len <= MAX_MESSAGE_LEN {
            if separator == 1 {
                current.push('\n');
            }
            current.push_str(line);
            current_len += separator + line_len;
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        for ch in line.chars() {
            let width = ch.len_utf16();
            if current_len + width > MAX_MESSAGE_LEN {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            current.push(ch);
            current_len += width;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
