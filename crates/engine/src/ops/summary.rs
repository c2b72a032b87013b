use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::{Engine, EngineError, Money, ResultEngine, TransactionKind};

use super::window_start;

/// Aggregates of a user's transactions over a time window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_income: Money,
    pub total_expenses: Money,
    pub balance: Money,
    pub transaction_count: u64,
    /// Expense totals keyed by the stored category string. Uncategorized
    /// expenses are counted in `total_expenses` only.
    pub expenses_by_category: HashMap<String, Money>,
}

impl Summary {
    /// Category totals sorted by descending amount, then by name.
    pub fn categories_by_amount(&self) -> Vec<(&str, Money)> {
        let mut categories: Vec<(&str, Money)> = self
            .expenses_by_category
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
            .collect();
        categories.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        categories
    }
}

impl Engine {
    /// Summary of the last `days` days for `user_id`.
    pub async fn summary(&self, user_id: i64, days: u32) -> ResultEngine<Summary> {
        let since = window_start(days)?;
        self.summary_since(user_id, since).await
    }

    /// Summary of every transaction of `user_id` with `created_at >= since`.
    ///
    /// Fails with [`EngineError::Overflow`] when a total does not fit in
    /// `i64` cents.
    pub async fn summary_since(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> ResultEngine<Summary> {
        let window = self.list_since(user_id, since).await?;

        let mut summary = Summary::default();
        for tx in &window {
            let total = match tx.kind {
                TransactionKind::Income => &mut summary.total_income,
                TransactionKind::Expense => &mut summary.total_expenses,
            };
            *total = accumulate(*total, tx.amount, "total")?;

            if let (TransactionKind::Expense, Some(category)) = (tx.kind, &tx.category) {
                let entry = summary
                    .expenses_by_category
                    .entry(category.clone())
                    .or_insert(Money::ZERO);
                *entry = accumulate(*entry, tx.amount, category)?;
            }
        }
        summary.balance = summary
            .total_income
            .checked_sub(summary.total_expenses)
            .ok_or_else(|| EngineError::Overflow("balance".to_string()))?;
        summary.transaction_count = window.len() as u64;

        Ok(summary)
    }
}

fn accumulate(acc: Money, amount: Money, what: &str) -> ResultEngine<Money> {
    acc.checked_add(amount)
        .ok_or_else(|| EngineError::Overflow(what.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_sorted_by_descending_amount_then_name() {
        let summary = Summary {
            expenses_by_category: HashMap::from([
                ("rent".to_string(), Money::new(90_000)),
                ("food".to_string(), Money::new(4_500)),
                ("coffee".to_string(), Money::new(4_500)),
            ]),
            ..Summary::default()
        };

        assert_eq!(
            summary.categories_by_amount(),
            vec![
                ("rent", Money::new(90_000)),
                ("coffee", Money::new(4_500)),
                ("food", Money::new(4_500)),
            ]
        );
    }
}
