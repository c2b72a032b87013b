//! Transaction primitives.
//!
//! A `Transaction` is a single income or expense recorded by a user. The
//! amount is always positive: the direction is carried by `kind`.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{CATEGORY_MAX_LEN, DESCRIPTION_MAX_LEN, EngineError, Money, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidKind(other.to_string())),
        }
    }
}

/// A transaction as stored in the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub amount: Money,
    pub kind: TransactionKind,
    pub category: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A transaction not yet persisted: the store assigns `id` and `created_at`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTransaction {
    pub user_id: i64,
    pub amount: Money,
    pub kind: TransactionKind,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl NewTransaction {
    pub fn new(
        user_id: i64,
        amount: Money,
        kind: TransactionKind,
        category: Option<String>,
        description: Option<String>,
    ) -> ResultEngine<Self> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }
        if amount > Money::MAX {
            return Err(EngineError::InvalidAmount(format!(
                "amount above {}",
                Money::MAX
            )));
        }
        if category
            .as_deref()
            .is_some_and(|c| c.chars().count() > CATEGORY_MAX_LEN)
        {
            return Err(EngineError::InvalidText(format!(
                "category longer than {CATEGORY_MAX_LEN} characters"
            )));
        }
        if description
            .as_deref()
            .is_some_and(|d| d.chars().count() > DESCRIPTION_MAX_LEN)
        {
            return Err(EngineError::InvalidText(format!(
                "description longer than {DESCRIPTION_MAX_LEN} characters"
            )));
        }
        Ok(Self {
            user_id,
            amount,
            kind,
            category,
            description,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub amount_minor: i64,
    pub kind: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn from_new(tx: &NewTransaction, created_at: DateTime<Utc>) -> Self {
        Self {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(tx.user_id),
            amount_minor: ActiveValue::Set(tx.amount.cents()),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            category: ActiveValue::Set(tx.category.clone()),
            description: ActiveValue::Set(tx.description.clone()),
            created_at: ActiveValue::Set(created_at),
            updated_at: ActiveValue::Set(None),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            amount: Money::new(model.amount_minor),
            kind: TransactionKind::try_from(model.kind.as_str())?,
            category: model.category,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        assert_eq!(
            TransactionKind::try_from(TransactionKind::Income.as_str()),
            Ok(TransactionKind::Income)
        );
        assert_eq!(
            TransactionKind::try_from("refund"),
            Err(EngineError::InvalidKind("refund".to_string()))
        );
    }

    #[test]
    fn new_transaction_rejects_amounts_outside_bounds() {
        let err = NewTransaction::new(1, Money::ZERO, TransactionKind::Expense, None, None)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));

        let err = NewTransaction::new(1, Money::new(-5), TransactionKind::Income, None, None)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));

        let above_max = Money::new(Money::MAX.cents() + 1);
        let err = NewTransaction::new(1, above_max, TransactionKind::Income, None, None)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
        assert!(NewTransaction::new(1, Money::MAX, TransactionKind::Income, None, None).is_ok());
    }

    #[test]
    fn new_transaction_bounds_text_fields() {
        let long_category = "c".repeat(CATEGORY_MAX_LEN + 1);
        let err = NewTransaction::new(
            1,
            Money::new(100),
            TransactionKind::Expense,
            Some(long_category),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidText(_)));

        let description = "d".repeat(DESCRIPTION_MAX_LEN);
        let ok = NewTransaction::new(
            1,
            Money::new(100),
            TransactionKind::Expense,
            Some("food".to_string()),
            Some(description),
        );
        assert!(ok.is_ok());
    }
}
