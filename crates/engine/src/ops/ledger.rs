use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, QuerySelect, prelude::*};

use crate::{Engine, NewTransaction, ResultEngine, Transaction, transactions};

use super::window_start;

impl Engine {
    /// Persists a new transaction and returns the stored record.
    ///
    /// The store assigns `id` and `created_at`.
    pub async fn insert(&self, tx: NewTransaction) -> ResultEngine<Transaction> {
        let model = transactions::ActiveModel::from_new(&tx, Utc::now())
            .insert(&self.database)
            .await?;
        tracing::debug!(id = model.id, user_id = model.user_id, "transaction stored");
        Transaction::try_from(model)
    }

    /// Lists at most `limit` transactions of `user_id`, newest first.
    pub async fn list_recent(&self, user_id: i64, limit: u64) -> ResultEngine<Vec<Transaction>> {
        transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .order_by_desc(transactions::Column::CreatedAt)
            .order_by_desc(transactions::Column::Id)
            .limit(limit)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    /// Lists every transaction of `user_id` created in the last `days` days,
    /// newest first.
    pub async fn list_in_window(&self, user_id: i64, days: u32) -> ResultEngine<Vec<Transaction>> {
        let since = window_start(days)?;
        self.list_since(user_id, since).await
    }

    pub(crate) async fn list_since(
        &self,
        user_id: i64,
        since: chrono::DateTime<Utc>,
    ) -> ResultEngine<Vec<Transaction>> {
        transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .filter(transactions::Column::CreatedAt.gte(since))
            .order_by_desc(transactions::Column::CreatedAt)
            .order_by_desc(transactions::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    /// Deletes transaction `id` if it belongs to `user_id`.
    ///
    /// Returns `false` both when the id does not exist and when it belongs to
    /// someone else: callers cannot tell the two apart.
    pub async fn delete(&self, id: i64, user_id: i64) -> ResultEngine<bool> {
        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::Id.eq(id))
            .filter(transactions::Column::UserId.eq(user_id))
            .exec(&self.database)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
