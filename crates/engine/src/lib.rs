//! Ledger engine.
//!
//! The engine owns the `transactions` table: it inserts, lists and deletes
//! user-scoped transactions and computes summaries over a time window.
//! Every operation is scoped to the `user_id` that created the rows.

use sea_orm::DatabaseConnection;

pub use error::EngineError;
pub use money::Money;
pub use ops::Summary;
pub use transactions::{NewTransaction, Transaction, TransactionKind};

mod error;
mod money;
mod ops;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;

/// Maximum length (in characters) of a category label.
pub const CATEGORY_MAX_LEN: usize = 50;

/// Maximum length (in characters) of a free-text description.
pub const DESCRIPTION_MAX_LEN: usize = 255;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
