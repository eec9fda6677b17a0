//! # Database State
//!
//! Wrapper around the storage handle held by [`AppState`](super::AppState).

use storefront_db::Database;

/// Wrapper around `Database` for command access.
///
/// Commands reach storage only through this, so tests can build an
/// `AppState` over `DbConfig::in_memory()`.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// db_state.inner().carts().save(&cart).await?;
    /// ```
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
