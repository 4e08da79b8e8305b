//! Persistence for bills and menu items.

pub(crate) mod error;
pub(crate) mod memory;
pub(crate) mod postgres;
pub(crate) mod sequence;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::server::model::bill::{Bill, BillDraft};
use crate::server::model::menu::MenuItem;

pub(crate) use error::StoreError;

/// Bill persistence.
///
/// Implementations own the bill-number state: `create` claims the next number
/// and persists the record as one atomic step, so two overlapping creations
/// can never end up with the same number. Bills are immutable once written;
/// the only permitted mutation is whole-record deletion.
#[async_trait]
pub(crate) trait BillStore: Send + Sync {
    /// Persist a draft, assigning id, bill number and creation time.
    /// Fails with `Validation` when the draft has no items.
    async fn create(&self, draft: BillDraft) -> Result<Bill, StoreError>;

    /// Fetch one bill. `NotFound` when absent.
    async fn get(&self, id: Uuid) -> Result<Bill, StoreError>;

    /// All bills, most recent first.
    async fn list(&self) -> Result<Vec<Bill>, StoreError>;

    /// Remove a bill permanently. Its number is never reclaimed. Deleting a
    /// missing id reports `NotFound`, including repeated deletes of the same
    /// id.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Menu persistence. Plain CRUD, no invariants beyond id uniqueness.
#[async_trait]
pub(crate) trait MenuStore: Send + Sync {
    async fn list(&self) -> Result<Vec<MenuItem>, StoreError>;

    async fn add(&self, name: String, price: Decimal) -> Result<MenuItem, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}
