//! Orchestration between the HTTP boundary and the bill store.

use std::sync::Arc;

use log::warn;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::server::model::bill::{Bill, BillDraft, LineItem};
use crate::server::receipt::{self, Branding};
use crate::server::store::{BillStore, StoreError};

pub(crate) struct BillService {
    store: Arc<dyn BillStore>,
    branding: Branding,
}

impl BillService {
    pub fn new(store: Arc<dyn BillStore>) -> Self {
        Self {
            store,
            branding: Branding::default(),
        }
    }

    /// Create an immutable bill from a submitted cart.
    ///
    /// The total is computed here from the items; a client-side total is only
    /// compared against it and never stored. Numbering and persistence happen
    /// in the store as one atomic step, so a rejected cart spends no number.
    pub async fn create_bill(
        &self,
        customer_phone: Option<String>,
        items: Vec<LineItem>,
        submitted_total: Option<Decimal>,
    ) -> Result<Bill, StoreError> {
        if items.is_empty() {
            return Err(StoreError::validation("a bill needs at least one item"));
        }
        for item in &items {
            if item.quantity <= 0 {
                return Err(StoreError::validation(format!(
                    "quantity for {} must be positive",
                    item.name
                )));
            }
            if item.price.is_sign_negative() {
                return Err(StoreError::validation(format!(
                    "price for {} must not be negative",
                    item.name
                )));
            }
        }
        let total: Decimal = items
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum();
        if let Some(submitted) = submitted_total {
            if submitted != total {
                warn!(
                    "submitted total {submitted} disagrees with computed total {total}, storing the computed value"
                );
            }
        }
        self.store
            .create(BillDraft {
                customer_phone,
                items,
                total,
            })
            .await
    }

    pub async fn get_bill(&self, id: Uuid) -> Result<Bill, StoreError> {
        self.store.get(id).await
    }

    pub async fn list_bills(&self) -> Result<Vec<Bill>, StoreError> {
        self.store.list().await
    }

    pub async fn delete_bill(&self, id: Uuid) -> Result<(), StoreError> {
        self.store.delete(id).await
    }

    /// Look the bill up and render its receipt. When the bill does not exist
    /// the error surfaces before a single byte is produced.
    pub async fn render_receipt(&self, id: Uuid) -> Result<Vec<u8>, StoreError> {
        let bill = self.store.get(id).await?;
        Ok(receipt::render(&bill, &self.branding))
    }
}
