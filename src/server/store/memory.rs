use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::server::model::bill::{Bill, BillDraft};
use crate::server::model::menu::MenuItem;
use crate::server::store::error::StoreError;
use crate::server::store::sequence::BillSequence;
use crate::server::store::{BillStore, MenuStore};
use crate::server::util::clock::{Clock, SystemClock};

/// In-process bill store, used by tests and the standalone dev server.
///
/// The records and the number sequence live behind one mutex: claiming the
/// next number and inserting the bill is a single critical section, which is
/// what keeps concurrent creations duplicate-free.
pub(crate) struct MemoryBillStore {
    clock: Arc<dyn Clock>,
    inner: Mutex<Inner>,
}

struct Inner {
    bills: HashMap<Uuid, Bill>,
    sequence: BillSequence,
}

impl MemoryBillStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Store with a caller-controlled clock; creation timestamps drive the
    /// listing order.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            inner: Mutex::new(Inner {
                bills: HashMap::new(),
                sequence: BillSequence::new(),
            }),
        }
    }
}

#[async_trait]
impl BillStore for MemoryBillStore {
    async fn create(&self, draft: BillDraft) -> Result<Bill, StoreError> {
        if draft.items.is_empty() {
            return Err(StoreError::validation("a bill needs at least one item"));
        }
        let mut inner = self.inner.lock().expect("lock poisoned");
        let bill_number = inner.sequence.advance();
        let bill = Bill {
            id: Uuid::new_v4(),
            bill_number,
            customer_phone: draft.customer_phone,
            items: draft.items,
            total: draft.total,
            created_at: self.clock.now(),
        };
        inner.bills.insert(bill.id, bill.clone());
        Ok(bill)
    }

    async fn get(&self, id: Uuid) -> Result<Bill, StoreError> {
        let inner = self.inner.lock().expect("lock poisoned");
        inner.bills.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        let inner = self.inner.lock().expect("lock poisoned");
        let mut bills: Vec<Bill> = inner.bills.values().cloned().collect();
        bills.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bills)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("lock poisoned");
        inner
            .bills
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

/// In-process menu store. Insertion order is the listing order.
pub(crate) struct MemoryMenuStore {
    items: Mutex<Vec<MenuItem>>,
}

impl MemoryMenuStore {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MenuStore for MemoryMenuStore {
    async fn list(&self) -> Result<Vec<MenuItem>, StoreError> {
        Ok(self.items.lock().expect("lock poisoned").clone())
    }

    async fn add(&self, name: String, price: Decimal) -> Result<MenuItem, StoreError> {
        let item = MenuItem {
            id: Uuid::new_v4(),
            name,
            price,
        };
        self.items
            .lock()
            .expect("lock poisoned")
            .push(item.clone());
        Ok(item)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut items = self.items.lock().expect("lock poisoned");
        match items.iter().position(|item| item.id == id) {
            Some(idx) => {
                items.remove(idx);
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }
}
