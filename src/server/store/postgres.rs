use std::sync::Arc;

use async_trait::async_trait;
use log::warn;
use rust_decimal::Decimal;
use tokio_postgres::error::SqlState;
use tokio_postgres::types::ToSql;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::server::database::pool::PgPool;
use crate::server::model::bill::{Bill, BillDraft, LineItem};
use crate::server::model::menu::MenuItem;
use crate::server::store::error::StoreError;
use crate::server::store::{BillStore, MenuStore};
use crate::server::util::clock::{Clock, SystemClock};

/// The counter row serializes number assignment, so collisions on
/// `bill_number` cannot happen through this code path; the retry bound only
/// matters if the unique constraint fires anyway (rows inserted out of band).
const CREATE_RETRIES: usize = 3;

/// Production bill store over the shared connection pool.
///
/// Number assignment and the record insert run in one transaction: the
/// `bill_sequence` row lock serializes concurrent creations, and a rollback
/// also rolls the counter back, so failed writes spend no number.
pub(crate) struct PgBillStore {
    pool: PgPool,
    clock: Arc<dyn Clock>,
}

impl PgBillStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            clock: Arc::new(SystemClock),
        }
    }

    async fn try_create(&self, draft: &BillDraft) -> Result<Bill, StoreError> {
        let mut conn = self.pool.acquire().await.map_err(StoreError::unavailable)?;
        let txn = conn
            .transaction()
            .await
            .map_err(StoreError::unavailable)?;

        let row = txn
            .query_one(
                "UPDATE bill_sequence SET value = value + 1 RETURNING value",
                &[],
            )
            .await
            .map_err(StoreError::unavailable)?;
        let bill = Bill {
            id: Uuid::new_v4(),
            bill_number: row.get("value"),
            customer_phone: draft.customer_phone.clone(),
            items: draft.items.clone(),
            total: draft.total,
            created_at: self.clock.now(),
        };

        let items = serde_json::to_value(&bill.items).map_err(StoreError::unavailable)?;
        let params: &[&(dyn ToSql + Sync); 6] = &[
            &bill.id,
            &bill.bill_number,
            &bill.customer_phone,
            &items,
            &bill.total,
            &bill.created_at,
        ];
        let inserted = txn
            .execute(
                r#"
                INSERT INTO bill(id, bill_number, customer_phone, items, total, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
                params,
            )
            .await;
        match inserted {
            Ok(_) => {
                txn.commit().await.map_err(StoreError::unavailable)?;
                Ok(bill)
            }
            Err(e) if e.code() == Some(&SqlState::UNIQUE_VIOLATION) => {
                Err(StoreError::NumberConflict)
            }
            Err(e) => Err(StoreError::unavailable(e)),
        }
    }
}

#[async_trait]
impl BillStore for PgBillStore {
    async fn create(&self, draft: BillDraft) -> Result<Bill, StoreError> {
        if draft.items.is_empty() {
            return Err(StoreError::validation("a bill needs at least one item"));
        }
        let mut attempt = 0;
        loop {
            match self.try_create(&draft).await {
                Err(StoreError::NumberConflict) if attempt + 1 < CREATE_RETRIES => {
                    attempt += 1;
                    warn!("bill number collision, retrying creation (attempt {attempt})");
                }
                other => return other,
            }
        }
    }

    async fn get(&self, id: Uuid) -> Result<Bill, StoreError> {
        let conn = self.pool.acquire().await.map_err(StoreError::unavailable)?;
        let row = conn
            .query_opt(
                "SELECT id, bill_number, customer_phone, items, total, created_at FROM bill WHERE id = $1",
                &[&id],
            )
            .await
            .map_err(StoreError::unavailable)?;
        match row {
            Some(row) => bill_from_row(&row),
            None => Err(StoreError::NotFound),
        }
    }

    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        let conn = self.pool.acquire().await.map_err(StoreError::unavailable)?;
        let rows = conn
            .query(
                r#"
                SELECT id, bill_number, customer_phone, items, total, created_at
                FROM bill
                ORDER BY created_at DESC
            "#,
                &[],
            )
            .await
            .map_err(StoreError::unavailable)?;
        rows.iter().map(bill_from_row).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let conn = self.pool.acquire().await.map_err(StoreError::unavailable)?;
        let deleted = conn
            .execute("DELETE FROM bill WHERE id = $1", &[&id])
            .await
            .map_err(StoreError::unavailable)?;
        match deleted {
            0 => Err(StoreError::NotFound),
            _ => Ok(()),
        }
    }
}

fn bill_from_row(row: &Row) -> Result<Bill, StoreError> {
    let items: serde_json::Value = row.get("items");
    let items: Vec<LineItem> = serde_json::from_value(items)
        .map_err(|e| StoreError::unavailable(format!("corrupt line items: {e}")))?;
    Ok(Bill {
        id: row.get("id"),
        bill_number: row.get("bill_number"),
        customer_phone: row.get("customer_phone"),
        items,
        total: row.get("total"),
        created_at: row.get("created_at"),
    })
}

/// Production menu store.
pub(crate) struct PgMenuStore {
    pool: PgPool,
}

impl PgMenuStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MenuStore for PgMenuStore {
    async fn list(&self) -> Result<Vec<MenuItem>, StoreError> {
        let conn = self.pool.acquire().await.map_err(StoreError::unavailable)?;
        let rows = conn
            .query("SELECT id, name, price FROM menu_item ORDER BY name", &[])
            .await
            .map_err(StoreError::unavailable)?;
        Ok(rows
            .into_iter()
            .map(|row| MenuItem {
                id: row.get("id"),
                name: row.get("name"),
                price: row.get("price"),
            })
            .collect())
    }

    async fn add(&self, name: String, price: Decimal) -> Result<MenuItem, StoreError> {
        let conn = self.pool.acquire().await.map_err(StoreError::unavailable)?;
        let item = MenuItem {
            id: Uuid::new_v4(),
            name,
            price,
        };
        let params: &[&(dyn ToSql + Sync); 3] = &[&item.id, &item.name, &item.price];
        conn.execute(
            "INSERT INTO menu_item(id, name, price) VALUES ($1, $2, $3)",
            params,
        )
        .await
        .map_err(StoreError::unavailable)?;
        Ok(item)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let conn = self.pool.acquire().await.map_err(StoreError::unavailable)?;
        let deleted = conn
            .execute("DELETE FROM menu_item WHERE id = $1", &[&id])
            .await
            .map_err(StoreError::unavailable)?;
        match deleted {
            0 => Err(StoreError::NotFound),
            _ => Ok(()),
        }
    }
}
