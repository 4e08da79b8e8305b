use std::sync::Arc;

use crate::server::database::pool::PgPool;
use crate::server::model::config::{AdminCredentials, ServerConfig, StoreBackend};
use crate::server::service::BillService;
use crate::server::store::memory::{MemoryBillStore, MemoryMenuStore};
use crate::server::store::postgres::{PgBillStore, PgMenuStore};
use crate::server::store::{BillStore, MenuStore};

#[derive(Clone)]
pub(crate) struct AppState {
    bills: Arc<BillService>,
    menu: Arc<dyn MenuStore>,
    admin: AdminCredentials,
}

impl AppState {
    /// Wire the configured persistence backend up behind the service layer.
    pub async fn from_config(config: &ServerConfig) -> Result<Self, anyhow::Error> {
        let (bills, menu): (Arc<dyn BillStore>, Arc<dyn MenuStore>) = match config.store {
            StoreBackend::Memory => (
                Arc::new(MemoryBillStore::new()),
                Arc::new(MemoryMenuStore::new()),
            ),
            StoreBackend::Postgres => {
                let pool = PgPool::connect(&config.db_conn_str).await?;
                (
                    Arc::new(PgBillStore::new(pool.clone())),
                    Arc::new(PgMenuStore::new(pool)),
                )
            }
        };
        Ok(Self {
            bills: Arc::new(BillService::new(bills)),
            menu,
            admin: config.admin.clone(),
        })
    }

    pub fn bills(&self) -> &BillService {
        &self.bills
    }

    pub fn menu(&self) -> &dyn MenuStore {
        self.menu.as_ref()
    }

    pub fn admin(&self) -> &AdminCredentials {
        &self.admin
    }

    /// Memory-backed state for handler tests.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            bills: Arc::new(BillService::new(Arc::new(MemoryBillStore::new()))),
            menu: Arc::new(MemoryMenuStore::new()),
            admin: AdminCredentials::new("admin".to_string(), "admin".to_string()),
        }
    }
}
