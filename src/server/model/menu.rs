use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddMenuItemRequest {
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddMenuItemResponse {
    pub success: bool,
    pub id: Uuid,
}
