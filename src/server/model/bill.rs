use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A priced, quantified snapshot of a menu item at sale time. Snapshotting
/// keeps historical bills stable when the menu is edited later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct LineItem {
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
}

/// Immutable record of a completed sale. The bill number is the human-facing
/// sequential identifier; `id` is the storage key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Bill {
    pub id: Uuid,
    #[serde(rename = "billNumber")]
    pub bill_number: i64,
    #[serde(rename = "customerPhone")]
    pub customer_phone: Option<String>,
    pub items: Vec<LineItem>,
    pub total: Decimal,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
}

/// What the service hands the store; id, bill number and creation time are
/// assigned by the store at persistence time.
#[derive(Debug, Clone)]
pub(crate) struct BillDraft {
    pub customer_phone: Option<String>,
    pub items: Vec<LineItem>,
    pub total: Decimal,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateBillRequest {
    #[serde(rename = "customerPhone")]
    pub customer_phone: Option<String>,
    pub items: Vec<LineItem>,
    /// Client-side total, kept on the wire for compatibility. The server
    /// recomputes the sum and stores its own value.
    pub total: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateBillResponse {
    pub success: bool,
    #[serde(rename = "billId")]
    pub bill_id: Uuid,
}
