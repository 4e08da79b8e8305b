use serde::Serialize;

pub(crate) mod auth;
pub(crate) mod bill;
pub(crate) mod config;
pub(crate) mod menu;

/// Wire shape shared by the delete-style endpoints.
#[derive(Debug, Serialize)]
pub(crate) struct SuccessResponse {
    pub success: bool,
}
