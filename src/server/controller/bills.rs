use actix_web::{delete, get, post, web, HttpResponse, Responder};
use log::info;
use uuid::Uuid;

use crate::server::controller::error::ApiError;
use crate::server::model::bill::{GenerateBillRequest, GenerateBillResponse};
use crate::server::model::SuccessResponse;
use crate::server::state::AppState;
use crate::server::store::StoreError;

#[post("/generate-bill")]
/// Create a bill from a submitted cart.
pub(crate) async fn generate_bill(
    body: web::Json<GenerateBillRequest>,
    data: web::Data<AppState>,
) -> Result<impl Responder, ApiError> {
    let GenerateBillRequest {
        customer_phone,
        items,
        total,
    } = body.into_inner();
    let bill = data.bills().create_bill(customer_phone, items, total).await?;
    info!("created bill {} with number {}", bill.id, bill.bill_number);
    Ok(web::Json(GenerateBillResponse {
        success: true,
        bill_id: bill.id,
    }))
}

#[get("/bills")]
/// Bill history, most recent first.
pub(crate) async fn get_bills(data: web::Data<AppState>) -> Result<impl Responder, ApiError> {
    let bills = data.bills().list_bills().await?;
    Ok(web::Json(bills))
}

#[delete("/bills/{id}")]
pub(crate) async fn delete_bill(
    id: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> Result<impl Responder, ApiError> {
    data.bills().delete_bill(id.into_inner()).await?;
    Ok(web::Json(SuccessResponse { success: true }))
}

#[get("/print-bill/{id}")]
/// Stream the rendered receipt. A missing bill reports a plain-text 404
/// before any receipt bytes are written.
pub(crate) async fn print_bill(
    id: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    match data.bills().render_receipt(id.into_inner()).await {
        Ok(bytes) => Ok(HttpResponse::Ok()
            .content_type("application/pdf")
            .body(bytes)),
        Err(StoreError::NotFound) => Ok(HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body("Bill not found")),
        Err(e) => Err(ApiError::from(e)),
    }
}
