use actix_web::{delete, get, post, web, Responder};
use uuid::Uuid;

use crate::server::controller::error::ApiError;
use crate::server::model::menu::{AddMenuItemRequest, AddMenuItemResponse};
use crate::server::model::SuccessResponse;
use crate::server::state::AppState;

#[get("/menu")]
pub(crate) async fn get_menu(data: web::Data<AppState>) -> Result<impl Responder, ApiError> {
    let items = data.menu().list().await?;
    Ok(web::Json(items))
}

#[post("/add-menu-item")]
pub(crate) async fn add_menu_item(
    body: web::Json<AddMenuItemRequest>,
    data: web::Data<AppState>,
) -> Result<impl Responder, ApiError> {
    let AddMenuItemRequest { name, price } = body.into_inner();
    let item = data.menu().add(name, price).await?;
    Ok(web::Json(AddMenuItemResponse {
        success: true,
        id: item.id,
    }))
}

#[delete("/menu/{id}")]
pub(crate) async fn delete_menu_item(
    id: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> Result<impl Responder, ApiError> {
    data.menu().delete(id.into_inner()).await?;
    Ok(web::Json(SuccessResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    use super::*;

    #[actix_web::test]
    async fn menu_crud_round_trip() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::in_memory()))
                .service(get_menu)
                .service(add_menu_item)
                .service(delete_menu_item),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/add-menu-item")
            .set_json(json!({ "name": "Paneer Tikka", "price": 150.00 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], json!(true));
        let id = body["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::get().uri("/menu").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["name"], json!("Paneer Tikka"));

        let req = test::TestRequest::delete()
            .uri(&format!("/menu/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::delete()
            .uri(&format!("/menu/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
