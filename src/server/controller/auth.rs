use actix_web::{post, web, Responder};
use log::warn;

use crate::server::model::auth::{LoginRequest, LoginResponse};
use crate::server::state::AppState;

#[post("/login")]
/// Single shared-credential staff login.
pub(crate) async fn login(body: web::Json<LoginRequest>, data: web::Data<AppState>) -> impl Responder {
    let success = data.admin().matches(&body.username, &body.password);
    if !success {
        warn!("rejected login for username {}", body.username);
    }
    web::Json(LoginResponse { success })
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};
    use serde_json::{json, Value};

    use super::*;

    #[actix_web::test]
    async fn login_checks_the_shared_credential() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::in_memory()))
                .service(login),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": "admin", "password": "admin" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], json!(true));

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": "admin", "password": "wrong" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], json!(false));
    }
}
