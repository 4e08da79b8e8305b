//! main file for the server

pub(crate) mod controller;
pub(crate) mod database;
pub(crate) mod model;
pub(crate) mod receipt;
pub(crate) mod service;
pub(crate) mod state;
pub(crate) mod store;
pub(crate) mod util;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;

use crate::server::model::config::ServerConfig;
use crate::server::state::AppState;

/// Run the server
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let state = AppState::from_config(&config)
        .await
        .map_err(std::io::Error::other)?;
    info!("serving on {}", config.addr);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .service(controller::auth::login)
            .service(controller::menu::get_menu)
            .service(controller::menu::add_menu_item)
            .service(controller::menu::delete_menu_item)
            .service(controller::bills::generate_bill)
            .service(controller::bills::get_bills)
            .service(controller::bills::delete_bill)
            .service(controller::bills::print_bill)
    })
    .bind(config.addr)?
    .run()
    .await
}
