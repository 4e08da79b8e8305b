//! application entry point

use log::info;

use crate::server::model::config::{AppEnv, ServerConfig};

mod server;

const DOTENV_LOADING_FAILED_MSG: &str = "failed to load envs from dotenv files, aborting";

#[actix_web::main()]
async fn main() -> std::io::Result<()> {
    let app_env = AppEnv::detect();
    if let Some(path) = app_env.dotenv_file() {
        dotenvy::from_path(path).expect(DOTENV_LOADING_FAILED_MSG);
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;
    info!("starting in {app_env} environment on {}", config.addr);

    server::run(config).await
}
