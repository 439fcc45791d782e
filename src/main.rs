#[macro_use]
extern crate diesel;

mod appointment;
mod auth;
mod catalog;
mod config;
mod database;
mod error;
mod models;
mod protocol;
mod scheduling;
mod schema;
mod utils;
mod workshop;

use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use diesel::{r2d2::ConnectionManager, MysqlConnection};
use tracing_subscriber::EnvFilter;

use crate::{config::AppConfig, protocol::reject_payload};

pub type DbPool = r2d2::Pool<ConnectionManager<MysqlConnection>>;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;
    let manager = ConnectionManager::<MysqlConnection>::new(config.database_url.as_str());
    let pool = r2d2::Pool::builder()
        .max_size(config.db_pool_size)
        .build(manager)
        .context("Failed to create pool")?;

    let bind = config.bind_addr.clone();
    tracing::info!(bind = %bind, "starting OilSmart server");

    HttpServer::new(move || {
        App::new()
            .data(AppState {
                pool: pool.clone(),
                config: config.clone(),
            })
            .app_data(web::JsonConfig::default().error_handler(reject_payload))
            .app_data(web::QueryConfig::default().error_handler(reject_payload))
            .app_data(web::PathConfig::default().error_handler(reject_payload))
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/api")
                    .service(web::scope("/auth").configure(auth::config))
                    .service(web::scope("/oficina").configure(workshop::config))
                    .service(web::scope("/agendamento_simples").configure(appointment::config))
                    // catalog routes sit directly under /api
                    .configure(catalog::config),
            )
    })
    .bind(&bind)
    .with_context(|| format!("binding {}", bind))?
    .run()
    .await
    .context("server error")?;

    Ok(())
}
