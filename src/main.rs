use actix_cors::Cors;
use actix_web::middleware::{Compress, Logger, NormalizePath};
use actix_web::web::{self, Data};
use actix_web::{App, HttpServer};
use anyhow::Context;
use dotenvy::dotenv;
use std::sync::Arc;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod gateway;
mod model;
mod models;
mod notify;
mod routes;
mod store;
mod utils;

use config::Config;
use db::init_db;

use crate::docs::ApiDoc;
use crate::gateway::EmployeeGateway;
use crate::notify::dispatcher::NotificationDispatcher;
use crate::notify::mailer::SmtpMailer;
use crate::store::mongo::MongoEmployeeStore;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let collection = init_db(&config.store).await?;
    let gateway = EmployeeGateway::new(Arc::new(MongoEmployeeStore::new(collection)));

    let mailer = SmtpMailer::new(&config.mail).context("Failed to configure mail transport")?;
    let dispatcher = NotificationDispatcher::new(Arc::new(mailer), &config.mail);

    tokio::fs::create_dir_all(&config.upload.dir)
        .await
        .with_context(|| format!("Failed to create {}", config.upload.dir.display()))?;
    let upload_config = config.upload.clone();

    info!(addr = %config.server_addr, "Listening");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Compress::default())
            .wrap(Cors::permissive())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(gateway.clone()))
            .app_data(Data::new(dispatcher.clone()))
            .app_data(Data::new(upload_config.clone()))
            .configure(routes::configure)
            .default_service(web::to(routes::not_found))
    })
    .bind(&config.server_addr)?
    .run()
    .await?;

    Ok(())
}
