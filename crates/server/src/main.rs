use crate::{
    config::Config, doc::ApiDoc, state::AppState, utils::shutdown::shutdown_signal,
};
use database::db::create_connection;
use log::info;
use std::error::Error;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod auth;
mod config;
mod doc;
mod dtos;
mod error;
mod routes;
mod state;
#[cfg(test)]
mod testing;
mod utils;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    let db = create_connection(&config.database_url).await?;

    if let Some(login) = &config.bootstrap {
        auth::bootstrap::ensure_principal(&db, login).await?;
    }

    let addr = format!("{}:{}", config.host, config.port);
    let app = routes::router(AppState::new(db, config))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new()),
        );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Running axum on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
