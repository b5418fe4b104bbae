pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

use std::net::SocketAddr;

use axum::http::{header, Method};
use axum::middleware;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use shared::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let cfg = config::load_config()?;
    config::init(cfg);
    let cfg = config::get();

    system::auth::initialize(&cfg.auth)?;

    if cfg.sheets.spreadsheet_id.is_none() && cfg.sheets.auctions_folder_id.is_none() {
        tracing::warn!("Neither GOOGLE_SHEET_ID nor AUCTION_SHEETS_FOLDER_ID is set");
    }
    if cfg.sheets.invoices_folder_id.is_none() {
        tracing::warn!("INVOICE_PDF_FOLDER_ID is not set, invoice lookups will fail");
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let mut app = routes::configure_routes();

    if let Some(static_dir) = &cfg.server.static_dir {
        let dir = config::resolve_path(static_dir);
        if dir.is_dir() {
            tracing::info!("Serving static files from {}", dir.display());
            app = app.fallback_service(ServeDir::new(dir));
        } else {
            tracing::info!("Static directory {} not found, UI is not served", dir.display());
        }
    }

    let app = app
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Port {} is already in use. Please ensure no other process is using this port.",
                    addr.port()
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
