mod config;
mod error;
mod fonts;
mod layout;
mod lookup;
mod pdf;
mod render;
mod roster;
mod routes;
mod state;
mod templates;

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::fonts::FontSource;
use crate::render::certificate::canvas_size;
use crate::render::{AssetBase, AssetLoader, Canvas, CertificateRenderer};
use crate::roster::RosterState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "certificados=info,tower_http=info".into()),
        )
        .init();

    let config = config::Config::from_env()?;
    let config = Arc::new(config);

    let fonts = FontSource::discover(config.font_dir.as_deref())?;
    let (width, height) = canvas_size();
    let canvas = Canvas::new(width, height, fonts.raster_fonts()?);

    let client = roster::http_client()?;
    let assets = AssetLoader::new(AssetBase::parse(&config.asset_base)?, client.clone());

    let state = Arc::new(state::AppState {
        config: config.clone(),
        roster: RwLock::new(RosterState::Uninitialized),
        renderer: Arc::new(Mutex::new(CertificateRenderer::new(
            canvas,
            config.signatures.clone(),
        ))),
        assets,
        exporter: Arc::new(pdf::PdfExporter::new(fonts.pdf_family()?)),
    });

    // The form stays hidden until the roster is in; a failed load is final.
    let loader_state = state.clone();
    tokio::spawn(async move {
        let next = match roster::fetch_roster(&client, &loader_state.config.roster_url).await {
            Ok(roster) => RosterState::Ready(Arc::new(roster)),
            Err(e) => {
                tracing::error!("Roster load failed: {}", e);
                RosterState::Failed(e.to_string())
            }
        };
        *loader_state.roster.write().await = next;
    });

    let app = routes::router(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Certificados listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
