use crate::config::Config;
use crate::pdf::PdfExporter;
use crate::render::{AssetLoader, CertificateRenderer};
use crate::roster::RosterState;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Everything the handlers share. The renderer owns the one canvas, so its
/// mutex also serializes certificate generation. Both the renderer and the
/// exporter are shared so the export can move onto the blocking pool.
pub struct AppState {
    pub config: Arc<Config>,
    pub roster: RwLock<RosterState>,
    pub renderer: Arc<Mutex<CertificateRenderer>>,
    pub assets: AssetLoader,
    pub exporter: Arc<PdfExporter>,
}
