use std::path::PathBuf;

use crate::render::SignatureBlock;

pub const DEFAULT_ROSTER_URL: &str = "https://docs.google.com/spreadsheets/d/1HbszmbhIAaqkzicjBfGcJGbQ3yyVpSnC0Ap9Xev0Rmk/export?format=csv";

#[derive(Clone, Debug)]
pub struct Config {
    pub roster_url: String,
    pub asset_base: String,
    pub font_dir: Option<PathBuf>,
    pub signatures: Vec<SignatureBlock>,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        dotenvy::dotenv().ok();

        let roster_url =
            std::env::var("ROSTER_URL").unwrap_or_else(|_| DEFAULT_ROSTER_URL.to_string());

        let asset_base = std::env::var("ASSET_BASE").unwrap_or_else(|_| "static".to_string());

        let font_dir = std::env::var("FONT_DIR").ok().map(PathBuf::from);

        let signatures = parse_signatures(&std::env::var("SIGNATURES").unwrap_or_default())?;

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5001".to_string())
            .parse()
            .unwrap_or(5001);

        Ok(Self {
            roster_url,
            asset_base,
            font_dir,
            signatures,
            host,
            port,
        })
    }
}

/// Parses `file:caption` entries separated by `;`, e.g.
/// `firmaMJA.png:Coordinación general;firmaSRG.png:Comité académico`.
pub fn parse_signatures(raw: &str) -> Result<Vec<SignatureBlock>, String> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (asset, caption) = entry
                .split_once(':')
                .ok_or_else(|| format!("SIGNATURES entry `{entry}` must look like file:caption"))?;
            Ok(SignatureBlock {
                asset: asset.trim().to_string(),
                caption: caption.trim().to_string(),
            })
        })
        .collect()
}
