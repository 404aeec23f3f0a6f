mod models;

pub use models::*;

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("roster request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("roster source answered with status {0}")]
    Status(u16),
    #[error("roster CSV is malformed: {0}")]
    Csv(#[from] csv::Error),
}

/// Readiness of the roster. Starts `Uninitialized`, moves once to `Ready`
/// or `Failed` and never changes again.
#[derive(Debug, Clone, Default)]
pub enum RosterState {
    #[default]
    Uninitialized,
    Ready(Arc<Roster>),
    Failed(String),
}

impl RosterState {
    pub fn roster(&self) -> Option<&Arc<Roster>> {
        match self {
            RosterState::Ready(roster) => Some(roster),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RosterState::Uninitialized => "uninitialized",
            RosterState::Ready(_) => "ready",
            RosterState::Failed(_) => "failed",
        }
    }
}

pub fn http_client() -> Result<Client, RosterError> {
    Ok(Client::builder().timeout(Duration::from_secs(60)).build()?)
}

pub async fn fetch_roster(client: &Client, url: &str) -> Result<Roster, RosterError> {
    info!("Fetching roster from {}", url);

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(RosterError::Status(status.as_u16()));
    }

    let body = response.bytes().await?;
    let roster = parse_roster(body.as_ref())?;
    info!("Roster loaded with {} rows", roster.len());
    Ok(roster)
}

/// Parses the roster CSV. Columns are matched by exact header name and
/// unknown columns are ignored.
pub fn parse_roster<R: std::io::Read>(reader: R) -> Result<Roster, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let records = csv_reader
        .deserialize::<ParticipantRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Roster::new(records))
}
