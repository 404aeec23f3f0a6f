use image::DynamicImage;
use reqwest::Client;
use std::path::PathBuf;
use tracing::debug;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read asset {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to fetch asset {url}: {source}")]
    Http { url: Url, source: reqwest::Error },
    #[error("asset {url} answered with status {status}")]
    Status { url: Url, status: u16 },
    #[error("failed to decode asset {name}: {source}")]
    Decode {
        name: String,
        source: image::ImageError,
    },
    #[error("invalid asset location {0}")]
    Url(#[from] url::ParseError),
}

/// Where relative asset names are resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetBase {
    Dir(PathBuf),
    Url(Url),
}

impl AssetBase {
    pub fn parse(base: &str) -> Result<Self, AssetError> {
        if base.starts_with("http://") || base.starts_with("https://") {
            let mut url = Url::parse(base)?;
            // Without a trailing slash `join` would replace the last segment.
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            Ok(AssetBase::Url(url))
        } else {
            Ok(AssetBase::Dir(PathBuf::from(base)))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssetLocation {
    File(PathBuf),
    Remote(Url),
}

/// Loads images one at a time. Every call is awaited to completion before
/// the next draw, so draw order on the canvas follows call order.
#[derive(Clone)]
pub struct AssetLoader {
    base: AssetBase,
    client: Client,
}

impl AssetLoader {
    pub fn new(base: AssetBase, client: Client) -> Self {
        Self { base, client }
    }

    pub fn base(&self) -> &AssetBase {
        &self.base
    }

    pub fn resolve(&self, name: &str) -> Result<AssetLocation, AssetError> {
        if name.starts_with("http://") || name.starts_with("https://") {
            return Ok(AssetLocation::Remote(Url::parse(name)?));
        }
        match &self.base {
            AssetBase::Dir(dir) => Ok(AssetLocation::File(dir.join(name))),
            AssetBase::Url(url) => Ok(AssetLocation::Remote(url.join(name)?)),
        }
    }

    pub async fn load(&self, name: &str) -> Result<DynamicImage, AssetError> {
        let location = self.resolve(name)?;
        debug!("Loading asset {:?}", location);

        let bytes = match location {
            AssetLocation::File(path) => tokio::fs::read(&path)
                .await
                .map_err(|source| AssetError::Io { path, source })?,
            AssetLocation::Remote(url) => {
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .map_err(|source| AssetError::Http {
                        url: url.clone(),
                        source,
                    })?;
                let status = response.status();
                if !status.is_success() {
                    return Err(AssetError::Status {
                        url,
                        status: status.as_u16(),
                    });
                }
                response
                    .bytes()
                    .await
                    .map_err(|source| AssetError::Http { url, source })?
                    .to_vec()
            }
        };

        image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
            name: name.to_string(),
            source,
        })
    }
}
