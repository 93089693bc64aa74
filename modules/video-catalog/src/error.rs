use thiserror::Error;
use youtube_client::YouTubeError;

use crate::store::CatalogError;

pub type Result<T> = std::result::Result<T, HarvestError>;

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Provider error: {0}")]
    Provider(#[from] YouTubeError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(String),
}
