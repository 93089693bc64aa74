use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::discovery::{self, MAX_SEARCH_RESULTS};
use crate::enrichment::{self, EnrichConfig};
use crate::error::Result;
use crate::provider::VideoProvider;
use crate::store;
use crate::topic::Topic;

/// Everything one harvest run needs.
#[derive(Debug, Clone)]
pub struct HarvestRequest {
    pub topic: Topic,
    pub search_term: String,
    pub max_results: u32,
    pub catalog_path: PathBuf,
    pub enrich: EnrichConfig,
}

impl HarvestRequest {
    pub fn new(topic: Topic, catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            topic,
            // A blank query lets the topic filter do the selecting.
            search_term: " ".to_string(),
            max_results: MAX_SEARCH_RESULTS,
            catalog_path: catalog_path.into(),
            enrich: EnrichConfig::default(),
        }
    }
}

/// Counts from a harvest run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestReport {
    pub discovered: usize,
    pub detailed: usize,
    pub shorts: usize,
    pub skipped: usize,
    pub enriched: usize,
    pub added: usize,
    pub updated: usize,
    pub catalog_size: usize,
}

impl fmt::Display for HarvestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "discovered={} detailed={} shorts={} skipped={} enriched={} added={} updated={} catalog={}",
            self.discovered,
            self.detailed,
            self.shorts,
            self.skipped,
            self.enriched,
            self.added,
            self.updated,
            self.catalog_size
        )
    }
}

/// How a run ended. The two "no ..." outcomes leave the catalog untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestOutcome {
    NoVideos,
    NoDetails(HarvestReport),
    Merged(HarvestReport),
}

/// Discover, enrich, then merge into the catalog at `request.catalog_path`.
pub async fn run(
    provider: &dyn VideoProvider,
    request: &HarvestRequest,
    now: DateTime<Utc>,
) -> Result<HarvestOutcome> {
    info!(topic = %request.topic, search_term = %request.search_term, "Starting harvest");

    let ids = discovery::discover(
        provider,
        &request.search_term,
        request.topic,
        request.max_results,
    )
    .await?;
    if ids.is_empty() {
        info!(topic = %request.topic, "No videos found");
        return Ok(HarvestOutcome::NoVideos);
    }

    let enriched = enrichment::enrich(provider, &ids, &request.enrich, now).await?;
    let mut report = HarvestReport {
        discovered: ids.len(),
        detailed: enriched.detailed,
        shorts: enriched.shorts,
        skipped: enriched.skipped,
        enriched: enriched.records.len(),
        ..HarvestReport::default()
    };
    if enriched.records.is_empty() {
        info!(%report, "No video details found");
        return Ok(HarvestOutcome::NoDetails(report));
    }

    let mut catalog = store::load(&request.catalog_path);
    let merged = catalog.merge(enriched.records)?;
    store::save(&request.catalog_path, &catalog)?;

    report.added = merged.added;
    report.updated = merged.updated;
    report.catalog_size = catalog.len();
    info!(%report, path = %request.catalog_path.display(), "Harvest complete");
    Ok(HarvestOutcome::Merged(report))
}
