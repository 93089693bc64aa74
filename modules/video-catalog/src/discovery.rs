use youtube_client::{SearchParams, YouTubeError};

use crate::provider::VideoProvider;
use crate::topic::Topic;

/// Relevance-language hint sent with every search: English, then Indonesian.
pub const RELEVANCE_LANGUAGE: &str = "en,id";

/// The search API caps a page at this many hits.
pub const MAX_SEARCH_RESULTS: u32 = 50;

/// Find up to `max_results` video ids for `search_term` within `topic`.
///
/// Issues a single search page. Channel and playlist hits are dropped, as are
/// video hits missing an id. Provider errors propagate unchanged.
pub async fn discover(
    provider: &dyn VideoProvider,
    search_term: &str,
    topic: Topic,
    max_results: u32,
) -> Result<Vec<String>, YouTubeError> {
    let params = SearchParams::videos(search_term, max_results.clamp(1, MAX_SEARCH_RESULTS))
        .topic(topic.freebase_id())
        .relevance_language(RELEVANCE_LANGUAGE);

    let hits = provider.search(&params).await?;
    let total = hits.len();
    let ids: Vec<String> = hits
        .iter()
        .filter_map(|hit| hit.video_id())
        .map(String::from)
        .collect();

    tracing::info!(
        topic = %topic,
        hits = total,
        videos = ids.len(),
        "Discovery complete"
    );
    Ok(ids)
}
