use crate::provider::VideoProvider;

/// How many comments each catalog entry keeps.
pub const TOP_COMMENT_LIMIT: u32 = 3;

/// Display text of up to `limit` most relevant top-level comments.
///
/// Comments are enrichment, not identity: any provider failure (comments
/// disabled, quota, network) is logged and yields an empty list.
pub async fn top_comments(provider: &dyn VideoProvider, video_id: &str, limit: u32) -> Vec<String> {
    match provider.comment_threads(video_id, limit).await {
        Ok(threads) => threads
            .iter()
            .take(limit as usize)
            .map(|t| t.text().to_string())
            .collect(),
        Err(e) => {
            tracing::warn!(video_id, error = %e, "Comment fetch failed, keeping entry without comments");
            Vec::new()
        }
    }
}
