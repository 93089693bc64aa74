// Provider abstraction for the harvest pipeline.
//
// VideoProvider covers the three provider queries the pipeline makes:
// search, batched video details and comment threads. YouTubeClient is the
// production implementation; MockProvider (testing.rs) backs the tests with
// no network.

use async_trait::async_trait;
use youtube_client::{
    CommentThread, SearchParams, SearchResult, Video, YouTubeClient, YouTubeError,
    VIDEO_DETAIL_PARTS,
};

#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// One page of search hits of any kind.
    async fn search(&self, params: &SearchParams) -> Result<Vec<SearchResult>, YouTubeError>;

    /// Full detail records for `ids` (statistics, snippet, content, topics, status).
    async fn videos(&self, ids: &[String]) -> Result<Vec<Video>, YouTubeError>;

    /// Top-level comment threads for one video, by relevance.
    async fn comment_threads(
        &self,
        video_id: &str,
        limit: u32,
    ) -> Result<Vec<CommentThread>, YouTubeError>;
}

#[async_trait]
impl VideoProvider for YouTubeClient {
    async fn search(&self, params: &SearchParams) -> Result<Vec<SearchResult>, YouTubeError> {
        YouTubeClient::search(self, params).await
    }

    async fn videos(&self, ids: &[String]) -> Result<Vec<Video>, YouTubeError> {
        YouTubeClient::videos(self, ids, VIDEO_DETAIL_PARTS).await
    }

    async fn comment_threads(
        &self,
        video_id: &str,
        limit: u32,
    ) -> Result<Vec<CommentThread>, YouTubeError> {
        YouTubeClient::comment_threads(self, video_id, limit).await
    }
}
