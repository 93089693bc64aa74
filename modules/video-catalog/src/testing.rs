// Test doubles for the harvest pipeline.
//
// MockProvider (VideoProvider): builder-registered search hits, detail
// records and comment threads, plus a log of every request it served so
// tests can assert on batching and on which comments were fetched.
//
// Plus helpers for building search hits and detail records.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use youtube_client::types::{
    Comment, CommentSnippet, CommentThreadSnippet, SearchResultId,
};
use youtube_client::{
    CommentThread, ContentDetails, SearchParams, SearchResult, Thumbnail, Thumbnails,
    TopicDetails, Video, VideoSnippet, VideoStatistics, VideoStatus, YouTubeError,
};

use crate::provider::VideoProvider;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// The "now" every pipeline test runs at.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn video_hit(id: &str) -> SearchResult {
    SearchResult {
        id: SearchResultId {
            kind: youtube_client::VIDEO_KIND.to_string(),
            video_id: Some(id.to_string()),
            channel_id: None,
            playlist_id: None,
        },
    }
}

pub fn channel_hit(id: &str) -> SearchResult {
    SearchResult {
        id: SearchResultId {
            kind: "youtube#channel".to_string(),
            video_id: None,
            channel_id: Some(id.to_string()),
            playlist_id: None,
        },
    }
}

/// A detail record published two days before [`fixed_now`].
/// `stats` is `(views, likes, comments)`; `None` omits the statistics part.
pub fn video(id: &str, duration: &str, stats: Option<(&str, &str, &str)>) -> Video {
    let published = fixed_now() - Duration::days(2);
    Video {
        id: id.to_string(),
        snippet: Some(VideoSnippet {
            title: format!("Video {id}"),
            published_at: Some(published.to_rfc3339()),
            thumbnails: Some(Thumbnails {
                default: Some(Thumbnail {
                    url: format!("https://i.ytimg.com/vi/{id}/default.jpg"),
                }),
            }),
        }),
        statistics: stats.map(|(views, likes, comments)| VideoStatistics {
            view_count: Some(views.to_string()),
            like_count: Some(likes.to_string()),
            comment_count: Some(comments.to_string()),
        }),
        content_details: Some(ContentDetails {
            duration: Some(duration.to_string()),
        }),
        topic_details: Some(TopicDetails::default()),
        status: Some(VideoStatus {
            made_for_kids: Some(false),
        }),
    }
}

pub fn comment_thread(text: &str) -> CommentThread {
    CommentThread {
        snippet: CommentThreadSnippet {
            top_level_comment: Comment {
                snippet: CommentSnippet {
                    text_display: text.to_string(),
                },
            },
        },
    }
}

fn api_error(status: u16, message: &str) -> YouTubeError {
    YouTubeError::Api {
        status,
        message: message.to_string(),
    }
}

// ---------------------------------------------------------------------------
// MockProvider
// ---------------------------------------------------------------------------

/// In-memory provider. Unregistered video ids are simply absent from detail
/// responses, and unregistered comment threads come back empty, the way the
/// real API behaves.
pub struct MockProvider {
    search_hits: Option<Vec<SearchResult>>,
    search_error: Option<(u16, String)>,
    videos: HashMap<String, Video>,
    videos_error: Option<(u16, String)>,
    comments: HashMap<String, Vec<CommentThread>>,
    comment_errors: HashMap<String, (u16, String)>,
    searches: Mutex<Vec<SearchParams>>,
    video_requests: Mutex<Vec<Vec<String>>>,
    comment_requests: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            search_hits: None,
            search_error: None,
            videos: HashMap::new(),
            videos_error: None,
            comments: HashMap::new(),
            comment_errors: HashMap::new(),
            searches: Mutex::new(Vec::new()),
            video_requests: Mutex::new(Vec::new()),
            comment_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn on_search(mut self, hits: Vec<SearchResult>) -> Self {
        self.search_hits = Some(hits);
        self
    }

    pub fn fail_search(mut self, status: u16, message: &str) -> Self {
        self.search_error = Some((status, message.to_string()));
        self
    }

    pub fn on_video(mut self, video: Video) -> Self {
        self.videos.insert(video.id.clone(), video);
        self
    }

    pub fn fail_videos(mut self, status: u16, message: &str) -> Self {
        self.videos_error = Some((status, message.to_string()));
        self
    }

    pub fn on_comments(mut self, video_id: &str, texts: &[&str]) -> Self {
        let threads = texts.iter().map(|t| comment_thread(t)).collect();
        self.comments.insert(video_id.to_string(), threads);
        self
    }

    pub fn fail_comments(mut self, video_id: &str, status: u16, message: &str) -> Self {
        self.comment_errors
            .insert(video_id.to_string(), (status, message.to_string()));
        self
    }

    pub fn last_search(&self) -> Option<SearchParams> {
        self.searches.lock().unwrap().last().cloned()
    }

    pub fn video_requests(&self) -> Vec<Vec<String>> {
        self.video_requests.lock().unwrap().clone()
    }

    /// Video ids whose comments were requested, sorted (fetches run concurrently).
    pub fn comment_requests(&self) -> Vec<String> {
        let mut ids = self.comment_requests.lock().unwrap().clone();
        ids.sort();
        ids
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoProvider for MockProvider {
    async fn search(&self, params: &SearchParams) -> Result<Vec<SearchResult>, YouTubeError> {
        self.searches.lock().unwrap().push(params.clone());
        if let Some((status, message)) = &self.search_error {
            return Err(api_error(*status, message));
        }
        self.search_hits
            .clone()
            .ok_or_else(|| YouTubeError::Network("MockProvider: no search registered".into()))
    }

    async fn videos(&self, ids: &[String]) -> Result<Vec<Video>, YouTubeError> {
        self.video_requests.lock().unwrap().push(ids.to_vec());
        if let Some((status, message)) = &self.videos_error {
            return Err(api_error(*status, message));
        }
        Ok(ids.iter().filter_map(|id| self.videos.get(id).cloned()).collect())
    }

    async fn comment_threads(
        &self,
        video_id: &str,
        limit: u32,
    ) -> Result<Vec<CommentThread>, YouTubeError> {
        self.comment_requests.lock().unwrap().push(video_id.to_string());
        if let Some((status, message)) = self.comment_errors.get(video_id) {
            return Err(api_error(*status, message));
        }
        Ok(self
            .comments
            .get(video_id)
            .map(|threads| threads.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }
}
