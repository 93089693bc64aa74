use serde::{Deserialize, Serialize};

// --- Search ---

/// Query parameters for `search.list`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchParams {
    pub part: String,
    #[serde(rename = "maxResults")]
    pub max_results: u32,
    pub q: String,
    #[serde(rename = "topicId", skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<String>,
    #[serde(rename = "type")]
    pub result_type: String,
    #[serde(rename = "relevanceLanguage", skip_serializing_if = "Option::is_none")]
    pub relevance_language: Option<String>,
}

impl SearchParams {
    /// Video-only search for `q`, capped at `max_results` hits.
    pub fn videos(q: &str, max_results: u32) -> Self {
        Self {
            part: "snippet".to_string(),
            max_results,
            q: q.to_string(),
            topic_id: None,
            result_type: "video".to_string(),
            relevance_language: None,
        }
    }

    pub fn topic(mut self, topic_id: &str) -> Self {
        self.topic_id = Some(topic_id.to_string());
        self
    }

    pub fn relevance_language(mut self, language: &str) -> Self {
        self.relevance_language = Some(language.to_string());
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

/// A single hit from `search.list`. Hits can be videos, channels or playlists.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResultId {
    pub kind: String,
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
    #[serde(rename = "playlistId")]
    pub playlist_id: Option<String>,
}

/// Kind discriminator carried by video hits.
pub const VIDEO_KIND: &str = "youtube#video";

impl SearchResult {
    /// The video id, if this hit is a video.
    pub fn video_id(&self) -> Option<&str> {
        if self.id.kind != VIDEO_KIND {
            return None;
        }
        self.id.video_id.as_deref()
    }
}

// --- Videos ---

#[derive(Debug, Clone, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<Video>,
}

/// A full video resource from `videos.list`. Every part is optional: the API
/// omits parts that were not requested or that are unavailable for the video.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub snippet: Option<VideoSnippet>,
    pub statistics: Option<VideoStatistics>,
    pub content_details: Option<ContentDetails>,
    pub topic_details: Option<TopicDetails>,
    pub status: Option<VideoStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    #[serde(default)]
    pub title: String,
    pub published_at: Option<String>,
    pub thumbnails: Option<Thumbnails>,
}

impl VideoSnippet {
    /// URL of the default-size thumbnail.
    pub fn default_thumbnail(&self) -> Option<&str> {
        self.thumbnails
            .as_ref()
            .and_then(|t| t.default.as_ref())
            .map(|t| t.url.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

/// Counts arrive as decimal strings and are absent when the owner hides them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentDetails {
    /// ISO-8601 duration, e.g. `PT4M13S`.
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDetails {
    /// Wikipedia URLs, e.g. `https://en.wikipedia.org/wiki/Lifestyle_(sociology)`.
    #[serde(default)]
    pub topic_categories: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatus {
    pub made_for_kids: Option<bool>,
}

// --- Comment threads ---

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThread {
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: Comment,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    pub text_display: String,
}

impl CommentThread {
    /// Display text of the thread's top-level comment.
    pub fn text(&self) -> &str {
        &self.snippet.top_level_comment.snippet.text_display
    }
}

/// Error envelope returned by Google APIs on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: u16,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_result_only_yields_video_ids() {
        let body = serde_json::json!({
            "items": [
                {"id": {"kind": "youtube#video", "videoId": "abc"}},
                {"id": {"kind": "youtube#channel", "channelId": "UC1"}},
                {"id": {"kind": "youtube#playlist", "playlistId": "PL1"}},
                {"id": {"kind": "youtube#video"}}
            ]
        });
        let resp: SearchListResponse = serde_json::from_value(body).unwrap();
        let ids: Vec<&str> = resp.items.iter().filter_map(|r| r.video_id()).collect();
        assert_eq!(ids, vec!["abc"]);
    }

    #[test]
    fn video_without_optional_parts_deserializes() {
        let body = serde_json::json!({
            "id": "v1",
            "snippet": {"title": "Hello", "publishedAt": "2024-01-01T00:00:00Z"},
            "contentDetails": {"duration": "PT5M"}
        });
        let video: Video = serde_json::from_value(body).unwrap();
        assert_eq!(video.id, "v1");
        assert!(video.statistics.is_none());
        assert!(video.topic_details.is_none());
        assert!(video.status.is_none());
        assert_eq!(video.snippet.unwrap().default_thumbnail(), None);
    }

    #[test]
    fn comment_thread_text_reads_top_level_comment() {
        let body = serde_json::json!({
            "snippet": {
                "topLevelComment": {"snippet": {"textDisplay": "great video"}}
            }
        });
        let thread: CommentThread = serde_json::from_value(body).unwrap();
        assert_eq!(thread.text(), "great video");
    }

    #[test]
    fn search_params_serialize_with_api_names() {
        let params = SearchParams::videos(" ", 50)
            .topic("/m/019_rr")
            .relevance_language("en,id");
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["maxResults"], 50);
        assert_eq!(value["topicId"], "/m/019_rr");
        assert_eq!(value["type"], "video");
        assert_eq!(value["relevanceLanguage"], "en,id");
    }
}
