pub mod error;
pub mod types;

pub use error::{Result, YouTubeError};
pub use types::{
    CommentThread, ContentDetails, SearchParams, SearchResult, Thumbnail,
    Thumbnails, TopicDetails, Video, VideoSnippet, VideoStatistics, VideoStatus, VIDEO_KIND,
};

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use types::{
    ApiErrorResponse, CommentThreadListResponse, SearchListResponse, VideoListResponse,
};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// `videos.list` accepts at most this many ids per request.
pub const MAX_IDS_PER_REQUEST: usize = 50;

/// Every part the catalog needs from `videos.list`.
pub const VIDEO_DETAIL_PARTS: &str = "statistics,snippet,contentDetails,topicDetails,status";

/// Connection settings for [`YouTubeClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct YouTubeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn with_config(api_key: String, config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Run one `search.list` page. Returns every hit, whatever its kind.
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<SearchResult>> {
        tracing::debug!(q = %params.q, topic_id = ?params.topic_id, max_results = params.max_results, "search.list");
        let resp: SearchListResponse = self.get_json("search", params).await?;
        Ok(resp.items)
    }

    /// Fetch full video resources for `ids`, splitting into API-sized batches.
    /// Ids the API does not know are silently absent from the result.
    pub async fn videos(&self, ids: &[String], parts: &str) -> Result<Vec<Video>> {
        let mut videos = Vec::with_capacity(ids.len());
        for batch in id_batches(ids) {
            let query = [("part", parts), ("id", batch.as_str())];
            let resp: VideoListResponse = self.get_json("videos", &query).await?;
            tracing::debug!(returned = resp.items.len(), "videos.list");
            videos.extend(resp.items);
        }
        Ok(videos)
    }

    /// Fetch up to `max_results` top-level comment threads for a video, most relevant first.
    pub async fn comment_threads(&self, video_id: &str, max_results: u32) -> Result<Vec<CommentThread>> {
        let max_results = max_results.to_string();
        let query = [
            ("part", "snippet"),
            ("videoId", video_id),
            ("maxResults", max_results.as_str()),
            ("order", "relevance"),
        ];
        let resp: CommentThreadListResponse = self.get_json("commentThreads", &query).await?;
        Ok(resp.items)
    }

    async fn get_json<Q, T>(&self, resource: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, resource);
        let resp = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(YouTubeError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Comma-joined id lists of at most [`MAX_IDS_PER_REQUEST`] ids each, in input order.
fn id_batches(ids: &[String]) -> Vec<String> {
    ids.chunks(MAX_IDS_PER_REQUEST).map(|chunk| chunk.join(",")).collect()
}

/// Pull the human message out of a Google error envelope, falling back to the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn numbered_ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("id{i}")).collect()
    }

    /// Answer one connection per canned `(status, body)` and hand back the request lines.
    async fn serve(responses: Vec<(u16, &'static str)>) -> (String, tokio::task::JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let mut request_lines = Vec::new();
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    head.extend_from_slice(&buf[..n]);
                }
                let head = String::from_utf8_lossy(&head);
                request_lines.push(head.lines().next().unwrap_or_default().to_string());

                let reply = format!(
                    "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(reply.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
            request_lines
        });
        (base_url, handle)
    }

    fn client_for(base_url: String) -> YouTubeClient {
        let config = ClientConfig {
            base_url,
            ..ClientConfig::default()
        };
        YouTubeClient::with_config("test-key".to_string(), &config).unwrap()
    }

    #[test]
    fn id_batches_split_at_fifty_and_keep_order() {
        assert!(id_batches(&[]).is_empty());
        assert_eq!(id_batches(&numbered_ids(1)), vec!["id0".to_string()]);

        let full = id_batches(&numbered_ids(50));
        assert_eq!(full.len(), 1);
        assert_eq!(full[0].split(',').count(), 50);

        let spill = id_batches(&numbered_ids(51));
        assert_eq!(spill.len(), 2);
        assert_eq!(spill[0].split(',').count(), 50);
        assert_eq!(spill[1], "id50");

        let batches = id_batches(&numbered_ids(120));
        let sizes: Vec<usize> = batches.iter().map(|b| b.split(',').count()).collect();
        assert_eq!(sizes, vec![50, 50, 20]);
        assert!(batches[0].starts_with("id0,id1,"));
        assert!(batches[1].starts_with("id50,"));
        assert!(batches[2].starts_with("id100,"));
        assert!(batches[2].ends_with(",id119"));
    }

    #[tokio::test]
    async fn videos_sends_one_request_per_batch() {
        let video = r#"{"items":[{"id":"id0"}]}"#;
        let empty = r#"{"items":[]}"#;
        let (base_url, server) = serve(vec![(200, video), (200, empty), (200, empty)]).await;

        let videos = client_for(base_url)
            .videos(&numbered_ids(120), "snippet")
            .await
            .unwrap();
        let requests = server.await.unwrap();

        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].id, "id0");
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|line| line.starts_with("GET /videos?")));
        assert!(requests.iter().all(|line| line.contains("key=test-key")));
        assert!(requests[0].contains("id=id0%2Cid1%2C"));
        assert!(requests[2].contains("id=id100%2C"));
    }

    #[tokio::test]
    async fn non_success_status_surfaces_api_message() {
        let body = r#"{"error":{"code":403,"message":"quotaExceeded"}}"#;
        let (base_url, server) = serve(vec![(403, body)]).await;

        let err = client_for(base_url)
            .videos(&numbered_ids(3), "snippet")
            .await
            .unwrap_err();
        server.await.unwrap();

        match err {
            YouTubeError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "quotaExceeded");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn comment_threads_ask_for_relevance_order() {
        let (base_url, server) = serve(vec![(200, r#"{"items":[]}"#)]).await;

        let threads = client_for(base_url).comment_threads("abc", 3).await.unwrap();
        let requests = server.await.unwrap();

        assert!(threads.is_empty());
        assert!(requests[0].starts_with("GET /commentThreads?"));
        assert!(requests[0].contains("videoId=abc"));
        assert!(requests[0].contains("maxResults=3"));
        assert!(requests[0].contains("order=relevance"));
    }

    #[test]
    fn error_message_prefers_envelope_message() {
        let body = r#"{"error":{"code":403,"message":"The request cannot be completed because you have exceeded your quota."}}"#;
        assert_eq!(
            error_message(body),
            "The request cannot be completed because you have exceeded your quota."
        );
    }

    #[test]
    fn error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn with_config_trims_trailing_slash() {
        let config = ClientConfig {
            base_url: "http://localhost:8080/youtube/v3/".to_string(),
            ..ClientConfig::default()
        };
        let client = YouTubeClient::with_config("key".to_string(), &config).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/youtube/v3");
    }
}
