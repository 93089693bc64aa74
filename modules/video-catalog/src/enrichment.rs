//! Turn bare video ids into catalog records.
//!
//! One batched detail query, then per-video derivation (age, duration, short
//! flag, topics, engagement ratio), then a bounded fan-out for comments on the
//! videos that survive the short-form filter. A video whose detail record
//! cannot be interpreted is skipped on its own; it never sinks the batch.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use thiserror::Error;
use youtube_client::{Video, VideoStatistics, YouTubeError};

use crate::age;
use crate::comments::{top_comments, TOP_COMMENT_LIMIT};
use crate::duration::{self, MalformedDuration};
use crate::provider::VideoProvider;
use crate::record::{like_view_ratio, topic_category_id, Count, EnrichedVideoRecord};

/// Knobs for one enrichment pass.
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    /// Comments kept per video.
    pub comment_limit: u32,
    /// Comment requests in flight at once.
    pub comment_concurrency: usize,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            comment_limit: TOP_COMMENT_LIMIT,
            comment_concurrency: 4,
        }
    }
}

/// Why a single detail record was left out.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("missing {0}")]
    MissingPart(&'static str),

    #[error(transparent)]
    Duration(#[from] MalformedDuration),

    #[error("unparseable publishedAt {raw:?}: {source}")]
    PublishedAt {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Result of an enrichment pass: the surviving records plus what happened to the rest.
#[derive(Debug, Default)]
pub struct Enrichment {
    pub records: BTreeMap<String, EnrichedVideoRecord>,
    /// Detail records the provider returned.
    pub detailed: usize,
    /// Records dropped by the short-form filter.
    pub shorts: usize,
    /// Records skipped because their details could not be interpreted.
    pub skipped: usize,
}

/// Optional detail parts with their defaults applied.
///
/// The provider omits `statistics`, `topicDetails` and `status` for some
/// videos; each resolves to its empty form here so derivation never branches
/// on presence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedParts {
    pub view_count: Count,
    pub like_count: Count,
    pub comment_count: Count,
    pub topic_categories: Vec<String>,
    pub made_for_kids: bool,
}

impl ResolvedParts {
    pub fn resolve(video: &Video) -> Self {
        let stats = video.statistics.clone().unwrap_or_else(VideoStatistics::default);
        let topic_categories = video
            .topic_details
            .as_ref()
            .map(|t| {
                t.topic_categories
                    .iter()
                    .map(|url| topic_category_id(url).to_string())
                    .collect()
            })
            .unwrap_or_default();
        let made_for_kids = video
            .status
            .as_ref()
            .and_then(|s| s.made_for_kids)
            .unwrap_or(false);

        Self {
            view_count: Count::from_raw(stats.view_count.as_deref()),
            like_count: Count::from_raw(stats.like_count.as_deref()),
            comment_count: Count::from_raw(stats.comment_count.as_deref()),
            topic_categories,
            made_for_kids,
        }
    }
}

/// Derive a record from one detail resource, leaving `top_comments` empty.
pub fn derive_record(video: &Video, now: DateTime<Utc>) -> Result<EnrichedVideoRecord, RecordError> {
    let snippet = video.snippet.as_ref().ok_or(RecordError::MissingPart("snippet"))?;
    let raw_duration = video
        .content_details
        .as_ref()
        .and_then(|c| c.duration.as_deref())
        .ok_or(RecordError::MissingPart("contentDetails.duration"))?;
    let raw_published = snippet
        .published_at
        .as_deref()
        .ok_or(RecordError::MissingPart("snippet.publishedAt"))?;

    let length = duration::parse_duration(raw_duration)?;
    let published = age::parse_published(raw_published).map_err(|source| RecordError::PublishedAt {
        raw: raw_published.to_string(),
        source,
    })?;
    let parts = ResolvedParts::resolve(video);

    Ok(EnrichedVideoRecord {
        title: snippet.title.clone(),
        view_count: parts.view_count,
        like_count: parts.like_count,
        comment_count: parts.comment_count,
        published_age: age::format_age(published, now),
        thumbnail_url: snippet.default_thumbnail().unwrap_or_default().to_string(),
        duration_label: duration::format_compact(length.as_secs()),
        topic_categories: parts.topic_categories,
        is_short: duration::is_short(length),
        made_for_kids: parts.made_for_kids,
        top_comments: Vec::new(),
        like_view_ratio: like_view_ratio(parts.view_count, parts.like_count),
    })
}

/// Fetch, derive and filter records for `ids`. Only the detail query can fail the pass.
pub async fn enrich(
    provider: &dyn VideoProvider,
    ids: &[String],
    config: &EnrichConfig,
    now: DateTime<Utc>,
) -> Result<Enrichment, YouTubeError> {
    let mut out = Enrichment::default();
    if ids.is_empty() {
        return Ok(out);
    }

    let videos = provider.videos(ids).await?;
    out.detailed = videos.len();
    tracing::info!(requested = ids.len(), returned = videos.len(), "Fetched video details");

    let mut wanting_comments = Vec::new();
    for video in &videos {
        let record = match derive_record(video, now) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(video_id = %video.id, error = %e, "Skipping video with unusable details");
                out.skipped += 1;
                continue;
            }
        };
        if record.is_short {
            tracing::debug!(video_id = %video.id, duration = %record.duration_label, "Dropping short");
            out.shorts += 1;
            continue;
        }
        // Comments are only worth a request when the video reports at least one.
        if record.comment_count.or_zero() > 0 {
            wanting_comments.push(video.id.clone());
        }
        out.records.insert(video.id.clone(), record);
    }

    let limit = config.comment_limit;
    let fetched: Vec<(String, Vec<String>)> = stream::iter(wanting_comments)
        .map(|id| async move {
            let comments = top_comments(provider, &id, limit).await;
            (id, comments)
        })
        .buffer_unordered(config.comment_concurrency.max(1))
        .collect()
        .await;

    for (id, comments) in fetched {
        if let Some(record) = out.records.get_mut(&id) {
            record.top_comments = comments;
        }
    }

    tracing::info!(
        enriched = out.records.len(),
        shorts = out.shorts,
        skipped = out.skipped,
        "Enrichment complete"
    );
    Ok(out)
}
