use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sentinel written for counts the provider did not report.
pub const NOT_AVAILABLE: &str = "N/A";

/// A provider statistic. Hidden or missing counts stay distinguishable from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Count {
    Value(u64),
    #[default]
    NotAvailable,
}

impl Count {
    /// Interpret the raw decimal string the provider sends. Absent or
    /// unparseable values become [`Count::NotAvailable`].
    pub fn from_raw(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse::<u64>().ok())
            .map(Count::Value)
            .unwrap_or(Count::NotAvailable)
    }

    pub fn value(&self) -> Option<u64> {
        match self {
            Count::Value(n) => Some(*n),
            Count::NotAvailable => None,
        }
    }

    /// The count, reading "not available" as zero.
    pub fn or_zero(&self) -> u64 {
        self.value().unwrap_or(0)
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Count::Value(n) => write!(f, "{n}"),
            Count::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for Count {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Count::Value(n) => serializer.serialize_u64(*n),
            Count::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Older catalogs stored the provider's decimal strings verbatim.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Count::Value(n),
            Raw::Text(s) => Count::from_raw(Some(s.as_str())),
        })
    }
}

/// One catalog entry: a video plus everything derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedVideoRecord {
    pub title: String,
    pub view_count: Count,
    pub like_count: Count,
    pub comment_count: Count,
    /// Age label such as `3 days ago`.
    #[serde(rename = "published_at")]
    pub published_age: String,
    pub thumbnail_url: String,
    /// Compact duration label such as `4m 13s`.
    #[serde(rename = "duration")]
    pub duration_label: String,
    pub topic_categories: Vec<String>,
    pub is_short: bool,
    pub made_for_kids: bool,
    pub top_comments: Vec<String>,
    pub like_view_ratio: String,
}

/// Likes as a percentage of views, two decimals. Zero or missing views give `0.00%`.
pub fn like_view_ratio(views: Count, likes: Count) -> String {
    let views = views.or_zero();
    if views == 0 {
        return "0.00%".to_string();
    }
    let ratio = likes.or_zero() as f64 / views as f64 * 100.0;
    format!("{ratio:.2}%")
}

/// Last path segment of a topic category URL:
/// `https://en.wikipedia.org/wiki/Lifestyle_(sociology)` becomes `Lifestyle_(sociology)`.
pub fn topic_category_id(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_of_zero_views_is_zero_percent() {
        assert_eq!(like_view_ratio(Count::Value(0), Count::Value(10)), "0.00%");
        assert_eq!(like_view_ratio(Count::NotAvailable, Count::Value(10)), "0.00%");
    }

    #[test]
    fn ratio_formats_two_decimals() {
        assert_eq!(like_view_ratio(Count::Value(200), Count::Value(50)), "25.00%");
        assert_eq!(like_view_ratio(Count::Value(3), Count::Value(1)), "33.33%");
        assert_eq!(like_view_ratio(Count::Value(1000), Count::NotAvailable), "0.00%");
    }

    #[test]
    fn count_from_raw_keeps_missing_distinct_from_zero() {
        assert_eq!(Count::from_raw(Some("42")), Count::Value(42));
        assert_eq!(Count::from_raw(Some("0")), Count::Value(0));
        assert_eq!(Count::from_raw(None), Count::NotAvailable);
        assert_eq!(Count::from_raw(Some("lots")), Count::NotAvailable);
    }

    #[test]
    fn count_serializes_as_number_or_sentinel() {
        assert_eq!(serde_json::to_value(Count::Value(7)).unwrap(), serde_json::json!(7));
        assert_eq!(serde_json::to_value(Count::NotAvailable).unwrap(), serde_json::json!("N/A"));
    }

    #[test]
    fn count_reads_legacy_string_values() {
        let c: Count = serde_json::from_value(serde_json::json!("1234")).unwrap();
        assert_eq!(c, Count::Value(1234));
        let c: Count = serde_json::from_value(serde_json::json!("N/A")).unwrap();
        assert_eq!(c, Count::NotAvailable);
    }

    #[test]
    fn topic_category_takes_trailing_segment() {
        assert_eq!(
            topic_category_id("https://en.wikipedia.org/wiki/Lifestyle_(sociology)"),
            "Lifestyle_(sociology)"
        );
        assert_eq!(topic_category_id("Music"), "Music");
    }

    #[test]
    fn record_uses_catalog_key_names() {
        let record = EnrichedVideoRecord {
            title: "t".into(),
            view_count: Count::Value(1),
            like_count: Count::NotAvailable,
            comment_count: Count::Value(0),
            published_age: "just now".into(),
            thumbnail_url: String::new(),
            duration_label: "5m 0s".into(),
            topic_categories: vec![],
            is_short: false,
            made_for_kids: false,
            top_comments: vec![],
            like_view_ratio: "0.00%".into(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["published_at"], "just now");
        assert_eq!(value["duration"], "5m 0s");
        assert_eq!(value["like_count"], "N/A");
        let back: EnrichedVideoRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }
}
