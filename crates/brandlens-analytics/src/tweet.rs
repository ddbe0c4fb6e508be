use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One validated tweet row from an upload.
///
/// `created_at` is kept as the raw string and parsed on demand; a row with an
/// unparseable timestamp still contributes to batch totals, just not to the
/// date/hour rollups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetRecord {
    pub id: String,
    pub text: String,
    pub created_at: String,
    pub username: String,
    pub favorite_count: u64,
    pub retweet_count: u64,
    pub reply_count: u64,
    pub quote_count: u64,
}

impl TweetRecord {
    /// Full engagement: favorites + retweets + replies + quotes.
    #[must_use]
    pub fn engagement(&self) -> u64 {
        self.favorite_count + self.retweet_count + self.reply_count + self.quote_count
    }

    /// Parse the creation timestamp, normalized to UTC.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_created_at(&self.created_at)
    }
}

/// Parse a tweet timestamp in the formats the upload pipeline accepts:
/// Twitter's classic format, RFC 3339, and a bare `YYYY-MM-DD HH:MM:SS`
/// (assumed UTC).
#[must_use]
pub fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    // "Wed Oct 10 20:19:24 +0000 2018"
    if let Ok(dt) = DateTime::parse_from_str(raw, "%a %b %d %H:%M:%S %z %Y") {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }

    None
}
