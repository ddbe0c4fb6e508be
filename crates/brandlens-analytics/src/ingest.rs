//! CSV upload parsing: raw bytes to a validated tweet batch.

use std::collections::HashMap;

use csv::StringRecord;

use crate::error::IngestError;
use crate::tweet::TweetRecord;

const REQUIRED_COLUMNS: &[&str] = &["id_str", "full_text", "created_at"];
const NUMERIC_COLUMNS: &[&str] = &[
    "favorite_count",
    "retweet_count",
    "reply_count",
    "quote_count",
];

/// Parse uploaded CSV bytes into tweet records.
///
/// Requires `id_str`, `full_text`, `created_at`; `username` falls back to
/// `default_username` (the derived brand name). Numeric engagement columns
/// default to 0 when absent or blank; float-ish values like `"12.0"` are
/// accepted.
///
/// # Errors
///
/// Returns [`IngestError::MissingColumns`] when a required header is absent,
/// [`IngestError::Empty`] when no data rows exist, and [`IngestError::Csv`]
/// on malformed CSV.
pub fn parse_tweets(bytes: &[u8], default_username: &str) -> Result<Vec<TweetRecord>, IngestError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);

    let headers = reader.headers()?.clone();
    let index: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| (name.trim(), i))
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !index.contains_key(**col))
        .map(|col| (*col).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns(missing));
    }

    let mut tweets = Vec::new();
    for record in reader.records() {
        let record = record?;
        tweets.push(row_to_tweet(&record, &index, default_username));
    }

    if tweets.is_empty() {
        return Err(IngestError::Empty);
    }

    tracing::debug!(rows = tweets.len(), "parsed tweet batch from CSV");
    Ok(tweets)
}

fn row_to_tweet(
    record: &StringRecord,
    index: &HashMap<&str, usize>,
    default_username: &str,
) -> TweetRecord {
    let field = |name: &str| -> &str {
        index
            .get(name)
            .and_then(|&i| record.get(i))
            .unwrap_or("")
            .trim()
    };

    let username = match field("username") {
        "" => default_username.to_string(),
        name => name.to_string(),
    };

    let numeric = |name: &str| parse_count(field(name));

    TweetRecord {
        id: field("id_str").to_string(),
        text: field("full_text").to_string(),
        created_at: field("created_at").to_string(),
        username,
        favorite_count: numeric(NUMERIC_COLUMNS[0]),
        retweet_count: numeric(NUMERIC_COLUMNS[1]),
        reply_count: numeric(NUMERIC_COLUMNS[2]),
        quote_count: numeric(NUMERIC_COLUMNS[3]),
    }
}

/// Lenient count parsing: blank or unparseable values become 0, and float
/// renderings of integers ("12.0") are accepted.
fn parse_count(raw: &str) -> u64 {
    if raw.is_empty() {
        return 0;
    }
    if let Ok(n) = raw.parse::<u64>() {
        return n;
    }
    if let Ok(f) = raw.parse::<f64>() {
        if f.is_finite() && f >= 0.0 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            return f.round() as u64;
        }
    }
    0
}
