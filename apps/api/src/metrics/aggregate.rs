//! Time-bucketed aggregation: "in how many distinct submission events was X requested".
//!
//! Records are grouped by their `created_at` truncated to the second (UTC). Each bucket
//! holds the distinct tokens seen in it, and a token's count is the number of buckets
//! that contain it. A verbose record can therefore add at most 1 to any token.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::metrics::MetricRecord;

const BUCKET_KEY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub token: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimestampRanking {
    /// Sorted by count descending. Ties keep first-encountered order.
    pub by_frequency: Vec<FrequencyEntry>,
    pub total_timestamps: usize,
}

/// Parses the loosely formatted `created_at` strings the store hands back.
///
/// Accepts RFC 3339, Postgres `timestamptz` text (`2024-01-01 10:00:00.5+00`), offset-less
/// date-times (read as UTC) and bare dates (midnight UTC).
pub fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Bucket key for a record: UTC, truncated to whole seconds.
pub fn bucket_key(raw_created_at: &str) -> Option<String> {
    parse_created_at(raw_created_at).map(|dt| dt.format(BUCKET_KEY_FORMAT).to_string())
}

/// Ranks tokens by the number of distinct timestamp buckets they appear in.
///
/// Records with no tokens or an unparsable `created_at` are skipped entirely.
pub fn rank_by_timestamp<F>(records: &[MetricRecord], extract: F) -> TimestampRanking
where
    F: Fn(&MetricRecord) -> Vec<String>,
{
    // Insertion-ordered buckets so tie order is reproducible.
    let mut bucket_index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<Vec<String>> = Vec::new();
    let mut seen: Vec<HashSet<String>> = Vec::new();

    for record in records {
        let tokens = extract(record);
        if tokens.is_empty() {
            continue;
        }
        let Some(key) = bucket_key(&record.created_at) else {
            continue;
        };

        let idx = *bucket_index.entry(key).or_insert_with(|| {
            buckets.push(Vec::new());
            seen.push(HashSet::new());
            buckets.len() - 1
        });

        for token in tokens {
            if seen[idx].insert(token.clone()) {
                buckets[idx].push(token);
            }
        }
    }

    let mut token_index: HashMap<&str, usize> = HashMap::new();
    let mut by_frequency: Vec<FrequencyEntry> = Vec::new();

    for bucket in &buckets {
        for token in bucket {
            match token_index.get(token.as_str()) {
                Some(&i) => by_frequency[i].count += 1,
                None => {
                    token_index.insert(token.as_str(), by_frequency.len());
                    by_frequency.push(FrequencyEntry {
                        token: token.clone(),
                        count: 1,
                    });
                }
            }
        }
    }

    // Stable: equal counts stay in accumulation order.
    by_frequency.sort_by(|a, b| b.count.cmp(&a.count));

    TimestampRanking {
        by_frequency,
        total_timestamps: buckets.len(),
    }
}
