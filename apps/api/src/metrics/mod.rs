// Demand metrics: skill/seniority rankings and suggested-candidate tallies.
// Everything below `handlers`/`repository` is pure and recomputed per request.

pub mod aggregate;
pub mod dashboard;
pub mod handlers;
pub mod normalize;
pub mod repository;
pub mod seniority;
pub mod tally;

use crate::metrics::aggregate::{rank_by_timestamp, TimestampRanking};
use crate::metrics::normalize::{normalize_field, MalformedArray, RawField};
use crate::metrics::seniority::canonicalize_seniority;
use crate::models::metric::MetricRow;

/// Input unit of every metrics pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub suggested: Option<String>,
    pub required_skills: RawField,
    pub required_seniority: RawField,
    pub created_at: String,
}

impl From<MetricRow> for MetricRecord {
    fn from(row: MetricRow) -> Self {
        Self {
            suggested: row.suggested,
            required_skills: RawField::from(row.required_skills),
            required_seniority: RawField::from(row.required_seniority),
            created_at: row.created_at.unwrap_or_default(),
        }
    }
}

/// Required skills per record. A malformed JSON array counts as no skills.
pub fn skill_tokens(record: &MetricRecord) -> Vec<String> {
    normalize_field(&record.required_skills, MalformedArray::Drop)
}

/// Required seniorities per record, canonicalized to Lead/Senior/Mid/Junior.
pub fn seniority_tokens(record: &MetricRecord) -> Vec<String> {
    normalize_field(&record.required_seniority, MalformedArray::Literal)
        .iter()
        .map(|s| canonicalize_seniority(s))
        .collect()
}

pub fn count_required_skills(records: &[MetricRecord]) -> TimestampRanking {
    rank_by_timestamp(records, skill_tokens)
}

pub fn count_required_seniority(records: &[MetricRecord]) -> TimestampRanking {
    rank_by_timestamp(records, seniority_tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(skills: serde_json::Value, seniority: serde_json::Value, at: &str) -> MetricRecord {
        MetricRecord::from(MetricRow {
            suggested: None,
            required_skills: Some(skills),
            required_seniority: Some(seniority),
            created_at: Some(at.to_string()),
        })
    }

    #[test]
    fn test_skill_field_shapes() {
        let json_string = row(json!(r#"["Go","Rust"]"#), json!(null), "2024-01-01");
        assert_eq!(skill_tokens(&json_string), vec!["Go", "Rust"]);

        let bare = row(json!("Go"), json!(null), "2024-01-01");
        assert_eq!(skill_tokens(&bare), vec!["Go"]);

        let malformed = row(json!("not-json-["), json!(null), "2024-01-01");
        assert!(skill_tokens(&malformed).is_empty());
    }

    #[test]
    fn test_seniority_tokens_canonicalized() {
        let record = row(
            json!(null),
            json!(r#"["Tech Lead", "senior dev", "jr"]"#),
            "2024-01-01",
        );
        assert_eq!(seniority_tokens(&record), vec!["Lead", "Senior", "Junior"]);
    }

    #[test]
    fn test_seniority_variants_dedup_within_bucket() {
        let records = vec![
            row(json!(null), json!(["Tech Lead", "LEAD"]), "2024-01-01T10:00:00Z"),
            row(json!(null), json!("Senior Lead"), "2024-01-01T11:00:00Z"),
            row(json!(null), json!("Senior"), "2024-01-01T12:00:00Z"),
        ];
        let ranking = count_required_seniority(&records);
        assert_eq!(ranking.total_timestamps, 3);
        assert_eq!(ranking.by_frequency[0].token, "Lead");
        assert_eq!(ranking.by_frequency[0].count, 2);
        assert_eq!(ranking.by_frequency[1].token, "Senior");
        assert_eq!(ranking.by_frequency[1].count, 1);
    }

    #[test]
    fn test_pipelines_skip_independently() {
        // Same record feeds both pipelines; each decides on its own field.
        let records = vec![row(json!("[broken"), json!("Mid"), "2024-01-01T10:00:00Z")];
        assert_eq!(count_required_skills(&records).total_timestamps, 0);
        assert_eq!(count_required_seniority(&records).total_timestamps, 1);
    }

    #[test]
    fn test_missing_created_at_is_unparsable() {
        let record = MetricRecord::from(MetricRow {
            suggested: Some("Ana".into()),
            required_skills: Some(json!(["Go"])),
            required_seniority: None,
            created_at: None,
        });
        assert_eq!(count_required_skills(&[record]).total_timestamps, 0);
    }
}
