use std::collections::HashMap;

use serde::Serialize;

use crate::metrics::MetricRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestedCount {
    pub name: String,
    pub count: usize,
}

/// Counts how often each candidate was suggested, one increment per record.
/// Null and empty names are ignored. Ties keep first-seen order.
pub fn count_by_suggested(records: &[MetricRecord]) -> Vec<SuggestedCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<SuggestedCount> = Vec::new();

    for name in records
        .iter()
        .filter_map(|r| r.suggested.as_deref())
        .filter(|name| !name.is_empty())
    {
        match index.get(name) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(name, counts.len());
                counts.push(SuggestedCount {
                    name: name.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::normalize::RawField;

    fn suggested(name: Option<&str>) -> MetricRecord {
        MetricRecord {
            suggested: name.map(String::from),
            required_skills: RawField::Missing,
            required_seniority: RawField::Missing,
            created_at: "not-a-date".to_string(),
        }
    }

    #[test]
    fn test_counts_raw_occurrences() {
        let records = vec![
            suggested(Some("Luis")),
            suggested(Some("Ana")),
            suggested(Some("Ana")),
            suggested(None),
            suggested(Some("Ana")),
        ];
        assert_eq!(
            count_by_suggested(&records),
            vec![
                SuggestedCount { name: "Ana".into(), count: 3 },
                SuggestedCount { name: "Luis".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_ignores_empty_names_and_timestamps() {
        // No timestamp parsing here: a bad created_at still counts.
        let records = vec![suggested(Some("")), suggested(Some("Marta"))];
        let counts = count_by_suggested(&records);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].name, "Marta");
    }

    #[test]
    fn test_names_are_case_sensitive_and_ties_stable() {
        let records = vec![suggested(Some("ana")), suggested(Some("Ana"))];
        let names: Vec<_> = count_by_suggested(&records)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["ana", "Ana"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(count_by_suggested(&[]).is_empty());
    }
}
