//! Dashboard view: the three rankings plus the proportional bar widths the UI renders.

use serde::Serialize;

use crate::metrics::aggregate::TimestampRanking;
use crate::metrics::tally::{count_by_suggested, SuggestedCount};
use crate::metrics::{count_required_seniority, count_required_skills, MetricRecord};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub required_unique_skills: usize,
    pub required_unique_seniority: usize,
    pub single_candidates: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedBar {
    pub label: String,
    pub count: usize,
    /// Width relative to the top entry, 0–100.
    pub percent: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingView {
    pub items: Vec<RankedBar>,
    pub total_timestamps: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub rank: usize,
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub summary: DashboardSummary,
    pub required_skills: RankingView,
    pub required_seniority: RankingView,
    pub top_suggested: Vec<RankedCandidate>,
}

/// `round(count / max(max_count, 1) * 100)`
pub fn percent_of_max(count: usize, max_count: usize) -> u32 {
    let max = max_count.max(1) as f64;
    ((count as f64 / max) * 100.0).round() as u32
}

fn ranking_view(ranking: TimestampRanking) -> RankingView {
    let max_count = ranking
        .by_frequency
        .iter()
        .map(|e| e.count)
        .max()
        .unwrap_or(0);

    RankingView {
        items: ranking
            .by_frequency
            .into_iter()
            .map(|e| RankedBar {
                percent: percent_of_max(e.count, max_count),
                label: e.token,
                count: e.count,
            })
            .collect(),
        total_timestamps: ranking.total_timestamps,
    }
}

fn ranked_candidates(counts: Vec<SuggestedCount>) -> Vec<RankedCandidate> {
    counts
        .into_iter()
        .enumerate()
        .map(|(i, c)| RankedCandidate {
            rank: i + 1,
            name: c.name,
            count: c.count,
        })
        .collect()
}

pub fn build_dashboard(records: &[MetricRecord]) -> DashboardResponse {
    let skills = count_required_skills(records);
    let seniority = count_required_seniority(records);
    let suggested = count_by_suggested(records);

    DashboardResponse {
        summary: DashboardSummary {
            required_unique_skills: skills.total_timestamps,
            required_unique_seniority: seniority.total_timestamps,
            single_candidates: suggested.len(),
        },
        required_skills: ranking_view(skills),
        required_seniority: ranking_view(seniority),
        top_suggested: ranked_candidates(suggested),
    }
}
