//! Aggregated run reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{FacetId, TopicId};

use super::trace::DialogueTrace;

/// Metric recording the number of turns a dialogue took.
pub const METRIC_TURNS: &str = "turns";
/// Metric recording subjective success as 0 or 1.
pub const METRIC_SUBJECTIVE_SUCCESS: &str = "subj_success";
/// Metric recording real success as 0 or 1.
pub const METRIC_REAL_SUCCESS: &str = "real_success";

/// Mean, median and population standard deviation of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
}

impl SummaryStats {
    /// Returns `None` for an empty sample.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Some(Self {
            mean,
            median,
            std: variance.sqrt(),
        })
    }
}

fn summarize(samples: BTreeMap<String, Vec<f64>>) -> BTreeMap<String, SummaryStats> {
    samples
        .into_iter()
        .filter_map(|(name, values)| SummaryStats::from_samples(&values).map(|s| (name, s)))
        .collect()
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Dialogues simulated for one target facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetReport {
    pub facet_id: FacetId,
    pub dialogues: Vec<DialogueTrace>,
    pub metrics: BTreeMap<String, SummaryStats>,
}

impl FacetReport {
    pub fn from_dialogues(facet_id: FacetId, dialogues: Vec<DialogueTrace>) -> Self {
        let mut samples: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for dialogue in &dialogues {
            samples
                .entry(METRIC_TURNS.to_string())
                .or_default()
                .push(dialogue.turn_count() as f64);
            samples
                .entry(METRIC_SUBJECTIVE_SUCCESS.to_string())
                .or_default()
                .push(flag(dialogue.subjective_success));
            samples
                .entry(METRIC_REAL_SUCCESS.to_string())
                .or_default()
                .push(flag(dialogue.real_success));
            for (name, value) in &dialogue.metrics {
                samples.entry(name.clone()).or_default().push(*value);
            }
        }

        Self {
            facet_id,
            dialogues,
            metrics: summarize(samples),
        }
    }
}

/// How a topic's simulation ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TopicOutcome {
    Completed { facets: Vec<FacetReport> },
    /// A dialogue failed; nothing from this topic enters the global metrics.
    Aborted { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicReport {
    pub topic_id: TopicId,
    pub query: String,
    #[serde(flatten)]
    pub outcome: TopicOutcome,
}

impl TopicReport {
    pub fn is_aborted(&self) -> bool {
        matches!(self.outcome, TopicOutcome::Aborted { .. })
    }

    /// Per-facet reports, empty for an aborted topic.
    pub fn facets(&self) -> &[FacetReport] {
        match &self.outcome {
            TopicOutcome::Completed { facets } => facets,
            TopicOutcome::Aborted { .. } => &[],
        }
    }
}

/// Result of simulating every facet of every topic for a number of epochs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub epochs: usize,
    pub ranker: String,
    pub topics: Vec<TopicReport>,
    /// Summary over per-facet means.
    pub metrics: BTreeMap<String, SummaryStats>,
}

impl RunReport {
    pub fn new(epochs: usize, ranker: impl Into<String>, topics: Vec<TopicReport>) -> Self {
        let mut samples: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for facet in topics.iter().flat_map(TopicReport::facets) {
            for (name, stats) in &facet.metrics {
                samples.entry(name.clone()).or_default().push(stats.mean);
            }
        }

        Self {
            generated_at: Utc::now(),
            epochs,
            ranker: ranker.into(),
            topics,
            metrics: summarize(samples),
        }
    }

    pub fn aborted_topics(&self) -> usize {
        self.topics.iter().filter(|t| t.is_aborted()).count()
    }
}
