//! Grouping of evaluations into priority buckets.

use crate::evaluation::Evaluation;
use serde::{Deserialize, Serialize};

/// Lower score bounds of the priority buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PriorityThresholds {
    pub exceptional: u32,
    pub high: u32,
    pub good: u32,
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self {
            exceptional: 85,
            high: 70,
            good: 60,
        }
    }
}

impl PriorityThresholds {
    /// True when `exceptional > high > good`.
    #[must_use]
    pub fn is_descending(&self) -> bool {
        self.exceptional > self.high && self.high > self.good
    }

    /// Bucket for a score. A score equal to a threshold belongs to the higher bucket.
    #[must_use]
    pub fn bucket(&self, score: u32) -> PriorityBucket {
        if score >= self.exceptional {
            PriorityBucket::Exceptional
        } else if score >= self.high {
            PriorityBucket::High
        } else if score >= self.good {
            PriorityBucket::Good
        } else {
            PriorityBucket::BelowThreshold
        }
    }

    /// Score range of a bucket, e.g. `70-84 points`.
    #[must_use]
    pub fn range_label(&self, bucket: PriorityBucket) -> String {
        match bucket {
            PriorityBucket::Exceptional => format!("≥{} points", self.exceptional),
            PriorityBucket::High => format!("{}-{} points", self.high, self.exceptional.saturating_sub(1)),
            PriorityBucket::Good => format!("{}-{} points", self.good, self.high.saturating_sub(1)),
            PriorityBucket::BelowThreshold => format!("<{} points", self.good),
        }
    }
}

/// Priority bucket, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityBucket {
    Exceptional,
    High,
    Good,
    BelowThreshold,
}

impl PriorityBucket {
    /// All buckets, best first.
    pub const ALL: [PriorityBucket; 4] = [
        PriorityBucket::Exceptional,
        PriorityBucket::High,
        PriorityBucket::Good,
        PriorityBucket::BelowThreshold,
    ];

    /// Short label used in the summary block.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Exceptional => "Exceptional",
            Self::High => "High",
            Self::Good => "Good",
            Self::BelowThreshold => "Below Threshold",
        }
    }

    /// Section heading label.
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Self::Exceptional => "Exceptional Quality",
            Self::High => "High Quality",
            Self::Good => "Good Quality",
            Self::BelowThreshold => "Below Threshold",
        }
    }
}

/// Evaluations split by bucket, each bucket sorted by descending score.
#[derive(Debug, Clone, Default)]
pub struct PriorityGroups<'a> {
    pub exceptional: Vec<&'a Evaluation>,
    pub high: Vec<&'a Evaluation>,
    pub good: Vec<&'a Evaluation>,
    pub below_threshold: Vec<&'a Evaluation>,
}

impl<'a> PriorityGroups<'a> {
    /// Evaluations in `bucket`.
    #[must_use]
    pub fn bucket(&self, bucket: PriorityBucket) -> &[&'a Evaluation] {
        match bucket {
            PriorityBucket::Exceptional => &self.exceptional,
            PriorityBucket::High => &self.high,
            PriorityBucket::Good => &self.good,
            PriorityBucket::BelowThreshold => &self.below_threshold,
        }
    }

    fn bucket_mut(&mut self, bucket: PriorityBucket) -> &mut Vec<&'a Evaluation> {
        match bucket {
            PriorityBucket::Exceptional => &mut self.exceptional,
            PriorityBucket::High => &mut self.high,
            PriorityBucket::Good => &mut self.good,
            PriorityBucket::BelowThreshold => &mut self.below_threshold,
        }
    }

    /// Non-empty buckets, best first.
    pub fn sections(&self) -> impl Iterator<Item = (PriorityBucket, &[&'a Evaluation])> {
        PriorityBucket::ALL
            .into_iter()
            .map(|bucket| (bucket, self.bucket(bucket)))
            .filter(|(_, evaluations)| !evaluations.is_empty())
    }
}

/// Number of evaluations per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub exceptional: usize,
    pub high: usize,
    pub good: usize,
    pub below_threshold: usize,
    pub total: usize,
}

impl PriorityCounts {
    /// Count for one bucket.
    #[must_use]
    pub fn get(&self, bucket: PriorityBucket) -> usize {
        match bucket {
            PriorityBucket::Exceptional => self.exceptional,
            PriorityBucket::High => self.high,
            PriorityBucket::Good => self.good,
            PriorityBucket::BelowThreshold => self.below_threshold,
        }
    }

    /// Evaluations at or above the "good" threshold.
    #[must_use]
    pub fn quality(&self) -> usize {
        self.exceptional + self.high + self.good
    }
}

/// Groups evaluations by score thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityGrouper {
    thresholds: PriorityThresholds,
}

impl PriorityGrouper {
    /// Creates a grouper with the given thresholds.
    #[must_use]
    pub fn new(thresholds: PriorityThresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds in use.
    #[must_use]
    pub fn thresholds(&self) -> &PriorityThresholds {
        &self.thresholds
    }

    /// Partitions `evaluations` into buckets sorted by descending score.
    ///
    /// Equal scores keep their input order.
    #[must_use]
    pub fn group<'a>(&self, evaluations: &'a [Evaluation]) -> PriorityGroups<'a> {
        let mut sorted: Vec<&Evaluation> = evaluations.iter().collect();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));

        let mut groups = PriorityGroups::default();
        for evaluation in sorted {
            groups
                .bucket_mut(self.thresholds.bucket(evaluation.score))
                .push(evaluation);
        }
        groups
    }

    /// Bucket sizes for `evaluations`.
    #[must_use]
    pub fn counts(&self, evaluations: &[Evaluation]) -> PriorityCounts {
        let mut counts = PriorityCounts {
            total: evaluations.len(),
            ..PriorityCounts::default()
        };
        for evaluation in evaluations {
            match self.thresholds.bucket(evaluation.score) {
                PriorityBucket::Exceptional => counts.exceptional += 1,
                PriorityBucket::High => counts.high += 1,
                PriorityBucket::Good => counts.good += 1,
                PriorityBucket::BelowThreshold => counts.below_threshold += 1,
            }
        }
        counts
    }
}
