use crate::types::config::VerdictBands;
use serde::Serialize;

/// Qualitative status of a single evidence signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Normal,
    Warning,
    Critical,
}

/// Categorical verdict derived purely from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Low,
    Medium,
    High,
    Confirmed,
}

impl Verdict {
    pub fn from_score(total: u32, bands: &VerdictBands) -> Self {
        if total >= bands.confirmed {
            Verdict::Confirmed
        } else if total >= bands.high {
            Verdict::High
        } else if total >= bands.medium {
            Verdict::Medium
        } else {
            Verdict::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Low => "low",
            Verdict::Medium => "medium",
            Verdict::High => "high",
            Verdict::Confirmed => "confirmed",
        }
    }
}

/// One scored signal: the raw metric, the threshold it was held against,
/// and the points it earned out of its declared maximum.
#[derive(Debug, Clone, Serialize)]
pub struct EvidenceItem {
    pub name: String,
    pub value: f64,
    pub threshold: String,
    pub score: u32,
    pub max_score: u32,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl EvidenceItem {
    pub fn new(
        name: &str,
        value: f64,
        threshold: impl Into<String>,
        score: u32,
        max_score: u32,
        status: Status,
    ) -> Self {
        Self {
            name: name.to_string(),
            value,
            threshold: threshold.into(),
            score,
            max_score,
            status,
            note: None,
        }
    }

    /// A signal that could not be evaluated; contributes zero but stays in
    /// the report with an explanation.
    pub fn skipped(name: &str, threshold: impl Into<String>, max_score: u32, note: String) -> Self {
        Self {
            name: name.to_string(),
            value: 0.0,
            threshold: threshold.into(),
            score: 0,
            max_score,
            status: Status::Normal,
            note: Some(note),
        }
    }
}

/// One flat cluster cut from the interval dendrogram. Times in minutes.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterStat {
    pub id: usize,
    pub count: usize,
    pub mean_min: f64,
    pub std_min: f64,
    pub share_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusterSummary {
    /// Ranked by descending member count; the first is the main cluster.
    pub clusters: Vec<ClusterStat>,
    pub total_intervals: usize,
}

impl ClusterSummary {
    pub fn main(&self) -> Option<&ClusterStat> {
        self.clusters.first()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OutlierSummary {
    pub indices: Vec<usize>,
    pub count: usize,
    pub share_pct: f64,
    pub z_threshold: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HourShare {
    pub hour: u32,
    pub count: usize,
    pub share_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemporalSummary {
    pub top_hours: Vec<HourShare>,
    pub half_hour_pct: f64,
    pub top_of_hour_pct: f64,
    pub total_events: usize,
}

/// The complete, immutable result of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct SuspicionReport {
    pub total_score: u32,
    pub max_score: u32,
    pub verdict: Verdict,
    /// Breakpoints the verdict was derived from, stated explicitly.
    pub verdict_bands: VerdictBands,
    pub evidence: Vec<EvidenceItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clusters: Option<ClusterSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outliers: Option<OutlierSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal: Option<TemporalSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_is_pure_in_the_score() {
        let bands = VerdictBands::default();
        assert_eq!(Verdict::from_score(0, &bands), Verdict::Low);
        assert_eq!(Verdict::from_score(34, &bands), Verdict::Low);
        assert_eq!(Verdict::from_score(35, &bands), Verdict::Medium);
        assert_eq!(Verdict::from_score(70, &bands), Verdict::High);
        assert_eq!(Verdict::from_score(100, &bands), Verdict::Confirmed);
        assert_eq!(Verdict::from_score(170, &bands), Verdict::Confirmed);
        // same score twice, same verdict
        assert_eq!(
            Verdict::from_score(77, &bands),
            Verdict::from_score(77, &bands)
        );
    }

    #[test]
    fn skipped_evidence_contributes_nothing() {
        let item = EvidenceItem::skipped(
            "time_clustering",
            "main cluster std < 5 min",
            40,
            "insufficient data".to_string(),
        );
        assert_eq!(item.score, 0);
        assert_eq!(item.status, Status::Normal);
        assert!(item.note.is_some());
    }
}
