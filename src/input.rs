use crate::error::{Result, StarcheckError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::path::Path;

/// Repository-level metrics captured by the collector. Rates can be given
/// directly as percentages or derived from raw counts; a missing metric
/// means the corresponding signal is skipped, never guessed.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RepoMetrics {
    #[serde(default)]
    pub stars: u64,
    pub forks: Option<u64>,
    pub open_issues: Option<u64>,
    pub pull_requests: Option<u64>,
    pub fork_rate_pct: Option<f64>,
    pub issue_rate_pct: Option<f64>,
    pub pr_rate_pct: Option<f64>,
}

impl RepoMetrics {
    pub fn fork_rate(&self) -> Option<f64> {
        self.fork_rate_pct.or_else(|| self.rate_of(self.forks))
    }

    pub fn issue_rate(&self) -> Option<f64> {
        self.issue_rate_pct
            .or_else(|| self.rate_of(self.open_issues))
    }

    pub fn pr_rate(&self) -> Option<f64> {
        self.pr_rate_pct.or_else(|| self.rate_of(self.pull_requests))
    }

    // rate = 0 when the repo has no stars, per the documented fallback
    fn rate_of(&self, count: Option<u64>) -> Option<f64> {
        count.map(|c| {
            if self.stars == 0 {
                0.0
            } else {
                c as f64 / self.stars as f64 * 100.0
            }
        })
    }
}

fn default_bot_pattern() -> String {
    "Update TIME.md".to_string()
}

/// Sampled commit evidence: either a precomputed match count or the raw
/// messages plus the pattern to match them against.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitSample {
    pub sampled: Option<usize>,
    pub bot_matched: Option<usize>,
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default = "default_bot_pattern")]
    pub bot_pattern: String,
}

impl CommitSample {
    /// Bot-commit ratio as (percentage, sample size), or `None` when no
    /// usable sample was supplied.
    pub fn bot_ratio(&self) -> Option<(f64, usize)> {
        if let (Some(sampled), Some(matched)) = (self.sampled, self.bot_matched) {
            if sampled == 0 {
                return None;
            }
            return Some((matched as f64 / sampled as f64 * 100.0, sampled));
        }
        if self.messages.is_empty() {
            return None;
        }
        let matched = self
            .messages
            .iter()
            .filter(|message| message.contains(&self.bot_pattern))
            .count();
        Some((
            matched as f64 / self.messages.len() as f64 * 100.0,
            self.messages.len(),
        ))
    }
}

/// One of the owner's repositories, for the bulk-creation check.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoCreation {
    pub name: String,
    pub stars: u64,
    pub created: NaiveDate,
}

/// Everything one analysis run consumes. The collector that talks to the
/// hosting API produces this; the core never does I/O of its own.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AnalysisInput {
    #[serde(default)]
    pub starred_at: Vec<DateTime<Utc>>,
    #[serde(default)]
    pub repo: RepoMetrics,
    pub commits: Option<CommitSample>,
    #[serde(default)]
    pub owner_repos: Vec<RepoCreation>,
}

impl AnalysisInput {
    /// Loads a snapshot from JSON and normalizes the star timestamps into
    /// ascending order.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(StarcheckError::SnapshotNotFound(
                path.display().to_string(),
            ));
        }
        let content = std::fs::read_to_string(path)?;
        let mut input: AnalysisInput = serde_json::from_str(&content)?;
        input.starred_at.sort_unstable();
        Ok(input)
    }
}
