use crate::error::StarcheckError;
use serde::Deserialize;

/// Full analysis configuration: cluster-count policy, detector thresholds,
/// the scoring rubric, and the verdict bands. Every value can be overridden
/// from `starcheck.toml`; the defaults are the shipped calibration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    pub analysis: AnalysisLimits,
    pub cluster: ClusterConfig,
    pub outliers: OutlierConfig,
    pub temporal: TemporalConfig,
    pub bulk: BulkCreationConfig,
    pub rubric: RubricConfig,
    pub verdict: VerdictBands,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct AnalysisLimits {
    /// Minimum timestamps for the clustering branch to run at all.
    pub min_timestamps: usize,
    /// Ratio signals only fire above this star count, to avoid
    /// small-sample false positives.
    pub min_stars_for_ratios: u64,
}

impl Default for AnalysisLimits {
    fn default() -> Self {
        Self {
            min_timestamps: 20,
            min_stars_for_ratios: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Upper bound on flat clusters cut from the dendrogram.
    pub max_clusters: usize,
    /// One cluster is allowed per this many samples (K = min(max, n / this)).
    pub samples_per_cluster: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            max_clusters: 8,
            samples_per_cluster: 10,
        }
    }
}

impl ClusterConfig {
    /// K policy: `min(max_clusters, n / samples_per_cluster)`. Returns 0
    /// when there are too few samples, which callers treat as
    /// "insufficient data" rather than an error.
    pub fn cluster_count(&self, samples: usize) -> usize {
        (samples / self.samples_per_cluster).min(self.max_clusters)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct OutlierConfig {
    pub z_threshold: f64,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self { z_threshold: 2.0 }
    }
}

/// Inclusive minute-of-hour window, e.g. `{ from = 25, to = 35 }`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MinuteWindow {
    pub from: u32,
    pub to: u32,
}

impl MinuteWindow {
    pub fn contains(&self, minute: u32) -> bool {
        (self.from..=self.to).contains(&minute)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct TemporalConfig {
    /// How many of the busiest hours to report.
    pub top_hours: usize,
    /// Window around the half-hour mark.
    pub half_hour_window: MinuteWindow,
    /// Window just past the top of the hour.
    pub top_of_hour_window: MinuteWindow,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            top_hours: 5,
            half_hour_window: MinuteWindow { from: 25, to: 35 },
            top_of_hour_window: MinuteWindow { from: 0, to: 5 },
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct BulkCreationConfig {
    /// Repos below this star count are ignored by the bulk-creation check.
    pub high_star_threshold: u64,
}

impl Default for BulkCreationConfig {
    fn default() -> Self {
        Self {
            high_star_threshold: 50,
        }
    }
}

/// A "rate below threshold" scoring band.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RateBand {
    pub below_pct: f64,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct LowRateRule {
    pub critical: RateBand,
    pub warning: Option<RateBand>,
}

impl LowRateRule {
    fn max_score(&self) -> u32 {
        self.critical
            .score
            .max(self.warning.map_or(0, |band| band.score))
    }
}

impl Default for LowRateRule {
    fn default() -> Self {
        Self {
            critical: RateBand {
                below_pct: 1.0,
                score: 30,
            },
            warning: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct BotCommitRule {
    pub critical_above_pct: f64,
    /// Commit sample size required before the critical band may fire.
    pub critical_min_sample: usize,
    pub critical_score: u32,
    pub warning_above_pct: f64,
    pub warning_score: u32,
}

impl Default for BotCommitRule {
    fn default() -> Self {
        Self {
            critical_above_pct: 80.0,
            critical_min_sample: 50,
            critical_score: 25,
            warning_above_pct: 50.0,
            warning_score: 15,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RegularityRule {
    /// Main cluster std below this (minutes) with at least
    /// `critical_min_count` members is the critical band.
    pub critical_max_std_min: f64,
    pub critical_min_count: usize,
    pub critical_score: u32,
    /// Looser band: std below this and the main cluster holding more than
    /// `warning_min_share_pct` of all intervals.
    pub warning_max_std_min: f64,
    pub warning_min_share_pct: f64,
    pub warning_score: u32,
}

impl Default for RegularityRule {
    fn default() -> Self {
        Self {
            critical_max_std_min: 5.0,
            critical_min_count: 5,
            critical_score: 40,
            warning_max_std_min: 10.0,
            warning_min_share_pct: 30.0,
            warning_score: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ConcentrationRule {
    pub above_pct: f64,
    pub score: u32,
}

impl Default for ConcentrationRule {
    fn default() -> Self {
        Self {
            above_pct: 20.0,
            score: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct BulkCreationRule {
    pub critical_min_repos: usize,
    pub critical_score: u32,
    pub warning_min_repos: usize,
    pub warning_score: u32,
}

impl Default for BulkCreationRule {
    fn default() -> Self {
        Self {
            critical_min_repos: 3,
            critical_score: 20,
            warning_min_repos: 2,
            warning_score: 10,
        }
    }
}

/// The full scoring rubric. Point values and thresholds are calibration
/// data, not algorithmic truth, so everything is exposed to TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RubricConfig {
    pub issue_rate: LowRateRule,
    pub fork_rate: LowRateRule,
    pub pr_rate: LowRateRule,
    pub bot_commits: BotCommitRule,
    pub regularity: RegularityRule,
    pub half_hour: ConcentrationRule,
    /// Disabled by default; enable to also score top-of-hour concentration.
    pub top_of_hour: Option<ConcentrationRule>,
    pub bulk_creation: BulkCreationRule,
}

impl Default for RubricConfig {
    fn default() -> Self {
        Self {
            issue_rate: LowRateRule {
                critical: RateBand {
                    below_pct: 1.0,
                    score: 30,
                },
                warning: Some(RateBand {
                    below_pct: 2.0,
                    score: 15,
                }),
            },
            fork_rate: LowRateRule {
                critical: RateBand {
                    below_pct: 8.0,
                    score: 25,
                },
                warning: None,
            },
            pr_rate: LowRateRule {
                critical: RateBand {
                    below_pct: 1.0,
                    score: 20,
                },
                warning: None,
            },
            bot_commits: BotCommitRule::default(),
            regularity: RegularityRule::default(),
            half_hour: ConcentrationRule::default(),
            top_of_hour: None,
            bulk_creation: BulkCreationRule::default(),
        }
    }
}

impl RubricConfig {
    /// Declared maximum: the sum of every enabled signal's top band.
    pub fn max_score(&self) -> u32 {
        self.issue_rate.max_score()
            + self.fork_rate.max_score()
            + self.pr_rate.max_score()
            + self
                .bot_commits
                .critical_score
                .max(self.bot_commits.warning_score)
            + self
                .regularity
                .critical_score
                .max(self.regularity.warning_score)
            + self.half_hour.score
            + self.top_of_hour.map_or(0, |rule| rule.score)
            + self
                .bulk_creation
                .critical_score
                .max(self.bulk_creation.warning_score)
    }
}

/// Score breakpoints for the categorical verdict. Echoed in every report
/// so the bands are never a hidden constant.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize)]
#[serde(default)]
pub struct VerdictBands {
    pub confirmed: u32,
    pub high: u32,
    pub medium: u32,
}

impl Default for VerdictBands {
    fn default() -> Self {
        Self {
            confirmed: 100,
            high: 70,
            medium: 35,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), StarcheckError> {
        if self.analysis.min_timestamps < 2 {
            return Err(StarcheckError::ConfigInvalid(
                "analysis.min_timestamps must be at least 2".to_string(),
            ));
        }
        if self.cluster.max_clusters == 0 {
            return Err(StarcheckError::ConfigInvalid(
                "cluster.max_clusters must be greater than 0".to_string(),
            ));
        }
        if self.cluster.samples_per_cluster == 0 {
            return Err(StarcheckError::ConfigInvalid(
                "cluster.samples_per_cluster must be greater than 0".to_string(),
            ));
        }
        if self.outliers.z_threshold <= 0.0 {
            return Err(StarcheckError::ConfigInvalid(
                "outliers.z_threshold must be positive".to_string(),
            ));
        }
        for (name, window) in [
            ("temporal.half_hour_window", self.temporal.half_hour_window),
            (
                "temporal.top_of_hour_window",
                self.temporal.top_of_hour_window,
            ),
        ] {
            if window.from > window.to || window.to > 59 {
                return Err(StarcheckError::ConfigInvalid(format!(
                    "{name} must satisfy from <= to <= 59 (found {}..={})",
                    window.from, window.to
                )));
            }
        }
        for (name, rule) in [
            ("rubric.issue_rate", &self.rubric.issue_rate),
            ("rubric.fork_rate", &self.rubric.fork_rate),
            ("rubric.pr_rate", &self.rubric.pr_rate),
        ] {
            if rule.critical.below_pct <= 0.0 {
                return Err(StarcheckError::ConfigInvalid(format!(
                    "{name}.critical.below_pct must be positive"
                )));
            }
            if let Some(warning) = rule.warning {
                if warning.below_pct < rule.critical.below_pct {
                    return Err(StarcheckError::ConfigInvalid(format!(
                        "{name}.warning.below_pct must not undercut the critical threshold"
                    )));
                }
                if warning.score > rule.critical.score {
                    return Err(StarcheckError::ConfigInvalid(format!(
                        "{name}.warning.score must not exceed the critical score"
                    )));
                }
            }
        }
        if self.rubric.bot_commits.warning_score > self.rubric.bot_commits.critical_score {
            return Err(StarcheckError::ConfigInvalid(
                "rubric.bot_commits.warning_score must not exceed the critical score".to_string(),
            ));
        }
        if self.rubric.regularity.warning_score > self.rubric.regularity.critical_score {
            return Err(StarcheckError::ConfigInvalid(
                "rubric.regularity.warning_score must not exceed the critical score".to_string(),
            ));
        }
        if self.rubric.bulk_creation.warning_min_repos < 2 {
            return Err(StarcheckError::ConfigInvalid(
                "rubric.bulk_creation.warning_min_repos must be at least 2".to_string(),
            ));
        }
        if self.rubric.bulk_creation.critical_min_repos
            < self.rubric.bulk_creation.warning_min_repos
        {
            return Err(StarcheckError::ConfigInvalid(
                "rubric.bulk_creation.critical_min_repos must not be below the warning band"
                    .to_string(),
            ));
        }
        if !(self.verdict.confirmed > self.verdict.high && self.verdict.high > self.verdict.medium)
        {
            return Err(StarcheckError::ConfigInvalid(format!(
                "verdict bands must be strictly descending (confirmed {} > high {} > medium {})",
                self.verdict.confirmed, self.verdict.high, self.verdict.medium
            )));
        }
        if self.verdict.medium == 0 {
            return Err(StarcheckError::ConfigInvalid(
                "verdict.medium must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AnalysisConfig::default();
        config.validate().expect("defaults should validate");
    }

    #[test]
    fn default_rubric_declares_reference_maximum() {
        assert_eq!(RubricConfig::default().max_score(), 170);
    }

    #[test]
    fn cluster_count_policy_matches_heuristic() {
        let cluster = ClusterConfig::default();
        assert_eq!(cluster.cluster_count(5), 0);
        assert_eq!(cluster.cluster_count(10), 1);
        assert_eq!(cluster.cluster_count(45), 4);
        assert_eq!(cluster.cluster_count(99), 8);
        assert_eq!(cluster.cluster_count(500), 8);
    }

    #[test]
    fn validate_rejects_zero_cluster_cap() {
        let mut config = AnalysisConfig::default();
        config.cluster.max_clusters = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_verdict_bands() {
        let mut config = AnalysisConfig::default();
        config.verdict.high = config.verdict.confirmed + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_warning_band_above_critical() {
        let mut config = AnalysisConfig::default();
        config.rubric.regularity.warning_score = config.rubric.regularity.critical_score + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_overrides_keep_defaults_elsewhere() {
        let config: AnalysisConfig = toml::from_str(
            r#"
[outliers]
z_threshold = 3.0

[rubric.half_hour]
above_pct = 15.0
score = 30
"#,
        )
        .expect("partial config should parse");
        assert_eq!(config.outliers.z_threshold, 3.0);
        assert_eq!(config.rubric.half_hour.score, 30);
        assert_eq!(config.cluster.max_clusters, 8);
        assert_eq!(config.rubric.max_score(), 190);
    }
}
