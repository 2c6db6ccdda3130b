pub mod cluster;
pub mod intervals;
pub mod outliers;
pub mod score;
pub mod temporal;

use crate::error::{Result, StarcheckError};
use crate::input::AnalysisInput;
use crate::types::config::AnalysisConfig;
use crate::types::report::{SuspicionReport, Verdict};
use tracing::debug;

/// Runs the full pipeline: interval extraction, Ward clustering, outlier
/// detection, and temporal concentration feeding the evidence scorer.
///
/// Pure and deterministic: identical input and config always produce the
/// identical report. Signal stages degrade independently — too few
/// timestamps skips the clustering evidence but every other item still
/// computes. The only hard failure is a timestamp series that is not in
/// ascending order, which violates the input contract.
pub fn analyze(input: &AnalysisInput, config: &AnalysisConfig) -> Result<SuspicionReport> {
    let timestamps = &input.starred_at;
    let min_needed = config.analysis.min_timestamps;

    let interval_min = if timestamps.len() >= 2 {
        let seconds = match intervals::intervals_seconds(timestamps) {
            Ok(seconds) => seconds,
            Err(err @ StarcheckError::UnorderedTimestamps(_)) => return Err(err),
            Err(_) => Vec::new(),
        };
        intervals::to_minutes(&seconds)
    } else {
        Vec::new()
    };
    debug!(
        timestamps = timestamps.len(),
        intervals = interval_min.len(),
        "extracted inter-arrival intervals"
    );

    let (clusters, cluster_note) = if timestamps.len() < min_needed {
        (
            None,
            Some(format!(
                "insufficient data: {} timestamps, need {min_needed}",
                timestamps.len()
            )),
        )
    } else {
        let k = config.cluster.cluster_count(interval_min.len());
        if k == 0 {
            (
                None,
                Some(format!(
                    "insufficient data: {} intervals below the clustering minimum",
                    interval_min.len()
                )),
            )
        } else {
            let summary = cluster::ward_clusters(&interval_min, k);
            debug!(k, clusters = summary.clusters.len(), "cut flat clusters");
            (Some(summary), None)
        }
    };

    let outliers = (!interval_min.is_empty())
        .then(|| outliers::detect(&interval_min, config.outliers.z_threshold));
    let temporal =
        (!timestamps.is_empty()).then(|| temporal::concentration(timestamps, &config.temporal));

    let evidence = score::build_evidence(
        input,
        clusters.as_ref(),
        cluster_note.as_deref(),
        temporal.as_ref(),
        config,
    );

    let max_score = config.rubric.max_score();
    let total_score: u32 = evidence.iter().map(|item| item.score).sum::<u32>().min(max_score);
    let verdict = Verdict::from_score(total_score, &config.verdict);
    debug!(total_score, max_score, verdict = verdict.as_str(), "scored evidence");

    Ok(SuspicionReport {
        total_score,
        max_score,
        verdict,
        verdict_bands: config.verdict,
        evidence,
        clusters,
        outliers,
        temporal,
    })
}
