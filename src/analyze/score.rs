use crate::input::{AnalysisInput, RepoCreation};
use crate::types::config::{
    AnalysisConfig, BotCommitRule, BulkCreationRule, ConcentrationRule, LowRateRule,
    RegularityRule,
};
use crate::types::report::{ClusterSummary, EvidenceItem, Status, TemporalSummary};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Applies the rubric to every signal. Each item is computed on its own:
/// a missing metric or a degraded upstream stage turns into a zero-score
/// entry with a note, never an abort.
pub fn build_evidence(
    input: &AnalysisInput,
    clusters: Option<&ClusterSummary>,
    cluster_note: Option<&str>,
    temporal: Option<&TemporalSummary>,
    config: &AnalysisConfig,
) -> Vec<EvidenceItem> {
    let stars = input.repo.stars;
    let gate = config.analysis.min_stars_for_ratios;
    let rubric = &config.rubric;

    let mut evidence = vec![
        low_rate_item(
            "low_issue_rate",
            input.repo.issue_rate(),
            &rubric.issue_rate,
            stars,
            gate,
        ),
        low_rate_item(
            "low_fork_rate",
            input.repo.fork_rate(),
            &rubric.fork_rate,
            stars,
            gate,
        ),
        low_rate_item(
            "low_pr_rate",
            input.repo.pr_rate(),
            &rubric.pr_rate,
            stars,
            gate,
        ),
        bot_commits_item(input, &rubric.bot_commits),
        regularity_item(clusters, cluster_note, &rubric.regularity),
        concentration_item(
            "half_hour_concentration",
            temporal.map(|t| t.half_hour_pct),
            &rubric.half_hour,
        ),
    ];
    if let Some(rule) = &rubric.top_of_hour {
        evidence.push(concentration_item(
            "top_of_hour_concentration",
            temporal.map(|t| t.top_of_hour_pct),
            rule,
        ));
    }
    evidence.push(bulk_creation_item(
        &input.owner_repos,
        config.bulk.high_star_threshold,
        &rubric.bulk_creation,
    ));
    evidence
}

fn low_rate_item(
    name: &str,
    rate: Option<f64>,
    rule: &LowRateRule,
    stars: u64,
    gate: u64,
) -> EvidenceItem {
    let threshold = format!("< {}%", rule.critical.below_pct);
    let max = rule.critical.score.max(rule.warning.map_or(0, |w| w.score));

    let Some(rate) = rate else {
        return EvidenceItem::skipped(name, threshold, max, "metric not supplied".to_string());
    };
    if stars <= gate {
        return EvidenceItem::skipped(
            name,
            threshold,
            max,
            format!("star count {stars} at or below the {gate}-star gate"),
        );
    }

    let (score, status) = if rate < rule.critical.below_pct {
        (rule.critical.score, Status::Critical)
    } else if rule.warning.is_some_and(|w| rate < w.below_pct) {
        (rule.warning.map_or(0, |w| w.score), Status::Warning)
    } else {
        (0, Status::Normal)
    };
    EvidenceItem::new(name, rate, threshold, score, max, status)
}

fn bot_commits_item(input: &AnalysisInput, rule: &BotCommitRule) -> EvidenceItem {
    let threshold = format!(
        "> {}% over > {} commits",
        rule.critical_above_pct, rule.critical_min_sample
    );
    let max = rule.critical_score.max(rule.warning_score);

    let Some((ratio, sample)) = input.commits.as_ref().and_then(|c| c.bot_ratio()) else {
        return EvidenceItem::skipped(
            "bot_commits",
            threshold,
            max,
            "no commit sample supplied".to_string(),
        );
    };

    let (score, status) = if ratio > rule.critical_above_pct && sample > rule.critical_min_sample {
        (rule.critical_score, Status::Critical)
    } else if ratio > rule.warning_above_pct {
        (rule.warning_score, Status::Warning)
    } else {
        (0, Status::Normal)
    };
    let mut item = EvidenceItem::new("bot_commits", ratio, threshold, score, max, status);
    item.note = Some(format!("{sample} commits sampled"));
    item
}

fn regularity_item(
    clusters: Option<&ClusterSummary>,
    cluster_note: Option<&str>,
    rule: &RegularityRule,
) -> EvidenceItem {
    let threshold = format!(
        "main cluster std < {} min with >= {} samples",
        rule.critical_max_std_min, rule.critical_min_count
    );
    let max = rule.critical_score.max(rule.warning_score);

    let Some(main) = clusters.and_then(|summary| summary.main()) else {
        let note = cluster_note.unwrap_or("clustering not performed").to_string();
        return EvidenceItem::skipped("time_clustering", threshold, max, note);
    };

    let (score, status) =
        if main.std_min < rule.critical_max_std_min && main.count >= rule.critical_min_count {
            (rule.critical_score, Status::Critical)
        } else if main.std_min < rule.warning_max_std_min
            && main.share_pct > rule.warning_min_share_pct
        {
            (rule.warning_score, Status::Warning)
        } else {
            (0, Status::Normal)
        };
    let mut item = EvidenceItem::new(
        "time_clustering",
        main.std_min,
        threshold,
        score,
        max,
        status,
    );
    item.note = Some(format!(
        "main cluster: {} samples ({:.1}%), mean {:.1} min",
        main.count, main.share_pct, main.mean_min
    ));
    item
}

fn concentration_item(
    name: &str,
    share_pct: Option<f64>,
    rule: &ConcentrationRule,
) -> EvidenceItem {
    let threshold = format!("> {}%", rule.above_pct);
    let Some(share_pct) = share_pct else {
        return EvidenceItem::skipped(
            name,
            threshold,
            rule.score,
            "no timestamps supplied".to_string(),
        );
    };
    let (score, status) = if share_pct > rule.above_pct {
        (rule.score, Status::Critical)
    } else {
        (0, Status::Normal)
    };
    EvidenceItem::new(name, share_pct, threshold, score, rule.score, status)
}

fn bulk_creation_item(
    owner_repos: &[RepoCreation],
    high_star_threshold: u64,
    rule: &BulkCreationRule,
) -> EvidenceItem {
    let threshold = format!(
        ">= {} high-star repos created on one date",
        rule.warning_min_repos
    );
    let max = rule.critical_score.max(rule.warning_score);

    // date -> (repo count, combined stars), high-star repos only
    let mut by_date: BTreeMap<NaiveDate, (usize, u64)> = BTreeMap::new();
    for repo in owner_repos {
        if repo.stars > high_star_threshold {
            let entry = by_date.entry(repo.created).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += repo.stars;
        }
    }

    let suspicious: Vec<(NaiveDate, usize, u64)> = by_date
        .iter()
        .filter(|(_, (count, _))| *count >= rule.warning_min_repos)
        .map(|(date, (count, stars))| (*date, *count, *stars))
        .collect();
    let worst = suspicious.iter().map(|(_, count, _)| *count).max().unwrap_or(0);

    let (score, status) = if worst >= rule.critical_min_repos {
        (rule.critical_score, Status::Critical)
    } else if worst >= rule.warning_min_repos {
        (rule.warning_score, Status::Warning)
    } else {
        (0, Status::Normal)
    };
    let mut item = EvidenceItem::new(
        "bulk_creation",
        worst as f64,
        threshold,
        score,
        max,
        status,
    );
    if !suspicious.is_empty() {
        item.note = Some(
            suspicious
                .iter()
                .map(|(date, count, stars)| format!("{date}: {count} repos, {stars} stars"))
                .collect::<Vec<_>>()
                .join("; "),
        );
    }
    item
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{CommitSample, RepoMetrics};
    use crate::types::report::ClusterStat;

    fn config() -> AnalysisConfig {
        AnalysisConfig::default()
    }

    fn input_with_rates(stars: u64, issue: f64, fork: f64, pr: f64) -> AnalysisInput {
        AnalysisInput {
            repo: RepoMetrics {
                stars,
                issue_rate_pct: Some(issue),
                fork_rate_pct: Some(fork),
                pr_rate_pct: Some(pr),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn ratio_signals_respect_the_star_gate() {
        let input = input_with_rates(80, 0.1, 0.1, 0.1);
        let evidence = build_evidence(&input, None, None, None, &config());
        for name in ["low_issue_rate", "low_fork_rate", "low_pr_rate"] {
            let item = evidence.iter().find(|e| e.name == name).unwrap();
            assert_eq!(item.score, 0, "{name} must not fire below the gate");
            assert!(item.note.as_deref().unwrap_or("").contains("gate"));
        }
    }

    #[test]
    fn issue_rate_bands() {
        let critical = input_with_rates(500, 0.5, 50.0, 50.0);
        let warning = input_with_rates(500, 1.5, 50.0, 50.0);
        let normal = input_with_rates(500, 4.0, 50.0, 50.0);
        let cfg = config();

        let pick = |input: &AnalysisInput| {
            build_evidence(input, None, None, None, &cfg)
                .into_iter()
                .find(|e| e.name == "low_issue_rate")
                .unwrap()
        };
        let item = pick(&critical);
        assert_eq!((item.score, item.status), (30, Status::Critical));
        let item = pick(&warning);
        assert_eq!((item.score, item.status), (15, Status::Warning));
        let item = pick(&normal);
        assert_eq!((item.score, item.status), (0, Status::Normal));
    }

    #[test]
    fn bot_commits_needs_a_large_sample_for_the_critical_band() {
        let mut input = input_with_rates(500, 5.0, 50.0, 50.0);
        input.commits = Some(CommitSample {
            sampled: Some(40),
            bot_matched: Some(38),
            messages: Vec::new(),
            bot_pattern: String::new(),
        });
        let evidence = build_evidence(&input, None, None, None, &config());
        let item = evidence.iter().find(|e| e.name == "bot_commits").unwrap();
        // 95% but only 40 sampled: warning band, not critical
        assert_eq!((item.score, item.status), (15, Status::Warning));
    }

    #[test]
    fn regularity_critical_band_requires_count() {
        let summary = ClusterSummary {
            clusters: vec![ClusterStat {
                id: 1,
                count: 3,
                mean_min: 5.0,
                std_min: 1.0,
                share_pct: 20.0,
            }],
            total_intervals: 15,
        };
        let input = AnalysisInput::default();
        let evidence = build_evidence(&input, Some(&summary), None, None, &config());
        let item = evidence.iter().find(|e| e.name == "time_clustering").unwrap();
        // std is tiny but only 3 members and 20% share: no band fires
        assert_eq!(item.score, 0);
    }

    #[test]
    fn skipped_clustering_carries_the_reason() {
        let input = AnalysisInput::default();
        let evidence = build_evidence(
            &input,
            None,
            Some("insufficient data: 5 timestamps, need 20"),
            None,
            &config(),
        );
        let item = evidence.iter().find(|e| e.name == "time_clustering").unwrap();
        assert_eq!(item.score, 0);
        assert!(item.note.as_deref().unwrap().contains("insufficient"));
    }

    #[test]
    fn bulk_creation_scores_the_worst_date() {
        let repos = |dates: &[(&str, u64)]| -> Vec<RepoCreation> {
            dates
                .iter()
                .enumerate()
                .map(|(i, (date, stars))| RepoCreation {
                    name: format!("repo-{i}"),
                    stars: *stars,
                    created: date.parse().unwrap(),
                })
                .collect()
        };

        let mut input = AnalysisInput::default();
        input.owner_repos = repos(&[
            ("2024-11-13", 800),
            ("2024-11-13", 900),
            ("2024-11-13", 713),
            ("2024-12-01", 200),
            ("2024-12-01", 10), // below the high-star threshold, ignored
        ]);
        let evidence = build_evidence(&input, None, None, None, &config());
        let item = evidence.iter().find(|e| e.name == "bulk_creation").unwrap();
        assert_eq!((item.score, item.status), (20, Status::Critical));
        assert!(item.note.as_deref().unwrap().contains("2024-11-13: 3 repos, 2413 stars"));
    }

    #[test]
    fn every_item_stays_within_its_maximum() {
        let mut input = input_with_rates(500, 0.1, 0.1, 0.1);
        input.commits = Some(CommitSample {
            sampled: Some(100),
            bot_matched: Some(100),
            messages: Vec::new(),
            bot_pattern: String::new(),
        });
        let evidence = build_evidence(&input, None, None, None, &config());
        for item in &evidence {
            assert!(item.score <= item.max_score, "{} exceeded its max", item.name);
        }
    }
}
