use crate::types::report::{ClusterStat, ClusterSummary};

/// Mean of a non-empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divide by n, not n - 1). The regularity
/// thresholds in the rubric are calibrated against this definition.
pub(crate) fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// An in-progress cluster during agglomeration.
struct Agg {
    members: Vec<usize>,
    sum: f64,
}

impl Agg {
    fn count(&self) -> usize {
        self.members.len()
    }

    fn mean(&self) -> f64 {
        self.sum / self.count() as f64
    }
}

/// Ward's criterion: the increase in total within-cluster variance caused
/// by merging `a` and `b`. In 1-D this reduces to
/// `|a||b| / (|a| + |b|) * (mean_a - mean_b)^2`.
fn ward_cost(a: &Agg, b: &Agg) -> f64 {
    let na = a.count() as f64;
    let nb = b.count() as f64;
    let d = a.mean() - b.mean();
    na * nb / (na + nb) * d * d
}

/// Agglomerative Ward-linkage clustering of 1-D interval values (minutes),
/// cut to exactly `k` flat clusters.
///
/// Starts from singletons and repeatedly merges the cheapest pair until
/// `k` clusters remain, which is the same flat cut "maxclust" produces on
/// the full dendrogram. Ties go to the earliest pair in scan order, so the
/// result is fully deterministic.
///
/// Returns clusters ranked by descending member count (the first is the
/// main cluster), with count, mean, population std, and share of all
/// intervals. A zero-variance input collapses to a single all-inclusive
/// cluster with std = 0 regardless of `k`, since linkage is undefined on
/// identical points.
pub fn ward_clusters(values: &[f64], k: usize) -> ClusterSummary {
    let total = values.len();
    if total == 0 {
        return ClusterSummary {
            clusters: Vec::new(),
            total_intervals: 0,
        };
    }

    if population_std(values) == 0.0 {
        return ClusterSummary {
            clusters: vec![ClusterStat {
                id: 1,
                count: total,
                mean_min: values[0],
                std_min: 0.0,
                share_pct: 100.0,
            }],
            total_intervals: total,
        };
    }

    let k = k.clamp(1, total);
    let mut active: Vec<Agg> = values
        .iter()
        .enumerate()
        .map(|(i, v)| Agg {
            members: vec![i],
            sum: *v,
        })
        .collect();

    while active.len() > k {
        let mut best = (0usize, 1usize);
        let mut best_cost = f64::INFINITY;
        for i in 0..active.len() {
            for j in (i + 1)..active.len() {
                let cost = ward_cost(&active[i], &active[j]);
                if cost < best_cost {
                    best_cost = cost;
                    best = (i, j);
                }
            }
        }
        let absorbed = active.swap_remove(best.1);
        active[best.0].members.extend(absorbed.members);
        active[best.0].sum += absorbed.sum;
    }

    let mut clusters: Vec<ClusterStat> = active
        .iter()
        .map(|agg| {
            let member_values: Vec<f64> = agg.members.iter().map(|&i| values[i]).collect();
            ClusterStat {
                id: 0,
                count: agg.count(),
                mean_min: mean(&member_values),
                std_min: population_std(&member_values),
                share_pct: agg.count() as f64 / total as f64 * 100.0,
            }
        })
        .collect();

    // rank: main cluster first; mean breaks count ties deterministically
    clusters.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.mean_min.partial_cmp(&b.mean_min).unwrap_or(std::cmp::Ordering::Equal))
    });
    for (rank, cluster) in clusters.iter_mut().enumerate() {
        cluster.id = rank + 1;
    }

    ClusterSummary {
        clusters,
        total_intervals: total,
    }
}
