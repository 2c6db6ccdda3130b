use crate::analyze::cluster::{mean, population_std};
use crate::types::report::OutlierSummary;

/// Flags intervals whose standardized deviation from the overall mean
/// exceeds `z_threshold`. A constant series (std = 0) has no outliers by
/// definition; no standardization is attempted for it.
pub fn detect(values: &[f64], z_threshold: f64) -> OutlierSummary {
    let total = values.len();
    if total == 0 {
        return OutlierSummary {
            indices: Vec::new(),
            count: 0,
            share_pct: 0.0,
            z_threshold,
        };
    }

    let m = mean(values);
    let std = population_std(values);
    let indices: Vec<usize> = if std == 0.0 {
        Vec::new()
    } else {
        values
            .iter()
            .enumerate()
            .filter(|(_, v)| ((*v - m) / std).abs() > z_threshold)
            .map(|(i, _)| i)
            .collect()
    };

    let count = indices.len();
    OutlierSummary {
        indices,
        count,
        share_pct: count as f64 / total as f64 * 100.0,
        z_threshold,
    }
}
