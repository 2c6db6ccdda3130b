use crate::types::report::{Status, SuspicionReport};

/// Plain-text console summary: evidence table, cluster breakdown, and the
/// verdict with its bands.
pub fn to_text(report: &SuspicionReport) -> String {
    let mut output = String::new();
    output.push_str("Star manipulation analysis\n");
    output.push_str("==========================\n\n");

    output.push_str("Evidence:\n");
    for item in &report.evidence {
        let marker = match item.status {
            Status::Critical => "CRIT",
            Status::Warning => "WARN",
            Status::Normal => "  ok",
        };
        output.push_str(&format!(
            "  [{marker}] {:<28} {:>8.2}  ({})  {}/{}\n",
            item.name, item.value, item.threshold, item.score, item.max_score
        ));
        if let Some(note) = &item.note {
            output.push_str(&format!("         {note}\n"));
        }
    }

    if let Some(clusters) = &report.clusters {
        output.push_str(&format!(
            "\nInterval clusters ({} intervals):\n",
            clusters.total_intervals
        ));
        for cluster in &clusters.clusters {
            output.push_str(&format!(
                "  #{}: {} samples ({:.1}%), mean {:.1} min, std {:.1} min\n",
                cluster.id, cluster.count, cluster.share_pct, cluster.mean_min, cluster.std_min
            ));
        }
    }

    if let Some(outliers) = &report.outliers {
        output.push_str(&format!(
            "\nOutliers: {} ({:.1}%) beyond |z| > {}\n",
            outliers.count, outliers.share_pct, outliers.z_threshold
        ));
    }

    if let Some(temporal) = &report.temporal {
        output.push_str("\nBusiest hours:\n");
        for hour in &temporal.top_hours {
            output.push_str(&format!(
                "  {:02}:00  {} events ({:.1}%)\n",
                hour.hour, hour.count, hour.share_pct
            ));
        }
        output.push_str(&format!(
            "Half-hour concentration: {:.1}%, top-of-hour: {:.1}%\n",
            temporal.half_hour_pct, temporal.top_of_hour_pct
        ));
    }

    output.push_str(&format!(
        "\nSuspicion score: {}/{}\n",
        report.total_score, report.max_score
    ));
    output.push_str(&format!(
        "Verdict: {} (bands: confirmed >= {}, high >= {}, medium >= {})\n",
        report.verdict.as_str(),
        report.verdict_bands.confirmed,
        report.verdict_bands.high,
        report.verdict_bands.medium
    ));

    output
}
