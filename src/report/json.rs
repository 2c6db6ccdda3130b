use crate::types::report::SuspicionReport;

pub fn to_json(report: &SuspicionReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::VerdictBands;
    use crate::types::report::{EvidenceItem, Status, Verdict};

    #[test]
    fn json_report_contains_score_and_verdict() {
        let report = SuspicionReport {
            total_score: 75,
            max_score: 170,
            verdict: Verdict::High,
            verdict_bands: VerdictBands::default(),
            evidence: vec![EvidenceItem::new(
                "low_issue_rate",
                0.5,
                "< 1%",
                30,
                30,
                Status::Critical,
            )],
            clusters: None,
            outliers: None,
            temporal: None,
        };

        let rendered = to_json(&report).expect("json should serialize");
        assert!(rendered.contains("\"total_score\": 75"));
        assert!(rendered.contains("\"verdict\": \"high\""));
        assert!(rendered.contains("\"low_issue_rate\""));
        // bands are stated explicitly, never hidden
        assert!(rendered.contains("\"confirmed\": 100"));
    }
}
