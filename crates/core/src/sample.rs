//! Built-in sample dataset.
//!
//! The report endpoint degrades to this small fixed collection when the
//! database is unreachable, so the dashboard keeps rendering instead of
//! showing a blocking error.

use crate::report::ReportRecord;

/// One sample record. Topics are passed as the serialized JSON the real
/// column carries.
fn record(
    brand: &str,
    theme: &str,
    format: &str,
    version: &str,
    topics_json: &str,
    created_at: &str,
) -> ReportRecord {
    ReportRecord {
        brand: brand.to_string(),
        theme: theme.to_string(),
        format: format.to_string(),
        version: version.to_string(),
        topics_json: topics_json.to_string(),
        created_at: created_at.to_string(),
    }
}

/// The fallback collection shown while the database is down.
pub fn sample_records() -> Vec<ReportRecord> {
    vec![
        record(
            "Coca-Cola",
            "Verão 2026",
            "BC",
            "V3",
            r#"["Cor","Áudio"]"#,
            "2026-08-10T14:20:00Z",
        ),
        record(
            "Coca-Cola",
            "Verão 2026",
            "BCR",
            "V2",
            r#"["Ritmo"]"#,
            "2026-08-08T09:05:00Z",
        ),
        record(
            "Nubank",
            "Cartão Ultra",
            "BC",
            "V1",
            r#"["Texto","Cor"]"#,
            "2026-08-07T16:40:00Z",
        ),
        record(
            "Nubank",
            "Cartão Ultra",
            "BC",
            "V0",
            "",
            "2026-08-05T11:15:00Z",
        ),
        record(
            "Ambev",
            "Festival de Inverno",
            "BCR",
            "V1",
            r#"["Áudio"]"#,
            "2026-08-04T18:00:00Z",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{build_report, ReportFilter};

    #[test]
    fn sample_is_nonempty_and_reportable() {
        let records = sample_records();
        assert!(!records.is_empty());

        let report = build_report(&records, &ReportFilter::default());
        assert_eq!(report.kpis.feedback_count, records.len() as u32);
        // Every sample brand shows up in the effort chart.
        assert_eq!(report.rounds_by_brand.len(), 3);
        // The empty-topic record lands in the Other bucket.
        assert!(report
            .topic_distribution
            .iter()
            .any(|t| t.topic == crate::report::OTHER_TOPIC));
    }
}
