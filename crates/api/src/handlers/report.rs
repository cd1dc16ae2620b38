//! Handler for the derived report endpoint.
//!
//! Fetches the row set once, maps it into report records, and runs the pure
//! aggregation pipeline from `fbintel_core::report`. When the database is
//! unreachable the handler degrades to the built-in sample dataset instead
//! of failing, and marks the payload accordingly.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use fbintel_core::report::{build_report, FeedbackReport, ReportFilter, ReportRecord};
use fbintel_core::sample::sample_records;
use fbintel_db::models::feedback::FeedbackFilter;
use fbintel_db::repositories::feedback_repo::clamp_limit;
use fbintel_db::repositories::FeedbackRepo;

use crate::state::AppState;

/// Query parameters for `GET /api/report`.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub marca: Option<String>,
    pub versao: Option<String>,
    pub formato: Option<String>,
    /// Case-insensitive theme search text.
    pub busca: Option<String>,
}

impl ReportQuery {
    /// Map query parameters onto the core filter state. Absent parameters
    /// fall back to the sentinels, matching the dashboard's defaults.
    pub fn to_filter(&self) -> ReportFilter {
        let defaults = ReportFilter::default();
        ReportFilter {
            brand: self.marca.clone().unwrap_or(defaults.brand),
            version: self.versao.clone().unwrap_or(defaults.version),
            format: self.formato.clone().unwrap_or(defaults.format),
            search: self.busca.clone().unwrap_or(defaults.search),
        }
    }
}

/// Where the report's record collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSource {
    Database,
    Sample,
}

/// Response payload for `GET /api/report`.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub source: ReportSource,
    pub report: FeedbackReport,
}

/// GET /api/report -- the full derived report for the dashboard.
///
/// The row set is fetched unfiltered (the option lists and the effort chart
/// need the whole universe) up to the deployment's row cap; filtering
/// happens in the pure aggregation layer. Infallible by design: a failed
/// fetch serves the sample dataset.
pub async fn feedback_report(
    State(state): State<AppState>,
    Query(params): Query<ReportQuery>,
) -> Json<ReportResponse> {
    let filter = params.to_filter();
    let limit = clamp_limit(None, state.config.feedback_list_limit);

    let (source, records) =
        match FeedbackRepo::list(&state.pool, &FeedbackFilter::default(), limit).await {
            Ok(rows) => {
                let records: Vec<ReportRecord> = rows.iter().map(ReportRecord::from).collect();
                (ReportSource::Database, records)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Report query failed, serving sample dataset");
                (ReportSource::Sample, sample_records())
            }
        };

    Json(ReportResponse {
        source,
        report: build_report(&records, &filter),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fbintel_core::report::{ALL_BRANDS, ALL_FORMATS};

    #[test]
    fn absent_params_fall_back_to_sentinels() {
        let params = ReportQuery {
            marca: None,
            versao: None,
            formato: None,
            busca: None,
        };
        let filter = params.to_filter();
        assert_eq!(filter.brand, ALL_BRANDS);
        assert_eq!(filter.version, ALL_BRANDS);
        assert_eq!(filter.format, ALL_FORMATS);
        assert_eq!(filter.search, "");
    }

    #[test]
    fn explicit_params_pass_through() {
        let params = ReportQuery {
            marca: Some("Nubank".to_string()),
            versao: Some("V1".to_string()),
            formato: Some("BC".to_string()),
            busca: Some("cartão".to_string()),
        };
        let filter = params.to_filter();
        assert_eq!(filter.brand, "Nubank");
        assert_eq!(filter.version, "V1");
        assert_eq!(filter.format, "BC");
        assert_eq!(filter.search, "cartão");
    }
}
