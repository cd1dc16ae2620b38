//! Handler for the raw feedback listing endpoint.
//!
//! Query parameter names (`marca`, `versao`, `formato`) and the
//! "Todas"/"Todos" sentinels are the dashboard frontend's contract; a
//! missing parameter or either sentinel means "no filter".

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use fbintel_core::error::CoreError;
use fbintel_core::report::{ALL_BRANDS, ALL_FORMATS};
use fbintel_core::types::DbId;
use fbintel_db::models::feedback::{FeedbackFilter, FeedbackView};
use fbintel_db::repositories::feedback_repo::clamp_limit;
use fbintel_db::repositories::FeedbackRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// Query parameters for `GET /api/feedbacks`.
#[derive(Debug, Deserialize)]
pub struct FeedbackListQuery {
    /// Brand filter; "Todas" or absent means any.
    pub marca: Option<String>,
    /// Version filter; "Todas" or absent means any.
    pub versao: Option<String>,
    /// Format filter; "Todos" or absent means any.
    pub formato: Option<String>,
    /// Requested row cap; clamped to the deployment's configured cap.
    pub limit: Option<i64>,
}

/// Drop sentinel and empty selections so they bind no SQL condition.
fn selection(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.is_empty() && *v != ALL_BRANDS && *v != ALL_FORMATS)
        .map(str::to_string)
}

impl FeedbackListQuery {
    /// Map query parameters to the repository filter.
    pub fn to_filter(&self) -> FeedbackFilter {
        FeedbackFilter {
            brand: selection(&self.marca),
            version: selection(&self.versao),
            format: selection(&self.formato),
        }
    }
}

/// GET /api/feedbacks -- list feedback rows, newest first, length-capped.
///
/// Returns a bare JSON array (not the `{ data }` envelope) because the
/// dashboard frontend consumes the rows directly; each element carries the
/// row plus the classified status/sentiment badges. On database failure
/// the error propagates as a 500 with the raw message.
pub async fn list_feedbacks(
    State(state): State<AppState>,
    Query(params): Query<FeedbackListQuery>,
) -> AppResult<Json<Vec<FeedbackView>>> {
    let limit = clamp_limit(params.limit, state.config.feedback_list_limit);

    let rows = FeedbackRepo::list(&state.pool, &params.to_filter(), limit).await?;
    Ok(Json(rows.into_iter().map(FeedbackView::from).collect()))
}

/// GET /api/feedbacks/{id} -- fetch a single feedback row.
pub async fn get_feedback(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<FeedbackView>> {
    let feedback = FeedbackRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "feedback",
            id,
        })?;
    Ok(Json(FeedbackView::from(feedback)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(
        marca: Option<&str>,
        versao: Option<&str>,
        formato: Option<&str>,
    ) -> FeedbackListQuery {
        FeedbackListQuery {
            marca: marca.map(str::to_string),
            versao: versao.map(str::to_string),
            formato: formato.map(str::to_string),
            limit: None,
        }
    }

    #[test]
    fn absent_params_mean_no_filter() {
        let filter = query(None, None, None).to_filter();
        assert_eq!(filter, FeedbackFilter::default());
    }

    #[test]
    fn sentinels_mean_no_filter() {
        let filter = query(Some("Todas"), Some("Todas"), Some("Todos")).to_filter();
        assert_eq!(filter, FeedbackFilter::default());
    }

    #[test]
    fn brand_with_sentinel_format_filters_brand_only() {
        let filter = query(Some("Nubank"), None, Some("Todos")).to_filter();
        assert_eq!(filter.brand.as_deref(), Some("Nubank"));
        assert_eq!(filter.version, None);
        assert_eq!(filter.format, None);
    }

    #[test]
    fn specific_selections_pass_through() {
        let filter = query(Some("Ambev"), Some("V2"), Some("BC")).to_filter();
        assert_eq!(filter.brand.as_deref(), Some("Ambev"));
        assert_eq!(filter.version.as_deref(), Some("V2"));
        assert_eq!(filter.format.as_deref(), Some("BC"));
    }

    #[test]
    fn empty_string_means_no_filter() {
        let filter = query(Some(""), None, None).to_filter();
        assert_eq!(filter.brand, None);
    }
}
