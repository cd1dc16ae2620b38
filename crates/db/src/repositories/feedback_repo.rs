//! Repository for the `feedbacks` table.
//!
//! Read-only: the table is populated by the upstream ingestion pipeline and
//! this service has no write path.

use sqlx::PgPool;

use crate::models::feedback::{Feedback, FeedbackFilter};

/// Column list for `feedbacks` SELECT queries.
const COLUMNS: &str = "\
    id, video_marca, video_tema, video_formato, video_versao, autor, \
    comment_text, ai_summary, ai_category_topic, ai_action_category, \
    status, sentimento, arquivo_video, created_at";

/// Row cap applied when the caller does not ask for one.
pub const DEFAULT_LIST_LIMIT: i64 = 50;
/// Hard row cap; no request ever returns more rows than this.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Clamp a requested limit into `1..=cap`, defaulting to the cap when
/// absent. The deployment cap itself is held to `1..=MAX_LIST_LIMIT`.
///
/// This is the single owner of the row-cap invariant: every limit passed
/// to [`FeedbackRepo::list`] goes through here first.
pub fn clamp_limit(limit: Option<i64>, cap: i64) -> i64 {
    let cap = cap.clamp(1, MAX_LIST_LIMIT);
    limit.unwrap_or(cap).clamp(1, cap)
}

/// Build the list SELECT for the given filter.
///
/// Returns the SQL text and the bind values in order. The `WHERE` clause
/// conjoins exactly one `column = $n` condition per present filter and is
/// omitted entirely when no filter is set; the limit binds as the last
/// parameter. Ordering is newest first with `id` as tiebreaker.
fn build_list_query(filter: &FeedbackFilter) -> (String, Vec<String>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut binds: Vec<String> = Vec::new();

    let columns = [
        ("video_marca", &filter.brand),
        ("video_versao", &filter.version),
        ("video_formato", &filter.format),
    ];
    for (column, value) in columns {
        if let Some(value) = value {
            binds.push(value.clone());
            conditions.push(format!("{column} = ${}", binds.len()));
        }
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let sql = format!(
        "SELECT {COLUMNS} FROM feedbacks{where_clause} \
         ORDER BY created_at DESC, id DESC LIMIT ${}",
        binds.len() + 1
    );
    (sql, binds)
}

/// Provides query operations for feedback records.
pub struct FeedbackRepo;

impl FeedbackRepo {
    /// Find a single feedback row. Returns `None` when the id is unknown.
    pub async fn find_by_id(
        pool: &PgPool,
        id: fbintel_core::types::DbId,
    ) -> Result<Option<Feedback>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM feedbacks WHERE id = $1");
        sqlx::query_as::<_, Feedback>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List feedback rows matching `filter`, newest first, capped at
    /// `limit` rows. Callers produce `limit` via [`clamp_limit`].
    pub async fn list(
        pool: &PgPool,
        filter: &FeedbackFilter,
        limit: i64,
    ) -> Result<Vec<Feedback>, sqlx::Error> {
        let (sql, binds) = build_list_query(filter);

        let mut query = sqlx::query_as::<_, Feedback>(&sql);
        for bind in &binds {
            query = query.bind(bind);
        }
        let rows = query.bind(limit).fetch_all(pool).await?;

        tracing::debug!(rows = rows.len(), ?filter, limit, "Listed feedbacks");
        Ok(rows)
    }
}
