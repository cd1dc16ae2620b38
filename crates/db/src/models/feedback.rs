//! Feedback entity model.
//!
//! Column names match the upstream ingestion schema (a Portuguese/English
//! mix) because the dashboard frontend consumes them verbatim.

use serde::Serialize;
use sqlx::FromRow;

use fbintel_core::report::ReportRecord;
use fbintel_core::status::{Sentiment, Status};
use fbintel_core::types::{DbId, Timestamp};

/// A row from the `feedbacks` table. Immutable from this system's
/// perspective: rows are created by the ingestion pipeline and only ever
/// read here.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: DbId,
    /// Brand owning the campaign.
    pub video_marca: String,
    /// Theme / project name.
    pub video_tema: String,
    /// Format tag (small fixed vocabulary, e.g. BC / BCR).
    pub video_formato: String,
    /// Version label, pattern `V<n>`.
    pub video_versao: String,
    /// Reviewer name.
    pub autor: String,
    /// Original reviewer comment.
    pub comment_text: String,
    /// AI-generated summary of the comment.
    pub ai_summary: String,
    /// Serialized JSON array of AI-assigned topic strings.
    pub ai_category_topic: String,
    /// AI-assigned action category.
    pub ai_action_category: String,
    /// Free-text workflow status (see `fbintel_core::status`).
    pub status: String,
    /// Free-text sentiment label.
    pub sentimento: String,
    /// Associated video filename.
    pub arquivo_video: String,
    pub created_at: Timestamp,
}

impl From<&Feedback> for ReportRecord {
    fn from(feedback: &Feedback) -> Self {
        ReportRecord {
            brand: feedback.video_marca.clone(),
            theme: feedback.video_tema.clone(),
            format: feedback.video_formato.clone(),
            version: feedback.video_versao.clone(),
            topics_json: feedback.ai_category_topic.clone(),
            created_at: feedback.created_at.to_rfc3339(),
        }
    }
}

/// Response DTO: the raw row plus the classified status/sentiment the
/// dashboard table renders as badges.
#[derive(Debug, Serialize)]
pub struct FeedbackView {
    #[serde(flatten)]
    pub feedback: Feedback,
    /// Classified workflow position of the free-text `status` column.
    pub status_class: Status,
    /// Badge variant for `status_class`.
    pub status_badge: &'static str,
    /// Classified polarity of the free-text `sentimento` column.
    pub sentiment_class: Sentiment,
}

impl From<Feedback> for FeedbackView {
    fn from(feedback: Feedback) -> Self {
        let status = Status::classify(&feedback.status);
        let sentiment = Sentiment::classify(&feedback.sentimento);
        Self {
            status_class: status,
            status_badge: status.badge(),
            sentiment_class: sentiment,
            feedback,
        }
    }
}

/// Optional equality filters for the list query. `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackFilter {
    pub brand: Option<String>,
    pub version: Option<String>,
    pub format: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback(status: &str, sentimento: &str) -> Feedback {
        Feedback {
            id: 1,
            video_marca: "Nubank".to_string(),
            video_tema: "Cartão Ultra".to_string(),
            video_formato: "BC".to_string(),
            video_versao: "V2".to_string(),
            autor: "Ana".to_string(),
            comment_text: "Ajustar a cor do logo".to_string(),
            ai_summary: "Pedido de ajuste de cor".to_string(),
            ai_category_topic: r#"["Cor"]"#.to_string(),
            ai_action_category: "ajuste".to_string(),
            status: status.to_string(),
            sentimento: sentimento.to_string(),
            arquivo_video: "nubank_v2.mp4".to_string(),
            created_at: "2026-08-01T12:00:00Z".parse().unwrap(),
        }
    }

    // -- FeedbackView --

    #[test]
    fn view_classifies_status_and_sentiment() {
        let view = FeedbackView::from(feedback("Aprovado", "Positivo"));
        assert_eq!(view.status_class, Status::Resolved);
        assert_eq!(view.status_badge, "success");
        assert_eq!(view.sentiment_class, Sentiment::Positive);
    }

    #[test]
    fn view_serializes_row_fields_and_badges_side_by_side() {
        let view = FeedbackView::from(feedback("Pendente", "Neutro"));
        let json = serde_json::to_value(&view).unwrap();

        // Flattened row fields stay at the top level, as the frontend expects.
        assert_eq!(json["video_marca"], "Nubank");
        assert_eq!(json["status"], "Pendente");
        // Derived classification rides alongside.
        assert_eq!(json["status_class"], "pending");
        assert_eq!(json["status_badge"], "warning");
        assert_eq!(json["sentiment_class"], "neutral");
    }

    // -- ReportRecord bridge --

    #[test]
    fn report_record_carries_the_aggregation_fields() {
        let record = ReportRecord::from(&feedback("Aprovado", "Positivo"));
        assert_eq!(record.brand, "Nubank");
        assert_eq!(record.theme, "Cartão Ultra");
        assert_eq!(record.version, "V2");
        assert_eq!(record.topics_json, r#"["Cor"]"#);
        assert!(record.created_at.starts_with("2026-08-01T12:00:00"));
    }
}
