//! Lenient classification of the free-text `status` and `sentimento`
//! columns.
//!
//! The ingestion pipeline writes these as loose Portuguese or English
//! labels, so classification is case-insensitive substring matching with an
//! explicit `Unknown` fallback rather than strict enum parsing.

use serde::Serialize;

/// Workflow position of a feedback record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pending,
    InReview,
    Resolved,
    Unknown,
}

impl Status {
    /// Classify a raw status column value.
    pub fn classify(raw: &str) -> Self {
        let s = raw.to_lowercase();
        if s.contains("aprovado") || s.contains("resolvido") || s.contains("resolved") {
            Self::Resolved
        } else if s.contains("revisão") || s.contains("revisao") || s.contains("review") {
            Self::InReview
        } else if s.contains("pendente") || s.contains("pending") {
            Self::Pending
        } else {
            Self::Unknown
        }
    }

    /// Badge variant the dashboard table uses for this status.
    pub fn badge(self) -> &'static str {
        match self {
            Self::Resolved => "success",
            Self::Pending => "warning",
            Self::InReview => "danger",
            Self::Unknown => "secondary",
        }
    }
}

/// AI-assigned polarity of a reviewer comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Unknown,
}

impl Sentiment {
    /// Classify a raw sentiment column value.
    pub fn classify(raw: &str) -> Self {
        let s = raw.to_lowercase();
        if s.contains("positiv") {
            Self::Positive
        } else if s.contains("negativ") {
            Self::Negative
        } else if s.contains("neutr") {
            Self::Neutral
        } else {
            Self::Unknown
        }
    }
}
