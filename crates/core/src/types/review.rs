//! Customer review entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::{ReviewId, UserId};
use crate::types::status::{ReviewKind, ReviewStatus};

/// A customer review or question.
///
/// Only `approved` feedback-kind reviews surface on the public homepage
/// carousel; everything else is visible to its author and to admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: ReviewId,
    #[serde(rename = "type")]
    pub kind: ReviewKind,
    /// 1-5 stars; required for feedback, absent for questions.
    #[serde(default)]
    pub rating: Option<u8>,
    pub comment: String,
    pub status: ReviewStatus,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Whether this review belongs on the public homepage carousel.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.status == ReviewStatus::Approved && self.kind == ReviewKind::Feedback
    }
}
