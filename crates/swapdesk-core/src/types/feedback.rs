//! Member feedback awaiting triage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{or_unknown, patch, Action, Entity, EntityId, EntityKind};
use crate::filter::DateRange;
use crate::remote::Patch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    #[default]
    Pending,
    Resolved,
    Archived,
    #[serde(other)]
    Unknown,
}

impl FeedbackStatus {
    pub const ALL: [FeedbackStatus; 3] = [Self::Pending, Self::Resolved, Self::Archived];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Resolved => "resolved",
            Self::Archived => "archived",
            Self::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Resolved => "Resolved",
            Self::Archived => "Archived",
            Self::Unknown => "Unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: EntityId,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    /// 1-5 stars, when the member left one
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub status: FeedbackStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Feedback {
    pub fn display_author(&self) -> &str {
        or_unknown(&self.user_name)
    }

    pub fn stars(&self) -> String {
        match self.rating {
            Some(r) => {
                let r = r.min(5) as usize;
                format!("{}{}", "★".repeat(r), "☆".repeat(5 - r))
            }
            None => super::NOT_AVAILABLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackFilter {
    pub status: Option<FeedbackStatus>,
    pub date: DateRange,
}

impl Entity for Feedback {
    type Filter = FeedbackFilter;
    type Draft = serde_json::Value;

    const KIND: EntityKind = EntityKind::Feedback;

    fn id(&self) -> EntityId {
        self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn label(&self) -> String {
        if self.subject.trim().is_empty() {
            format!("feedback from {}", self.display_author())
        } else {
            self.subject.clone()
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.user_name.as_str(),
            self.user_email.as_str(),
            self.subject.as_str(),
            self.message.as_str(),
        ]
    }

    fn matches_filter(&self, filter: &FeedbackFilter, now: DateTime<Utc>) -> bool {
        filter.status.map_or(true, |s| s == self.status) && filter.date.matches(self.created_at, now)
    }

    fn supported_actions() -> &'static [Action] {
        &[Action::Resolve, Action::Archive, Action::Delete]
    }

    fn allows(&self, action: Action) -> bool {
        match action {
            Action::Resolve => self.status == FeedbackStatus::Pending,
            Action::Archive => self.status != FeedbackStatus::Archived,
            Action::Delete => true,
            _ => false,
        }
    }

    fn patch_for(action: Action) -> Option<Patch> {
        match action {
            Action::Resolve => Some(patch([("status", json!(FeedbackStatus::Resolved))])),
            Action::Archive => Some(patch([("status", json!(FeedbackStatus::Archived))])),
            _ => None,
        }
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::Resolve => self.status = FeedbackStatus::Resolved,
            Action::Archive => self.status = FeedbackStatus::Archived,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_stars() {
        let mut fb = Feedback::default();
        assert_eq!(fb.stars(), "N/A");
        fb.rating = Some(3);
        assert_eq!(fb.stars(), "★★★☆☆");
        fb.rating = Some(9);
        assert_eq!(fb.stars(), "★★★★★");
    }

    #[test]
    fn test_label_fallback() {
        let fb = Feedback::default();
        assert_eq!(fb.label(), "feedback from Unknown");
    }

    #[test]
    fn test_status_and_date_filter() {
        let now = Utc::now();
        let fb = Feedback {
            status: FeedbackStatus::Resolved,
            created_at: Some(now - Duration::days(10)),
            ..Default::default()
        };
        let filter = FeedbackFilter { status: Some(FeedbackStatus::Resolved), date: DateRange::Month };
        assert!(fb.matches_filter(&filter, now));
        let filter = FeedbackFilter { status: Some(FeedbackStatus::Resolved), date: DateRange::Week };
        assert!(!fb.matches_filter(&filter, now));
    }

    #[test]
    fn test_resolve_only_pending() {
        let mut fb = Feedback::default();
        assert!(fb.allows(Action::Resolve));
        fb.apply_action(Action::Resolve);
        assert_eq!(fb.status, FeedbackStatus::Resolved);
        assert!(!fb.allows(Action::Resolve));
        assert!(fb.allows(Action::Archive));
    }
}
