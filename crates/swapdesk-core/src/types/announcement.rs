//! Platform-wide announcements

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{or_unknown, patch, Action, Entity, EntityId, EntityKind};
use crate::error::{Error, Result};
use crate::filter::DateRange;
use crate::remote::Patch;

/// Maximum announcement title length
pub const MAX_TITLE_LENGTH: usize = 120;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementStatus {
    #[default]
    Active,
    Archived,
    #[serde(other)]
    Unknown,
}

impl AnnouncementStatus {
    pub const ALL: [AnnouncementStatus; 2] = [Self::Active, Self::Archived];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Archived => "Archived",
            Self::Unknown => "Unknown",
        }
    }
}

/// Who sees an announcement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    #[default]
    All,
    Members,
    Admins,
}

impl Audience {
    pub const ALL: [Audience; 3] = [Self::All, Self::Members, Self::Admins];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Members => "members",
            Self::Admins => "admins",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "Everyone",
            Self::Members => "Members",
            Self::Admins => "Admins",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub audience: Audience,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub status: AnnouncementStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for publishing a new announcement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementDraft {
    pub title: String,
    pub message: String,
    pub audience: Audience,
}

impl AnnouncementDraft {
    pub fn new(title: impl Into<String>, message: impl Into<String>, audience: Audience) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            audience,
        }
    }

    /// Reject drafts the server would refuse anyway
    pub fn validate(&self) -> Result<()> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(Error::InvalidInput("Title cannot be empty".to_string()));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(Error::InvalidInput(format!(
                "Title must be at most {} characters",
                MAX_TITLE_LENGTH
            )));
        }
        if self.message.trim().is_empty() {
            return Err(Error::InvalidInput("Message cannot be empty".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnouncementFilter {
    pub status: Option<AnnouncementStatus>,
    pub audience: Option<Audience>,
    pub date: DateRange,
}

impl Entity for Announcement {
    type Filter = AnnouncementFilter;
    type Draft = AnnouncementDraft;

    const KIND: EntityKind = EntityKind::Announcement;

    fn id(&self) -> EntityId {
        self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn label(&self) -> String {
        or_unknown(&self.title).to_string()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.message.as_str(), self.author.as_str()]
    }

    fn matches_filter(&self, filter: &AnnouncementFilter, now: DateTime<Utc>) -> bool {
        filter.status.map_or(true, |s| s == self.status)
            && filter.audience.map_or(true, |a| a == self.audience)
            && filter.date.matches(self.created_at, now)
    }

    fn supported_actions() -> &'static [Action] {
        &[Action::Archive, Action::Delete]
    }

    fn allows(&self, action: Action) -> bool {
        match action {
            Action::Archive => self.status == AnnouncementStatus::Active,
            Action::Delete => true,
            _ => false,
        }
    }

    fn patch_for(action: Action) -> Option<Patch> {
        match action {
            Action::Archive => Some(patch([("status", json!(AnnouncementStatus::Archived))])),
            _ => None,
        }
    }

    fn apply_action(&mut self, action: Action) {
        if action == Action::Archive {
            self.status = AnnouncementStatus::Archived;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_validation() {
        assert!(AnnouncementDraft::new("Maintenance", "Down at 2am", Audience::All)
            .validate()
            .is_ok());
        assert!(matches!(
            AnnouncementDraft::new("  ", "body", Audience::All).validate(),
            Err(Error::InvalidInput(_))
        ));
        assert!(AnnouncementDraft::new("Title", "", Audience::All).validate().is_err());
        let long = "x".repeat(MAX_TITLE_LENGTH + 1);
        assert!(AnnouncementDraft::new(long, "body", Audience::All).validate().is_err());
    }

    #[test]
    fn test_audience_filter() {
        let a = Announcement { audience: Audience::Admins, ..Default::default() };
        let filter = AnnouncementFilter { audience: Some(Audience::Members), ..Default::default() };
        assert!(!a.matches_filter(&filter, Utc::now()));
        assert!(a.matches_filter(&AnnouncementFilter::default(), Utc::now()));
    }

    #[test]
    fn test_draft_serialization() {
        let draft = AnnouncementDraft::new("Hi", "There", Audience::Members);
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["audience"], "members");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(AnnouncementStatus::parse("archived"), Some(AnnouncementStatus::Archived));
        assert_eq!(AnnouncementStatus::parse("unknown"), None);
        assert_eq!(AnnouncementStatus::Active.as_str(), "active");
    }
}
