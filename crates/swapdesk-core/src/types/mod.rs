//! Entity catalogue
//!
//! One module per record type the dashboard manages, plus the [`Entity`]
//! trait the list-view synchronizer is generic over.

mod announcement;
mod feedback;
mod group;
mod report;
mod skill;
mod swap;
mod user;

pub use announcement::{Announcement, AnnouncementDraft, AnnouncementFilter, AnnouncementStatus, Audience};
pub use feedback::{Feedback, FeedbackFilter, FeedbackStatus};
pub use group::{Group, GroupFilter};
pub use report::{format_size, Report, ReportDraft, ReportFilter, ReportKind, ReportStatus};
pub use skill::{categories as skill_categories, Skill, SkillFilter, SkillStatus};
pub use swap::{Swap, SwapFilter, SwapStatus};
pub use user::{BanFilter, User, UserFilter};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::remote::Patch;

/// Server-assigned record identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        EntityId(id)
    }
}

/// The record types managed by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Skill,
    Feedback,
    Announcement,
    Swap,
    Group,
    Report,
}

impl EntityKind {
    /// REST collection path, relative to the API base
    pub fn path(&self) -> &'static str {
        match self {
            Self::User => "/users",
            Self::Skill => "/skills",
            Self::Feedback => "/feedback",
            Self::Announcement => "/announcements",
            Self::Swap => "/swaps",
            Self::Group => "/groups",
            Self::Report => "/reports",
        }
    }

    pub fn singular(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Skill => "skill",
            Self::Feedback => "feedback item",
            Self::Announcement => "announcement",
            Self::Swap => "swap",
            Self::Group => "group",
            Self::Report => "report",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Skill => "skills",
            Self::Feedback => "feedback",
            Self::Announcement => "announcements",
            Self::Swap => "swaps",
            Self::Group => "groups",
            Self::Report => "reports",
        }
    }
}

/// Row-level mutating actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    Ban,
    Unban,
    Approve,
    Reject,
    Resolve,
    Archive,
    Join,
    Leave,
    Interrupt,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ban => "ban",
            Self::Unban => "unban",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Resolve => "resolve",
            Self::Archive => "archive",
            Self::Join => "join",
            Self::Leave => "leave",
            Self::Interrupt => "interrupt",
            Self::Delete => "delete",
        }
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ban => "Ban",
            Self::Unban => "Unban",
            Self::Approve => "Approve",
            Self::Reject => "Reject",
            Self::Resolve => "Resolve",
            Self::Archive => "Archive",
            Self::Join => "Join",
            Self::Leave => "Leave",
            Self::Interrupt => "Interrupt",
            Self::Delete => "Delete",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            Self::Ban => "banned",
            Self::Unban => "unbanned",
            Self::Approve => "approved",
            Self::Reject => "rejected",
            Self::Resolve => "resolved",
            Self::Archive => "archived",
            Self::Join => "joined",
            Self::Leave => "left",
            Self::Interrupt => "interrupted",
            Self::Delete => "deleted",
        }
    }

    /// Actions that ask for confirmation on every entity type.
    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::Delete | Self::Leave)
    }

    /// Actions whose outcome changes aggregate fields only the server can
    /// compute, so the collection is re-fetched after success.
    pub fn requires_reload(&self) -> bool {
        matches!(self, Self::Join | Self::Leave)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record type the list-view synchronizer can manage.
///
/// Implementations describe how a record is searched, filtered, and how each
/// supported action translates into a remote patch and a local update.
pub trait Entity: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + 'static {
    /// Categorical filter selectors for this record type
    type Filter: Clone + fmt::Debug + Default + PartialEq + 'static;

    /// Payload accepted by `create`
    type Draft: Clone + fmt::Debug + Serialize + 'static;

    const KIND: EntityKind;

    fn id(&self) -> EntityId;

    fn created_at(&self) -> Option<DateTime<Utc>>;

    /// Human-readable name used in prompts and notifications
    fn label(&self) -> String;

    /// Fixed set of text fields matched by the search box
    fn search_fields(&self) -> Vec<&str>;

    /// Whether the record passes the categorical filters
    fn matches_filter(&self, filter: &Self::Filter, now: DateTime<Utc>) -> bool;

    /// Actions this record type supports at all
    fn supported_actions() -> &'static [Action];

    fn supports(action: Action) -> bool {
        Self::supported_actions().contains(&action)
    }

    /// Whether `action` makes sense for this record in its current state
    fn allows(&self, action: Action) -> bool {
        Self::supports(action)
    }

    fn requires_confirmation(action: Action) -> bool {
        action.is_destructive()
    }

    /// Field updates sent with `update` for a non-delete action
    fn patch_for(action: Action) -> Option<Patch>;

    /// Apply an acknowledged action to the local copy
    fn apply_action(&mut self, action: Action);

    /// Actions to render as row buttons, in display order
    fn available_actions(&self) -> Vec<Action> {
        Self::supported_actions()
            .iter()
            .copied()
            .filter(|action| self.allows(*action))
            .collect()
    }
}

// ============= Display fallbacks =============

pub const UNKNOWN: &str = "Unknown";
pub const NOT_AVAILABLE: &str = "N/A";

/// Text for an optional or blank field, falling back to "Unknown".
pub fn or_unknown(value: &str) -> &str {
    if value.trim().is_empty() {
        UNKNOWN
    } else {
        value
    }
}

/// Text for an optional or blank field, falling back to "N/A".
pub fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_AVAILABLE,
    }
}

/// Calendar date of a timestamp, or "N/A".
pub fn format_date(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Build a patch object from field/value pairs.
pub(crate) fn patch<const N: usize>(fields: [(&str, serde_json::Value); N]) -> Patch {
    fields
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fallbacks() {
        assert_eq!(or_unknown(""), "Unknown");
        assert_eq!(or_unknown("  "), "Unknown");
        assert_eq!(or_unknown("Ada"), "Ada");
        assert_eq!(or_na(None), "N/A");
        assert_eq!(or_na(Some("")), "N/A");
        assert_eq!(or_na(Some("Berlin")), "Berlin");
    }

    #[test]
    fn test_format_date() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 14, 0, 0).unwrap();
        assert_eq!(format_date(Some(ts)), "2024-03-09");
        assert_eq!(format_date(None), "N/A");
    }

    #[test]
    fn test_action_flags() {
        assert!(Action::Delete.is_destructive());
        assert!(Action::Leave.is_destructive());
        assert!(!Action::Ban.is_destructive());
        assert!(Action::Join.requires_reload());
        assert!(!Action::Approve.requires_reload());
    }

    #[test]
    fn test_entity_id_serde() {
        let id: EntityId = serde_json::from_str("42").unwrap();
        assert_eq!(id, EntityId(42));
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        assert_eq!(id.to_string(), "42");
    }
}
