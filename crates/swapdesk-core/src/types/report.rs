//! Generated administrative reports

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{or_unknown, Action, Entity, EntityId, EntityKind, NOT_AVAILABLE};
use crate::error::{Error, Result};
use crate::filter::DateRange;
use crate::remote::Patch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    #[default]
    UserActivity,
    SkillUsage,
    SwapSummary,
    Feedback,
    #[serde(other)]
    Other,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        Self::UserActivity,
        Self::SkillUsage,
        Self::SwapSummary,
        Self::Feedback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserActivity => "user_activity",
            Self::SkillUsage => "skill_usage",
            Self::SwapSummary => "swap_summary",
            Self::Feedback => "feedback",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::UserActivity => "User activity",
            Self::SkillUsage => "Skill usage",
            Self::SwapSummary => "Swap summary",
            Self::Feedback => "Feedback",
            Self::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 3] = [Self::Pending, Self::Completed, Self::Failed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Generating",
            Self::Completed => "Ready",
            Self::Failed => "Failed",
            Self::Unknown => "Unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub kind: ReportKind,
    #[serde(default)]
    pub status: ReportStatus,
    /// Period the report covers
    #[serde(default)]
    pub range: DateRange,
    #[serde(default)]
    pub generated_by: String,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Report {
    pub fn display_size(&self) -> String {
        self.file_size
            .map(format_size)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

/// Payload for generating a report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportDraft {
    pub title: String,
    pub kind: ReportKind,
    pub range: DateRange,
}

impl ReportDraft {
    pub fn new(kind: ReportKind, range: DateRange) -> Self {
        Self {
            title: format!("{} ({})", kind.label(), range.label()),
            kind,
            range,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidInput("Report title cannot be empty".to_string()));
        }
        if self.kind == ReportKind::Other {
            return Err(Error::InvalidInput("Choose a report type".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    pub kind: Option<ReportKind>,
    pub status: Option<ReportStatus>,
    pub date: DateRange,
}

impl Entity for Report {
    type Filter = ReportFilter;
    type Draft = ReportDraft;

    const KIND: EntityKind = EntityKind::Report;

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
        vec![self.title.as_str(), self.generated_by.as_str()]
    }

    fn matches_filter(&self, filter: &ReportFilter, now: DateTime<Utc>) -> bool {
        filter.kind.map_or(true, |k| k == self.kind)
            && filter.status.map_or(true, |s| s == self.status)
            && filter.date.matches(self.created_at, now)
    }

    fn supported_actions() -> &'static [Action] {
        &[Action::Delete]
    }

    fn patch_for(_action: Action) -> Option<Patch> {
        None
    }

    fn apply_action(&mut self, _action: Action) {}
}

/// Human-readable byte count
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
