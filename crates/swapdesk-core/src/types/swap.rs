//! Skill swaps between two members

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{or_unknown, patch, Action, Entity, EntityId, EntityKind};
use crate::filter::DateRange;
use crate::remote::Patch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl SwapStatus {
    pub const ALL: [SwapStatus; 4] = [Self::Pending, Self::Active, Self::Completed, Self::Cancelled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    /// Still running, so an admin may interrupt it
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Active)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Swap {
    pub id: EntityId,
    #[serde(default)]
    pub requester_name: String,
    #[serde(default)]
    pub provider_name: String,
    #[serde(default)]
    pub offered_skill: String,
    #[serde(default)]
    pub requested_skill: String,
    #[serde(default)]
    pub status: SwapStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Swap {
    pub fn display_requester(&self) -> &str {
        or_unknown(&self.requester_name)
    }

    pub fn display_provider(&self) -> &str {
        or_unknown(&self.provider_name)
    }

    /// "Guitar ⇄ Spanish"
    pub fn exchange(&self) -> String {
        format!(
            "{} ⇄ {}",
            or_unknown(&self.offered_skill),
            or_unknown(&self.requested_skill)
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwapFilter {
    pub status: Option<SwapStatus>,
    pub date: DateRange,
}

impl Entity for Swap {
    type Filter = SwapFilter;
    type Draft = serde_json::Value;

    const KIND: EntityKind = EntityKind::Swap;

    fn id(&self) -> EntityId {
        self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn label(&self) -> String {
        format!(
            "{} / {}",
            self.display_requester(),
            self.display_provider()
        )
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.requester_name.as_str(),
            self.provider_name.as_str(),
            self.offered_skill.as_str(),
            self.requested_skill.as_str(),
        ]
    }

    fn matches_filter(&self, filter: &SwapFilter, now: DateTime<Utc>) -> bool {
        filter.status.map_or(true, |s| s == self.status) && filter.date.matches(self.created_at, now)
    }

    fn supported_actions() -> &'static [Action] {
        &[Action::Interrupt, Action::Delete]
    }

    fn allows(&self, action: Action) -> bool {
        match action {
            Action::Interrupt => self.status.is_open(),
            Action::Delete => true,
            _ => false,
        }
    }

    fn requires_confirmation(action: Action) -> bool {
        action.is_destructive() || action == Action::Interrupt
    }

    fn patch_for(action: Action) -> Option<Patch> {
        match action {
            Action::Interrupt => Some(patch([("status", json!(SwapStatus::Cancelled))])),
            _ => None,
        }
    }

    fn apply_action(&mut self, action: Action) {
        if action == Action::Interrupt {
            self.status = SwapStatus::Cancelled;
        }
    }
}
