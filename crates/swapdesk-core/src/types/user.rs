//! Platform members

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{or_unknown, patch, Action, Entity, EntityId, EntityKind};
use crate::remote::Patch;

/// A registered member of the skill-swapping platform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub skills_offered: Vec<String>,
    #[serde(default)]
    pub skills_wanted: Vec<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub swaps_completed: u32,
    #[serde(default)]
    pub is_banned: bool,
    #[serde(default = "default_public")]
    pub is_public: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_public() -> bool {
    true
}

impl User {
    pub fn display_name(&self) -> &str {
        or_unknown(&self.name)
    }

    pub fn initial(&self) -> String {
        self.display_name()
            .chars()
            .next()
            .unwrap_or('U')
            .to_uppercase()
            .to_string()
    }

    /// Rating with one decimal, or "N/A" for members nobody has rated yet
    pub fn rating_text(&self) -> String {
        self.rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| super::NOT_AVAILABLE.to_string())
    }
}

/// Ban-state selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BanFilter {
    #[default]
    All,
    Active,
    Banned,
}

impl BanFilter {
    pub fn parse(s: &str) -> Self {
        match s {
            "active" => Self::Active,
            "banned" => Self::Banned,
            _ => Self::All,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub ban: BanFilter,
    /// `Some(true)` keeps only public profiles, `Some(false)` only private ones
    pub public: Option<bool>,
}

impl Entity for User {
    type Filter = UserFilter;
    type Draft = serde_json::Value;

    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> EntityId {
        self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn label(&self) -> String {
        self.display_name().to_string()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.location.as_deref().unwrap_or(""),
        ]
    }

    fn matches_filter(&self, filter: &UserFilter, _now: DateTime<Utc>) -> bool {
        let ban_ok = match filter.ban {
            BanFilter::All => true,
            BanFilter::Active => !self.is_banned,
            BanFilter::Banned => self.is_banned,
        };
        ban_ok && filter.public.map_or(true, |p| p == self.is_public)
    }

    fn supported_actions() -> &'static [Action] {
        &[Action::Ban, Action::Unban, Action::Delete]
    }

    fn allows(&self, action: Action) -> bool {
        match action {
            Action::Ban => !self.is_banned,
            Action::Unban => self.is_banned,
            Action::Delete => true,
            _ => false,
        }
    }

    fn patch_for(action: Action) -> Option<Patch> {
        match action {
            Action::Ban => Some(patch([("is_banned", json!(true))])),
            Action::Unban => Some(patch([("is_banned", json!(false))])),
            _ => None,
        }
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::Ban => self.is_banned = true,
            Action::Unban => self.is_banned = false,
            _ => {}
        }
    }
}
