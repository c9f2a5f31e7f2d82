//! Skill listings awaiting or past moderation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{or_unknown, patch, Action, Entity, EntityId, EntityKind};
use crate::remote::Patch;

/// Moderation state of a skill listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl SkillStatus {
    pub const ALL: [SkillStatus; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Unknown => "Unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub status: SkillStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Skill {
    pub fn display_name(&self) -> &str {
        or_unknown(&self.name)
    }

    pub fn display_owner(&self) -> &str {
        or_unknown(&self.owner_name)
    }

    pub fn display_category(&self) -> &str {
        or_unknown(&self.category)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillFilter {
    pub status: Option<SkillStatus>,
    /// Exact category match, case-insensitive
    pub category: Option<String>,
}

impl Entity for Skill {
    type Filter = SkillFilter;
    type Draft = serde_json::Value;

    const KIND: EntityKind = EntityKind::Skill;

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
            self.description.as_str(),
            self.owner_name.as_str(),
            self.category.as_str(),
        ]
    }

    fn matches_filter(&self, filter: &SkillFilter, _now: DateTime<Utc>) -> bool {
        let status_ok = filter.status.map_or(true, |s| s == self.status);
        let category_ok = filter
            .category
            .as_deref()
            .map_or(true, |c| c.eq_ignore_ascii_case(&self.category));
        status_ok && category_ok
    }

    fn supported_actions() -> &'static [Action] {
        &[Action::Approve, Action::Reject, Action::Delete]
    }

    fn allows(&self, action: Action) -> bool {
        match action {
            Action::Approve => self.status != SkillStatus::Approved,
            Action::Reject => self.status != SkillStatus::Rejected,
            Action::Delete => true,
            _ => false,
        }
    }

    fn requires_confirmation(action: Action) -> bool {
        action.is_destructive() || action == Action::Reject
    }

    fn patch_for(action: Action) -> Option<Patch> {
        match action {
            Action::Approve => Some(patch([("status", json!(SkillStatus::Approved))])),
            Action::Reject => Some(patch([("status", json!(SkillStatus::Rejected))])),
            _ => None,
        }
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::Approve => self.status = SkillStatus::Approved,
            Action::Reject => self.status = SkillStatus::Rejected,
            _ => {}
        }
    }
}

/// Distinct non-blank categories, in first-seen order
pub fn categories(skills: &[Skill]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for skill in skills {
        let category = skill.category.trim();
        if !category.is_empty() && !seen.iter().any(|c| c.eq_ignore_ascii_case(category)) {
            seen.push(category.to_string());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_decoding() {
        let skill: Skill = serde_json::from_str(r#"{"id": 1, "status": "approved"}"#).unwrap();
        assert_eq!(skill.status, SkillStatus::Approved);

        let skill: Skill = serde_json::from_str(r#"{"id": 1, "status": "flagged"}"#).unwrap();
        assert_eq!(skill.status, SkillStatus::Unknown);

        let skill: Skill = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(skill.status, SkillStatus::Pending);
        assert_eq!(skill.display_owner(), "Unknown");
    }

    #[test]
    fn test_reject_needs_confirmation() {
        assert!(Skill::requires_confirmation(Action::Reject));
        assert!(Skill::requires_confirmation(Action::Delete));
        assert!(!Skill::requires_confirmation(Action::Approve));
    }

    #[test]
    fn test_patch_serializes_lowercase() {
        let patch = Skill::patch_for(Action::Approve).unwrap();
        assert_eq!(patch.get("status"), Some(&json!("approved")));
    }

    #[test]
    fn test_categories() {
        let skills = vec![
            Skill { category: "Music".into(), ..Default::default() },
            Skill { category: "music".into(), ..Default::default() },
            Skill { category: "".into(), ..Default::default() },
            Skill { category: "Cooking".into(), ..Default::default() },
        ];
        assert_eq!(categories(&skills), vec!["Music", "Cooking"]);
    }

    #[test]
    fn test_category_filter() {
        let skill = Skill { category: "Music".into(), ..Default::default() };
        let filter = SkillFilter { category: Some("music".into()), ..Default::default() };
        assert!(skill.matches_filter(&filter, Utc::now()));
        let filter = SkillFilter { status: Some(SkillStatus::Approved), ..Default::default() };
        assert!(!skill.matches_filter(&filter, Utc::now()));
    }
}
