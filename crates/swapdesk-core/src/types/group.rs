//! Interest groups

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{or_unknown, patch, Action, Entity, EntityId, EntityKind};
use crate::filter::SizeBucket;
use crate::remote::Patch;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub owner_name: String,
    /// Maintained by the server; never adjusted locally
    #[serde(default)]
    pub member_count: u32,
    /// Whether the signed-in admin is a member
    #[serde(default)]
    pub is_member: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Group {
    pub fn display_name(&self) -> &str {
        or_unknown(&self.name)
    }

    pub fn size_bucket(&self) -> SizeBucket {
        [SizeBucket::Small, SizeBucket::Medium, SizeBucket::Large]
            .into_iter()
            .find(|b| b.matches(self.member_count))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupFilter {
    pub size: SizeBucket,
    /// `Some(true)` keeps only groups the admin belongs to
    pub membership: Option<bool>,
}

impl Entity for Group {
    type Filter = GroupFilter;
    type Draft = serde_json::Value;

    const KIND: EntityKind = EntityKind::Group;

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
            self.category.as_str(),
            self.owner_name.as_str(),
        ]
    }

    fn matches_filter(&self, filter: &GroupFilter, _now: DateTime<Utc>) -> bool {
        filter.size.matches(self.member_count)
            && filter.membership.map_or(true, |m| m == self.is_member)
    }

    fn supported_actions() -> &'static [Action] {
        &[Action::Join, Action::Leave, Action::Delete]
    }

    fn allows(&self, action: Action) -> bool {
        match action {
            Action::Join => !self.is_member,
            Action::Leave => self.is_member,
            Action::Delete => true,
            _ => false,
        }
    }

    fn patch_for(action: Action) -> Option<Patch> {
        match action {
            Action::Join => Some(patch([("is_member", json!(true))])),
            Action::Leave => Some(patch([("is_member", json!(false))])),
            _ => None,
        }
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::Join => self.is_member = true,
            Action::Leave => self.is_member = false,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_bucket() {
        let mut group = Group { member_count: 3, ..Default::default() };
        assert_eq!(group.size_bucket(), SizeBucket::Small);
        group.member_count = 120;
        assert_eq!(group.size_bucket(), SizeBucket::Large);
    }

    #[test]
    fn test_membership_actions() {
        let mut group = Group::default();
        assert_eq!(group.available_actions(), vec![Action::Join, Action::Delete]);
        group.apply_action(Action::Join);
        assert!(group.is_member);
        assert_eq!(group.member_count, 0);
        assert_eq!(group.available_actions(), vec![Action::Leave, Action::Delete]);
    }
}
