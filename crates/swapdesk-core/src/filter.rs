//! In-memory projection of a collection for rendering
//!
//! Everything here is pure: the same collection and query always give the
//! same projection, in collection order.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Entity;

/// Search term plus categorical filters, evaluated against a fixed instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Query<F> {
    pub search: String,
    pub filter: F,
    pub now: DateTime<Utc>,
}

impl<F: Default> Default for Query<F> {
    fn default() -> Self {
        Self::new("", F::default())
    }
}

impl<F> Query<F> {
    pub fn new(search: impl Into<String>, filter: F) -> Self {
        Self::at(search, filter, Utc::now())
    }

    pub fn at(search: impl Into<String>, filter: F, now: DateTime<Utc>) -> Self {
        Self {
            search: search.into(),
            filter,
            now,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_filter(mut self, filter: F) -> Self {
        self.filter = filter;
        self
    }
}

/// Case-insensitive substring match of a trimmed term over a set of fields.
/// A blank term matches everything.
pub fn matches_search(fields: &[&str], term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Project a collection through a query.
pub fn apply_filter<'a, E: Entity>(items: &'a [E], query: &Query<E::Filter>) -> Vec<&'a E> {
    items
        .iter()
        .filter(|item| matches_query(*item, query))
        .collect()
}

pub fn matches_query<E: Entity>(item: &E, query: &Query<E::Filter>) -> bool {
    matches_search(&item.search_fields(), &query.search)
        && item.matches_filter(&query.filter, query.now)
}

/// Creation-date bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl DateRange {
    pub const ALL: [DateRange; 4] = [Self::All, Self::Today, Self::Week, Self::Month];

    pub fn matches(&self, created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        let ts = match (self, created_at) {
            (Self::All, _) => return true,
            (_, None) => return false,
            (_, Some(ts)) => ts,
        };
        match self {
            Self::All => true,
            Self::Today => ts.date_naive() == now.date_naive(),
            Self::Week => ts <= now && now - ts <= Duration::days(7),
            Self::Month => ts <= now && now - ts <= Duration::days(30),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All time",
            Self::Today => "Today",
            Self::Week => "Last 7 days",
            Self::Month => "Last 30 days",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "today" => Self::Today,
            "week" => Self::Week,
            "month" => Self::Month,
            _ => Self::All,
        }
    }
}

/// Membership-size bucket for groups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeBucket {
    #[default]
    All,
    Small,
    Medium,
    Large,
}

impl SizeBucket {
    pub const ALL: [SizeBucket; 4] = [Self::All, Self::Small, Self::Medium, Self::Large];

    pub fn matches(&self, members: u32) -> bool {
        match self {
            Self::All => true,
            Self::Small => members < 10,
            Self::Medium => (10..50).contains(&members),
            Self::Large => members >= 50,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "Any size",
            Self::Small => "Small (< 10)",
            Self::Medium => "Medium (10-49)",
            Self::Large => "Large (50+)",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "small" => Self::Small,
            "medium" => Self::Medium,
            "large" => Self::Large,
            _ => Self::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BanFilter, EntityId, User, UserFilter};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn user(id: u64, name: &str, email: &str, banned: bool) -> User {
        User {
            id: EntityId(id),
            name: name.to_string(),
            email: email.to_string(),
            is_banned: banned,
            created_at: Some(now() - Duration::days(id as i64)),
            ..Default::default()
        }
    }

    fn users() -> Vec<User> {
        vec![
            user(1, "Ada Lovelace", "ada@example.com", false),
            user(2, "Grace Hopper", "grace@navy.mil", true),
            user(3, "Alan Turing", "alan@example.com", false),
        ]
    }

    #[test]
    fn test_matches_search_case_insensitive() {
        assert!(matches_search(&["Ada Lovelace"], "ada"));
        assert!(matches_search(&["Ada Lovelace"], "  LOVE "));
        assert!(!matches_search(&["Ada Lovelace"], "grace"));
        assert!(matches_search(&[], ""));
        assert!(matches_search(&["x"], "   "));
    }

    #[test]
    fn test_apply_filter_subset_in_order() {
        let items = users();
        let query = Query::at("example.com", UserFilter::default(), now());
        let result = apply_filter(&items, &query);
        let ids: Vec<u64> = result.iter().map(|u| u.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(result
            .iter()
            .all(|u| matches_search(&u.search_fields(), "example.com")));
    }

    #[test]
    fn test_apply_filter_idempotent_and_pure() {
        let items = users();
        let before = items.clone();
        let query = Query::at("a", UserFilter { ban: BanFilter::Active, ..Default::default() }, now());
        let first: Vec<User> = apply_filter(&items, &query).into_iter().cloned().collect();
        let second: Vec<User> = apply_filter(&items, &query).into_iter().cloned().collect();
        assert_eq!(first, second);
        assert_eq!(items, before);
    }

    #[test]
    fn test_search_and_filter_are_conjunctive() {
        let items = users();
        let banned = UserFilter { ban: BanFilter::Banned, ..Default::default() };
        assert_eq!(apply_filter(&items, &Query::at("grace", banned.clone(), now())).len(), 1);
        assert_eq!(apply_filter(&items, &Query::at("ada", banned, now())).len(), 0);
    }

    #[test]
    fn test_date_range() {
        let n = now();
        assert!(DateRange::All.matches(None, n));
        assert!(!DateRange::Week.matches(None, n));
        assert!(DateRange::Today.matches(Some(n - Duration::hours(3)), n));
        assert!(!DateRange::Today.matches(Some(n - Duration::days(1)), n));
        assert!(DateRange::Week.matches(Some(n - Duration::days(6)), n));
        assert!(!DateRange::Week.matches(Some(n - Duration::days(8)), n));
        assert!(DateRange::Month.matches(Some(n - Duration::days(29)), n));
        assert!(!DateRange::Month.matches(Some(n - Duration::days(31)), n));
        // Future timestamps are not "recent"
        assert!(!DateRange::Week.matches(Some(n + Duration::days(365)), n));
        assert!(!DateRange::Month.matches(Some(n + Duration::days(365)), n));
        assert!(!DateRange::Week.matches(Some(n + Duration::hours(1)), n));
    }

    #[test]
    fn test_size_bucket() {
        assert!(SizeBucket::Small.matches(9));
        assert!(!SizeBucket::Small.matches(10));
        assert!(SizeBucket::Medium.matches(10));
        assert!(SizeBucket::Medium.matches(49));
        assert!(SizeBucket::Large.matches(50));
        assert!(SizeBucket::All.matches(0));
        assert_eq!(SizeBucket::parse("large"), SizeBucket::Large);
        assert_eq!(SizeBucket::parse("bogus"), SizeBucket::All);
    }
}
