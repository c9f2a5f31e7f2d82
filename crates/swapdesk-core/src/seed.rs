//! Demo data for the mock backend
//!
//! Timestamps are relative to `now` so the date-range filters always have
//! something to show.

use chrono::{DateTime, Duration, Utc};

use crate::filter::DateRange;
use crate::types::{
    Announcement, AnnouncementStatus, Audience, EntityId, Feedback, FeedbackStatus, Group, Report,
    ReportKind, ReportStatus, Skill, SkillStatus, Swap, SwapStatus, User,
};

/// One seeded collection per entity type
#[derive(Debug, Clone, PartialEq)]
pub struct SeedData {
    pub users: Vec<User>,
    pub skills: Vec<Skill>,
    pub feedback: Vec<Feedback>,
    pub announcements: Vec<Announcement>,
    pub swaps: Vec<Swap>,
    pub groups: Vec<Group>,
    pub reports: Vec<Report>,
}

impl SeedData {
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self {
            users: users(now),
            skills: skills(now),
            feedback: feedback(now),
            announcements: announcements(now),
            swaps: swaps(now),
            groups: groups(now),
            reports: reports(now),
        }
    }
}

fn days_ago(now: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    Some(now - Duration::days(days))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn users(now: DateTime<Utc>) -> Vec<User> {
    let rows: [(&str, &str, Option<&str>, &[&str], &[&str], Option<f32>, u32, bool, bool, i64); 6] = [
        ("Amara Okafor", "amara@example.com", Some("Lagos"), &["Guitar", "Songwriting"], &["Spanish"], Some(4.8), 12, false, true, 120),
        ("Lukas Brandt", "lukas@example.com", Some("Berlin"), &["Welding"], &["Photography", "Baking"], Some(4.2), 5, false, true, 45),
        ("Mei Tanaka", "mei@example.com", Some("Osaka"), &["Japanese", "Calligraphy"], &["Python"], Some(4.9), 21, false, false, 300),
        ("Diego Alvarez", "diego@example.com", None, &["Spanish"], &["Guitar"], None, 0, true, true, 6),
        ("Priya Nair", "priya@example.com", Some("Pune"), &["Python", "Data analysis"], &["Yoga"], Some(3.9), 3, false, true, 0),
        ("Sam Whitfield", "sam@example.com", Some("Leeds"), &[], &["Woodworking"], None, 0, true, false, 18),
    ];

    rows.iter()
        .enumerate()
        .map(
            |(i, (name, email, location, offered, wanted, rating, swaps, banned, public, age))| User {
                id: EntityId(i as u64 + 1),
                name: name.to_string(),
                email: email.to_string(),
                location: location.map(str::to_string),
                skills_offered: strings(offered),
                skills_wanted: strings(wanted),
                rating: *rating,
                swaps_completed: *swaps,
                is_banned: *banned,
                is_public: *public,
                created_at: days_ago(now, *age),
            },
        )
        .collect()
}

pub fn skills(now: DateTime<Utc>) -> Vec<Skill> {
    let rows = [
        ("Guitar", "Acoustic and electric, beginner friendly", "Music", "Amara Okafor", SkillStatus::Approved, 100),
        ("Welding", "MIG and TIG basics, safety first", "Crafts", "Lukas Brandt", SkillStatus::Pending, 2),
        ("Japanese", "Conversational Japanese up to JLPT N4", "Languages", "Mei Tanaka", SkillStatus::Approved, 250),
        ("Python", "Scripting, data wrangling and notebooks", "Technology", "Priya Nair", SkillStatus::Pending, 0),
        ("Spanish", "Latin American Spanish conversation", "Languages", "Diego Alvarez", SkillStatus::Rejected, 6),
        ("Calligraphy", "Brush lettering and shodo", "Arts", "Mei Tanaka", SkillStatus::Pending, 9),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(i, (name, description, category, owner, status, age))| Skill {
            id: EntityId(i as u64 + 1),
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            owner_name: owner.to_string(),
            status,
            created_at: days_ago(now, age),
        })
        .collect()
}

pub fn feedback(now: DateTime<Utc>) -> Vec<Feedback> {
    let rows = [
        ("Amara Okafor", "amara@example.com", "Great first swap", "Matched within a day, lovely experience.", Some(5), FeedbackStatus::Resolved, 20),
        ("Lukas Brandt", "lukas@example.com", "Notifications are late", "I get swap requests hours after they are sent.", Some(2), FeedbackStatus::Pending, 1),
        ("Priya Nair", "priya@example.com", "Dark mode please", "The app is very bright at night.", None, FeedbackStatus::Pending, 0),
        ("", "anon@example.com", "Spam profile", "Someone keeps offering crypto lessons.", Some(1), FeedbackStatus::Archived, 40),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(i, (name, email, subject, message, rating, status, age))| Feedback {
            id: EntityId(i as u64 + 1),
            user_name: name.to_string(),
            user_email: email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
            rating,
            status,
            created_at: days_ago(now, age),
        })
        .collect()
}

pub fn announcements(now: DateTime<Utc>) -> Vec<Announcement> {
    let rows = [
        ("Welcome to SwapDesk", "Thanks for helping us keep the community healthy.", Audience::Admins, AnnouncementStatus::Active, 60),
        ("Scheduled maintenance", "The platform will be read-only on Sunday 02:00-04:00 UTC.", Audience::All, AnnouncementStatus::Active, 3),
        ("Spring skill fair", "Join the online skill fair and meet new swap partners.", Audience::Members, AnnouncementStatus::Archived, 90),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(i, (title, message, audience, status, age))| Announcement {
            id: EntityId(i as u64 + 1),
            title: title.to_string(),
            message: message.to_string(),
            audience,
            author: "admin".to_string(),
            status,
            created_at: days_ago(now, age),
        })
        .collect()
}

pub fn swaps(now: DateTime<Utc>) -> Vec<Swap> {
    let rows = [
        ("Amara Okafor", "Diego Alvarez", "Guitar", "Spanish", SwapStatus::Completed, 30),
        ("Lukas Brandt", "Mei Tanaka", "Welding", "Japanese", SwapStatus::Active, 5),
        ("Priya Nair", "Amara Okafor", "Python", "Guitar", SwapStatus::Pending, 0),
        ("Mei Tanaka", "Priya Nair", "Calligraphy", "Python", SwapStatus::Active, 12),
        ("Sam Whitfield", "Lukas Brandt", "", "Welding", SwapStatus::Cancelled, 50),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(i, (requester, provider, offered, requested, status, age))| Swap {
            id: EntityId(i as u64 + 1),
            requester_name: requester.to_string(),
            provider_name: provider.to_string(),
            offered_skill: offered.to_string(),
            requested_skill: requested.to_string(),
            status,
            created_at: days_ago(now, age),
        })
        .collect()
}

pub fn groups(now: DateTime<Utc>) -> Vec<Group> {
    let rows = [
        ("Language Exchange", "Practice any language with native speakers", "Languages", "Mei Tanaka", 64, true, 200),
        ("Makers Guild", "Woodworking, welding and everything hands-on", "Crafts", "Lukas Brandt", 18, false, 80),
        ("Weekend Coders", "Pair programming sessions every Saturday", "Technology", "Priya Nair", 7, false, 14),
        ("Campfire Songs", "Acoustic jams for all levels", "Music", "Amara Okafor", 3, true, 2),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(i, (name, description, category, owner, members, is_member, age))| Group {
            id: EntityId(i as u64 + 1),
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            owner_name: owner.to_string(),
            member_count: members,
            is_member,
            created_at: days_ago(now, age),
        })
        .collect()
}

pub fn reports(now: DateTime<Utc>) -> Vec<Report> {
    let rows = [
        ("Monthly user activity", ReportKind::UserActivity, ReportStatus::Completed, DateRange::Month, Some(245_760), 1),
        ("Skill usage this week", ReportKind::SkillUsage, ReportStatus::Completed, DateRange::Week, Some(18_432), 4),
        ("Swap summary", ReportKind::SwapSummary, ReportStatus::Failed, DateRange::All, None, 10),
        ("Feedback digest", ReportKind::Feedback, ReportStatus::Pending, DateRange::Today, None, 0),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(i, (title, kind, status, range, size, age))| Report {
            id: EntityId(i as u64 + 1),
            title: title.to_string(),
            kind,
            status,
            range,
            generated_by: "admin".to_string(),
            file_size: size,
            created_at: days_ago(now, age),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Entity;
    use std::collections::HashSet;

    fn assert_unique_ids<E: Entity>(items: &[E]) {
        let ids: HashSet<EntityId> = items.iter().map(|i| i.id()).collect();
        assert_eq!(ids.len(), items.len(), "duplicate ids in {:?} seed", E::KIND);
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let seed = SeedData::generate(Utc::now());
        assert_unique_ids(&seed.users);
        assert_unique_ids(&seed.skills);
        assert_unique_ids(&seed.feedback);
        assert_unique_ids(&seed.announcements);
        assert_unique_ids(&seed.swaps);
        assert_unique_ids(&seed.groups);
        assert_unique_ids(&seed.reports);
    }

    #[test]
    fn test_seed_covers_every_state() {
        let seed = SeedData::generate(Utc::now());
        assert!(seed.users.iter().any(|u| u.is_banned));
        assert!(seed.users.iter().any(|u| !u.is_banned));
        assert!(seed.skills.iter().any(|s| s.status == SkillStatus::Pending));
        assert!(seed.groups.iter().any(|g| g.is_member));
        assert!(seed.groups.iter().any(|g| !g.is_member));
    }

    #[test]
    fn test_seed_is_relative_to_now() {
        let now = Utc::now();
        let seed = SeedData::generate(now);
        assert!(seed
            .skills
            .iter()
            .any(|s| DateRange::Today.matches(s.created_at, now)));
    }
}
