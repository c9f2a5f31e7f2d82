//! Landing-page counters

use serde::{Deserialize, Serialize};

use crate::types::{Feedback, FeedbackStatus, Group, Skill, SkillStatus, Swap, SwapStatus, User};

/// Totals plus the numbers that need an administrator's attention
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_users: usize,
    pub banned_users: usize,
    pub total_skills: usize,
    pub pending_skills: usize,
    pub total_feedback: usize,
    pub open_feedback: usize,
    pub total_swaps: usize,
    pub active_swaps: usize,
    pub completed_swaps: usize,
    pub total_groups: usize,
    pub group_members: u64,
}

impl DashboardStats {
    pub fn compute(
        users: &[User],
        skills: &[Skill],
        feedback: &[Feedback],
        swaps: &[Swap],
        groups: &[Group],
    ) -> Self {
        Self {
            total_users: users.len(),
            banned_users: users.iter().filter(|u| u.is_banned).count(),
            total_skills: skills.len(),
            pending_skills: skills
                .iter()
                .filter(|s| s.status == SkillStatus::Pending)
                .count(),
            total_feedback: feedback.len(),
            open_feedback: feedback
                .iter()
                .filter(|f| f.status == FeedbackStatus::Pending)
                .count(),
            total_swaps: swaps.len(),
            active_swaps: swaps.iter().filter(|s| s.status.is_open()).count(),
            completed_swaps: swaps
                .iter()
                .filter(|s| s.status == SwapStatus::Completed)
                .count(),
            total_groups: groups.len(),
            group_members: groups.iter().map(|g| u64::from(g.member_count)).sum(),
        }
    }

    /// Items waiting on a moderator
    pub fn needs_attention(&self) -> usize {
        self.pending_skills + self.open_feedback
    }

    /// Share of swaps that completed, as a whole percentage
    pub fn completion_rate(&self) -> u8 {
        if self.total_swaps == 0 {
            return 0;
        }
        ((self.completed_swaps * 100) / self.total_swaps) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;
    use chrono::Utc;

    #[test]
    fn test_empty() {
        let stats = DashboardStats::compute(&[], &[], &[], &[], &[]);
        assert_eq!(stats, DashboardStats::default());
        assert_eq!(stats.completion_rate(), 0);
    }

    #[test]
    fn test_seed_counts() {
        let seed = SeedData::generate(Utc::now());
        let stats = DashboardStats::compute(
            &seed.users,
            &seed.skills,
            &seed.feedback,
            &seed.swaps,
            &seed.groups,
        );
        assert_eq!(stats.total_users, 6);
        assert_eq!(stats.banned_users, 2);
        assert_eq!(stats.pending_skills, 3);
        assert_eq!(stats.open_feedback, 2);
        assert_eq!(stats.active_swaps, 3);
        assert_eq!(stats.completion_rate(), 20);
        assert_eq!(stats.group_members, 92);
        assert_eq!(stats.needs_attention(), 5);
    }
}
