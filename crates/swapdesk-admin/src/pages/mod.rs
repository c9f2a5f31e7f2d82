//! Page components

mod announcements;
mod dashboard;
mod feedback;
mod groups;
mod not_found;
mod reports;
mod skills;
mod swaps;
mod users;

pub use announcements::AnnouncementsPage;
pub use dashboard::DashboardPage;
pub use feedback::FeedbackPage;
pub use groups::GroupsPage;
pub use not_found::NotFoundPage;
pub use reports::ReportsPage;
pub use skills::SkillsPage;
pub use swaps::SwapsPage;
pub use users::UsersPage;
