//! Reusable UI components

mod button;
mod controls;
mod header;
mod modal;
mod sidebar;
mod stats;
mod table;
mod toast;

pub use button::{ActionButton, Button, ButtonVariant};
pub use controls::{options_with_any, BadgeTone, FilterSelect, PageHeader, RowActions, SearchInput, StatusBadge};
pub use header::Header;
pub use modal::Modal;
pub use sidebar::Sidebar;
pub use stats::{Accent, StatCard, StatIcon};
pub use table::{ListBody, Table, TableEmpty, TableHeader, TableSkeleton};
pub use toast::ToastHost;
