//! Overview counter tiles

use leptos::*;

/// Tint behind a tile's icon
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Accent {
    #[default]
    Blue,
    Green,
    Purple,
    Orange,
}

impl Accent {
    fn class(&self) -> &'static str {
        match self {
            Self::Blue => "bg-blue-600/20 text-blue-300",
            Self::Green => "bg-green-600/20 text-green-300",
            Self::Purple => "bg-purple-600/20 text-purple-300",
            Self::Orange => "bg-orange-600/20 text-orange-300",
        }
    }
}

/// Heroicons outline paths for the record kinds shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatIcon {
    Members,
    Skill,
    Feedback,
    Swap,
    Completed,
}

impl StatIcon {
    fn path(&self) -> &'static str {
        match self {
            Self::Members => "M12 4.354a4 4 0 110 5.292M15 21H3v-1a6 6 0 0112 0v1zm0 0h6v-1a6 6 0 00-9-5.197M13 7a4 4 0 11-8 0 4 4 0 018 0z",
            Self::Skill => "M9.663 17h4.673M12 3v1m6.364 1.636l-.707.707M21 12h-1M4 12H3m3.343-5.657l-.707-.707m2.828 9.9a5 5 0 117.072 0l-.548.547A3.374 3.374 0 0014 18.469V19a2 2 0 11-4 0v-.531c0-.895-.356-1.754-.988-2.386l-.548-.547z",
            Self::Feedback => "M8 10h.01M12 10h.01M16 10h.01M9 16H5a2 2 0 01-2-2V6a2 2 0 012-2h14a2 2 0 012 2v8a2 2 0 01-2 2h-5l-5 5v-5z",
            Self::Swap => "M8 7h12m0 0l-4-4m4 4l-4 4m0 6H4m0 0l4 4m-4-4l4-4",
            Self::Completed => "M9 12l2 2 4-4m6 2a9 9 0 11-18 0 9 9 0 0118 0z",
        }
    }
}

/// One counter with an optional breakdown line, e.g. "3 awaiting review"
#[component]
pub fn StatCard(
    title: &'static str,
    value: usize,
    icon: StatIcon,
    #[prop(optional)] accent: Accent,
    #[prop(optional, into)] detail: Option<String>,
) -> impl IntoView {
    view! {
        <div class="flex items-center gap-4 bg-gray-900 rounded-xl p-5 border border-gray-700">
            <span class=format!("shrink-0 w-11 h-11 rounded-full flex items-center justify-center {}", accent.class())>
                <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d=icon.path() />
                </svg>
            </span>
            <dl class="min-w-0">
                <dt class="text-xs uppercase tracking-wide text-gray-400">{title}</dt>
                <dd class="text-2xl font-semibold text-white">{value}</dd>
                {detail.map(|d| view! { <dd class="text-xs text-gray-500 truncate">{d}</dd> })}
            </dl>
        </div>
    }
}
