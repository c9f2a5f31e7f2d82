//! Sidebar navigation component

use leptos::*;
use leptos_router::use_location;

struct NavEntry {
    href: &'static str,
    label: &'static str,
    icon: &'static str,
}

const NAV: &[NavEntry] = &[
    NavEntry {
        href: "/",
        label: "Dashboard",
        icon: "M4 6a2 2 0 012-2h2a2 2 0 012 2v2a2 2 0 01-2 2H6a2 2 0 01-2-2V6zM14 6a2 2 0 012-2h2a2 2 0 012 2v2a2 2 0 01-2 2h-2a2 2 0 01-2-2V6zM4 16a2 2 0 012-2h2a2 2 0 012 2v2a2 2 0 01-2 2H6a2 2 0 01-2-2v-2zM14 16a2 2 0 012-2h2a2 2 0 012 2v2a2 2 0 01-2 2h-2a2 2 0 01-2-2v-2z",
    },
    NavEntry {
        href: "/users",
        label: "Users",
        icon: "M12 4.354a4 4 0 110 5.292M15 21H3v-1a6 6 0 0112 0v1zm0 0h6v-1a6 6 0 00-9-5.197M13 7a4 4 0 11-8 0 4 4 0 018 0z",
    },
    NavEntry {
        href: "/skills",
        label: "Skills",
        icon: "M9.663 17h4.673M12 3v1m6.364 1.636l-.707.707M21 12h-1M4 12H3m3.343-5.657l-.707-.707m2.828 9.9a5 5 0 117.072 0l-.548.547A3.374 3.374 0 0014 18.469V19a2 2 0 11-4 0v-.531c0-.895-.356-1.754-.988-2.386l-.548-.547z",
    },
    NavEntry {
        href: "/feedback",
        label: "Feedback",
        icon: "M8 10h.01M12 10h.01M16 10h.01M9 16H5a2 2 0 01-2-2V6a2 2 0 012-2h14a2 2 0 012 2v8a2 2 0 01-2 2h-5l-5 5v-5z",
    },
    NavEntry {
        href: "/announcements",
        label: "Announcements",
        icon: "M11 5.882V19.24a1.76 1.76 0 01-3.417.592l-2.147-6.15M18 13a3 3 0 100-6M5.436 13.683A4.001 4.001 0 017 6h1.832c4.1 0 7.625-1.234 9.168-3v14c-1.543-1.766-5.067-3-9.168-3H7a3.988 3.988 0 01-1.564-.317z",
    },
    NavEntry {
        href: "/swaps",
        label: "Swaps",
        icon: "M8 7h12m0 0l-4-4m4 4l-4 4m0 6H4m0 0l4 4m-4-4l4-4",
    },
    NavEntry {
        href: "/groups",
        label: "Groups",
        icon: "M17 20h5v-2a3 3 0 00-5.356-1.857M17 20H7m10 0v-2c0-.656-.126-1.283-.356-1.857M7 20H2v-2a3 3 0 015.356-1.857M7 20v-2c0-.656.126-1.283.356-1.857m0 0a5.002 5.002 0 019.288 0M15 7a3 3 0 11-6 0 3 3 0 016 0z",
    },
    NavEntry {
        href: "/reports",
        label: "Reports",
        icon: "M9 17v-2m3 2v-4m3 4v-6m2 10H7a2 2 0 01-2-2V5a2 2 0 012-2h5.586a1 1 0 01.707.293l5.414 5.414a1 1 0 01.293.707V19a2 2 0 01-2 2z",
    },
];

fn is_active(current: &str, href: &str) -> bool {
    if href == "/" {
        current == "/"
    } else {
        current.starts_with(href)
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let location = use_location();

    view! {
        <aside class="w-64 bg-gray-900 border-r border-gray-700 flex flex-col">
            // Logo
            <div class="h-16 flex items-center px-6 border-b border-gray-700">
                <a href="/" class="flex items-center space-x-3">
                    <svg class="w-8 h-8 text-blue-500" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2"
                            d="M8 7h12m0 0l-4-4m4 4l-4 4m0 6H4m0 0l4 4m-4-4l4-4" />
                    </svg>
                    <span class="text-xl font-bold text-white">"SwapDesk"</span>
                </a>
            </div>

            // Navigation
            <nav class="flex-1 px-4 py-6 space-y-2">
                {NAV.iter().map(|entry| {
                    let href = entry.href;
                    let active = Signal::derive(move || is_active(&location.pathname.get(), href));
                    view! { <NavItem href=href icon=entry.icon label=entry.label active=active /> }
                }).collect_view()}
            </nav>

            // Version info
            <div class="px-6 py-4 border-t border-gray-700">
                <div class="text-xs text-gray-500">
                    <div>{format!("SwapDesk v{}", swapdesk_core::VERSION)}</div>
                    <div class="mt-1">"Admin console"</div>
                </div>
            </div>
        </aside>
    }
}

#[component]
fn NavItem(
    href: &'static str,
    icon: &'static str,
    label: &'static str,
    active: Signal<bool>,
) -> impl IntoView {
    view! {
        <a
            href=href
            class=move || {
                let base = "flex items-center px-4 py-3 rounded-lg transition-colors";
                if active.get() {
                    format!("{} bg-blue-600 text-white", base)
                } else {
                    format!("{} text-gray-400 hover:bg-gray-800 hover:text-white", base)
                }
            }
        >
            <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d=icon />
            </svg>
            <span class="ml-3">{label}</span>
        </a>
    }
}
