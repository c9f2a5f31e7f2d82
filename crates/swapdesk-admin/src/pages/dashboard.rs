//! Dashboard page with overview statistics

use leptos::*;
use leptos_meta::Title;

use swapdesk_core::{DashboardStats, RemoteCollection, Result};

use crate::api::Backend;
use crate::app::AppContext;
use crate::components::{Accent, Button, ButtonVariant, PageHeader, StatCard, StatIcon};

async fn fetch_stats(backend: Backend) -> Result<DashboardStats> {
    let users = backend.users.list().await?.into_items();
    let skills = backend.skills.list().await?.into_items();
    let feedback = backend.feedback.list().await?.into_items();
    let swaps = backend.swaps.list().await?.into_items();
    let groups = backend.groups.list().await?.into_items();
    Ok(DashboardStats::compute(&users, &skills, &feedback, &swaps, &groups))
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let (refresh, set_refresh) = create_signal(0u32);

    let backend = ctx.backend.clone();
    let stats = create_local_resource(
        move || refresh.get(),
        move |_| {
            let backend = backend.clone();
            async move {
                fetch_stats(backend).await.map_err(|e| {
                    log::warn!("Failed to load dashboard stats: {}", e);
                    e.user_message()
                })
            }
        },
    );

    view! {
        <Title text="Dashboard" />
        <div class="space-y-6">
            <PageHeader title="Dashboard" subtitle="Overview of the skill-swap community".to_string()>
                <Button
                    variant=ButtonVariant::Secondary
                    loading=stats.loading()
                    on_click=Callback::new(move |_| set_refresh.update(|r| *r += 1))
                >
                    "Refresh"
                </Button>
            </PageHeader>

            <Suspense fallback=move || view! { <StatsSkeleton /> }>
                {move || stats.get().map(|result| match result {
                    Ok(s) => view! { <StatsGrid stats=s /> }.into_view(),
                    Err(message) => view! {
                        <div class="bg-red-900/50 border border-red-500 text-red-200 px-4 py-3 rounded">
                            "Failed to load dashboard stats: " {message}
                        </div>
                    }.into_view(),
                })}
            </Suspense>
        </div>
    }
}

#[component]
fn StatsGrid(stats: DashboardStats) -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6">
            <StatCard
                title="Members"
                value=stats.total_users
                detail=format!("{} banned", stats.banned_users)
                icon=StatIcon::Members
            />
            <StatCard
                title="Skills"
                value=stats.total_skills
                detail=format!("{} awaiting review", stats.pending_skills)
                icon=StatIcon::Skill
                accent=Accent::Purple
            />
            <StatCard
                title="Feedback"
                value=stats.total_feedback
                detail=format!("{} unresolved", stats.open_feedback)
                icon=StatIcon::Feedback
                accent=Accent::Orange
            />
            <StatCard
                title="Swaps"
                value=stats.total_swaps
                detail=format!("{} open, {}% completed", stats.active_swaps, stats.completion_rate())
                icon=StatIcon::Swap
                accent=Accent::Green
            />
        </div>

        <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
            <div class="bg-gray-900 rounded-xl border border-gray-700 p-6">
                <h2 class="text-lg font-semibold text-white mb-4">"Needs Attention"</h2>
                {if stats.needs_attention() == 0 {
                    view! { <p class="text-gray-400">"Nothing is waiting on a moderator."</p> }.into_view()
                } else {
                    view! {
                        <div class="space-y-3">
                            <AttentionLink href="/skills" label="Skills to review" count=stats.pending_skills />
                            <AttentionLink href="/feedback" label="Feedback to resolve" count=stats.open_feedback />
                        </div>
                    }.into_view()
                }}
            </div>

            <div class="grid grid-cols-2 gap-6">
                <StatCard
                    title="Groups"
                    value=stats.total_groups
                    detail=format!("{} members", stats.group_members)
                    icon=StatIcon::Members
                />
                <StatCard
                    title="Completed Swaps"
                    value=stats.completed_swaps
                    icon=StatIcon::Completed
                    accent=Accent::Green
                />
            </div>
        </div>
    }
}

#[component]
fn AttentionLink(href: &'static str, label: &'static str, count: usize) -> impl IntoView {
    view! {
        <a
            href=href
            class="flex items-center justify-between p-3 bg-gray-800 rounded-lg hover:bg-gray-700 transition-colors"
        >
            <span class="text-gray-300">{label}</span>
            <span class="px-2 py-1 text-xs rounded-full bg-yellow-900/50 text-yellow-300">{count}</span>
        </a>
    }
}

#[component]
fn StatsSkeleton() -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6">
            {(0..4).map(|_| view! {
                <div class="bg-gray-900 rounded-xl p-6 border border-gray-700 animate-pulse">
                    <div class="h-4 bg-gray-700 rounded w-1/2 mb-4"></div>
                    <div class="h-8 bg-gray-700 rounded w-1/3"></div>
                </div>
            }).collect_view()}
        </div>
    }
}
