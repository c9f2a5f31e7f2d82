//! Table building blocks shared by the list pages

use leptos::*;

use swapdesk_core::Entity;

use crate::app::AppContext;
use crate::hooks::ListHandle;

#[component]
pub fn TableHeader(columns: Vec<&'static str>) -> impl IntoView {
    view! {
        <thead>
            <tr class="border-b border-gray-700">
                {columns.into_iter().map(|col| view! {
                    <th class="px-4 py-3 text-left text-xs font-medium text-gray-400 uppercase tracking-wider">
                        {col}
                    </th>
                }).collect_view()}
            </tr>
        </thead>
    }
}

/// Row shown when a list (or its filtered projection) is empty
#[component]
pub fn TableEmpty(#[prop(into)] message: String, colspan: usize) -> impl IntoView {
    view! {
        <tr>
            <td colspan=colspan.to_string() class="px-4 py-8 text-center text-gray-400">
                {message}
            </td>
        </tr>
    }
}

/// Placeholder rows while a load is outstanding
#[component]
pub fn TableSkeleton(rows: usize, colspan: usize) -> impl IntoView {
    view! {
        {(0..rows).map(|_| view! {
            <tr class="border-b border-gray-700/50 animate-pulse">
                {(0..colspan).map(|_| view! {
                    <td class="px-4 py-4">
                        <div class="h-4 bg-gray-700 rounded w-3/4"></div>
                    </td>
                }).collect_view()}
            </tr>
        }).collect_view()}
    }
}

#[component]
pub fn Table(children: Children) -> impl IntoView {
    view! {
        <div class="bg-gray-900 rounded-xl border border-gray-700 overflow-x-auto">
            <table class="w-full">
                {children()}
            </table>
        </div>
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyState {
    Skeleton,
    Empty,
    Rows,
}

/// A reload hides rows that are already shown.
fn body_state(loading: bool, visible: usize) -> BodyState {
    if loading {
        BodyState::Skeleton
    } else if visible == 0 {
        BodyState::Empty
    } else {
        BodyState::Rows
    }
}

/// Table body for a list view: skeleton rows while any load is outstanding
/// (reloads included), an empty state when the projection is empty, otherwise
/// one `row` per record.
#[component]
pub fn ListBody<E, F, IV>(
    list: ListHandle<E>,
    #[prop(into)] rows: Signal<Vec<E>>,
    colspan: usize,
    empty: &'static str,
    row: F,
) -> impl IntoView
where
    E: Entity,
    F: Fn(E) -> IV + 'static,
    IV: IntoView,
{
    let skeleton_rows = expect_context::<AppContext>().config.ui.skeleton_rows;

    view! {
        <tbody class="divide-y divide-gray-700/50">
            {move || {
                let rows = rows.get();
                match body_state(list.is_loading(), rows.len()) {
                    BodyState::Skeleton => view! { <TableSkeleton rows=skeleton_rows colspan=colspan /> }.into_view(),
                    BodyState::Empty => view! { <TableEmpty message=empty colspan=colspan /> }.into_view(),
                    BodyState::Rows => rows.into_iter().map(&row).collect_view(),
                }
            }}
        </tbody>
    }
}
