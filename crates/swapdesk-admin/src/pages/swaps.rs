//! Swap monitoring page

use leptos::*;
use leptos_meta::Title;

use swapdesk_core::filter::DateRange;
use swapdesk_core::types::{format_date, Swap, SwapFilter, SwapStatus};
use swapdesk_core::Query;

use super::feedback::date_options;
use crate::app::AppContext;
use crate::components::{
    options_with_any, BadgeTone, FilterSelect, ListBody, PageHeader, RowActions, SearchInput,
    StatusBadge, Table, TableHeader,
};
use crate::hooks::{use_list_view, ListHandle};

fn status_tone(status: SwapStatus) -> BadgeTone {
    match status {
        SwapStatus::Pending => BadgeTone::Warning,
        SwapStatus::Active => BadgeTone::Info,
        SwapStatus::Completed => BadgeTone::Good,
        SwapStatus::Cancelled => BadgeTone::Bad,
        SwapStatus::Unknown => BadgeTone::Neutral,
    }
}

#[component]
pub fn SwapsPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let list = use_list_view(ctx.backend.swaps.clone());

    let search = create_rw_signal(String::new());
    let status = create_rw_signal(String::new());
    let date = create_rw_signal(DateRange::All.as_str().to_string());

    let rows = Signal::derive(move || {
        let filter = SwapFilter {
            status: SwapStatus::parse(&status.get()),
            date: DateRange::parse(&date.get()),
        };
        list.project(&Query::new(search.get(), filter))
    });

    let status_options = options_with_any("All statuses", &SwapStatus::ALL, |s| s.as_str(), |s| s.label());

    let open = move || list.items().iter().filter(|s| s.status.is_open()).count();

    view! {
        <Title text="Swaps" />
        <div class="space-y-6">
            <PageHeader
                title="Swaps"
                subtitle=Signal::derive(move || format!("{} swaps, {} open", list.len(), open()))
            />

            <div class="flex flex-wrap gap-3">
                <SearchInput value=search placeholder="Search by member or skill" />
                <FilterSelect value=status options=status_options />
                <FilterSelect value=date options=date_options() />
            </div>

            <Table>
                <TableHeader columns=vec!["Requester", "Provider", "Exchange", "Status", "Started", ""] />
                <ListBody
                    list=list
                    rows=rows
                    colspan=6
                    empty="No swaps match the current filters"
                    row=move |swap| view! { <SwapRow list=list swap=swap /> }
                />
            </Table>
        </div>
    }
}

#[component]
fn SwapRow(list: ListHandle<Swap>, swap: Swap) -> impl IntoView {
    view! {
        <tr class="hover:bg-gray-800/50">
            <td class="px-4 py-4 text-white">{swap.display_requester().to_string()}</td>
            <td class="px-4 py-4 text-white">{swap.display_provider().to_string()}</td>
            <td class="px-4 py-4 text-gray-300">{swap.exchange()}</td>
            <td class="px-4 py-4">
                <StatusBadge label=swap.status.label() tone=status_tone(swap.status) />
            </td>
            <td class="px-4 py-4 text-gray-400 text-sm">{format_date(swap.created_at)}</td>
            <td class="px-4 py-4">
                <RowActions list=list item=swap />
            </td>
        </tr>
    }
}
