//! Feedback inbox page

use leptos::*;
use leptos_meta::Title;

use swapdesk_core::filter::DateRange;
use swapdesk_core::types::{format_date, Feedback, FeedbackFilter, FeedbackStatus};
use swapdesk_core::Query;

use crate::app::AppContext;
use crate::components::{
    options_with_any, BadgeTone, FilterSelect, ListBody, PageHeader, RowActions, SearchInput,
    StatusBadge, Table, TableHeader,
};
use crate::hooks::{use_list_view, ListHandle};

fn status_tone(status: FeedbackStatus) -> BadgeTone {
    match status {
        FeedbackStatus::Pending => BadgeTone::Warning,
        FeedbackStatus::Resolved => BadgeTone::Good,
        FeedbackStatus::Archived | FeedbackStatus::Unknown => BadgeTone::Neutral,
    }
}

pub(crate) fn date_options() -> Vec<(String, String)> {
    DateRange::ALL
        .iter()
        .map(|d| (d.as_str().to_string(), d.label().to_string()))
        .collect()
}

#[component]
pub fn FeedbackPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let list = use_list_view(ctx.backend.feedback.clone());

    let search = create_rw_signal(String::new());
    let status = create_rw_signal(String::new());
    let date = create_rw_signal(DateRange::All.as_str().to_string());

    let rows = Signal::derive(move || {
        let filter = FeedbackFilter {
            status: FeedbackStatus::parse(&status.get()),
            date: DateRange::parse(&date.get()),
        };
        list.project(&Query::new(search.get(), filter))
    });

    let status_options = options_with_any("All statuses", &FeedbackStatus::ALL, |s| s.as_str(), |s| s.label());

    view! {
        <Title text="Feedback" />
        <div class="space-y-6">
            <PageHeader
                title="Feedback"
                subtitle=Signal::derive(move || format!("{} messages from members", list.len()))
            />

            <div class="flex flex-wrap gap-3">
                <SearchInput value=search placeholder="Search by subject, message or author" />
                <FilterSelect value=status options=status_options />
                <FilterSelect value=date options=date_options() />
            </div>

            <Table>
                <TableHeader columns=vec!["From", "Subject", "Rating", "Status", "Received", ""] />
                <ListBody
                    list=list
                    rows=rows
                    colspan=6
                    empty="No feedback matches the current filters"
                    row=move |item| view! { <FeedbackRow list=list item=item /> }
                />
            </Table>
        </div>
    }
}

#[component]
fn FeedbackRow(list: ListHandle<Feedback>, item: Feedback) -> impl IntoView {
    view! {
        <tr class="hover:bg-gray-800/50 align-top">
            <td class="px-4 py-4">
                <div class="text-white">{item.display_author().to_string()}</div>
                <div class="text-sm text-gray-400">{item.user_email.clone()}</div>
            </td>
            <td class="px-4 py-4 max-w-md">
                <div class="text-white font-medium">{item.subject.clone()}</div>
                <div class="text-sm text-gray-400 line-clamp-2">{item.message.clone()}</div>
            </td>
            <td class="px-4 py-4 text-yellow-400">{item.stars()}</td>
            <td class="px-4 py-4">
                <StatusBadge label=item.status.label() tone=status_tone(item.status) />
            </td>
            <td class="px-4 py-4 text-gray-400 text-sm">{format_date(item.created_at)}</td>
            <td class="px-4 py-4">
                <RowActions list=list item=item />
            </td>
        </tr>
    }
}
