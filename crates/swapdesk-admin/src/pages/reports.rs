//! Generated reports page

use leptos::*;
use leptos_meta::Title;

use swapdesk_core::filter::DateRange;
use swapdesk_core::types::{
    format_date, or_unknown, Report, ReportDraft, ReportFilter, ReportKind, ReportStatus,
};
use swapdesk_core::Query;

use super::feedback::date_options;
use crate::app::AppContext;
use crate::components::{
    options_with_any, BadgeTone, Button, ButtonVariant, FilterSelect, ListBody, Modal, PageHeader,
    RowActions, SearchInput, StatusBadge, Table, TableHeader,
};
use crate::hooks::{use_list_view, ListHandle};

fn status_tone(status: ReportStatus) -> BadgeTone {
    match status {
        ReportStatus::Pending => BadgeTone::Warning,
        ReportStatus::Completed => BadgeTone::Good,
        ReportStatus::Failed => BadgeTone::Bad,
        ReportStatus::Unknown => BadgeTone::Neutral,
    }
}

#[component]
pub fn ReportsPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let list = use_list_view(ctx.backend.reports.clone());
    let show_generate = create_rw_signal(false);

    let search = create_rw_signal(String::new());
    let kind = create_rw_signal(String::new());
    let status = create_rw_signal(String::new());
    let date = create_rw_signal(DateRange::All.as_str().to_string());

    let rows = Signal::derive(move || {
        let filter = ReportFilter {
            kind: ReportKind::parse(&kind.get()),
            status: ReportStatus::parse(&status.get()),
            date: DateRange::parse(&date.get()),
        };
        list.project(&Query::new(search.get(), filter))
    });

    let kind_options = options_with_any("All types", &ReportKind::ALL, |k| k.as_str(), |k| k.label());
    let status_options = options_with_any("All statuses", &ReportStatus::ALL, |s| s.as_str(), |s| s.label());

    view! {
        <Title text="Reports" />
        <div class="space-y-6">
            <PageHeader
                title="Reports"
                subtitle=Signal::derive(move || format!("{} reports", list.len()))
            >
                <Button on_click=Callback::new(move |_| show_generate.set(true))>
                    <svg class="w-5 h-5 mr-2" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M12 4v16m8-8H4" />
                    </svg>
                    "Generate Report"
                </Button>
            </PageHeader>

            <div class="flex flex-wrap gap-3">
                <SearchInput value=search placeholder="Search by title or author" />
                <FilterSelect value=kind options=kind_options />
                <FilterSelect value=status options=status_options />
                <FilterSelect value=date options=date_options() />
            </div>

            <Table>
                <TableHeader columns=vec!["Report", "Type", "Period", "Status", "Size", "Created", ""] />
                <ListBody
                    list=list
                    rows=rows
                    colspan=7
                    empty="No reports match the current filters"
                    row=move |report| view! { <ReportRow list=list report=report /> }
                />
            </Table>
        </div>

        <GenerateModal list=list show=show_generate />
    }
}

#[component]
fn ReportRow(list: ListHandle<Report>, report: Report) -> impl IntoView {
    view! {
        <tr class="hover:bg-gray-800/50">
            <td class="px-4 py-4">
                <div class="text-white font-medium">{or_unknown(&report.title).to_string()}</div>
                <div class="text-sm text-gray-400">{or_unknown(&report.generated_by).to_string()}</div>
            </td>
            <td class="px-4 py-4 text-gray-300">{report.kind.label()}</td>
            <td class="px-4 py-4 text-gray-300">{report.range.label()}</td>
            <td class="px-4 py-4">
                <StatusBadge label=report.status.label() tone=status_tone(report.status) />
            </td>
            <td class="px-4 py-4 text-gray-300">{report.display_size()}</td>
            <td class="px-4 py-4 text-gray-400 text-sm">{format_date(report.created_at)}</td>
            <td class="px-4 py-4">
                <RowActions list=list item=report />
            </td>
        </tr>
    }
}

#[component]
fn GenerateModal(list: ListHandle<Report>, show: RwSignal<bool>) -> impl IntoView {
    let kind = create_rw_signal(ReportKind::UserActivity.as_str().to_string());
    let range = create_rw_signal(DateRange::Month.as_str().to_string());
    let title = create_rw_signal(String::new());
    let error = create_rw_signal(Option::<String>::None);

    let creating = Signal::derive(move || list.is_creating());
    let close = Callback::new(move |_| {
        show.set(false);
        error.set(None);
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let mut draft = ReportDraft::new(
            ReportKind::parse(&kind.get_untracked()).unwrap_or(ReportKind::Other),
            DateRange::parse(&range.get_untracked()),
        );
        let custom = title.get_untracked();
        if !custom.trim().is_empty() {
            draft = draft.with_title(custom.trim());
        }
        if let Err(e) = draft.validate() {
            error.set(Some(e.user_message()));
            return;
        }
        error.set(None);
        list.create(draft, move |_| {
            title.set(String::new());
            show.set(false);
        });
    };

    let kind_options = ReportKind::ALL
        .iter()
        .map(|k| (k.as_str().to_string(), k.label().to_string()))
        .collect::<Vec<_>>();

    view! {
        <Modal title="Generate Report" show=show on_close=close locked=creating>
            <form on:submit=on_submit class="space-y-4">
                {move || error.get().map(|e| view! {
                    <div class="bg-red-900/50 border border-red-500 text-red-200 px-4 py-3 rounded">{e}</div>
                })}

                <div>
                    <label class="block text-sm font-medium text-gray-300 mb-2">"Type"</label>
                    <FilterSelect value=kind options=kind_options.clone() />
                </div>

                <div>
                    <label class="block text-sm font-medium text-gray-300 mb-2">"Period"</label>
                    <FilterSelect value=range options=date_options() />
                </div>

                <div>
                    <label class="block text-sm font-medium text-gray-300 mb-2">"Title (optional)"</label>
                    <input
                        type="text"
                        class="w-full px-4 py-2 bg-gray-700 border border-gray-600 rounded-lg text-white focus:outline-none focus:border-blue-500"
                        placeholder="Defaults to type and period"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                </div>

                <div class="flex justify-end space-x-3 pt-2">
                    <Button variant=ButtonVariant::Secondary disabled=creating on_click=close>"Cancel"</Button>
                    <Button submit=true loading=creating>"Generate"</Button>
                </div>
            </form>
        </Modal>
    }
}
