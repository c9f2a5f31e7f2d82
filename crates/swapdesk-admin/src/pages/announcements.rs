//! Announcements page with the compose dialog

use leptos::*;
use leptos_meta::Title;

use swapdesk_core::filter::DateRange;
use swapdesk_core::types::{
    format_date, or_unknown, Announcement, AnnouncementDraft, AnnouncementFilter,
    AnnouncementStatus, Audience,
};
use swapdesk_core::Query;

use super::feedback::date_options;
use crate::app::AppContext;
use crate::components::{
    options_with_any, BadgeTone, Button, ButtonVariant, FilterSelect, ListBody, Modal, PageHeader,
    RowActions, SearchInput, StatusBadge, Table, TableHeader,
};
use crate::hooks::{use_list_view, ListHandle};

#[component]
pub fn AnnouncementsPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let list = use_list_view(ctx.backend.announcements.clone());
    let show_compose = create_rw_signal(false);

    let search = create_rw_signal(String::new());
    let status = create_rw_signal(String::new());
    let audience = create_rw_signal(String::new());
    let date = create_rw_signal(DateRange::All.as_str().to_string());

    let rows = Signal::derive(move || {
        let filter = AnnouncementFilter {
            status: AnnouncementStatus::parse(&status.get()),
            audience: Audience::parse(&audience.get()),
            date: DateRange::parse(&date.get()),
        };
        list.project(&Query::new(search.get(), filter))
    });

    let status_options = options_with_any("All statuses", &AnnouncementStatus::ALL, |s| s.as_str(), |s| s.label());
    let audience_options = options_with_any("Any audience", &Audience::ALL, |a| a.as_str(), |a| a.label());

    view! {
        <Title text="Announcements" />
        <div class="space-y-6">
            <PageHeader
                title="Announcements"
                subtitle=Signal::derive(move || format!("{} announcements", list.len()))
            >
                <Button on_click=Callback::new(move |_| show_compose.set(true))>
                    <svg class="w-5 h-5 mr-2" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M12 4v16m8-8H4" />
                    </svg>
                    "New Announcement"
                </Button>
            </PageHeader>

            <div class="flex flex-wrap gap-3">
                <SearchInput value=search placeholder="Search by title, message or author" />
                <FilterSelect value=status options=status_options />
                <FilterSelect value=audience options=audience_options />
                <FilterSelect value=date options=date_options() />
            </div>

            <Table>
                <TableHeader columns=vec!["Announcement", "Audience", "Author", "Status", "Posted", ""] />
                <ListBody
                    list=list
                    rows=rows
                    colspan=6
                    empty="No announcements match the current filters"
                    row=move |item| view! { <AnnouncementRow list=list item=item /> }
                />
            </Table>
        </div>

        <ComposeModal list=list show=show_compose />
    }
}

#[component]
fn AnnouncementRow(list: ListHandle<Announcement>, item: Announcement) -> impl IntoView {
    let tone = match item.status {
        AnnouncementStatus::Active => BadgeTone::Good,
        _ => BadgeTone::Neutral,
    };

    view! {
        <tr class="hover:bg-gray-800/50 align-top">
            <td class="px-4 py-4 max-w-lg">
                <div class="text-white font-medium">{or_unknown(&item.title).to_string()}</div>
                <div class="text-sm text-gray-400 whitespace-pre-line line-clamp-3">{item.message.clone()}</div>
            </td>
            <td class="px-4 py-4 text-gray-300">{item.audience.label()}</td>
            <td class="px-4 py-4 text-gray-300">{or_unknown(&item.author).to_string()}</td>
            <td class="px-4 py-4">
                <StatusBadge label=item.status.label() tone=tone />
            </td>
            <td class="px-4 py-4 text-gray-400 text-sm">{format_date(item.created_at)}</td>
            <td class="px-4 py-4">
                <RowActions list=list item=item />
            </td>
        </tr>
    }
}

/// Compose dialog. Stays open with the typed text if the server refuses.
#[component]
fn ComposeModal(list: ListHandle<Announcement>, show: RwSignal<bool>) -> impl IntoView {
    let title = create_rw_signal(String::new());
    let message = create_rw_signal(String::new());
    let audience = create_rw_signal(Audience::All.as_str().to_string());
    let error = create_rw_signal(Option::<String>::None);

    let creating = Signal::derive(move || list.is_creating());
    let close = Callback::new(move |_| {
        show.set(false);
        error.set(None);
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = AnnouncementDraft::new(
            title.get_untracked().trim(),
            message.get_untracked(),
            Audience::parse(&audience.get_untracked()).unwrap_or_default(),
        );
        if let Err(e) = draft.validate() {
            error.set(Some(e.user_message()));
            return;
        }
        error.set(None);
        list.create(draft, move |_| {
            title.set(String::new());
            message.set(String::new());
            show.set(false);
        });
    };

    let audience_options = Audience::ALL
        .iter()
        .map(|a| (a.as_str().to_string(), a.label().to_string()))
        .collect::<Vec<_>>();

    view! {
        <Modal title="New Announcement" show=show on_close=close locked=creating wide=true>
            <form on:submit=on_submit class="space-y-4">
                {move || error.get().map(|e| view! {
                    <div class="bg-red-900/50 border border-red-500 text-red-200 px-4 py-3 rounded">{e}</div>
                })}

                <div>
                    <label class="block text-sm font-medium text-gray-300 mb-2">"Title"</label>
                    <input
                        type="text"
                        class="w-full px-4 py-2 bg-gray-700 border border-gray-600 rounded-lg text-white focus:outline-none focus:border-blue-500"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                </div>

                <div>
                    <label class="block text-sm font-medium text-gray-300 mb-2">"Message"</label>
                    <textarea
                        rows="5"
                        class="w-full px-4 py-2 bg-gray-700 border border-gray-600 rounded-lg text-white focus:outline-none focus:border-blue-500"
                        prop:value=move || message.get()
                        on:input=move |ev| message.set(event_target_value(&ev))
                    ></textarea>
                </div>

                <div>
                    <label class="block text-sm font-medium text-gray-300 mb-2">"Audience"</label>
                    <FilterSelect value=audience options=audience_options.clone() />
                </div>

                <div class="flex justify-end space-x-3 pt-2">
                    <Button variant=ButtonVariant::Secondary disabled=creating on_click=close>"Cancel"</Button>
                    <Button submit=true loading=creating>"Publish"</Button>
                </div>
            </form>
        </Modal>
    }
}
