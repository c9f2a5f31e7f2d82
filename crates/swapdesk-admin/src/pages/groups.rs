//! Community groups page

use leptos::*;
use leptos_meta::Title;

use swapdesk_core::filter::SizeBucket;
use swapdesk_core::types::{format_date, Group, GroupFilter};
use swapdesk_core::Query;

use crate::app::AppContext;
use crate::components::{
    BadgeTone, FilterSelect, ListBody, PageHeader, RowActions, SearchInput, StatusBadge, Table,
    TableHeader,
};
use crate::hooks::{use_list_view, ListHandle};

fn parse_membership(s: &str) -> Option<bool> {
    match s {
        "joined" => Some(true),
        "not_joined" => Some(false),
        _ => None,
    }
}

#[component]
pub fn GroupsPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let list = use_list_view(ctx.backend.groups.clone());

    let search = create_rw_signal(String::new());
    let size = create_rw_signal(SizeBucket::All.as_str().to_string());
    let membership = create_rw_signal(String::new());

    let rows = Signal::derive(move || {
        let filter = GroupFilter {
            size: SizeBucket::parse(&size.get()),
            membership: parse_membership(&membership.get()),
        };
        list.project(&Query::new(search.get(), filter))
    });

    let size_options = SizeBucket::ALL
        .iter()
        .map(|b| (b.as_str().to_string(), b.label().to_string()))
        .collect::<Vec<_>>();
    let membership_options = vec![
        (String::new(), "Any membership".to_string()),
        ("joined".to_string(), "Joined".to_string()),
        ("not_joined".to_string(), "Not joined".to_string()),
    ];

    let members = move || list.items().iter().map(|g| g.member_count as u64).sum::<u64>();

    view! {
        <Title text="Groups" />
        <div class="space-y-6">
            <PageHeader
                title="Groups"
                subtitle=Signal::derive(move || format!("{} groups, {} members in total", list.len(), members()))
            />

            <div class="flex flex-wrap gap-3">
                <SearchInput value=search placeholder="Search by name, description or category" />
                <FilterSelect value=size options=size_options />
                <FilterSelect value=membership options=membership_options />
            </div>

            <Table>
                <TableHeader columns=vec!["Group", "Category", "Owner", "Members", "Created", ""] />
                <ListBody
                    list=list
                    rows=rows
                    colspan=6
                    empty="No groups match the current filters"
                    row=move |group| view! { <GroupRow list=list group=group /> }
                />
            </Table>
        </div>
    }
}

#[component]
fn GroupRow(list: ListHandle<Group>, group: Group) -> impl IntoView {
    view! {
        <tr class="hover:bg-gray-800/50">
            <td class="px-4 py-4">
                <div class="flex items-center space-x-2">
                    <span class="text-white font-medium">{group.display_name().to_string()}</span>
                    {group.is_member.then(|| view! { <StatusBadge label="Member" tone=BadgeTone::Info /> })}
                </div>
                <div class="text-sm text-gray-400 line-clamp-2">{group.description.clone()}</div>
            </td>
            <td class="px-4 py-4 text-gray-300">{swapdesk_core::types::or_unknown(&group.category).to_string()}</td>
            <td class="px-4 py-4 text-gray-300">{swapdesk_core::types::or_unknown(&group.owner_name).to_string()}</td>
            <td class="px-4 py-4">
                <span class="text-white">{group.member_count}</span>
                <span class="ml-2 text-xs text-gray-500">{group.size_bucket().label()}</span>
            </td>
            <td class="px-4 py-4 text-gray-400 text-sm">{format_date(group.created_at)}</td>
            <td class="px-4 py-4">
                <RowActions list=list item=group />
            </td>
        </tr>
    }
}
