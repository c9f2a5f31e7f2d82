//! Users management page

use leptos::*;
use leptos_meta::Title;

use swapdesk_core::types::{format_date, or_na, BanFilter, User, UserFilter};
use swapdesk_core::Query;

use crate::app::AppContext;
use crate::components::{
    BadgeTone, FilterSelect, ListBody, PageHeader, RowActions, SearchInput, StatusBadge, Table,
    TableHeader,
};
use crate::hooks::{use_list_view, ListHandle};

fn parse_visibility(s: &str) -> Option<bool> {
    match s {
        "public" => Some(true),
        "private" => Some(false),
        _ => None,
    }
}

#[component]
pub fn UsersPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let list = use_list_view(ctx.backend.users.clone());

    let search = create_rw_signal(String::new());
    let ban = create_rw_signal(String::new());
    let visibility = create_rw_signal(String::new());

    let rows = Signal::derive(move || {
        let filter = UserFilter {
            ban: BanFilter::parse(&ban.get()),
            public: parse_visibility(&visibility.get()),
        };
        list.project(&Query::new(search.get(), filter))
    });

    let ban_options = vec![
        (String::new(), "All users".to_string()),
        ("active".to_string(), "Active".to_string()),
        ("banned".to_string(), "Banned".to_string()),
    ];
    let visibility_options = vec![
        (String::new(), "Any visibility".to_string()),
        ("public".to_string(), "Public".to_string()),
        ("private".to_string(), "Private".to_string()),
    ];

    view! {
        <Title text="Users" />
        <div class="space-y-6">
            <PageHeader
                title="Users"
                subtitle=Signal::derive(move || format!("{} of {} members", rows.get().len(), list.len()))
            />

            <div class="flex flex-wrap gap-3">
                <SearchInput value=search placeholder="Search by name, email or location" />
                <FilterSelect value=ban options=ban_options />
                <FilterSelect value=visibility options=visibility_options />
            </div>

            <Table>
                <TableHeader columns=vec!["User", "Location", "Skills", "Rating", "Swaps", "Status", "Joined", ""] />
                <ListBody
                    list=list
                    rows=rows
                    colspan=8
                    empty="No users match the current filters"
                    row=move |user| view! { <UserRow list=list user=user /> }
                />
            </Table>
        </div>
    }
}

#[component]
fn UserRow(list: ListHandle<User>, user: User) -> impl IntoView {
    let (status, tone) = if user.is_banned {
        ("Banned", BadgeTone::Bad)
    } else {
        ("Active", BadgeTone::Good)
    };
    let offered = user.skills_offered.join(", ");
    let wanted = user.skills_wanted.join(", ");

    view! {
        <tr class="hover:bg-gray-800/50">
            <td class="px-4 py-4">
                <div class="flex items-center space-x-3">
                    <div class="w-9 h-9 bg-blue-600 rounded-full flex items-center justify-center text-sm font-medium text-white">
                        {user.initial()}
                    </div>
                    <div>
                        <div class="text-white font-medium">{user.display_name().to_string()}</div>
                        <div class="text-sm text-gray-400">{user.email.clone()}</div>
                    </div>
                </div>
            </td>
            <td class="px-4 py-4 text-gray-300">{or_na(user.location.as_deref()).to_string()}</td>
            <td class="px-4 py-4 text-sm">
                <div class="text-gray-300">"Offers: " {or_na(Some(offered.as_str())).to_string()}</div>
                <div class="text-gray-500">"Wants: " {or_na(Some(wanted.as_str())).to_string()}</div>
            </td>
            <td class="px-4 py-4 text-gray-300">{user.rating_text()}</td>
            <td class="px-4 py-4 text-gray-300">{user.swaps_completed}</td>
            <td class="px-4 py-4">
                <div class="flex items-center space-x-2">
                    <StatusBadge label=status tone=tone />
                    {(!user.is_public).then(|| view! { <StatusBadge label="Private" tone=BadgeTone::Neutral /> })}
                </div>
            </td>
            <td class="px-4 py-4 text-gray-400 text-sm">{format_date(user.created_at)}</td>
            <td class="px-4 py-4">
                <RowActions list=list item=user />
            </td>
        </tr>
    }
}
