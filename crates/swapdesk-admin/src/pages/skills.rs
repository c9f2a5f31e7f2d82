//! Skill moderation page

use leptos::*;
use leptos_meta::Title;

use swapdesk_core::types::{format_date, skill_categories, Skill, SkillFilter, SkillStatus};
use swapdesk_core::Query;

use crate::app::AppContext;
use crate::components::{
    options_with_any, BadgeTone, FilterSelect, ListBody, PageHeader, RowActions, SearchInput,
    StatusBadge, Table, TableHeader,
};
use crate::hooks::{use_list_view, ListHandle};

fn status_tone(status: SkillStatus) -> BadgeTone {
    match status {
        SkillStatus::Pending => BadgeTone::Warning,
        SkillStatus::Approved => BadgeTone::Good,
        SkillStatus::Rejected => BadgeTone::Bad,
        SkillStatus::Unknown => BadgeTone::Neutral,
    }
}

#[component]
pub fn SkillsPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let list = use_list_view(ctx.backend.skills.clone());

    let search = create_rw_signal(String::new());
    let status = create_rw_signal(String::new());
    let category = create_rw_signal(String::new());

    let rows = Signal::derive(move || {
        let category = category.get();
        let filter = SkillFilter {
            status: SkillStatus::parse(&status.get()),
            category: (!category.is_empty()).then_some(category),
        };
        list.project(&Query::new(search.get(), filter))
    });

    let status_options = options_with_any("All statuses", &SkillStatus::ALL, |s| s.as_str(), |s| s.label());

    let pending = move || {
        list.items()
            .iter()
            .filter(|s| s.status == SkillStatus::Pending)
            .count()
    };

    view! {
        <Title text="Skills" />
        <div class="space-y-6">
            <PageHeader
                title="Skills"
                subtitle=Signal::derive(move || format!("{} skills, {} awaiting review", list.len(), pending()))
            />

            <div class="flex flex-wrap gap-3">
                <SearchInput value=search placeholder="Search by name, description or owner" />
                <FilterSelect value=status options=status_options />
                // Category options follow the loaded collection
                {move || {
                    let options = std::iter::once((String::new(), "All categories".to_string()))
                        .chain(skill_categories(&list.items()).into_iter().map(|c| (c.clone(), c)))
                        .collect::<Vec<_>>();
                    view! { <FilterSelect value=category options=options /> }
                }}
            </div>

            <Table>
                <TableHeader columns=vec!["Skill", "Category", "Owner", "Status", "Submitted", ""] />
                <ListBody
                    list=list
                    rows=rows
                    colspan=6
                    empty="No skills match the current filters"
                    row=move |skill| view! { <SkillRow list=list skill=skill /> }
                />
            </Table>
        </div>
    }
}

#[component]
fn SkillRow(list: ListHandle<Skill>, skill: Skill) -> impl IntoView {
    view! {
        <tr class="hover:bg-gray-800/50">
            <td class="px-4 py-4">
                <div class="text-white font-medium">{skill.display_name().to_string()}</div>
                <div class="text-sm text-gray-400 line-clamp-2">{skill.description.clone()}</div>
            </td>
            <td class="px-4 py-4 text-gray-300">{skill.display_category().to_string()}</td>
            <td class="px-4 py-4 text-gray-300">{skill.display_owner().to_string()}</td>
            <td class="px-4 py-4">
                <StatusBadge label=skill.status.label() tone=status_tone(skill.status) />
            </td>
            <td class="px-4 py-4 text-gray-400 text-sm">{format_date(skill.created_at)}</td>
            <td class="px-4 py-4">
                <RowActions list=list item=skill />
            </td>
        </tr>
    }
}
