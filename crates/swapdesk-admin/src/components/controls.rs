//! Page chrome and list controls: headers, search, filters, badges, row actions

use leptos::*;

use swapdesk_core::{Action, Entity};

use super::button::ActionButton;
use crate::hooks::ListHandle;

#[component]
pub fn PageHeader(
    title: &'static str,
    #[prop(into)] subtitle: MaybeSignal<String>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between mb-6">
            <div>
                <h1 class="text-2xl font-bold text-white">{title}</h1>
                <p class="text-gray-400 mt-1">{move || subtitle.get()}</p>
            </div>
            <div class="flex items-center space-x-3">
                {children.map(|c| c())}
            </div>
        </div>
    }
}

/// Text box bound to a search term
#[component]
pub fn SearchInput(value: RwSignal<String>, placeholder: &'static str) -> impl IntoView {
    view! {
        <div class="relative flex-1 min-w-[16rem]">
            <svg class="w-5 h-5 absolute left-3 top-2.5 text-gray-500" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M21 21l-6-6m2-5a7 7 0 11-14 0 7 7 0 0114 0z" />
            </svg>
            <input
                type="search"
                class="w-full pl-10 pr-4 py-2 bg-gray-700 border border-gray-600 rounded-lg text-white placeholder-gray-400 focus:outline-none focus:border-blue-500"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

/// Drop-down over `(value, label)` pairs; the selected value is kept as its string form
#[component]
pub fn FilterSelect(value: RwSignal<String>, options: Vec<(String, String)>) -> impl IntoView {
    view! {
        <select
            class="px-3 py-2 bg-gray-700 border border-gray-600 rounded-lg text-white focus:outline-none focus:border-blue-500"
            on:change=move |ev| value.set(event_target_value(&ev))
            prop:value=move || value.get()
        >
            {options.into_iter().map(|(option, label)| {
                let selected = option.clone();
                view! {
                    <option value=option selected=move || value.get() == selected>{label}</option>
                }
            }).collect_view()}
        </select>
    }
}

/// Build select options, with a leading "any" entry mapped to the empty string.
pub fn options_with_any<T: Copy>(
    any_label: &str,
    values: &[T],
    as_str: impl Fn(T) -> &'static str,
    label: impl Fn(T) -> &'static str,
) -> Vec<(String, String)> {
    std::iter::once((String::new(), any_label.to_string()))
        .chain(values.iter().map(|v| (as_str(*v).to_string(), label(*v).to_string())))
        .collect()
}

#[derive(Clone, Copy, PartialEq)]
pub enum BadgeTone {
    Neutral,
    Good,
    Warning,
    Bad,
    Info,
}

impl BadgeTone {
    fn class(&self) -> &'static str {
        match self {
            Self::Neutral => "bg-gray-700 text-gray-300",
            Self::Good => "bg-green-900/50 text-green-300",
            Self::Warning => "bg-yellow-900/50 text-yellow-300",
            Self::Bad => "bg-red-900/50 text-red-300",
            Self::Info => "bg-blue-900/50 text-blue-300",
        }
    }
}

#[component]
pub fn StatusBadge(#[prop(into)] label: String, tone: BadgeTone) -> impl IntoView {
    view! {
        <span class=format!("px-2 py-1 text-xs rounded-full font-medium {}", tone.class())>
            {label}
        </span>
    }
}

/// The action buttons a record currently allows, each wired to the list view
#[component]
pub fn RowActions<E: Entity>(list: ListHandle<E>, item: E) -> impl IntoView {
    let id = item.id();
    let on_click = Callback::new(move |action: Action| list.act(id, action));

    view! {
        <div class="flex items-center justify-end space-x-2">
            {item.available_actions().into_iter().map(|action| {
                let busy = Signal::derive(move || list.is_in_flight(action, id));
                view! { <ActionButton action=action busy=busy on_click=on_click /> }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swapdesk_core::filter::DateRange;

    #[test]
    fn test_options_with_any() {
        let options = options_with_any(
            "Any time",
            &DateRange::ALL[1..],
            |d: DateRange| d.as_str(),
            |d: DateRange| d.label(),
        );
        assert_eq!(options[0], (String::new(), "Any time".to_string()));
        assert_eq!(options[1], ("today".to_string(), "Today".to_string()));
        assert_eq!(options.len(), 4);
    }
}
