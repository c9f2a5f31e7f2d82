//! Button components

use leptos::*;

use swapdesk_core::Action;

#[derive(Clone, Copy, Default, PartialEq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
    Success,
}

impl ButtonVariant {
    fn class(&self) -> &'static str {
        match self {
            Self::Primary => "bg-blue-600 hover:bg-blue-700 text-white",
            Self::Secondary => "bg-gray-700 hover:bg-gray-600 text-white",
            Self::Danger => "bg-red-600 hover:bg-red-700 text-white",
            Self::Success => "bg-green-600 hover:bg-green-700 text-white",
        }
    }

    /// Row-button colour for an action
    pub fn for_action(action: Action) -> Self {
        match action {
            Action::Approve | Action::Unban | Action::Resolve | Action::Join => Self::Success,
            Action::Ban | Action::Reject | Action::Delete | Action::Interrupt => Self::Danger,
            Action::Archive | Action::Leave => Self::Secondary,
        }
    }
}

const SPINNER: &str = "M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4zm2 5.291A7.962 7.962 0 014 12H0c0 3.042 1.135 5.824 3 7.938l3-2.647z";

#[component]
pub fn Button(
    #[prop(into, optional)] variant: Option<ButtonVariant>,
    #[prop(into, optional)] disabled: Option<Signal<bool>>,
    #[prop(into, optional)] loading: Option<Signal<bool>>,
    #[prop(into, optional)] on_click: Option<Callback<()>>,
    #[prop(optional)] submit: bool,
    children: Children,
) -> impl IntoView {
    let variant = variant.unwrap_or_default();
    let is_loading = move || loading.map(|l| l.get()).unwrap_or(false);
    let button_type = if submit { "submit" } else { "button" };

    view! {
        <button
            type=button_type
            class=format!(
                "px-4 py-2 rounded-lg font-medium transition-colors focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-offset-gray-800 focus:ring-blue-500 disabled:opacity-50 disabled:cursor-not-allowed flex items-center justify-center {}",
                variant.class(),
            )
            disabled=move || disabled.map(|d| d.get()).unwrap_or(false) || is_loading()
            on:click=move |_| {
                if let Some(callback) = on_click {
                    callback.call(());
                }
            }
        >
            {move || is_loading().then(|| view! {
                <svg class="animate-spin -ml-1 mr-2 h-4 w-4" fill="none" viewBox="0 0 24 24">
                    <circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"></circle>
                    <path class="opacity-75" fill="currentColor" d=SPINNER></path>
                </svg>
            })}
            {children()}
        </button>
    }
}

/// Small per-row action button; disabled while its own request is outstanding
#[component]
pub fn ActionButton(
    action: Action,
    #[prop(into)] busy: Signal<bool>,
    on_click: Callback<Action>,
) -> impl IntoView {
    let variant = ButtonVariant::for_action(action);

    view! {
        <button
            type="button"
            class=format!(
                "px-3 py-1 text-xs rounded-md font-medium transition-colors disabled:opacity-50 disabled:cursor-wait {}",
                variant.class(),
            )
            disabled=move || busy.get()
            on:click=move |_| on_click.call(action)
        >
            {action.label()}
        </button>
    }
}
