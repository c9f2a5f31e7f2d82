//! Dialog used by the compose and generate forms

use leptos::*;

/// Centered dialog over a dimmed backdrop. While `locked` is true (a create
/// request is outstanding) neither the backdrop nor the close button dismiss it.
#[component]
pub fn Modal(
    title: &'static str,
    #[prop(into)] show: Signal<bool>,
    on_close: Callback<()>,
    #[prop(optional, into)] locked: Option<Signal<bool>>,
    #[prop(optional)] wide: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let locked = move || locked.map(|l| l.get()).unwrap_or(false);
    let dismiss = move |_: ev::MouseEvent| {
        if !locked() {
            on_close.call(());
        }
    };
    let panel = if wide { "max-w-2xl" } else { "max-w-lg" };

    view! {
        <Show when=move || show.get() fallback=|| ()>
            <div class="fixed inset-0 z-40 flex items-center justify-center p-4">
                <div class="absolute inset-0 bg-black/60" on:click=dismiss />
                <section class=format!("relative w-full {} bg-gray-800 rounded-xl shadow-2xl border border-gray-700", panel)>
                    <header class="flex items-center justify-between px-6 py-4 border-b border-gray-700">
                        <h3 class="text-lg font-semibold text-white">{title}</h3>
                        <button
                            type="button"
                            class="text-gray-400 hover:text-white disabled:opacity-40"
                            disabled=locked
                            on:click=dismiss
                        >
                            "×"
                        </button>
                    </header>
                    <div class="px-6 py-4">{children()}</div>
                </section>
            </div>
        </Show>
    }
}
