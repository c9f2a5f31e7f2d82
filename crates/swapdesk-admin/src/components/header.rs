//! Header component with the signed-in admin and sign-out menu

use leptos::*;

use crate::app::AppContext;

#[component]
pub fn Header() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let (show_user_menu, set_show_user_menu) = create_signal(false);

    let user = ctx.session.user().unwrap_or_default();
    let initial = user.initial();
    let name = swapdesk_core::types::or_unknown(&user.name).to_string();
    let email = user.email.clone();
    let source = ctx.config.api.data_source;

    let session = ctx.session.clone();
    let on_logout = move |_| {
        set_show_user_menu.set(false);
        session.logout();
    };

    view! {
        <header class="h-16 bg-gray-900 border-b border-gray-700 flex items-center justify-between px-6">
            <div class="flex items-center space-x-3">
                <span class="text-sm text-gray-400">"Data source"</span>
                <span class="px-2 py-1 text-xs bg-gray-700 text-gray-300 rounded uppercase">
                    {source.as_str()}
                </span>
            </div>

            // User menu
            <div class="relative">
                <button
                    class="flex items-center space-x-3 p-2 rounded-lg hover:bg-gray-800 transition-colors"
                    on:click=move |_| set_show_user_menu.update(|v| *v = !*v)
                >
                    <div class="w-8 h-8 bg-blue-600 rounded-full flex items-center justify-center">
                        <span class="text-sm font-medium text-white">{initial}</span>
                    </div>
                    <span class="text-sm text-gray-300">{name}</span>
                    <svg class="w-4 h-4 text-gray-400" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M19 9l-7 7-7-7" />
                    </svg>
                </button>

                {move || show_user_menu.get().then(|| {
                    let on_logout = on_logout.clone();
                    view! {
                        <div class="absolute right-0 mt-2 w-56 bg-gray-800 rounded-lg shadow-lg border border-gray-700 py-1 z-50">
                            <p class="px-4 py-2 text-xs text-gray-500 truncate">{email.clone()}</p>
                            <hr class="my-1 border-gray-700" />
                            <button
                                class="block w-full text-left px-4 py-2 text-sm text-red-400 hover:bg-gray-700"
                                on:click=on_logout
                            >
                                "Sign Out"
                            </button>
                        </div>
                    }
                })}
            </div>
        </header>
    }
}
