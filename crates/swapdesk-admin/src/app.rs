//! Main application component with routing

use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{Outlet, Redirect, Route, Router, Routes};

use swapdesk_core::{DashboardConfig, Notifications, SessionStore, TeardownReason};

use crate::api::{Backend, LocalStorage};
use crate::components::{Header, Sidebar, ToastHost};
use crate::pages::{
    AnnouncementsPage, DashboardPage, FeedbackPage, GroupsPage, NotFoundPage, ReportsPage,
    SkillsPage, SwapsPage, UsersPage,
};

/// Services shared by every page
#[derive(Clone)]
pub struct AppContext {
    pub config: DashboardConfig,
    pub session: SessionStore,
    pub notifications: Notifications,
    pub backend: Backend,
    /// Mirrors `session.is_authenticated()` for the router
    pub authenticated: RwSignal<bool>,
}

impl AppContext {
    fn new(config: DashboardConfig) -> Self {
        let session = SessionStore::restore(LocalStorage::new(config.session.storage_key.clone()));
        let backend = Backend::from_config(&config, &session);
        let authenticated = create_rw_signal(session.is_authenticated());

        let notifications = Notifications::new();
        let toasts = notifications.clone();
        session.on_teardown(move |reason| {
            authenticated.set(false);
            if reason == TeardownReason::Unauthorized {
                toasts.error("Your session has expired. Please sign in again.");
            }
        });

        Self {
            config,
            session,
            notifications,
            backend,
            authenticated,
        }
    }
}

/// Root application component
#[component]
pub fn App(config: DashboardConfig) -> impl IntoView {
    provide_meta_context();
    provide_context(AppContext::new(config));

    view! {
        <Title formatter=|text: String| if text.is_empty() { "SwapDesk".to_string() } else { format!("{} - SwapDesk", text) } />
        <Router>
            <div class="min-h-screen bg-gray-900 text-gray-100">
                <Routes>
                    <Route path="/login" view=LoginPage />
                    <Route path="/" view=MainLayout>
                        <Route path="" view=DashboardPage />
                        <Route path="users" view=UsersPage />
                        <Route path="skills" view=SkillsPage />
                        <Route path="feedback" view=FeedbackPage />
                        <Route path="announcements" view=AnnouncementsPage />
                        <Route path="swaps" view=SwapsPage />
                        <Route path="groups" view=GroupsPage />
                        <Route path="reports" view=ReportsPage />
                        <Route path="/*any" view=NotFoundPage />
                    </Route>
                </Routes>
            </div>
            <ToastHost />
        </Router>
    }
}

/// Main layout with sidebar and header; signed-out visitors go to the login page
#[component]
fn MainLayout() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let authenticated = ctx.authenticated;

    view! {
        <Show
            when=move || authenticated.get()
            fallback=|| view! { <Redirect path="/login" /> }
        >
            <div class="flex h-screen">
                <Sidebar />
                <div class="flex-1 flex flex-col overflow-hidden">
                    <Header />
                    <main class="flex-1 overflow-y-auto p-6 bg-gray-800">
                        <Outlet />
                    </main>
                </div>
            </div>
        </Show>
    }
}

/// Login page
#[component]
fn LoginPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let authenticated = ctx.authenticated;

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(Option::<String>::None);
    let (loading, set_loading) = create_signal(false);

    let hint = ctx
        .config
        .uses_mock()
        .then(|| format!("Demo: {} / {}", ctx.config.mock.admin_email, ctx.config.mock.admin_password));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_loading.set(true);
        set_error.set(None);

        let auth = ctx.backend.auth.clone();
        let session = ctx.session.clone();
        let em = email.get();
        let pw = password.get();

        spawn_local(async move {
            let result = match auth.login(&em, &pw).await {
                Ok((token, user)) => session.sign_in(token, user),
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => authenticated.set(true),
                Err(e) => {
                    log::warn!("Sign-in failed: {}", e);
                    set_error.set(Some(e.user_message()));
                }
            }
            set_loading.set(false);
        });
    };

    view! {
        <Title text="Sign In" />
        <Show when=move || authenticated.get() fallback=|| ()>
            <Redirect path="/" />
        </Show>
        <div class="min-h-screen flex items-center justify-center bg-gray-900">
            <div class="max-w-md w-full bg-gray-800 rounded-xl shadow-2xl p-8">
                <div class="text-center mb-8">
                    <div class="flex justify-center mb-4">
                        <svg class="w-16 h-16 text-blue-500" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2"
                                d="M8 7h12m0 0l-4-4m4 4l-4 4m0 6H4m0 0l4 4m-4-4l4-4" />
                        </svg>
                    </div>
                    <h1 class="text-3xl font-bold text-white">"SwapDesk"</h1>
                    <p class="text-gray-400 mt-2">"Skill-swap platform administration"</p>
                </div>

                <form on:submit=on_submit class="space-y-6">
                    {move || error.get().map(|e| view! {
                        <div class="bg-red-900/50 border border-red-500 text-red-200 px-4 py-3 rounded">
                            {e}
                        </div>
                    })}

                    <div>
                        <label class="block text-sm font-medium text-gray-300 mb-2">
                            "Email"
                        </label>
                        <input
                            type="email"
                            class="w-full px-4 py-3 bg-gray-700 border border-gray-600 rounded-lg
                                   text-white placeholder-gray-400 focus:outline-none focus:border-blue-500
                                   transition-colors"
                            placeholder="admin@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>

                    <div>
                        <label class="block text-sm font-medium text-gray-300 mb-2">
                            "Password"
                        </label>
                        <input
                            type="password"
                            class="w-full px-4 py-3 bg-gray-700 border border-gray-600 rounded-lg
                                   text-white placeholder-gray-400 focus:outline-none focus:border-blue-500
                                   transition-colors"
                            placeholder="Enter password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>

                    <button
                        type="submit"
                        class="w-full py-3 px-4 bg-blue-600 hover:bg-blue-700 text-white font-medium
                               rounded-lg transition-colors focus:outline-none focus:ring-2
                               focus:ring-blue-500 focus:ring-offset-2 focus:ring-offset-gray-800
                               disabled:opacity-50 disabled:cursor-not-allowed"
                        disabled=move || loading.get()
                    >
                        {move || if loading.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>

                {hint.map(|h| view! {
                    <div class="mt-6 text-center text-sm text-gray-500">{h}</div>
                })}
            </div>
        </div>
    }
}
