//! Toast notifications overlay

use gloo_timers::callback::Timeout;
use leptos::*;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use swapdesk_core::{Notifications, ToastLevel};

use crate::app::AppContext;

fn level_class(level: ToastLevel) -> &'static str {
    match level {
        ToastLevel::Success => "bg-green-900/90 border-green-500 text-green-100",
        ToastLevel::Error => "bg-red-900/90 border-red-500 text-red-100",
        ToastLevel::Info => "bg-gray-800/90 border-blue-500 text-gray-100",
    }
}

/// Toast ids with a dismiss timer armed. An id leaves the set when its timer fires.
type Scheduled = Rc<RefCell<HashSet<u64>>>;

/// Arm one dismiss timer per toast id.
fn schedule_dismissals(notifications: &Notifications, scheduled: &Scheduled, millis: u32) {
    for id in unscheduled(notifications, scheduled) {
        let notifications = notifications.clone();
        let scheduled = scheduled.clone();
        Timeout::new(millis, move || {
            notifications.dismiss(id);
            scheduled.borrow_mut().remove(&id);
        })
        .forget();
    }
}

/// Ids of queued toasts without a timer, marked as scheduled.
fn unscheduled(notifications: &Notifications, scheduled: &Scheduled) -> Vec<u64> {
    let mut scheduled = scheduled.borrow_mut();
    notifications
        .toasts()
        .into_iter()
        .map(|toast| toast.id)
        .filter(|id| scheduled.insert(*id))
        .collect()
}

/// Renders the shared toast queue in the corner of the screen
#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let notifications = ctx.notifications.clone();
    let millis = ctx.config.ui.toast_duration_ms;
    let version = create_rw_signal(0u64);

    let scheduled: Scheduled = Rc::new(RefCell::new(HashSet::new()));
    let queue = notifications.clone();
    notifications.subscribe(move || {
        schedule_dismissals(&queue, &scheduled, millis);
        version.try_update(|v| *v += 1);
    });

    let toasts = {
        let notifications = notifications.clone();
        move || {
            version.get();
            notifications.toasts()
        }
    };

    view! {
        <div class="fixed bottom-4 right-4 z-50 space-y-2 w-80">
            <For
                each=toasts
                key=|toast| toast.id
                children=move |toast| {
                    let notifications = notifications.clone();
                    view! {
                        <div class=format!("flex items-start justify-between px-4 py-3 rounded-lg border shadow-lg {}", level_class(toast.level))>
                            <span class="text-sm whitespace-pre-line">{toast.message.clone()}</span>
                            <button
                                class="ml-3 opacity-70 hover:opacity-100"
                                on:click=move |_| notifications.dismiss(toast.id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_toast_is_scheduled_once() {
        let notifications = Notifications::new();
        let scheduled: Scheduled = Rc::new(RefCell::new(HashSet::new()));
        let first = notifications.success("Saved");

        assert_eq!(unscheduled(&notifications, &scheduled), vec![first]);
        assert!(unscheduled(&notifications, &scheduled).is_empty());

        let second = notifications.error("Failed");
        assert_eq!(unscheduled(&notifications, &scheduled), vec![second]);
    }

    #[test]
    fn test_dismissed_ids_do_not_accumulate() {
        let notifications = Notifications::new();
        let scheduled: Scheduled = Rc::new(RefCell::new(HashSet::new()));
        let id = notifications.info("Hello");
        unscheduled(&notifications, &scheduled);

        // what the timer does when it fires
        notifications.dismiss(id);
        scheduled.borrow_mut().remove(&id);

        assert!(scheduled.borrow().is_empty());
        assert!(unscheduled(&notifications, &scheduled).is_empty());
    }
}
