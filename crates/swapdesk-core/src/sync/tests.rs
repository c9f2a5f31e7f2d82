use super::*;
use crate::confirm::{AlwaysConfirm, NeverConfirm};
use crate::notify::ToastLevel;
use crate::remote::{Ack, ListResponse, MockCall, MockCollection, MockOp, Patch};
use crate::types::{BanFilter, Group, Skill, SkillStatus, User, UserFilter};
use async_trait::async_trait;
use serde_json::json;
use std::cell::Cell;
use std::collections::VecDeque;
use tokio::sync::oneshot;

fn user(id: u64, name: &str) -> User {
    User {
        id: EntityId(id),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        ..Default::default()
    }
}

fn skill(id: u64, name: &str, status: SkillStatus) -> Skill {
    Skill {
        id: EntityId(id),
        name: name.to_string(),
        status,
        ..Default::default()
    }
}

async fn loaded<E: Entity>(mock: &MockCollection<E>) -> ListView<E> {
    let view = ListView::new(Rc::new(mock.clone()), Notifications::new());
    assert!(matches!(view.load().await, LoadOutcome::Loaded(_)));
    view
}

async fn settle(mut done: impl FnMut() -> bool) {
    for _ in 0..50 {
        if done() {
            return;
        }
        tokio::task::yield_now().await;
    }
}

/// Remote whose responses are handed in by the test, one channel per call.
struct Scripted<E: Entity> {
    lists: RefCell<VecDeque<oneshot::Receiver<Result<ListResponse<E>>>>>,
    creates: RefCell<VecDeque<oneshot::Receiver<Result<E>>>>,
    updates: RefCell<VecDeque<oneshot::Receiver<Result<UpdateResponse<E>>>>>,
    deletes: RefCell<VecDeque<oneshot::Receiver<Result<Ack>>>>,
}

impl<E: Entity> Scripted<E> {
    fn new() -> Self {
        Self {
            lists: RefCell::new(VecDeque::new()),
            creates: RefCell::new(VecDeque::new()),
            updates: RefCell::new(VecDeque::new()),
            deletes: RefCell::new(VecDeque::new()),
        }
    }

    fn next_list(&self) -> oneshot::Sender<Result<ListResponse<E>>> {
        let (tx, rx) = oneshot::channel();
        self.lists.borrow_mut().push_back(rx);
        tx
    }

    fn next_create(&self) -> oneshot::Sender<Result<E>> {
        let (tx, rx) = oneshot::channel();
        self.creates.borrow_mut().push_back(rx);
        tx
    }

    fn next_update(&self) -> oneshot::Sender<Result<UpdateResponse<E>>> {
        let (tx, rx) = oneshot::channel();
        self.updates.borrow_mut().push_back(rx);
        tx
    }

    fn next_delete(&self) -> oneshot::Sender<Result<Ack>> {
        let (tx, rx) = oneshot::channel();
        self.deletes.borrow_mut().push_back(rx);
        tx
    }
}

async fn answer<T>(rx: Option<oneshot::Receiver<Result<T>>>) -> Result<T> {
    match rx {
        Some(rx) => rx
            .await
            .unwrap_or_else(|_| Err(Error::Network("script dropped".into()))),
        None => Err(Error::Network("unscripted call".into())),
    }
}

#[async_trait(?Send)]
impl<E: Entity> RemoteCollection<E> for Scripted<E> {
    async fn list(&self) -> Result<ListResponse<E>> {
        let rx = self.lists.borrow_mut().pop_front();
        answer(rx).await
    }

    async fn create(&self, _payload: &E::Draft) -> Result<E> {
        let rx = self.creates.borrow_mut().pop_front();
        answer(rx).await
    }

    async fn update(&self, _id: EntityId, _patch: &Patch) -> Result<UpdateResponse<E>> {
        let rx = self.updates.borrow_mut().pop_front();
        answer(rx).await
    }

    async fn delete(&self, _id: EntityId) -> Result<Ack> {
        let rx = self.deletes.borrow_mut().pop_front();
        answer(rx).await
    }
}

// ============= load =============

#[tokio::test]
async fn test_load_replaces_collection() {
    let mock = MockCollection::with_items(vec![user(1, "Ada"), user(2, "Bo")]);
    let view = ListView::new(Rc::new(mock.clone()), Notifications::new());
    assert!(view.is_empty());

    assert_eq!(view.load().await, LoadOutcome::Loaded(2));
    assert!(!view.is_loading());

    mock.replace_items(vec![user(3, "Cy")]);
    assert_eq!(view.load().await, LoadOutcome::Loaded(1));
    assert_eq!(view.items(), vec![user(3, "Cy")]);
}

#[tokio::test]
async fn test_load_failure_keeps_collection() {
    let mock = MockCollection::with_items(vec![user(1, "Ada")]);
    let view = loaded(&mock).await;

    mock.fail_next(MockOp::List, Error::Network("offline".into()));
    let outcome = view.load().await;
    assert!(matches!(outcome, LoadOutcome::Failed(Error::Network(_))));
    assert_eq!(view.items(), vec![user(1, "Ada")]);
    assert!(!view.is_loading());
    assert_eq!(view.notifications().count(ToastLevel::Error), 1);
}

#[tokio::test]
async fn test_load_missing_data_is_empty() {
    let remote = Rc::new(Scripted::<User>::new());
    let view = ListView::new(remote.clone(), Notifications::new());
    let tx = remote.next_list();
    tx.send(Ok(ListResponse::empty())).unwrap();
    assert_eq!(view.load().await, LoadOutcome::Loaded(0));
    assert!(view.is_empty());
}

#[tokio::test]
async fn test_load_drops_duplicate_ids() {
    let mock = MockCollection::with_items(vec![user(1, "Ada"), user(1, "Shadow"), user(2, "Bo")]);
    let view = ListView::new(Rc::new(mock), Notifications::new());
    assert_eq!(view.load().await, LoadOutcome::Loaded(2));
    assert_eq!(view.get(EntityId(1)).unwrap().name, "Ada");
}

#[tokio::test]
async fn test_loading_flag_while_pending() {
    let remote = Rc::new(Scripted::<User>::new());
    let view = ListView::new(remote.clone(), Notifications::new());
    let tx = remote.next_list();

    let driver = async {
        settle(|| view.is_loading()).await;
        assert!(view.is_loading());
        tx.send(Ok(ListResponse::new(vec![user(1, "Ada")]))).unwrap();
    };
    let (outcome, ()) = tokio::join!(view.load(), driver);
    assert_eq!(outcome, LoadOutcome::Loaded(1));
    assert!(!view.is_loading());
}

#[tokio::test]
async fn test_stale_load_is_discarded() {
    let remote = Rc::new(Scripted::<User>::new());
    let view = ListView::new(remote.clone(), Notifications::new());
    let first = remote.next_list();
    let second = remote.next_list();

    let driver = async {
        settle(|| remote.lists.borrow().is_empty()).await;
        second.send(Ok(ListResponse::new(vec![user(2, "Newer")]))).unwrap();
        settle(|| !view.is_loading()).await;
        first.send(Ok(ListResponse::new(vec![user(1, "Older")]))).unwrap();
    };
    let (a, b, ()) = tokio::join!(view.load(), view.load(), driver);

    assert_eq!(a, LoadOutcome::Superseded);
    assert_eq!(b, LoadOutcome::Loaded(1));
    assert_eq!(view.items(), vec![user(2, "Newer")]);
    assert!(!view.is_loading());
}

// ============= perform_action =============

#[tokio::test]
async fn test_approve_pending_skill() {
    let mock = MockCollection::with_items(vec![
        skill(1, "Guitar", SkillStatus::Pending),
        skill(2, "Welding", SkillStatus::Pending),
    ]);
    let view = loaded(&mock).await;

    let outcome = view
        .perform_action(EntityId(2), Action::Approve, &NeverConfirm)
        .await;
    assert_eq!(outcome, ActionOutcome::Applied);

    let items = view.items();
    assert_eq!(items[0].status, SkillStatus::Pending);
    assert_eq!(items[1].status, SkillStatus::Approved);
    assert!(!view.is_in_flight(Action::Approve, EntityId(2)));
    assert_eq!(view.notifications().count(ToastLevel::Success), 1);
}

#[tokio::test]
async fn test_acknowledged_update_applies_locally() {
    let mock = MockCollection::with_items(vec![user(1, "Ada"), user(2, "Bo")]).ack_updates();
    let view = loaded(&mock).await;

    let outcome = view.perform_action(EntityId(1), Action::Ban, &AlwaysConfirm).await;
    assert_eq!(outcome, ActionOutcome::Applied);
    assert!(view.get(EntityId(1)).unwrap().is_banned);
    assert!(!view.get(EntityId(2)).unwrap().is_banned);
}

#[tokio::test]
async fn test_delete_removes_row_after_confirmation() {
    let mock = MockCollection::with_items(vec![user(1, "A"), user(2, "B"), user(3, "C")]);
    let view = loaded(&mock).await;

    let prompts = Rc::new(RefCell::new(Vec::new()));
    let seen = prompts.clone();
    let confirm = move |prompt: &str| {
        seen.borrow_mut().push(prompt.to_string());
        true
    };

    let outcome = view.perform_action(EntityId(2), Action::Delete, &confirm).await;
    assert_eq!(outcome, ActionOutcome::Applied);
    assert_eq!(view.items(), vec![user(1, "A"), user(3, "C")]);
    assert_eq!(prompts.borrow().len(), 1);
    assert!(prompts.borrow()[0].starts_with("Delete user \"B\"?"));
}

#[tokio::test]
async fn test_declined_confirmation_sends_nothing() {
    let mock = MockCollection::with_items(vec![user(1, "A")]);
    let view = loaded(&mock).await;

    let outcome = view.perform_action(EntityId(1), Action::Delete, &NeverConfirm).await;
    assert_eq!(outcome, ActionOutcome::Cancelled);
    assert_eq!(mock.call_count(MockOp::Delete), 0);
    assert_eq!(view.len(), 1);
    assert!(view.notifications().toasts().is_empty());
}

#[tokio::test]
async fn test_reject_needs_confirmation_for_skills() {
    let mock = MockCollection::with_items(vec![skill(1, "Guitar", SkillStatus::Pending)]);
    let view = loaded(&mock).await;

    let outcome = view.perform_action(EntityId(1), Action::Reject, &NeverConfirm).await;
    assert_eq!(outcome, ActionOutcome::Cancelled);
    assert_eq!(mock.call_count(MockOp::Update), 0);

    let outcome = view.perform_action(EntityId(1), Action::Reject, &AlwaysConfirm).await;
    assert_eq!(outcome, ActionOutcome::Applied);
    assert_eq!(view.items()[0].status, SkillStatus::Rejected);
}

#[tokio::test]
async fn test_failed_mutation_leaves_collection_untouched() {
    let mock = MockCollection::with_items(vec![user(1, "A"), user(2, "B")]);
    let view = loaded(&mock).await;
    let before = view.items();

    mock.fail_next(MockOp::Update, Error::Http { status: 500, message: "boom".into() });
    let outcome = view.perform_action(EntityId(1), Action::Ban, &AlwaysConfirm).await;
    assert!(matches!(outcome, ActionOutcome::Failed(Error::Http { status: 500, .. })));
    assert_eq!(view.items(), before);
    assert!(!view.is_in_flight(Action::Ban, EntityId(1)));

    let toasts = view.notifications().toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].level, ToastLevel::Error);
}

#[tokio::test]
async fn test_negative_ack_is_a_failure() {
    let remote = Rc::new(Scripted::<User>::new());
    let view = ListView::new(remote.clone(), Notifications::new());
    remote.next_list().send(Ok(ListResponse::new(vec![user(1, "A")]))).unwrap();
    view.load().await;

    remote
        .next_delete()
        .send(Ok(Ack { success: false }))
        .unwrap();
    let outcome = view.perform_action(EntityId(1), Action::Delete, &AlwaysConfirm).await;
    assert!(matches!(outcome, ActionOutcome::Failed(Error::Rejected(_))));
    assert_eq!(view.len(), 1);

    remote
        .next_update()
        .send(Ok(UpdateResponse::Ack(Ack { success: false })))
        .unwrap();
    let outcome = view.perform_action(EntityId(1), Action::Ban, &AlwaysConfirm).await;
    assert!(matches!(outcome, ActionOutcome::Failed(Error::Rejected(_))));
    assert!(!view.get(EntityId(1)).unwrap().is_banned);
}

#[tokio::test]
async fn test_unknown_or_disallowed_action_is_not_sent() {
    let mock = MockCollection::with_items(vec![user(1, "A")]);
    let view = loaded(&mock).await;

    assert_eq!(
        view.perform_action(EntityId(9), Action::Ban, &AlwaysConfirm).await,
        ActionOutcome::NotFound
    );
    assert_eq!(
        view.perform_action(EntityId(1), Action::Unban, &AlwaysConfirm).await,
        ActionOutcome::NotAllowed
    );
    assert_eq!(
        view.perform_action(EntityId(1), Action::Approve, &AlwaysConfirm).await,
        ActionOutcome::NotAllowed
    );
    assert_eq!(mock.call_count(MockOp::Update), 0);
}

#[tokio::test]
async fn test_second_click_while_in_flight_is_ignored() {
    let remote = Rc::new(Scripted::<User>::new());
    let view = ListView::new(remote.clone(), Notifications::new());
    remote.next_list().send(Ok(ListResponse::new(vec![user(1, "A")]))).unwrap();
    view.load().await;

    let tx = remote.next_update();
    let driver = async {
        settle(|| view.is_in_flight(Action::Ban, EntityId(1))).await;
        let second = view.perform_action(EntityId(1), Action::Ban, &AlwaysConfirm).await;
        assert_eq!(second, ActionOutcome::AlreadyInFlight);
        let mut banned = user(1, "A");
        banned.is_banned = true;
        tx.send(Ok(UpdateResponse::Entity(banned))).unwrap();
    };
    let (first, ()) = tokio::join!(
        view.perform_action(EntityId(1), Action::Ban, &AlwaysConfirm),
        driver
    );
    assert_eq!(first, ActionOutcome::Applied);
    assert!(view.get(EntityId(1)).unwrap().is_banned);
}

#[tokio::test]
async fn test_concurrent_actions_keep_independent_flags() {
    let remote = Rc::new(Scripted::<User>::new());
    let view = ListView::new(remote.clone(), Notifications::new());
    remote
        .next_list()
        .send(Ok(ListResponse::new(vec![user(1, "A"), user(2, "B")])))
        .unwrap();
    view.load().await;

    let tx_a = remote.next_update();
    let tx_b = remote.next_update();

    let driver = async {
        settle(|| {
            view.is_in_flight(Action::Ban, EntityId(1)) && view.is_in_flight(Action::Ban, EntityId(2))
        })
        .await;
        assert!(view.is_busy(EntityId(1)));
        assert!(view.is_busy(EntityId(2)));

        tx_b.send(Ok(UpdateResponse::Ack(Ack::ok()))).unwrap();
        settle(|| !view.is_in_flight(Action::Ban, EntityId(2))).await;
        assert!(!view.is_in_flight(Action::Ban, EntityId(2)));
        assert!(view.is_in_flight(Action::Ban, EntityId(1)));
        assert!(view.get(EntityId(2)).unwrap().is_banned);
        assert!(!view.get(EntityId(1)).unwrap().is_banned);

        tx_a.send(Err(Error::Network("reset".into()))).unwrap();
    };

    let (a, b, ()) = tokio::join!(
        view.perform_action(EntityId(1), Action::Ban, &AlwaysConfirm),
        view.perform_action(EntityId(2), Action::Ban, &AlwaysConfirm),
        driver
    );
    assert!(matches!(a, ActionOutcome::Failed(_)));
    assert_eq!(b, ActionOutcome::Applied);
    assert!(!view.is_busy(EntityId(1)));
    assert!(!view.get(EntityId(1)).unwrap().is_banned);
    assert!(view.get(EntityId(2)).unwrap().is_banned);
}

#[tokio::test]
async fn test_join_reloads_server_counts() {
    let mock = MockCollection::with_items(vec![Group {
        id: EntityId(1),
        name: "Makers".into(),
        member_count: 9,
        ..Default::default()
    }])
    .with_update_hook(|group: &mut Group, patch| match patch.get("is_member") {
        Some(v) if v == &json!(true) => group.member_count += 1,
        Some(_) => group.member_count = group.member_count.saturating_sub(1),
        None => {}
    });
    let view = loaded(&mock).await;

    let outcome = view.perform_action(EntityId(1), Action::Join, &NeverConfirm).await;
    assert_eq!(outcome, ActionOutcome::Applied);
    assert_eq!(mock.call_count(MockOp::List), 2);
    let group = view.get(EntityId(1)).unwrap();
    assert!(group.is_member);
    assert_eq!(group.member_count, 10);

    let outcome = view.perform_action(EntityId(1), Action::Leave, &NeverConfirm).await;
    assert_eq!(outcome, ActionOutcome::Cancelled);
    let outcome = view.perform_action(EntityId(1), Action::Leave, &AlwaysConfirm).await;
    assert_eq!(outcome, ActionOutcome::Applied);
    assert_eq!(view.get(EntityId(1)).unwrap().member_count, 9);
}

#[tokio::test]
async fn test_join_with_failed_reload_keeps_local_change() {
    let mock = MockCollection::with_items(vec![Group {
        id: EntityId(1),
        name: "Makers".into(),
        member_count: 9,
        ..Default::default()
    }]);
    let view = loaded(&mock).await;
    mock.fail_next(MockOp::List, Error::Network("offline".into()));

    let outcome = view.perform_action(EntityId(1), Action::Join, &NeverConfirm).await;
    assert_eq!(outcome, ActionOutcome::Applied);
    assert_eq!(mock.call_count(MockOp::List), 2);
    assert!(view.get(EntityId(1)).unwrap().is_member);
    assert!(!view.is_loading());
    assert!(!view.is_busy(EntityId(1)));
    assert_eq!(view.notifications().count(ToastLevel::Success), 1);
    assert_eq!(view.notifications().count(ToastLevel::Error), 1);
}

// ============= create =============

#[tokio::test]
async fn test_create_appends_server_copy() {
    use crate::types::{Announcement, AnnouncementDraft, Audience};

    let mock: MockCollection<Announcement> = MockCollection::new();
    let view = loaded(&mock).await;

    let draft = AnnouncementDraft::new("Maintenance", "Down at noon", Audience::All);
    let outcome = view.create(draft).await;
    let created = match outcome {
        CreateOutcome::Created(a) => a,
        other => panic!("unexpected {:?}", other),
    };
    assert_eq!(created.id, EntityId(1));
    assert_eq!(view.items(), vec![created]);
    assert!(!view.is_creating());
    assert!(matches!(mock.calls().last(), Some(MockCall::Create(_))));
}

#[tokio::test]
async fn test_create_failure_keeps_collection() {
    use crate::types::{Announcement, AnnouncementDraft, Audience};

    let mock: MockCollection<Announcement> = MockCollection::new();
    let view = loaded(&mock).await;
    mock.fail_next(MockOp::Create, Error::Http { status: 422, message: "bad".into() });

    let outcome = view
        .create(AnnouncementDraft::new("T", "M", Audience::Admins))
        .await;
    assert!(matches!(outcome, CreateOutcome::Failed(_)));
    assert!(view.is_empty());
    assert!(!view.is_creating());
    assert_eq!(view.notifications().count(ToastLevel::Error), 1);
}

#[tokio::test]
async fn test_second_create_while_pending_is_busy() {
    use crate::types::{Announcement, AnnouncementDraft, Audience};

    let remote = Rc::new(Scripted::<Announcement>::new());
    let view = ListView::new(remote.clone(), Notifications::new());
    let tx = remote.next_create();

    let driver = async {
        settle(|| view.is_creating()).await;
        let second = view
            .create(AnnouncementDraft::new("Again", "Twice", Audience::All))
            .await;
        assert_eq!(second, CreateOutcome::Busy);
        tx.send(Ok(Announcement {
            id: EntityId(7),
            title: "Once".into(),
            ..Default::default()
        }))
        .unwrap();
    };
    let (first, ()) = tokio::join!(
        view.create(AnnouncementDraft::new("Once", "Only", Audience::All)),
        driver
    );

    assert!(matches!(first, CreateOutcome::Created(ref a) if a.id == EntityId(7)));
    assert_eq!(view.len(), 1);
    assert!(remote.creates.borrow().is_empty());
    assert!(!view.is_creating());
}

#[tokio::test]
async fn test_create_after_unmount_is_detached() {
    use crate::types::{Announcement, AnnouncementDraft, Audience};

    let remote = Rc::new(Scripted::<Announcement>::new());
    let notifications = Notifications::new();
    let view = ListView::new(remote.clone(), notifications.clone());
    let tx = remote.next_create();

    let driver = async {
        settle(|| view.is_creating()).await;
        view.unmount();
        tx.send(Ok(Announcement {
            id: EntityId(3),
            title: "Late".into(),
            ..Default::default()
        }))
        .unwrap();
    };
    let (outcome, ()) = tokio::join!(
        view.create(AnnouncementDraft::new("Late", "Too late", Audience::All)),
        driver
    );

    assert_eq!(outcome, CreateOutcome::Detached);
    assert!(view.is_empty());
    assert!(!view.is_creating());
    assert!(notifications.toasts().is_empty());
}

// ============= projection =============

#[tokio::test]
async fn test_filter_projection_preserves_collection() {
    let mut banned = user(2, "Bo");
    banned.is_banned = true;
    let mock = MockCollection::with_items(vec![user(1, "Ada"), banned, user(3, "Adam")]);
    let view = loaded(&mock).await;

    let query = Query::new("ad", UserFilter { ban: BanFilter::Active, public: None });
    let ids: Vec<u64> = view.apply_filter(&query).iter().map(|u| u.id.0).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(view.len(), 3);

    let all = view.apply_filter(&Query::default());
    assert_eq!(all, view.items());
}

// ============= teardown =============

#[tokio::test]
async fn test_resolution_after_unmount_is_ignored() {
    let remote = Rc::new(Scripted::<User>::new());
    let notifications = Notifications::new();
    let view = ListView::new(remote.clone(), notifications.clone());
    remote.next_list().send(Ok(ListResponse::new(vec![user(1, "A")]))).unwrap();
    view.load().await;

    let update = remote.next_update();
    let list = remote.next_list();
    let driver = async {
        settle(|| view.is_in_flight(Action::Ban, EntityId(1))).await;
        view.unmount();
        update.send(Ok(UpdateResponse::Ack(Ack::ok()))).unwrap();
        list.send(Ok(ListResponse::new(vec![user(5, "Late")]))).unwrap();
    };
    let (action, ()) = tokio::join!(
        view.perform_action(EntityId(1), Action::Ban, &AlwaysConfirm),
        driver
    );

    assert_eq!(action, ActionOutcome::Detached);
    assert!(view.is_empty());
    assert!(notifications.toasts().is_empty());
    assert_eq!(view.load().await, LoadOutcome::Detached);
}

#[tokio::test]
async fn test_listeners_see_state_changes() {
    let mock = MockCollection::with_items(vec![user(1, "A")]);
    let view = ListView::new(Rc::new(mock), Notifications::new());
    let hits = Rc::new(Cell::new(0));
    let hits_clone = hits.clone();
    let observer = view.clone();
    view.subscribe(move || {
        // listeners may read the view
        let _ = observer.len();
        hits_clone.set(hits_clone.get() + 1);
    });

    view.load().await;
    assert_eq!(hits.get(), 2);

    view.unmount();
    assert!(!view.is_mounted());
    view.load().await;
    assert_eq!(hits.get(), 2);
}

#[test]
fn test_confirmation_prompt() {
    assert_eq!(
        confirmation_prompt::<Group>(Action::Leave, "Makers"),
        "Leave group \"Makers\"?"
    );
    assert!(confirmation_prompt::<User>(Action::Delete, "Ada").ends_with("cannot be undone."));
}
