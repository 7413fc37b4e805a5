use super::*;
use crate::net::types::User;

fn session(id: &str) -> Session {
    Session {
        access_token: format!("token-{id}"),
        token_type: "bearer".to_owned(),
        expires_in: 3600,
        expires_at: None,
        refresh_token: "rt".to_owned(),
        user: User {
            id: id.to_owned(),
            email: None,
            user_metadata: std::collections::HashMap::new(),
            app_metadata: std::collections::HashMap::new(),
        },
    }
}

fn recorder() -> (Rc<RefCell<Vec<(AuthEvent, Option<String>)>>>, SessionListener) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let listener: SessionListener = Rc::new(move |event, session: Option<Session>| {
        sink.borrow_mut().push((event, session.map(|s| s.user.id)));
    });
    (seen, listener)
}

// =============================================================
// Subscription
// =============================================================

#[test]
fn unsubscribe_runs_release_once() {
    let count = Rc::new(Cell::new(0));
    let counter = Rc::clone(&count);
    let sub = Subscription::new(move || counter.set(counter.get() + 1));
    sub.unsubscribe();
    assert_eq!(count.get(), 1);
}

#[test]
fn drop_runs_release_once() {
    let count = Rc::new(Cell::new(0));
    let counter = Rc::clone(&count);
    {
        let _sub = Subscription::new(move || counter.set(counter.get() + 1));
    }
    assert_eq!(count.get(), 1);
}

// =============================================================
// SessionListeners
// =============================================================

#[test]
fn emit_reaches_listeners_in_order() {
    let listeners = SessionListeners::new();
    let (seen, listener) = recorder();
    let _sub = listeners.subscribe(listener);

    listeners.emit(AuthEvent::SignedIn, Some(&session("u1")));
    listeners.emit(AuthEvent::SignedOut, None);

    assert_eq!(
        *seen.borrow(),
        vec![(AuthEvent::SignedIn, Some("u1".to_owned())), (AuthEvent::SignedOut, None)]
    );
}

#[test]
fn unsubscribed_listener_gets_nothing() {
    let listeners = SessionListeners::new();
    let (seen, listener) = recorder();
    let sub = listeners.subscribe(listener);
    assert_eq!(listeners.len(), 1);

    sub.unsubscribe();
    listeners.emit(AuthEvent::SignedIn, Some(&session("u1")));

    assert!(listeners.is_empty());
    assert!(seen.borrow().is_empty());
}

#[test]
fn unsubscribe_only_removes_own_entry() {
    let listeners = SessionListeners::new();
    let (first_seen, first) = recorder();
    let (second_seen, second) = recorder();
    let first_sub = listeners.subscribe(first);
    let _second_sub = listeners.subscribe(second);

    drop(first_sub);
    listeners.emit(AuthEvent::TokenRefreshed, Some(&session("u1")));

    assert!(first_seen.borrow().is_empty());
    assert_eq!(second_seen.borrow().len(), 1);
}

#[test]
fn release_after_registry_dropped_is_noop() {
    let listeners = SessionListeners::new();
    let (_seen, listener) = recorder();
    let sub = listeners.subscribe(listener);
    drop(listeners);
    sub.unsubscribe();
}

#[test]
fn listener_may_unsubscribe_during_delivery() {
    let listeners = Rc::new(SessionListeners::new());
    let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
    let calls = Rc::new(Cell::new(0));

    let slot_inner = Rc::clone(&slot);
    let calls_inner = Rc::clone(&calls);
    let sub = listeners.subscribe(Rc::new(move |_, _| {
        calls_inner.set(calls_inner.get() + 1);
        slot_inner.borrow_mut().take();
    }));
    *slot.borrow_mut() = Some(sub);

    listeners.emit(AuthEvent::SignedOut, None);
    listeners.emit(AuthEvent::SignedOut, None);

    assert_eq!(calls.get(), 1);
    assert!(listeners.is_empty());
}

#[test]
fn provider_error_displays_message() {
    let err = ProviderError::with_status("Invalid login credentials", 400);
    assert_eq!(err.to_string(), "Invalid login credentials");
    assert_eq!(err.status, Some(400));
}
