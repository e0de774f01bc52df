use chrono::{Duration, Utc};
use session::{AuthState, Clock, ManualClock, SessionConfig, SessionManager, Turn};
use std::sync::Arc;

fn manager() -> (Arc<SessionManager>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let manager = Arc::new(SessionManager::with_clock(
        SessionConfig::default(),
        clock.clone(),
    ));
    (manager, clock)
}

#[tokio::test]
async fn test_get_or_create_returns_same_entry() {
    let (manager, _) = manager();

    let first = manager.get_or_create(7).await;
    first.lock().await.authenticate("sk-ant-api03-abcdefgh");
    let second = manager.get_or_create(7).await;

    assert!(Arc::ptr_eq(&first, &second));
    assert!(second.lock().await.is_authenticated());
    assert_eq!(manager.len().await, 1);
}

#[tokio::test]
async fn test_fresh_entry_is_unauthenticated() {
    let (manager, _) = manager();
    let handle = manager.get_or_create(7).await;
    let entry = handle.lock().await;
    assert_eq!(*entry.auth_state(), AuthState::Unauthenticated);
    assert!(entry.history().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_get_or_create_inserts_once() {
    let (manager, _) = manager();
    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let manager = manager.clone();
            tokio::spawn(async move { manager.get_or_create(99).await })
        })
        .collect();

    let mut handles = Vec::new();
    for task in tasks {
        handles.push(task.await.unwrap());
    }

    assert_eq!(manager.len().await, 1);
    assert!(handles.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}

#[tokio::test]
async fn test_reset_is_idempotent() {
    let (manager, _) = manager();
    {
        let mut session = manager.acquire(7).await;
        session.authenticate("sk-ant-api03-abcdefgh");
        session.record_exchange("hi", "hello");
    }

    manager.reset(7).await;
    let once = manager.snapshot(7).await.unwrap();
    manager.reset(7).await;
    let twice = manager.snapshot(7).await.unwrap();

    assert_eq!(once.auth_state(), twice.auth_state());
    assert_eq!(once.history(), twice.history());
    assert!(twice.api_key().is_none());
    assert!(twice.history().is_empty());
}

#[tokio::test]
async fn test_is_expired_and_touch() {
    let (manager, clock) = manager();
    assert!(!manager.is_expired(7).await, "unknown users are never expired");

    manager.get_or_create(7).await;
    clock.advance(Duration::hours(25));
    assert!(manager.is_expired(7).await);

    manager.touch(7).await;
    assert!(!manager.is_expired(7).await);
}

#[tokio::test]
async fn test_acquire_resets_expired_entry() {
    let (manager, clock) = manager();
    {
        let mut session = manager.acquire(7).await;
        session.authenticate("sk-ant-api03-abcdefgh");
        session.push_turn(Turn::user("hi"));
        assert!(!session.was_expired());
    }

    clock.advance(Duration::hours(25));
    let session = manager.acquire(7).await;

    assert!(session.was_expired());
    assert!(session.expired_while_authenticated());
    assert!(!session.is_authenticated());
    assert!(session.history().is_empty());
    assert_eq!(session.last_activity(), clock.now());
}

#[tokio::test]
async fn test_sweep_removes_only_idle_expired_entries() {
    let (manager, clock) = manager();
    manager.get_or_create(1).await;
    manager.get_or_create(2).await;
    manager.get_or_create(3).await;

    clock.advance(Duration::hours(25));
    manager.touch(2).await;
    let held = manager.get_or_create(3).await;

    let removed = manager.sweep_expired().await;

    assert_eq!(removed, 1);
    assert_eq!(manager.len().await, 2);
    assert!(manager.snapshot(1).await.is_none());
    assert!(manager.snapshot(2).await.is_some());
    assert!(manager.is_expired(3).await);

    drop(held);
    assert_eq!(manager.sweep_expired().await, 1);
    assert!(manager.snapshot(3).await.is_none());
}

#[tokio::test]
async fn test_sweep_skips_locked_entry() {
    let (manager, clock) = manager();
    let guard = manager.acquire(5).await;
    clock.advance(Duration::hours(25));

    assert_eq!(manager.sweep_expired().await, 0);
    drop(guard);
    assert_eq!(manager.sweep_expired().await, 1);
    assert!(manager.is_empty().await);
}
