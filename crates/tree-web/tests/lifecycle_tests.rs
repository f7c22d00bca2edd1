// Host-side tests for page lifecycle handling.
// The crate is wasm-only, so the pure module is included directly.

#![allow(dead_code)]
mod lifecycle {
    include!("../src/lifecycle.rs");
}

use lifecycle::*;

fn hide(persisted: bool) -> PageTransition {
    PageTransition::Hide { persisted }
}

fn show(persisted: bool) -> PageTransition {
    PageTransition::Show { persisted }
}

#[test]
fn initial_pageshow_does_nothing() {
    let mut page = PageLifecycle::new();
    assert_eq!(page.on_transition(show(false)), LifecycleAction::Ignore);
    assert!(!page.is_suspended());
    assert!(!page.is_torn_down());
}

#[test]
fn back_forward_cache_round_trip_resumes() {
    let mut page = PageLifecycle::new();
    assert_eq!(page.on_transition(hide(true)), LifecycleAction::Suspend);
    assert!(page.is_suspended());
    assert!(!page.is_torn_down());
    assert_eq!(page.on_transition(show(true)), LifecycleAction::Resume);
    assert!(!page.is_suspended());

    // and it can happen again
    assert_eq!(page.on_transition(hide(true)), LifecycleAction::Suspend);
    assert_eq!(page.on_transition(show(true)), LifecycleAction::Resume);
}

#[test]
fn repeated_cached_hide_suspends_once() {
    let mut page = PageLifecycle::new();
    assert_eq!(page.on_transition(hide(true)), LifecycleAction::Suspend);
    assert_eq!(page.on_transition(hide(true)), LifecycleAction::Ignore);
    assert_eq!(page.on_transition(show(true)), LifecycleAction::Resume);
    assert_eq!(page.on_transition(show(true)), LifecycleAction::Ignore);
}

#[test]
fn unload_tears_down_once_and_is_final() {
    let mut page = PageLifecycle::new();
    assert_eq!(page.on_transition(hide(false)), LifecycleAction::Teardown);
    assert!(page.is_torn_down());
    assert_eq!(page.on_transition(hide(false)), LifecycleAction::Ignore);
    assert_eq!(page.on_transition(show(true)), LifecycleAction::Ignore);
}

#[test]
fn unload_while_cached_tears_down() {
    let mut page = PageLifecycle::new();
    page.on_transition(hide(true));
    assert_eq!(page.on_transition(hide(false)), LifecycleAction::Teardown);
    assert_eq!(page.on_transition(show(true)), LifecycleAction::Ignore);
}
