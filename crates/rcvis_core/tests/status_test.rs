//! Tests for the movie generation status machine.

use rcvis_core::MovieGenerationStatus::{self, *};
use std::str::FromStr;
use strum::IntoEnumIterator;

#[test]
fn test_default_is_not_requested() {
    assert_eq!(MovieGenerationStatus::default(), NotRequested);
}

#[test]
fn test_happy_path_is_allowed() {
    let path = [NotRequested, NotStarted, InProgress, Complete];
    for pair in path.windows(2) {
        assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
    }
    assert!(InProgress.can_transition_to(Failed));
}

#[test]
fn test_unstarted_job_can_fail() {
    assert!(NotStarted.can_transition_to(Failed));
    assert!(!NotRequested.can_transition_to(Failed));
}

#[test]
fn test_new_attempts_and_failures_clear_movies() {
    let clearing: Vec<_> = MovieGenerationStatus::iter()
        .filter(|s| s.clears_movies())
        .collect();
    assert_eq!(clearing, vec![NotStarted, Failed]);
}

#[test]
fn test_no_skipping_or_going_back() {
    assert!(!NotRequested.can_transition_to(InProgress));
    assert!(!NotStarted.can_transition_to(Complete));
    assert!(!InProgress.can_transition_to(NotStarted));
    assert!(!Complete.can_transition_to(Failed));
    assert!(!Failed.can_transition_to(InProgress));
}

#[test]
fn test_only_terminal_or_fresh_states_accept_requests() {
    let accepting: Vec<_> = MovieGenerationStatus::iter()
        .filter(|s| s.accepts_request())
        .collect();
    assert_eq!(accepting, vec![NotRequested, Complete, Failed]);
}

#[test]
fn test_string_form_matches_wire_names() {
    assert_eq!(NotStarted.to_string(), "NOT_STARTED");
    assert_eq!(MovieGenerationStatus::from_str("IN_PROGRESS").unwrap(), InProgress);
    assert_eq!(serde_json::to_string(&Failed).unwrap(), "\"FAILED\"");
}
