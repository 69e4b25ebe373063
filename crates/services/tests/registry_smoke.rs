use services::{SessionConfig, SessionKey, SessionRegistry};
use study_core::time::fixed_clock;

#[test]
fn sessions_are_isolated_per_key() {
    let mut registry = SessionRegistry::new(fixed_clock(), SessionConfig::default());
    let alice = SessionKey::new("alice");
    let bob = SessionKey::new("bob");

    registry.session(&alice).set_name("Alice").unwrap();
    registry.session(&alice).add_subject("Math", 2).unwrap();
    registry.session(&bob).post_question("Bob", "Help?").unwrap();

    assert_eq!(registry.len(), 2);

    let alice_session = registry.get(&alice).unwrap();
    assert_eq!(alice_session.progress().points, 10);
    assert_eq!(alice_session.forum().question_count(), 0);

    let bob_session = registry.get(&bob).unwrap();
    assert_eq!(bob_session.progress().points, 2);
    assert_eq!(bob_session.learner_name(), "");
    assert!(bob_session.study_plan().is_empty());
}

#[test]
fn first_access_creates_and_end_drops() {
    let mut registry = SessionRegistry::default();
    let key = SessionKey::new("k");
    assert!(registry.is_empty());
    assert!(registry.get(&key).is_none());

    registry.session(&key).set_name("Kim").unwrap();
    assert_eq!(registry.session(&key).learner_name(), "Kim");
    assert_eq!(registry.len(), 1);

    assert!(registry.end_session(&key));
    assert!(!registry.end_session(&key));
    assert_eq!(registry.session(&key).learner_name(), "");
}
