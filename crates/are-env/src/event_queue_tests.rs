use super::*;
use are_core::EventMeta;

fn stop(id: &str) -> Event {
    Event::stop(EventMeta::new(EventId::from_string(id)))
}

#[test]
fn an_event_without_dependencies_is_scheduled_immediately() {
    let mut queue = EventQueue::new(0.0);
    queue.schedule(stop("a"));
    assert_eq!(queue.peek_time(), Some(0.0));
    assert_eq!(queue.pending_len(), 0);
}

#[test]
fn an_event_with_an_unresolved_dependency_stays_pending() {
    let mut queue = EventQueue::new(0.0);
    let mut dependent = stop("b");
    dependent.meta_mut().dependencies.push(EventId::from_string("a"));
    queue.schedule(dependent);

    assert_eq!(queue.peek_time(), None);
    assert_eq!(queue.pending_len(), 1);
}

#[test]
fn marking_a_dependency_resolved_promotes_the_pending_event() {
    let mut queue = EventQueue::new(0.0);
    let mut dependent = stop("b");
    dependent.meta_mut().dependencies.push(EventId::from_string("a"));
    dependent.meta_mut().event_relative_time = Some(5.0);
    queue.schedule(dependent);

    queue.mark_resolved(EventId::from_string("a"), 10.0);

    assert_eq!(queue.pending_len(), 0);
    assert_eq!(queue.peek_time(), Some(15.0));
}

#[test]
fn pop_ready_returns_events_in_time_order() {
    let mut queue = EventQueue::new(0.0);
    let mut first = stop("a");
    first.meta_mut().event_time = Some(1.0);
    let mut second = stop("b");
    second.meta_mut().event_time = Some(2.0);
    queue.schedule(second);
    queue.schedule(first);

    assert_eq!(queue.pop_ready().unwrap().id(), &EventId::from_string("a"));
    assert_eq!(queue.pop_ready().unwrap().id(), &EventId::from_string("b"));
    assert!(queue.pop_ready().is_none());
}

#[test]
fn is_empty_accounts_for_both_ready_and_pending_events() {
    let mut queue = EventQueue::new(0.0);
    assert!(queue.is_empty());

    let mut dependent = stop("b");
    dependent.meta_mut().dependencies.push(EventId::from_string("a"));
    queue.schedule(dependent);
    assert!(!queue.is_empty());
}

#[test]
fn reschedule_at_moves_an_events_time_directly() {
    let mut queue = EventQueue::new(0.0);
    queue.reschedule_at(stop("a"), 42.0);
    assert_eq!(queue.peek_time(), Some(42.0));
}

#[test]
fn reschedule_renamed_repoints_pending_dependents_onto_the_new_id() {
    let mut queue = EventQueue::new(0.0);
    let mut dependent = stop("dependent");
    dependent.meta_mut().dependencies.push(EventId::from_string("c1"));
    queue.schedule(dependent);
    assert_eq!(queue.pending_len(), 1);

    let mut renamed = stop("c1-CHECK_1");
    renamed.meta_mut().event_time = Some(5.0);
    queue.reschedule_renamed(&EventId::from_string("c1"), renamed);

    assert_eq!(queue.pending_len(), 1);
    queue.mark_resolved(EventId::from_string("c1-CHECK_1"), 5.0);
    assert_eq!(queue.pending_len(), 0, "dependent should have promoted once the renamed id resolved");
}
