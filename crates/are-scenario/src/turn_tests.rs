use super::*;
use are_core::{Action, Event, EventId, EventMeta};

fn agent_event(id: &str, function_name: &str) -> Event {
    let action = Action::new("AgentUserInterface", function_name);
    Event::agent(EventMeta::new(EventId::from_string(id)), Some(action))
}

fn user_event(id: &str) -> Event {
    Event::user(EventMeta::new(EventId::from_string(id)), None)
}

fn link(mut child: Event, parent: &Event) -> Event {
    child.meta_mut().dependencies.push(parent.id().clone());
    child
}

#[test]
fn turn_increments_after_each_send_message_to_user() {
    let u1 = user_event("u1");
    let reply1 = link(agent_event("a1", "send_message_to_user"), &u1);
    let u2 = link(user_event("u2"), &reply1);
    let reply2 = link(agent_event("a2", "send_message_to_user"), &u2);

    let turns = recompute_turn_idx(&[u1.clone(), reply1.clone(), u2.clone(), reply2.clone()]).unwrap();
    assert_eq!(turns[u1.id()], 0);
    assert_eq!(turns[reply1.id()], 0);
    assert_eq!(turns[u2.id()], 1);
    assert_eq!(turns[reply2.id()], 1);
}

#[test]
fn instant_turns_are_exempt_from_the_accumulated_time_check() {
    let u1 = user_event("u1");
    let mut tool_call = link(agent_event("a1", "search"), &u1);
    tool_call.meta_mut().event_relative_time = Some(0.0);
    tool_call.meta_mut().event_time = Some(0.0);
    let mut reply = link(agent_event("a2", "send_message_to_user"), &tool_call);
    reply.meta_mut().event_relative_time = Some(1.0);
    reply.meta_mut().event_time = Some(1.0);

    validate_turn_times(&[u1, tool_call, reply]).unwrap();
}

#[test]
fn an_event_may_not_exceed_its_turn_s_closing_accumulated_time() {
    let mut u1 = user_event("u1");
    u1.meta_mut().event_time = Some(0.0);
    let mut tool_call = link(agent_event("a1", "search"), &u1);
    tool_call.meta_mut().event_relative_time = Some(30.0);
    tool_call.meta_mut().event_time = Some(30.0);
    let mut reply = link(agent_event("a2", "send_message_to_user"), &u1);
    reply.meta_mut().event_relative_time = Some(5.0);
    reply.meta_mut().event_time = Some(5.0);

    let err = validate_turn_times(&[u1, tool_call, reply]).unwrap_err();
    assert!(matches!(err, AuthoringError::TurnTimeViolation(_, _)));
}

#[test]
fn a_closing_send_message_to_user_must_equal_not_just_bound_the_max_accumulated_time() {
    let mut u1 = user_event("u1");
    u1.meta_mut().event_time = Some(0.0);
    let mut tool_call = link(agent_event("a1", "search"), &u1);
    tool_call.meta_mut().event_relative_time = Some(10.0);
    tool_call.meta_mut().event_time = Some(10.0);
    let mut reply = link(agent_event("a2", "send_message_to_user"), &u1);
    reply.meta_mut().event_relative_time = Some(20.0);
    reply.meta_mut().event_time = Some(20.0);

    // Nothing in the turn exceeds the closing reply's accumulated time, but
    // the reply's own accumulated time (20s) doesn't equal the max of the
    // other events in the turn (10s), which the equality rule now catches.
    let err = validate_turn_times(&[u1, tool_call, reply]).unwrap_err();
    assert!(matches!(err, AuthoringError::TurnTimeViolation(_, _)));
}

#[test]
fn predecessors_spanning_two_turns_are_rejected() {
    let mut u1 = user_event("u1");
    u1.meta_mut().event_time = Some(0.0);
    let mut reply1 = link(agent_event("a1", "send_message_to_user"), &u1);
    reply1.meta_mut().event_time = Some(1.0);
    let mut u2 = link(user_event("u2"), &reply1);
    u2.meta_mut().event_time = Some(2.0);

    let mut mixed = agent_event("a2", "search");
    mixed.meta_mut().dependencies.push(reply1.id().clone());
    mixed.meta_mut().dependencies.push(u2.id().clone());
    mixed.meta_mut().event_time = Some(3.0);

    let err = validate_turn_times(&[u1, reply1, u2, mixed]).unwrap_err();
    assert!(matches!(err, AuthoringError::TurnTimeViolation(_, _)));
}
