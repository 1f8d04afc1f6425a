use super::*;
use are_env::{Environment, EnvironmentConfig, TickOutcome, ToolAugmentationConfig};
use are_judge::{AgentEventJudge, ArgCheckerConfig, CheckerType, EventTimeConfig, GraphPerEventJudge, MildToolJudge, SoftCheckContext};
use std::collections::HashMap;

fn run_to_completion(scenario: &ExtraMessageScenario) -> Vec<are_core::CompletedEvent> {
    let registry = scenario.init_and_populate_apps();
    let events = scenario.build_events_flow(&registry);
    let env = Environment::new(EnvironmentConfig::default(), ToolAugmentationConfig::none(), registry);
    for event in events {
        env.schedule(event);
    }
    loop {
        match env.tick().unwrap() {
            TickOutcome::Executed(_) => continue,
            TickOutcome::Stopped | TickOutcome::QueueEmpty => break,
        }
    }
    env.log_entries()
}

fn judge() -> GraphPerEventJudge {
    let mut tool_judges = HashMap::new();
    tool_judges.insert(
        "AgentUserInterface__send_message_to_user".to_string(),
        MildToolJudge::hard_only(ArgCheckerConfig::new().with_checker("content", CheckerType::Eq)),
    );
    GraphPerEventJudge::new(AgentEventJudge::new(EventTimeConfig::default(), tool_judges))
}

#[test]
fn two_agent_messages_against_one_oracle_message() {
    let scenario = ExtraMessageScenario;
    let log = run_to_completion(&scenario);
    assert_eq!(log.iter().filter(|e| e.action.is_some()).count(), 2);
    assert_eq!(scenario.oracle_events().len(), 1);
}

#[test]
fn passes_with_tolerance_of_one() {
    let scenario = ExtraMessageScenario;
    let log = run_to_completion(&scenario);
    let judgment = judge()
        .with_extra_send_message_to_user_allowed(1)
        .judge(&log, &scenario.oracle_events(), &SoftCheckContext::default())
        .unwrap();
    assert!(judgment.success, "{:?}", judgment.failure);
}

#[test]
fn fails_with_zero_tolerance() {
    let scenario = ExtraMessageScenario;
    let log = run_to_completion(&scenario);
    let judgment = judge()
        .with_extra_send_message_to_user_allowed(0)
        .judge(&log, &scenario.oracle_events(), &SoftCheckContext::default())
        .unwrap();
    assert!(!judgment.success);
}
