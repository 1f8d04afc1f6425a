use super::*;
use are_env::{Environment, EnvironmentConfig, TickOutcome, ToolAugmentationConfig};
use are_judge::{AgentEventJudge, ArgCheckerConfig, CheckerType, EventTimeConfig, GraphPerEventJudge, MildToolJudge, SoftCheckContext};
use std::collections::HashMap;

fn run_to_completion(scenario: &FindImageScenario) -> Vec<are_core::CompletedEvent> {
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

#[test]
fn validates_cleanly() {
    let scenario = FindImageScenario;
    let result = scenario.validate();
    assert!(result.is_ok(), "{:?}", result.errors);
}

#[test]
fn seeds_ten_text_files_and_one_image() {
    let scenario = FindImageScenario;
    let registry = scenario.init_and_populate_apps();
    let state = registry.app_state("SandboxFilesystem").unwrap();
    let files = state["files"].as_object().unwrap();
    assert_eq!(files.len(), 11);
    assert!(files.contains_key("llama.jpg"));
}

#[test]
fn reflexive_judgment_succeeds() {
    let scenario = FindImageScenario;
    let log = run_to_completion(&scenario);
    assert!(log.iter().any(|e| e.is_success()));

    let mut tool_judges = HashMap::new();
    tool_judges.insert(
        "AgentUserInterface__send_message_to_user".to_string(),
        MildToolJudge::hard_only(ArgCheckerConfig::new().with_checker("content", CheckerType::Eq)),
    );
    let judge = GraphPerEventJudge::new(AgentEventJudge::new(EventTimeConfig::default(), tool_judges));
    let judgment = judge.judge(&log, &scenario.oracle_events(), &SoftCheckContext::default()).unwrap();
    assert!(judgment.success, "{:?}", judgment.failure);
}
