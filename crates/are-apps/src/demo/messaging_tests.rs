use super::*;
use serde_json::json;

fn args(content: &str) -> IndexMap<String, Value> {
    IndexMap::from([("content".to_string(), json!(content))])
}

#[test]
fn messages_are_recorded_in_order_with_direction() {
    let app = AgentUserInterfaceApp::new();
    app.call(SEND_MESSAGE_TO_AGENT, &args("hi agent")).unwrap();
    app.call(SEND_MESSAGE_TO_USER, &args("hi user")).unwrap();

    let transcript = app.call("get_transcript", &IndexMap::new()).unwrap();
    assert_eq!(
        transcript,
        json!([
            {"direction": "user_to_agent", "content": "hi agent"},
            {"direction": "agent_to_user", "content": "hi user"},
        ])
    );
}

#[test]
fn unknown_function_is_rejected() {
    let app = AgentUserInterfaceApp::new();
    assert!(app.call("delete_conversation", &IndexMap::new()).is_err());
}
