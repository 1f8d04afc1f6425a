use super::*;
use serde_json::json;

fn args(pairs: &[(&str, Value)]) -> IndexMap<String, Value> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

#[test]
fn turning_off_a_light_is_observable_through_app_state() {
    let app = SmartHomeApp::new();
    app.add_light("kitchen", true);
    assert!(!app.any_light_off());

    app.call("set_light", &args(&[("name", json!("kitchen")), ("on", json!(false))])).unwrap();
    assert!(app.any_light_off());
}

#[test]
fn thermostat_and_lock_and_camera_default_to_a_safe_state() {
    let app = SmartHomeApp::new();
    assert!(app.door_locked());
    assert!(app.camera_recording());
    assert_eq!(app.thermostat_f(), 70.0);
}

#[test]
fn unlocking_the_door_is_reflected_in_state() {
    let app = SmartHomeApp::new();
    app.call("set_door_lock", &args(&[("locked", json!(false))])).unwrap();
    assert!(!app.door_locked());
}
