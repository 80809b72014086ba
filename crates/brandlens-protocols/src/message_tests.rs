use super::*;
use serde_json::json;

#[test]
fn test_action_parse_round_trips_names() {
    for action in Action::ALL {
        assert_eq!(Action::parse(action.as_str()), Some(action));
    }
    assert_eq!(Action::parse("analyzepage"), None);
    assert_eq!(Action::parse("deleteEverything"), None);
}

#[test]
fn test_action_serde_matches_as_str() {
    let json = serde_json::to_string(&Action::AnalyzePage).unwrap();
    assert_eq!(json, "\"analyzePage\"");
    assert_eq!(Action::ClearCache.to_string(), "clearCache");
}

#[test]
fn test_request_without_payload() {
    let req: Request = serde_json::from_value(json!({ "action": "ping" })).unwrap();
    assert_eq!(req.action, "ping");
    assert!(req.id.is_none());
    assert!(req.payload.is_null());
}

#[test]
fn test_request_new_assigns_id() {
    let req = Request::new(Action::Analyze, json!({ "text": "hello" }));
    assert!(req.id.is_some());
    assert_eq!(req.action, "analyze");
}

#[test]
fn test_response_ok_shape() {
    let resp = Response::ok(Some("1".to_string()), json!({ "pong": true }));
    let value = serde_json::to_value(&resp).unwrap();
    assert_eq!(value, json!({ "id": "1", "success": true, "data": { "pong": true } }));
}

#[test]
fn test_response_err_has_no_data() {
    let resp = Response::err(None, "Network error: refused");
    assert!(!resp.success);
    assert!(resp.data.is_none());
    assert_eq!(resp.error.as_deref(), Some("Network error: refused"));
}

#[test]
fn test_response_err_never_blank() {
    let resp = Response::err(None, "   ");
    assert_eq!(resp.error.as_deref(), Some("Unknown error"));
}
