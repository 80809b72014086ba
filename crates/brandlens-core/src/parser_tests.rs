use super::*;
use serde_json::json;

#[test]
fn test_parse_bare_json() {
    let value = parse_analysis(r#"  {"summary": "Confident", "keywords": ["bold"]}  "#).unwrap();
    assert_eq!(value, json!({"summary": "Confident", "keywords": ["bold"]}));
}

#[test]
fn test_parse_fenced_json() {
    let reply = "```json\n{\"summary\": \"Warm and plain\"}\n```";
    let first = parse_analysis(reply).unwrap();
    let second = parse_analysis(reply).unwrap();
    assert_eq!(first, json!({"summary": "Warm and plain"}));
    assert_eq!(first, second);
}

#[test]
fn test_parse_bare_fence_with_prose() {
    let reply = "Here is the analysis:\n```\n{\"archetype\": {\"primary\": \"Sage\"}}\n```\nHope this helps.";
    let value = parse_analysis(reply).unwrap();
    assert_eq!(value["archetype"]["primary"], "Sage");
}

#[test]
fn test_parse_brace_slice() {
    let reply = "Sure! {\"summary\": \"Playful\", \"tone_scores\": {\"warmth\": 80}} Let me know.";
    let value = parse_analysis(reply).unwrap();
    assert_eq!(value["tone_scores"]["warmth"], 80);
}

#[test]
fn test_parse_rejects_non_object() {
    let err = parse_analysis("[1, 2, 3]").unwrap_err();
    assert!(err.reason.contains("array"));
    assert_eq!(err.raw, "[1, 2, 3]");

    let err = parse_analysis("\"just a string\"").unwrap_err();
    assert!(err.reason.contains("string"));
}

#[test]
fn test_parse_failure_keeps_raw() {
    let reply = "I'm sorry, I can't analyze that page.";
    let err = parse_analysis(reply).unwrap_err();
    assert_eq!(err.raw, reply);
    assert_eq!(err.to_string(), "no JSON object found in reply");
}

#[test]
fn test_parse_empty_reply() {
    let err = parse_analysis("   \n").unwrap_err();
    assert_eq!(err.reason, "empty reply");
}

#[test]
fn test_parse_broken_json_in_fence() {
    let err = parse_analysis("```json\n{\"summary\": \n```").unwrap_err();
    assert!(err.raw.contains("summary"));
}

#[test]
fn test_strip_code_fences() {
    assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
    assert_eq!(strip_code_fences("```JSON\n{\"a\":1}\n```"), "{\"a\":1}");
    assert_eq!(strip_code_fences("```{\"a\":1}```"), "{\"a\":1}");
    assert_eq!(strip_code_fences("no fences here"), "no fences here");
    assert_eq!(strip_code_fences("```\n{\"open\": true}"), "{\"open\": true}");
}
