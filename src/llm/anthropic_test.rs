use super::*;

fn make_response(content: serde_json::Value) -> String {
    serde_json::json!({
        "id": "msg_123",
        "type": "message",
        "role": "assistant",
        "content": content,
        "model": "claude-sonnet-4-5-20250929",
        "stop_reason": "end_turn",
        "usage": { "input_tokens": 100, "output_tokens": 50 }
    })
    .to_string()
}

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([
        { "type": "text", "text": "Hello world" }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.text, "Hello world");
    assert_eq!(resp.model, "claude-sonnet-4-5-20250929");
    assert_eq!(resp.input_tokens, 100);
    assert_eq!(resp.output_tokens, 50);
}

#[test]
fn parse_joins_text_blocks() {
    let json = make_response(serde_json::json!([
        { "type": "text", "text": "line one" },
        { "type": "text", "text": "line two" }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.text, "line one\nline two");
}

#[test]
fn parse_unknown_blocks_filtered() {
    let json = make_response(serde_json::json!([
        { "type": "thinking", "thinking": "Let me think..." },
        { "type": "text", "text": "answer" }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.text, "answer");
}

#[test]
fn parse_empty_content_is_empty_text() {
    let json = make_response(serde_json::json!([]));
    let resp = parse_response(&json).unwrap();
    assert!(resp.text.is_empty());
}

#[test]
fn parse_invalid_json() {
    let result = parse_response("not json");
    assert!(matches!(result.unwrap_err(), LlmError::ApiParse(_)));
}
