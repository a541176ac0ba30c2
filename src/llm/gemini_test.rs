use super::*;

fn make_response(candidates: serde_json::Value) -> String {
    serde_json::json!({
        "candidates": candidates,
        "usageMetadata": {
            "promptTokenCount": 120,
            "candidatesTokenCount": 40,
            "totalTokenCount": 160
        },
        "modelVersion": "gemini-3-flash-preview"
    })
    .to_string()
}

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([
        { "content": { "role": "model", "parts": [{ "text": "The dog sat on the mat." }] }, "finishReason": "STOP" }
    ]));
    let resp = parse_response(&json, "gemini-3-flash-preview").unwrap();
    assert_eq!(resp.text, "The dog sat on the mat.");
    assert_eq!(resp.model, "gemini-3-flash-preview");
    assert_eq!(resp.input_tokens, 120);
    assert_eq!(resp.output_tokens, 40);
}

#[test]
fn parse_joins_multiple_parts() {
    let json = make_response(serde_json::json!([
        { "content": { "parts": [{ "text": "Hello " }, { "text": "world" }] } }
    ]));
    let resp = parse_response(&json, "m").unwrap();
    assert_eq!(resp.text, "Hello world");
}

#[test]
fn parse_no_candidates_is_empty_text() {
    // Safety-blocked prompts come back with no candidates at all.
    let json = serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string();
    let resp = parse_response(&json, "m").unwrap();
    assert!(resp.text.is_empty());
    assert_eq!(resp.input_tokens, 0);
    assert_eq!(resp.output_tokens, 0);
}

#[test]
fn parse_candidate_without_content_is_empty_text() {
    let json = make_response(serde_json::json!([{ "finishReason": "MAX_TOKENS" }]));
    let resp = parse_response(&json, "m").unwrap();
    assert!(resp.text.is_empty());
}

#[test]
fn parse_skips_non_text_parts() {
    let json = make_response(serde_json::json!([
        { "content": { "parts": [{ "inlineData": { "mimeType": "image/png" } }, { "text": "ok" }] } }
    ]));
    let resp = parse_response(&json, "m").unwrap();
    assert_eq!(resp.text, "ok");
}

#[test]
fn parse_invalid_json() {
    let result = parse_response("not json", "m");
    assert!(matches!(result.unwrap_err(), LlmError::ApiParse(_)));
}
