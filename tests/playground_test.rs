use promptdeck::constants::DEFAULT_SYSTEM_PROMPT;
use promptdeck::log_record::{HistoricalLogRecord, LogContent};
use promptdeck::playground::ConversationStore;
use promptdeck::router::{ChannelNavigator, Route};
use promptdeck::*;
use std::sync::Arc;

fn log_with(prompt: Option<&str>, response: Option<&str>) -> HistoricalLogRecord {
    HistoricalLogRecord {
        id: Some(1),
        provider: Some("openai".to_string()),
        model: Some("gpt-4".to_string()),
        content: Some(LogContent {
            prompt: prompt.map(str::to_string),
            response: response.map(str::to_string),
            error: None,
        }),
        ..Default::default()
    }
}

#[test]
fn test_malformed_prompts_become_one_raw_user_message() {
    for raw in [
        "{",
        "[{\"role\":\"user\"",
        "hello world",
        "{'role': 'user'}",
        "[1,]",
        "null",
    ] {
        let mut store = ConversationStore::default();
        store.load_from_log(&log_with(Some(raw), None));
        assert_eq!(store.messages(), &[Message::user(raw)], "prompt {:?}", raw);
    }
}

#[test]
fn test_system_and_user_with_response() {
    let mut store = ConversationStore::default();
    store.load_from_log(&log_with(
        Some(r#"[{"role":"system","content":"S"},{"role":"user","content":"U"}]"#),
        Some("R"),
    ));

    let state = store.state();
    assert_eq!(state.system_prompt, "S");
    assert_eq!(state.messages, vec![Message::user("U"), Message::assistant("R")]);
    assert_eq!(state.model, "openai/gpt-4");
}

#[test]
fn test_single_object_prompt() {
    let mut store = ConversationStore::default();
    store.load_from_log(&log_with(Some(r#"{"role":"user","content":"hi"}"#), None));
    assert_eq!(store.messages(), &[Message::user("hi")]);
    assert_eq!(store.state().system_prompt, DEFAULT_SYSTEM_PROMPT);
}

#[test]
fn test_single_object_without_role_defaults_to_user() {
    let mut store = ConversationStore::default();
    store.load_from_log(&log_with(Some(r#"{"content":"hi"}"#), None));
    assert_eq!(store.messages(), &[Message::user("hi")]);
}

#[test]
fn test_single_system_object_sets_prompt_only() {
    let mut store = ConversationStore::default();
    store.load_from_log(&log_with(Some(r#"{"role":"system","content":"rules"}"#), None));
    assert!(store.messages().is_empty());
    assert_eq!(store.state().system_prompt, "rules");
}

#[test]
fn test_scalar_prompts() {
    let mut store = ConversationStore::default();
    store.load_from_log(&log_with(Some(r#""just text""#), None));
    assert_eq!(store.messages(), &[Message::user("just text")]);

    store.load_from_log(&log_with(Some("3.25"), None));
    assert_eq!(store.messages(), &[Message::user("3.25")]);

    store.load_from_log(&log_with(Some("true"), None));
    assert_eq!(store.messages(), &[Message::user("true")]);
}

#[test]
fn test_unknown_roles_pass_through() {
    let mut store = ConversationStore::default();
    store.load_from_log(&log_with(
        Some(r#"[{"role":"user","content":"call it"},{"role":"tool","content":{"ok":true}}]"#),
        None,
    ));
    assert_eq!(
        store.messages(),
        &[
            Message::user("call it"),
            Message::new(Role::Other("tool".to_string()), r#"{"ok":true}"#),
        ]
    );
}

#[test]
fn test_two_system_entries_last_wins() {
    let mut store = ConversationStore::default();
    store.load_from_log(&log_with(
        Some(r#"[{"role":"system","content":"S1"},{"role":"system","content":"S2"}]"#),
        None,
    ));
    assert_eq!(store.state().system_prompt, "S2");
    assert!(store.messages().is_empty());
}

#[test]
fn test_second_load_replaces_first() {
    let mut store = ConversationStore::default();
    store.load_from_log(&log_with(
        Some(r#"[{"role":"user","content":"A1"},{"role":"assistant","content":"A2"}]"#),
        Some("A3"),
    ));
    store.load_from_log(&log_with(Some(r#""B1""#), Some("B2")));

    assert_eq!(
        store.messages(),
        &[Message::user("B1"), Message::assistant("B2")]
    );
}

#[test]
fn test_model_kept_when_record_lacks_provider() {
    let mut store = ConversationStore::default();
    store.set_model("anthropic/claude-3");

    let mut record = log_with(Some(r#""x""#), None);
    record.provider = None;
    store.load_from_log(&record);

    assert_eq!(store.state().model, "anthropic/claude-3");
}

#[test]
fn test_record_without_content_only_clears() {
    let mut store = ConversationStore::default();
    store.append_message(TurnRole::User, "draft");

    let record = HistoricalLogRecord::from_json(r#"{"provider":"ollama","model":"llama3"}"#)
        .unwrap();
    store.load_from_log(&record);

    assert!(store.messages().is_empty());
    assert_eq!(store.state().model, "ollama/llama3");
}

#[test]
fn test_empty_prompt_falls_back_to_empty_user_turn() {
    let mut store = ConversationStore::default();
    store.load_from_log(&log_with(Some(""), None));
    assert_eq!(store.messages(), &[Message::user("")]);
}

#[test]
fn test_empty_response_is_still_a_turn() {
    let mut store = ConversationStore::default();
    store.load_from_log(&log_with(Some(r#""q""#), Some("")));
    assert_eq!(
        store.messages(),
        &[Message::user("q"), Message::assistant("")]
    );
}

#[test]
fn test_null_prompt_and_response_add_nothing() {
    let mut store = ConversationStore::default();
    store.load_from_log(&log_with(None, None));
    assert!(store.messages().is_empty());
}

#[test]
fn test_response_is_never_parsed() {
    let mut store = ConversationStore::default();
    store.load_from_log(&log_with(None, Some(r#"{"role":"system","content":"x"}"#)));
    assert_eq!(
        store.messages(),
        &[Message::assistant(r#"{"role":"system","content":"x"}"#)]
    );
    assert_eq!(store.state().system_prompt, DEFAULT_SYSTEM_PROMPT);
}

#[test]
fn test_update_and_remove_out_of_range_are_no_ops() {
    let mut store = ConversationStore::default();
    store.append_message(TurnRole::User, "a");
    store.append_message(TurnRole::Assistant, "b");

    store.update_message(99, "x");
    assert_eq!(
        store.messages(),
        &[Message::user("a"), Message::assistant("b")]
    );

    store.remove_message(0);
    assert_eq!(store.messages(), &[Message::assistant("b")]);
}

#[test]
fn test_each_load_requests_the_playground_once() {
    let (nav, mut rx) = ChannelNavigator::new();
    let mut store = ConversationStore::new(Arc::new(nav));

    store.load_from_log(&log_with(Some(r#""one""#), None));
    store.load_from_log(&log_with(Some("{broken"), Some("two")));

    assert_eq!(rx.try_recv().ok(), Some(Route::Playground));
    assert_eq!(rx.try_recv().ok(), Some(Route::Playground));
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_loaded_conversation_replays_as_chat_request() {
    let mut store = ConversationStore::default();
    store.load_from_log(&log_with(
        Some(r#"[{"role":"system","content":"S"},{"role":"user","content":"U"}]"#),
        Some("R"),
    ));
    store.set_streaming_enabled(false);

    let body = serde_json::to_value(store.state().replay_request()).unwrap();
    assert_eq!(body["model"], "openai/gpt-4");
    assert_eq!(body["stream"], false);
    let roles: Vec<&str> = body["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["role"].as_str().unwrap())
        .collect();
    assert_eq!(roles, vec!["system", "user", "assistant"]);
}
