//! Response accumulator shape tests: exclusivity groups and
//! emit-only-what-was-set serialization.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::Value;

use skillgate_core::protocol::response::{
    AudioControl, AudioPlayer, ResponseBuilder, ResponseWriter,
};

fn to_json(b: ResponseBuilder) -> Value {
    serde_json::to_value(b.into_envelope()).unwrap()
}

#[test]
fn untouched_builder_serializes_to_empty_response_object() {
    let s = serde_json::to_string(&ResponseBuilder::new().into_envelope()).unwrap();
    assert_eq!(s, r#"{"version":"1.0","response":{}}"#);
}

#[test]
fn plain_text_hello_matches_platform_contract_exactly() {
    let mut b = ResponseBuilder::new();
    b.plain_text("hello");
    let s = serde_json::to_string(&b.into_envelope()).unwrap();
    assert_eq!(
        s,
        r#"{"version":"1.0","response":{"outputSpeech":{"type":"PlainText","text":"hello"}}}"#
    );
}

#[test]
fn ssml_supersedes_plain_text() {
    let mut b = ResponseBuilder::new();
    b.plain_text("hello");
    b.ssml("<speak>hello</speak>");

    let v = to_json(b);
    let speech = &v["response"]["outputSpeech"];
    assert_eq!(speech["type"], "SSML");
    assert_eq!(speech["ssml"], "<speak>hello</speak>");
    assert!(speech.get("text").is_none());
}

#[test]
fn plain_text_supersedes_ssml() {
    let mut b = ResponseBuilder::new();
    b.ssml("<speak>hello</speak>");
    b.plain_text("hello");

    let v = to_json(b);
    let speech = &v["response"]["outputSpeech"];
    assert_eq!(speech["type"], "PlainText");
    assert_eq!(speech["text"], "hello");
    assert!(speech.get("ssml").is_none());
}

#[test]
fn reprompt_is_independent_of_output_speech() {
    let mut b = ResponseBuilder::new();
    b.ssml("<speak>hi</speak>");
    b.reprompt_plain_text("still there?");

    let v = to_json(b);
    assert_eq!(v["response"]["outputSpeech"]["type"], "SSML");
    let reprompt = &v["response"]["reprompt"]["outputSpeech"];
    assert_eq!(reprompt["type"], "PlainText");
    assert_eq!(reprompt["text"], "still there?");
}

#[test]
fn last_card_wins_across_shapes() {
    let mut b = ResponseBuilder::new();
    b.standard_card("t", "x", "small.png", "large.png");
    b.simple_card("title", "content");

    let v = to_json(b);
    let card = &v["response"]["card"];
    assert_eq!(card["type"], "Simple");
    assert_eq!(card["title"], "title");
    assert_eq!(card["content"], "content");
    assert!(card.get("image").is_none());
    assert!(card.get("text").is_none());
}

#[test]
fn standard_card_carries_image_urls() {
    let mut b = ResponseBuilder::new();
    b.standard_card("title", "text", "small.png", "large.png");

    let v = to_json(b);
    let card = &v["response"]["card"];
    assert_eq!(card["type"], "Standard");
    assert_eq!(card["image"]["smallImageUrl"], "small.png");
    assert_eq!(card["image"]["largeImageUrl"], "large.png");
    assert!(card.get("content").is_none());
}

#[test]
fn link_account_card_is_type_only() {
    let mut b = ResponseBuilder::new();
    b.simple_card("title", "content");
    b.link_account_card();

    let v = to_json(b);
    assert_eq!(v["response"]["card"], serde_json::json!({"type": "LinkAccount"}));
}

#[test]
fn session_end_flag_is_tristate() {
    let v = to_json(ResponseBuilder::new());
    assert!(v["response"].get("shouldEndSession").is_none());

    let mut b = ResponseBuilder::new();
    b.should_end_session(true);
    b.should_end_session(false);
    let v = to_json(b);
    assert_eq!(v["response"]["shouldEndSession"], false);
}

#[test]
fn last_play_directive_wins() {
    let mut b = ResponseBuilder::new();
    b.replace_all("t1", "https://cdn.example.com/1.mp3", 0);
    b.enqueue("t2", "https://cdn.example.com/2.mp3", "t1", 0);

    let v = to_json(b);
    let directives = v["response"]["directives"].as_array().unwrap();
    assert_eq!(directives.len(), 1);
    assert_eq!(directives[0]["type"], "AudioPlayer.Play");
    assert_eq!(directives[0]["playBehavior"], "ENQUEUE");
    let stream = &directives[0]["audioItem"]["stream"];
    assert_eq!(stream["token"], "t2");
    assert_eq!(stream["expectedPreviousToken"], "t1");
}

#[test]
fn replace_all_omits_expected_previous_token() {
    let mut b = ResponseBuilder::new();
    b.replace_all("t1", "https://cdn.example.com/1.mp3", 2500);

    let v = to_json(b);
    let stream = &v["response"]["directives"][0]["audioItem"]["stream"];
    assert_eq!(stream["url"], "https://cdn.example.com/1.mp3");
    assert_eq!(stream["offsetInMilliseconds"], 2500);
    assert!(stream.get("expectedPreviousToken").is_none());
}

#[test]
fn play_and_halt_groups_coexist_in_order() {
    let mut b = ResponseBuilder::new();
    b.clear_enqueued();
    b.replace_all("t1", "https://cdn.example.com/1.mp3", 0);

    let v = to_json(b);
    let directives = v["response"]["directives"].as_array().unwrap();
    assert_eq!(directives.len(), 2);
    assert_eq!(directives[0]["type"], "AudioPlayer.Play");
    assert_eq!(directives[1]["type"], "AudioPlayer.ClearQueue");
    assert_eq!(directives[1]["clearBehavior"], "CLEAR_ENQUEUED");
}

#[test]
fn last_halt_directive_wins() {
    let mut b = ResponseBuilder::new();
    b.clear_all();
    b.stop();

    let v = to_json(b);
    let directives = v["response"]["directives"].as_array().unwrap();
    assert_eq!(directives.len(), 1);
    assert_eq!(directives[0], serde_json::json!({"type": "AudioPlayer.Stop"}));
}
