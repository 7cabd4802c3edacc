//! End-to-end generator tests: configuration, HTTP backend, normalization,
//! and fallback, with the remote API served by wiremock.

use studyflow_core::grade::GradeLevel;
use studyflow_core::homework::detect_questions;
use studyflow_core::model::Difficulty;
use studyflow_core::reading::chunk_reading_for_grade;
use studyflow_core::traits::ContentGenerator;
use studyflow_providers::{build_generator, ProviderConfig, StudyflowConfig};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WORKSHEET: &str = "1. What is a food chain?\n2. Explain how energy moves through a food web.";

fn openai_config(server: &MockServer) -> StudyflowConfig {
    let mut config = StudyflowConfig::default();
    config.providers.insert(
        "openai".into(),
        ProviderConfig::OpenAI {
            api_key: "sk-test".into(),
            base_url: Some(server.uri()),
            org_id: None,
        },
    );
    config
}

fn chat_reply(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": content}}],
        "model": "gpt-4.1-mini",
        "usage": {"prompt_tokens": 100, "completion_tokens": 50, "total_tokens": 150}
    })
}

#[tokio::test]
async fn remote_questions_are_normalized() {
    let server = MockServer::start().await;
    let reply = "```json\n[{\"index\": 1, \"prompt\": \"What is a food chain?\", \"difficulty\": \"Easy\"}, \
                 {\"prompt\": \"Explain how energy moves through a food web.\", \"difficulty\": \"hard\", \"estMinutes\": 7}]\n```";

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("Find all homework questions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(reply)))
        .expect(1)
        .mount(&server)
        .await;

    let generator = build_generator(&openai_config(&server));
    assert_eq!(generator.name(), "remote:openai");

    let questions = generator.detect_questions(WORKSHEET).await.unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].difficulty, Some(Difficulty::Easy));
    assert_eq!(questions[0].est_minutes, 3);
    assert_eq!(questions[1].index, 2);
    assert_eq!(questions[1].est_minutes, 7);
}

#[tokio::test]
async fn remote_chunks_get_recomputed_counts() {
    let server = MockServer::start().await;
    let reply = r#"[{"heading": "Energy", "chunkText": "Plants capture energy from sunlight.", "estMinutes": 12, "wordCount": 400}]"#;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(reply)))
        .mount(&server)
        .await;

    let generator = build_generator(&openai_config(&server));
    let chunks = generator
        .chunk_reading("Plants capture energy from sunlight.", GradeLevel::G6)
        .await
        .unwrap();
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].word_count, 5);
    assert_eq!(chunks[0].est_minutes, 1);
}

#[tokio::test]
async fn server_error_uses_deterministic_engine() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let generator = build_generator(&openai_config(&server));
    let questions = generator.detect_questions(WORKSHEET).await.unwrap();
    assert_eq!(questions, detect_questions(WORKSHEET));
}

#[tokio::test]
async fn bad_key_uses_deterministic_engine() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let text = "The river carries water to the sea. Fish live in the river.";
    let generator = build_generator(&openai_config(&server));
    let chunks = generator.chunk_reading(text, GradeLevel::G2).await.unwrap();
    assert_eq!(chunks, chunk_reading_for_grade(text, GradeLevel::G2));
}

#[tokio::test]
async fn anthropic_summary() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [{"type": "text", "text": "{\"summary\": \"Energy flows from the Sun to plants to animals.\", \"vocabulary\": [\"producer\"], \"keyConcepts\": [\"food chains\"]}"}],
            "model": "claude-sonnet-4-20250514",
            "usage": {"input_tokens": 80, "output_tokens": 30}
        })))
        .mount(&server)
        .await;

    let mut config = StudyflowConfig {
        default_provider: "anthropic".into(),
        ..StudyflowConfig::default()
    };
    config.providers.insert(
        "anthropic".into(),
        ProviderConfig::Anthropic {
            api_key: "sk-ant".into(),
            base_url: Some(server.uri()),
        },
    );

    let generator = build_generator(&config);
    let summary = generator.summarize(WORKSHEET, GradeLevel::G7).await.unwrap();
    assert_eq!(summary.summary, "Energy flows from the Sun to plants to animals.");
    assert_eq!(summary.vocabulary, vec!["producer"]);
}
